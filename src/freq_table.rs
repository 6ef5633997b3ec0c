//! The persisted frequency table.
//!
//! One line per distinct symbol, ascending by symbol:
//!
//! ```text
//! 01100001 : 5
//! 01100010 : 2
//! ```
//!
//! The symbol is written as its 8-bit binary representation, followed by
//! ` : ` and the decimal count. This is everything the decoder needs to
//! rebuild the encoder's tree.

use std::io::{self, prelude::*};

use crate::{
    errors::{Error, Result},
    frequency::{FrequencyMap, Symbol},
};

const DELIMITER: char = ':';
const SYMBOL_WIDTH: usize = Symbol::BITS as usize;

pub fn format(freqs: &FrequencyMap) -> String {
    freqs
        .iter()
        .map(|(symbol, count)| format!("{symbol:0SYMBOL_WIDTH$b} {DELIMITER} {count}\n"))
        .collect()
}

pub fn write(freqs: &FrequencyMap, mut out: impl Write) -> io::Result<()> {
    out.write_all(format(freqs).as_bytes())?;
    out.flush()
}

/// Read a whole table. Either every line parses, or nothing is returned.
pub fn read(input: impl BufRead) -> Result<FrequencyMap> {
    let mut freqs = FrequencyMap::new();

    // Split on raw bytes, so that a non-UTF-8 line is a parse error and only
    // real read failures come back as `Io`.
    for (i, line) in input.split(b'\n').enumerate() {
        let line = line?;
        let line_no = i + 1;
        let parse_error = |reason| Error::Parse {
            line: line_no,
            reason,
        };

        let line = std::str::from_utf8(&line)
            .map_err(|e| parse_error(format!("line is not valid UTF-8: {e}")))?;
        if line.trim().is_empty() {
            continue;
        }

        let (symbol, count) = parse_line(line).map_err(parse_error)?;

        if freqs.insert(symbol, count).is_some() {
            return Err(Error::Parse {
                line: line_no,
                reason: format!("duplicate entry for symbol {symbol:0SYMBOL_WIDTH$b}"),
            });
        }
    }

    Ok(freqs)
}

pub fn parse(text: &str) -> Result<FrequencyMap> {
    read(text.as_bytes())
}

fn parse_line(line: &str) -> std::result::Result<(Symbol, u64), String> {
    let (symbol, count) = line
        .split_once(DELIMITER)
        .ok_or_else(|| format!("missing '{DELIMITER}' delimiter in {line:?}"))?;
    let (symbol, count) = (symbol.trim(), count.trim());

    if symbol.len() != SYMBOL_WIDTH || !symbol.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(format!(
            "symbol must be {SYMBOL_WIDTH} binary digits, got {symbol:?}"
        ));
    }
    let symbol = Symbol::from_str_radix(symbol, 2).map_err(|e| format!("{symbol:?}: {e}"))?;

    // `u64::from_str` would also accept a leading '+'.
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("count must be a decimal number, got {count:?}"));
    }
    let count = count
        .parse::<u64>()
        .map_err(|e| format!("count {count:?}: {e}"))?;

    Ok((symbol, count))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn abracadabra_text() {
        let freqs = FrequencyMap::from_bytes(b"abracadabra");
        let expected = "\
01100001 : 5
01100010 : 2
01100011 : 1
01100100 : 1
01110010 : 2
";
        assert_eq!(format(&freqs), expected);
    }

    #[test]
    fn round_trip_every_byte() {
        let freqs: FrequencyMap = (0..=255u8).map(|s| (s, u64::from(s) * 1000 + 1)).collect();
        assert_eq!(parse(&format(&freqs)).unwrap(), freqs);
    }

    #[test]
    fn round_trip_large_count() {
        let freqs: FrequencyMap = [(0, u64::MAX), (0b1000_0000, 1)].into_iter().collect();
        assert_eq!(parse(&format(&freqs)).unwrap(), freqs);
    }

    #[test]
    fn empty_table() {
        assert_eq!(format(&FrequencyMap::new()), "");
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n").unwrap().is_empty());
    }

    /// Tables written without a trailing newline, or with loose spacing, are
    /// still accepted.
    #[test]
    fn lenient_whitespace() {
        let freqs = parse("01100001:5\n  01100010   :   2").unwrap();
        let expected: FrequencyMap = [(b'a', 5), (b'b', 2)].into_iter().collect();
        assert_eq!(freqs, expected);
    }

    #[test_case("01100001 5" ; "missing delimiter")]
    #[test_case("0110000 : 5" ; "symbol too short")]
    #[test_case("011000011 : 5" ; "symbol too long")]
    #[test_case("0110002a : 5" ; "symbol not binary")]
    #[test_case("01100001 : five" ; "count not numeric")]
    #[test_case("01100001 : -5" ; "negative count")]
    #[test_case("01100001 : +5" ; "signed count")]
    #[test_case("01100001 : " ; "missing count")]
    #[test_case("01100001 : 99999999999999999999999" ; "count overflows")]
    fn malformed_line(line: &str) {
        let text = format!("01100010 : 2\n{line}\n01100011 : 1\n");
        match parse(&text) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn non_utf8_line() {
        let err = read(&b"01100001 : 5\n\xff\xfe : 3\n"[..]).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err:?}");
    }

    /// Windows line endings are trimmed along with the other whitespace.
    #[test]
    fn crlf_lines() {
        let freqs = parse("01100001 : 5\r\n01100010 : 2\r\n").unwrap();
        let expected: FrequencyMap = [(b'a', 5), (b'b', 2)].into_iter().collect();
        assert_eq!(freqs, expected);
    }

    #[test]
    fn duplicate_symbol() {
        let err = parse("01100001 : 5\n01100001 : 3\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }
}
