use std::collections::BTreeMap;
use std::io::{self, prelude::*};

use tracing::trace;

/// One unit of input.
pub type Symbol = u8;

/// Occurrence count of each distinct symbol in a source.
///
/// Ordered by symbol, so iterating (and serializing) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<Symbol, u64>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `input`.
    pub fn from_reader(mut input: impl BufRead) -> io::Result<Self> {
        let mut freqs = Self::new();
        loop {
            let buf = input.fill_buf()?;
            if buf.is_empty() {
                break;
            }

            freqs.add_all(buf);
            let n = buf.len();
            input.consume(n);
        }

        trace!(
            distinct = freqs.len(),
            total = freqs.total(),
            "counted symbol frequencies"
        );
        Ok(freqs)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut freqs = Self::new();
        freqs.add_all(bytes);
        freqs
    }

    fn add_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            *self.counts.entry(b).or_insert(0) += 1;
        }
    }

    /// Set the count for `symbol`, returning the previous count if there was one.
    pub fn insert(&mut self, symbol: Symbol, count: u64) -> Option<u64> {
        self.counts.insert(symbol, count)
    }

    pub fn get(&self, symbol: Symbol) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the original input.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(symbol, count)` pairs, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl FromIterator<(Symbol, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor};

    use super::*;

    #[test]
    fn abracadabra() {
        let freqs = FrequencyMap::from_bytes(b"abracadabra");

        let expected: FrequencyMap = [(b'a', 5), (b'b', 2), (b'c', 1), (b'd', 1), (b'r', 2)]
            .into_iter()
            .collect();
        assert_eq!(freqs, expected);
        assert_eq!(freqs.total(), 11);
    }

    #[test]
    fn empty_source() {
        let freqs = FrequencyMap::from_reader(Cursor::new(vec![])).unwrap();
        assert!(freqs.is_empty());
        assert_eq!(freqs.total(), 0);
    }

    /// A tiny read buffer forces the input to be counted across many
    /// `fill_buf` calls.
    #[test]
    fn counts_across_buffer_boundaries() {
        let input: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let reader = BufReader::with_capacity(7, Cursor::new(input.clone()));

        let freqs = FrequencyMap::from_reader(reader).unwrap();
        assert_eq!(freqs, FrequencyMap::from_bytes(&input));
        assert_eq!(freqs.len(), 256);
        assert_eq!(freqs.get(0), Some(4));
        assert_eq!(freqs.get(255), Some(3));
    }
}
