use std::io::prelude::*;

use tracing::trace;

use crate::{
    bitio::BitSink,
    code_table::CodeTable,
    errors::{Error, Result},
};

/// What an encoding pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Symbols read from the input.
    pub symbols: u64,

    /// Payload bits written, not counting padding.
    pub bits: u64,
}

/// Re-read `input`, writing each symbol's code to `sink`.
///
/// The input must only contain symbols present in `table`; a missing symbol
/// means the input changed since the table was built.
pub fn encode(
    mut input: impl BufRead,
    table: &CodeTable,
    sink: &mut impl BitSink,
) -> Result<EncodeStats> {
    let mut stats = EncodeStats::default();

    loop {
        let buf = input.fill_buf()?;
        if buf.is_empty() {
            break;
        }

        for &symbol in buf {
            let code = table.get(symbol).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "symbol {symbol:#04x} at offset {} has no code; \
                    did the input change since it was counted?",
                    stats.symbols
                ))
            })?;
            sink.write_bits(code)?;

            stats.symbols += 1;
            stats.bits += code.len() as u64;
        }

        let n = buf.len();
        input.consume(n);
    }

    sink.flush()?;
    trace!(symbols = stats.symbols, bits = stats.bits, "encoded payload");

    Ok(stats)
}
