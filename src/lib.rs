//! Static Huffman compression of byte streams.
//!
//! Encoding produces two artifacts: the packed bit payload, and a text
//! frequency table (see [`freq_table`]) from which the decoder rebuilds the
//! same Huffman tree.

mod bufread;
pub mod bitio;
pub mod code_table;
mod decoder;
pub mod encoder;
mod errors;
mod files;
pub mod freq_table;
pub mod frequency;
pub mod tree;

use std::io::{prelude::*, Cursor};

use tracing::debug;

pub use crate::bufread::DecodedReader;
pub use crate::decoder::{Decoder, OUT_CHUNK_SIZE};
pub use crate::errors::{Error, Result};
pub use crate::files::{decode, encode};
pub use crate::frequency::{FrequencyMap, Symbol};

use crate::{
    bitio::{BitReader, BitWriter},
    code_table::CodeTable,
    tree::HuffmanTree,
};

/// The output of [`compress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub frequencies: FrequencyMap,

    /// Packed code bits, zero-padded to a whole byte.
    pub payload: Vec<u8>,

    /// Length of the payload in bits, not counting padding.
    pub bit_len: u64,
}

pub fn compress(input: &[u8]) -> Result<Compressed> {
    let frequencies = FrequencyMap::from_bytes(input);
    if frequencies.is_empty() {
        return Ok(Compressed {
            frequencies,
            payload: vec![],
            bit_len: 0,
        });
    }

    let table = CodeTable::from_tree(&HuffmanTree::build(&frequencies)?);
    let mut writer = BitWriter::new(Vec::with_capacity(input.len()));
    let stats = encoder::encode(input, &table, &mut writer)?;
    let payload = writer.finish()?;

    debug!(
        symbols = stats.symbols,
        distinct = frequencies.len(),
        bits = stats.bits,
        "compressed"
    );
    Ok(Compressed {
        frequencies,
        payload,
        bit_len: stats.bits,
    })
}

pub fn decompress(payload: &[u8], frequencies: &FrequencyMap) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let decoder = Decoder::new(BitReader::new(payload), frequencies)?;
    for chunk in decoder {
        out.extend_from_slice(&chunk?);
    }
    Ok(out)
}

/// Decode a packed payload as a stream, one chunk at a time.
pub fn decode_reader(payload: impl BufRead, frequencies: &FrequencyMap) -> Result<impl BufRead> {
    let decoder = Decoder::new(BitReader::new(payload), frequencies)?;
    Ok(DecodedReader::new(decoder))
}

/// Convenience for decoding from an in-memory payload with [`decode_reader`].
pub fn decode_bytes(payload: Vec<u8>, frequencies: &FrequencyMap) -> Result<impl BufRead> {
    decode_reader(Cursor::new(payload), frequencies)
}
