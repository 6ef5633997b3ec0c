use std::{
    fs::File,
    io::{prelude::*, BufReader, BufWriter},
    path::Path,
};

use tracing::{debug, info};

use crate::{
    bitio::{BitReader, BitWriter},
    code_table::CodeTable,
    decoder::Decoder,
    encoder::{self, EncodeStats},
    errors::Result,
    freq_table,
    frequency::FrequencyMap,
    tree::HuffmanTree,
};

/// Compress the file at `input` into `output`, writing its frequency table to
/// `freq_table_path`.
///
/// The input is read twice: once to count symbols, and once to encode them.
pub fn encode(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    freq_table_path: impl AsRef<Path>,
) -> Result<EncodeStats> {
    let input = input.as_ref();

    let freqs = FrequencyMap::from_reader(BufReader::new(File::open(input)?))?;
    freq_table::write(&freqs, BufWriter::new(File::create(freq_table_path)?))?;

    let mut writer = BitWriter::new(BufWriter::new(File::create(output)?));
    let stats = if freqs.is_empty() {
        EncodeStats::default()
    } else {
        let table = CodeTable::from_tree(&HuffmanTree::build(&freqs)?);
        debug!(distinct = table.len(), "built code table");

        encoder::encode(BufReader::new(File::open(input)?), &table, &mut writer)?
    };
    writer.finish()?;

    info!(
        input = %input.display(),
        symbols = stats.symbols,
        bits = stats.bits,
        "encoded"
    );
    Ok(stats)
}

/// Reconstruct the original file from `input` and its frequency table.
///
/// Returns the number of bytes written to `output`.
pub fn decode(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    freq_table_path: impl AsRef<Path>,
) -> Result<u64> {
    // Parse the whole table before touching the output.
    let freqs = freq_table::read(BufReader::new(File::open(freq_table_path)?))?;
    let mut decoder = Decoder::new(BitReader::new(BufReader::new(File::open(&input)?)), &freqs)?;

    let mut output = BufWriter::new(File::create(output)?);
    let mut written = 0;
    while let Some(chunk) = decoder.next_chunk()? {
        output.write_all(&chunk)?;
        written += chunk.len() as u64;
    }
    output.flush()?;

    info!(input = %input.as_ref().display(), symbols = written, "decoded");
    Ok(written)
}
