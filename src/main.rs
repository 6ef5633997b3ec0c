use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Static Huffman compression.
#[derive(Parser, Debug)]
#[command(name = "huff", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress INPUT into OUTPUT, writing the frequency table alongside.
    Encode(Paths),

    /// Restore a file compressed by `encode`, using its frequency table.
    Decode(Paths),
}

#[derive(Args, Debug)]
struct Paths {
    /// File to read
    #[arg(env = "HUFF_INPUT")]
    input: PathBuf,

    /// File to write
    #[arg(env = "HUFF_OUTPUT")]
    output: PathBuf,

    /// Frequency table (written by encode, read by decode)
    #[arg(long, short = 'f', env = "HUFF_FREQ_TABLE", default_value = "freq.txt")]
    freq_table: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("huff=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Encode(paths) => {
            huff::encode(&paths.input, &paths.output, &paths.freq_table)
                .with_context(|| format!("encoding {}", paths.input.display()))?;
        }
        Command::Decode(paths) => {
            huff::decode(&paths.input, &paths.output, &paths.freq_table)
                .with_context(|| format!("decoding {}", paths.input.display()))?;
        }
    }

    Ok(())
}
