mod out_buf;

use tracing::{debug, trace};

use crate::{
    bitio::BitSource,
    errors::{corrupt, Error, Result},
    frequency::{FrequencyMap, Symbol},
    tree::{HuffmanTree, Node},
};

use self::out_buf::OutBuf;

/// Size of decompressed chunks (except possibly the last chunk, which may be
/// smaller).
pub const OUT_CHUNK_SIZE: usize = 32 * 1024;

/// Walks the Huffman tree against a packed bit stream.
///
/// Stops after exactly as many symbols as the frequency table counts; the
/// zero padding at the end of the stream is never decoded.
///
/// Implements iterator, producing chunks of bytes.
pub struct Decoder<S: BitSource> {
    source: S,

    /// `None` when the frequency table is empty, i.e. the input was empty.
    tree: Option<HuffmanTree>,

    /// Number of symbols in the original input.
    total: u64,

    /// Number of symbols decoded so far.
    decoded: u64,

    out_buf: OutBuf,

    /// Set once the end of the stream has been validated, or an error returned.
    done: bool,
}

impl<S: BitSource> Decoder<S> {
    pub fn new(source: S, freqs: &FrequencyMap) -> Result<Self> {
        Self::with_chunk_size(source, freqs, OUT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(source: S, freqs: &FrequencyMap, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidInput("output chunk size must be nonzero".into()));
        }

        // An empty table can only come from an empty input, and there's no
        // tree to build for it.
        let tree = if freqs.is_empty() {
            None
        } else {
            Some(HuffmanTree::build(freqs)?)
        };

        Ok(Self {
            source,
            tree,
            total: freqs.total(),
            decoded: 0,
            out_buf: OutBuf::with_capacity(chunk_size),
            done: false,
        })
    }

    /// Decode up to one chunk of output.
    ///
    /// Return `Ok(None)` once every symbol has been produced.
    pub fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }

        let result = self.fill_chunk();
        if result.is_err() {
            self.done = true;
        }
        result
    }

    fn fill_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        if let Some(tree) = &self.tree {
            while self.decoded < self.total && !self.out_buf.is_full() {
                if self.source.is_exhausted()? {
                    return corrupt(format!(
                        "stream ended after {} of {} symbols",
                        self.decoded, self.total
                    ));
                }

                let symbol = decode_symbol(&mut self.source, tree.root())?;
                self.out_buf.push(symbol);
                self.decoded += 1;
            }
        }

        if self.decoded == self.total {
            self.validate_eof()?;
            self.done = true;
            debug!(symbols = self.total, "decoded payload");
        }

        if self.out_buf.is_empty() {
            Ok(None)
        } else {
            let chunk = self.out_buf.take();
            trace!(len = chunk.len(), "decoded chunk");
            Ok(Some(chunk))
        }
    }

    /// Only padding may follow the last symbol, and only within its byte.
    fn validate_eof(&mut self) -> Result<()> {
        self.source.align();
        if !self.source.is_exhausted()? {
            return corrupt(format!(
                "expected end of stream after {} symbols, but got more bytes",
                self.total
            ));
        }
        Ok(())
    }
}

impl<S: BitSource> Iterator for Decoder<S> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk().transpose()
    }
}

/// Follow one root-to-leaf path.
fn decode_symbol(source: &mut impl BitSource, root: &Node) -> Result<Symbol> {
    // A lone leaf has the one-bit code `0`.
    if let Node::Leaf { symbol, .. } = root {
        return match read_path_bit(source)? {
            false => Ok(*symbol),
            true => corrupt("got a 1 bit, but the only code is 0"),
        };
    }

    let mut node = root;
    loop {
        match node {
            Node::Leaf { symbol, .. } => return Ok(*symbol),
            Node::Internal { left, right, .. } => {
                node = if read_path_bit(source)? {
                    right.as_ref()
                } else {
                    left.as_ref()
                };
            }
        }
    }
}

fn read_path_bit(source: &mut impl BitSource) -> Result<bool> {
    if source.is_exhausted()? {
        return corrupt("stream ended in the middle of a code");
    }
    Ok(source.read_bit()?)
}
