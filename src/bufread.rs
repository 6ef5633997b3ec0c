use std::io::{self, prelude::*};

use crate::errors::Result;

/// Turns an iterator of decoded chunks into a byte stream.
///
/// [`crate::Decoder`] is one such iterator. Errors surface as `io::Error`s of
/// kind `InvalidData` wrapping the original [`crate::Error`], except I/O
/// errors, which pass through as they were.
pub struct DecodedReader<I> {
    chunks: I,

    /// The chunk being read from, and how much of it has been consumed.
    chunk: Vec<u8>,
    pos: usize,
}

impl<I: Iterator<Item = Result<Vec<u8>>>> DecodedReader<I> {
    pub fn new(chunks: I) -> Self {
        Self {
            chunks,
            chunk: Vec::new(),
            pos: 0,
        }
    }
}

impl<I: Iterator<Item = Result<Vec<u8>>>> BufRead for DecodedReader<I> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        // Skip over any empty chunks; running out of chunks leaves `chunk`
        // empty, which reads as EOF.
        while self.pos == self.chunk.len() {
            match self.chunks.next().transpose()? {
                Some(next) => {
                    self.chunk = next;
                    self.pos = 0;
                }
                None => break,
            }
        }

        Ok(&self.chunk[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.chunk.len());
    }
}

impl<I: Iterator<Item = Result<Vec<u8>>>> Read for DecodedReader<I> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);

        Ok(n)
    }
}
