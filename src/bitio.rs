//! Bit-level reading and writing on top of byte streams.
//!
//! Bits are packed MSB-first: the first bit written lands in the most
//! significant bit of the first byte. The last byte is padded with zeros;
//! readers can't tell padding from data, so callers must know how much to read.

use std::io::{self, prelude::*, ErrorKind};

use bitvec::prelude::*;

use crate::frequency::Symbol;

/// Something that yields bits (and whole symbols) one at a time.
pub trait BitSource {
    /// True once no bits are left, including padding bits in a partly-read byte.
    fn is_exhausted(&mut self) -> io::Result<bool>;

    /// Read the next bit. Errors with `UnexpectedEof` when exhausted.
    fn read_bit(&mut self) -> io::Result<bool>;

    /// Read the next 8 bits as a symbol, MSB first.
    fn read_symbol(&mut self) -> io::Result<Symbol>;

    /// Discard the unread bits of the current byte, if any.
    fn align(&mut self);
}

/// Something that accepts bits (and whole symbols) one at a time.
pub trait BitSink {
    fn write_bit(&mut self, bit: bool) -> io::Result<()>;

    /// Write the 8 bits of `symbol`, MSB first.
    fn write_symbol(&mut self, symbol: Symbol) -> io::Result<()>;

    /// Flush every complete byte to the underlying writer. A partial byte
    /// stays buffered until more bits arrive or the sink is finished.
    fn flush(&mut self) -> io::Result<()>;

    fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> io::Result<()> {
        for bit in bits {
            self.write_bit(*bit)?;
        }
        Ok(())
    }
}

pub struct BitReader<R: BufRead> {
    input: R,

    /// The byte currently being read.
    curr_byte: u8,

    /// How many bits of `curr_byte` haven't been read yet (0 to 8).
    unread: usize,
}

impl<R: BufRead> BitReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            curr_byte: 0,
            unread: 0,
        }
    }

    fn next_byte(&mut self) -> io::Result<u8> {
        let byte = match self.input.fill_buf()?.first() {
            Some(&b) => b,
            None => return Err(ErrorKind::UnexpectedEof.into()),
        };
        self.input.consume(1);
        Ok(byte)
    }
}

impl<R: BufRead> BitSource for BitReader<R> {
    fn is_exhausted(&mut self) -> io::Result<bool> {
        if self.unread > 0 {
            return Ok(false);
        }
        Ok(self.input.fill_buf()?.is_empty())
    }

    fn read_bit(&mut self) -> io::Result<bool> {
        if self.unread == 0 {
            self.curr_byte = self.next_byte()?;
            self.unread = 8;
        }

        let bit = self.curr_byte.view_bits::<Msb0>()[8 - self.unread];
        self.unread -= 1;
        Ok(bit)
    }

    fn read_symbol(&mut self) -> io::Result<Symbol> {
        // Byte-aligned: no need to go bit by bit.
        if self.unread == 0 {
            return self.next_byte();
        }

        let mut symbol: Symbol = 0;
        let bits = symbol.view_bits_mut::<Msb0>();
        for i in 0..Symbol::BITS as usize {
            bits.set(i, self.read_bit()?);
        }
        Ok(symbol)
    }

    fn align(&mut self) {
        self.unread = 0;
    }
}

pub struct BitWriter<W: Write> {
    output: W,

    /// The byte currently being filled. Unfilled bits are zero.
    curr_byte: u8,

    /// How many bits of `curr_byte` have been filled (0 to 7).
    filled: usize,

    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            curr_byte: 0,
            filled: 0,
            bits_written: 0,
        }
    }

    /// Total bits written so far, not counting padding.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Pad the last byte with zeros, flush, and hand back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        if self.filled > 0 {
            self.output.write_all(&[self.curr_byte])?;
            self.curr_byte = 0;
            self.filled = 0;
        }
        self.output.flush()?;
        Ok(self.output)
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.curr_byte.view_bits_mut::<Msb0>().set(self.filled, bit);
        self.filled += 1;
        self.bits_written += 1;

        if self.filled == 8 {
            self.output.write_all(&[self.curr_byte])?;
            self.curr_byte = 0;
            self.filled = 0;
        }
        Ok(())
    }

    fn write_symbol(&mut self, symbol: Symbol) -> io::Result<()> {
        if self.filled == 0 {
            self.output.write_all(&[symbol])?;
            self.bits_written += u64::from(Symbol::BITS);
            return Ok(());
        }

        for bit in symbol.view_bits::<Msb0>() {
            self.write_bit(*bit)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}
