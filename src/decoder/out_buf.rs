/// A fixed size output buffer of decoded symbols.
///
/// Symbols are pushed one at a time; once the buffer is full, the caller
/// drains it into an owned chunk with `take()`.
pub struct OutBuf {
    buf: Vec<u8>,
    capacity: usize,
}

impl OutBuf {
    pub fn with_capacity(capacity: usize) -> Self {
        assert_ne!(capacity, 0);

        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() >= self.capacity
    }

    pub fn push(&mut self, byte: u8) {
        debug_assert!(!self.is_full());
        self.buf.push(byte);
    }

    /// Move the contents of the buffer out, leaving it empty.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.buf, Vec::with_capacity(self.capacity))
    }
}
