use std::io;

/// An error encountered while encoding or decoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error yielded by an underlying input or output stream.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A malformed line in a frequency table.
    #[error("malformed frequency table, line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The compressed bits don't agree with the tree rebuilt from the
    /// frequency table. Only happens on truncated or corrupted input.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}

/// Convenience for bailing out of a decode with a `CorruptStream` error.
pub(crate) fn corrupt<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::CorruptStream(msg.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_pass_through_unchanged() {
        let e = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let back = io::Error::from(e);
        assert_eq!(back.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn decode_errors_become_invalid_data() {
        let back = io::Error::from(Error::CorruptStream("bad bits".into()));
        assert_eq!(back.kind(), io::ErrorKind::InvalidData);

        let inner = back.get_ref().and_then(|e| e.downcast_ref::<Error>());
        assert!(matches!(inner, Some(Error::CorruptStream(_))));
    }
}
