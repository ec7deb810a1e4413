/// All errors that can occur while scanning and tabulating header streams.
#[derive(Debug)]
pub enum Error {
    /// The first record of a stream does not carry the `SIMPLE  =` prefix.
    NotFits,
    /// The stream ended in the middle of an 80-byte card record.
    TruncatedCard,
    /// The aggregator finished without a single input record.
    NoRecords,
    /// An I/O error from the standard library.
    Io(std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFits => write!(f, "not a FITS stream"),
            Error::TruncatedCard => write!(f, "truncated card record"),
            Error::NoRecords => write!(f, "no input records"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
