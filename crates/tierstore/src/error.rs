//! Error types for tierstore

use std::fmt;
use std::io;

/// Result type alias for TierSim operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for simulator construction and input handling
#[derive(Debug)]
pub enum Error {
    /// Cache capacity must be at least one line
    InvalidCapacity(usize),

    /// Write policy name not recognized
    UnknownPolicy(String),

    /// A timing cost was zero
    InvalidTiming(&'static str),

    /// Trace parse error
    Parse {
        /// 1-based line number in the trace
        line: usize,
        /// What went wrong
        msg: String,
    },

    /// I/O error
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(cap) => {
                write!(f, "Invalid cache capacity: {} (must be at least 1)", cap)
            }
            Error::UnknownPolicy(name) => write!(
                f,
                "Unknown write policy '{}' (expected write_through or write_back)",
                name
            ),
            Error::InvalidTiming(field) => write!(f, "Invalid timing: {} must be positive", field),
            Error::Parse { line, msg } => write!(f, "Parse error at line {}: {}", line, msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
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

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
