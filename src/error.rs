//! Errors raised while building images
use std::io;
use thiserror::Error;

/// Result type for imaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading data or building an image
///
/// Nothing inside the numerical kernel fails: every variant is raised
/// while constructing a region, loading measurements, or moving an image
/// in or out of a file.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument is outside its valid domain (e.g. a zero cell size)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two pieces of input data disagree with each other
    #[error("Data contract violation: {0}")]
    DataContractViolation(String),

    /// An image was requested before an algorithm was selected
    #[error("No imaging algorithm selected")]
    AlgorithmNotSelected,

    /// A line in a text table could not be parsed
    #[error("{origin}:{line}: {reason}")]
    Parse {
        /// Where the line came from (usually a file path)
        origin: String,
        /// The 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Reading or writing a file failed
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Reading or writing a binary image file failed
    #[error(transparent)]
    Binary(#[from] binrw::Error),

    /// Writing an Avro file failed
    #[error(transparent)]
    Avro(#[from] apache_avro::Error),

    /// A configuration file could not be decoded
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn parse(origin: &str, line: usize, reason: impl Into<String>) -> Self {
        Error::Parse {
            origin: origin.to_string(),
            line,
            reason: reason.into(),
        }
    }
}
