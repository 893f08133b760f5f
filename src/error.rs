//! Typed failures for every facade operation, plus CLI input errors.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::codec::Algorithm;

/// Represents a user input error (invalid flags, unknown algorithm names, etc.).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UserInputError(pub String);

impl UserInputError {
    /// Convenience constructor.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The codec refused to compress a buffer.
#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("{algorithm} compression failed")]
    Codec {
        algorithm: Algorithm,
        #[source]
        source: io::Error,
    },
}

/// A buffer could not be decompressed with the requested algorithm.
#[derive(Debug, Error)]
pub enum DecompressionError {
    #[error("cannot {algorithm}-decompress an empty buffer")]
    Empty { algorithm: Algorithm },
    #[error("payload is not valid {algorithm} data (corrupt or produced by another algorithm)")]
    Corrupt {
        algorithm: Algorithm,
        #[source]
        source: io::Error,
    },
}

impl DecompressionError {
    /// Algorithm the caller asked for.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Empty { algorithm } | Self::Corrupt { algorithm, .. } => *algorithm,
        }
    }
}

/// Failures of [`crate::archive::load_archive`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("archive not found: {path}")]
    NotFound {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read archive {path}")]
    IoFailure {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot infer a compression algorithm from {path}")]
    UnknownAlgorithm { path: Utf8PathBuf },
    #[error("failed to decompress {path}")]
    DecompressionFailed {
        path: Utf8PathBuf,
        #[source]
        source: DecompressionError,
    },
}

impl LoadError {
    pub(crate) fn from_read(path: Utf8PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path, source }
        } else {
            Self::IoFailure { path, source }
        }
    }
}

/// Failures of [`crate::archive::store_archive`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot infer a compression algorithm from {path}")]
    UnknownAlgorithm { path: Utf8PathBuf },
    #[error("failed to compress data for {path}")]
    CompressionFailed {
        path: Utf8PathBuf,
        #[source]
        source: CompressionError,
    },
    #[error("failed to write archive {path}")]
    IoFailure {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}
