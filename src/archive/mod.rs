//! Buffer and file level compression entry points.
//!
//! Callers pick an [`Algorithm`] explicitly or let the file name decide; the
//! codec behind it stays hidden. Inference never falls back to a default: a
//! file whose extension is not recognized is an error, not a guess.

use camino::Utf8Path;
use tracing::{debug, warn};

use crate::codec::{self, Algorithm};
use crate::error::{CompressionError, DecompressionError, LoadError, StoreError};

/// Compress `input` with `algorithm`.
///
/// Empty input is accepted and yields the codec's (non-empty) framed encoding
/// of zero bytes, which [`decompress`] turns back into an empty buffer.
pub fn compress(input: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, CompressionError> {
    let primitives = codec::primitives_for(algorithm);
    let output = (primitives.compress)(input)
        .map_err(|source| CompressionError::Codec { algorithm, source })?;
    debug!(%algorithm, input = input.len(), output = output.len(), "compressed buffer");
    Ok(output)
}

/// Decompress `input`, which must have been produced by `algorithm`.
///
/// An empty `input` is rejected: every supported format has a non-empty
/// header, so zero bytes can only be a truncated or missing payload.
pub fn decompress(input: &[u8], algorithm: Algorithm) -> Result<Vec<u8>, DecompressionError> {
    if input.is_empty() {
        return Err(DecompressionError::Empty { algorithm });
    }
    let primitives = codec::primitives_for(algorithm);
    let output = (primitives.decompress)(input)
        .map_err(|source| DecompressionError::Corrupt { algorithm, source })?;
    debug!(%algorithm, input = input.len(), output = output.len(), "decompressed buffer");
    Ok(output)
}

/// Read the file at `path` and decompress its contents.
///
/// With `algorithm` set to `None` the algorithm comes from the path's
/// extension via [`codec::resolve_algorithm`].
pub fn load_archive(
    path: impl AsRef<Utf8Path>,
    algorithm: Option<Algorithm>,
) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let algorithm = match algorithm {
        Some(algorithm) => algorithm,
        None => infer(path).ok_or_else(|| LoadError::UnknownAlgorithm {
            path: path.to_owned(),
        })?,
    };
    let bytes = fs_err::read(path.as_std_path())
        .map_err(|source| LoadError::from_read(path.to_owned(), source))?;
    decompress(&bytes, algorithm).map_err(|source| {
        warn!(%path, %algorithm, error = %source, "archive failed to decompress");
        LoadError::DecompressionFailed {
            path: path.to_owned(),
            source,
        }
    })
}

/// Compress `input` and write it to `path`, replacing any existing file.
///
/// Resolves the algorithm exactly like [`load_archive`], so whatever this
/// writes can be read back by passing the same path and `algorithm`.
/// Returns the algorithm that was used.
pub fn store_archive(
    path: impl AsRef<Utf8Path>,
    input: &[u8],
    algorithm: Option<Algorithm>,
) -> Result<Algorithm, StoreError> {
    let path = path.as_ref();
    let algorithm = match algorithm {
        Some(algorithm) => algorithm,
        None => infer(path).ok_or_else(|| StoreError::UnknownAlgorithm {
            path: path.to_owned(),
        })?,
    };
    let compressed = compress(input, algorithm).map_err(|source| StoreError::CompressionFailed {
        path: path.to_owned(),
        source,
    })?;
    fs_err::write(path.as_std_path(), &compressed).map_err(|source| StoreError::IoFailure {
        path: path.to_owned(),
        source,
    })?;
    Ok(algorithm)
}

fn infer(path: &Utf8Path) -> Option<Algorithm> {
    let resolved = codec::resolve_algorithm(path);
    if let Some(algorithm) = resolved {
        debug!(%path, %algorithm, "inferred algorithm from extension");
    }
    resolved
}
