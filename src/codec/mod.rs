//! Algorithm selection: codec primitives and file-name inference.

use std::fmt;
use std::io;
use std::str::FromStr;

use camino::Utf8Path;
use serde::{Serialize, Serializer};

use crate::error::UserInputError;

pub mod dec;
pub mod enc;

/// Compression algorithms supported by squashbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// LZ4 frames. Fastest, lowest ratio.
    Fast,
    /// zlib streams. Balanced between speed and ratio.
    Balanced,
    /// xz containers (LZMA2). Slowest, highest ratio.
    HighRatio,
    /// Zstandard frames. Faster and denser than zlib.
    PlatformOptimized,
}

/// Raw codec entry point: whole buffer in, whole buffer out.
pub type RawFn = fn(&[u8]) -> io::Result<Vec<u8>>;

/// The pair of codec entry points backing one [`Algorithm`].
#[derive(Clone, Copy)]
pub struct Primitives {
    pub compress: RawFn,
    pub decompress: RawFn,
}

impl Algorithm {
    /// Every algorithm, in declaration order.
    pub const ALL: [Algorithm; 4] = [
        Self::Fast,
        Self::Balanced,
        Self::HighRatio,
        Self::PlatformOptimized,
    ];

    /// Conventional file suffix (without the dot).
    ///
    /// This is the table [`resolve_algorithm`] reads. Persisted file names
    /// depend on it, so a suffix must never move to another algorithm.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Fast => "lz4",
            Self::Balanced => "zlib",
            Self::HighRatio => "xz",
            Self::PlatformOptimized => "zst",
        }
    }

    /// Guess the algorithm from the leading bytes of a payload.
    ///
    /// Advisory only; [`crate::archive::load_archive`] never falls back to it.
    #[must_use]
    pub fn detect(header: &[u8]) -> Option<Self> {
        if header.starts_with(&[0x04, 0x22, 0x4D, 0x18]) {
            Some(Self::Fast)
        } else if header.starts_with(&[0xFD, b'7', b'z', b'X', b'Z', 0x00]) {
            Some(Self::HighRatio)
        } else if header.starts_with(&[0x28, 0xB5, 0x2F, 0xFD]) {
            Some(Self::PlatformOptimized)
        } else if is_zlib_header(header) {
            Some(Self::Balanced)
        } else {
            None
        }
    }
}

// CM must be deflate and CMF/FLG must be a multiple of 31 (RFC 1950 2.2).
fn is_zlib_header(header: &[u8]) -> bool {
    match header {
        [cmf, flg, ..] => cmf & 0x0F == 8 && ((u16::from(*cmf) << 8) | u16::from(*flg)) % 31 == 0,
        _ => false,
    }
}

/// Resolve the algorithm implied by a path's extension.
///
/// Matching is ASCII case-insensitive. Returns `None` when the last path
/// component has no extension or the extension is not in the table.
#[must_use]
pub fn resolve_algorithm(path: &Utf8Path) -> Option<Algorithm> {
    let ext = path.extension()?;
    Algorithm::ALL
        .into_iter()
        .find(|algorithm| algorithm.extension().eq_ignore_ascii_case(ext))
}

/// Look up the codec entry points for an algorithm.
#[must_use]
pub fn primitives_for(algorithm: Algorithm) -> Primitives {
    match algorithm {
        Algorithm::Fast => Primitives {
            compress: enc::lz4,
            decompress: dec::lz4,
        },
        Algorithm::Balanced => Primitives {
            compress: enc::zlib,
            decompress: dec::zlib,
        },
        Algorithm::HighRatio => Primitives {
            compress: enc::xz,
            decompress: dec::xz,
        },
        Algorithm::PlatformOptimized => Primitives {
            compress: enc::zstd,
            decompress: dec::zstd,
        },
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => write!(f, "lz4"),
            Self::Balanced => write!(f, "zlib"),
            Self::HighRatio => write!(f, "xz"),
            Self::PlatformOptimized => write!(f, "zstd"),
        }
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Algorithm {
    type Err = UserInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lz4" | "fast" => Ok(Self::Fast),
            "zlib" | "balanced" => Ok(Self::Balanced),
            "xz" | "lzma" | "high-ratio" => Ok(Self::HighRatio),
            "zstd" | "platform-optimized" => Ok(Self::PlatformOptimized),
            other => Err(UserInputError::new(format!("unknown algorithm: {other}"))),
        }
    }
}
