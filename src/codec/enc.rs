//! Whole-buffer encoders, one per algorithm.

use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression as ZlibLevel;
use lz4_flex::frame::{BlockSize, FrameEncoder, FrameInfo};
use xz2::write::XzEncoder;

const XZ_PRESET: u32 = 6;
const ZSTD_LEVEL: i32 = 3;

/// Encode `input` as a single LZ4 frame.
///
/// The frame declares its content size and carries a content checksum so
/// [`super::dec::lz4`] can tell a complete frame from one cut at a block
/// boundary.
pub fn lz4(input: &[u8]) -> io::Result<Vec<u8>> {
    let info = FrameInfo::new()
        .block_size(BlockSize::Max64KB)
        .content_size(Some(input.len() as u64))
        .content_checksum(true);
    let mut encoder = FrameEncoder::with_frame_info(info, Vec::new());
    encoder.write_all(input)?;
    encoder.finish().map_err(io::Error::other)
}

/// Encode `input` as a zlib stream at the default level.
pub fn zlib(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), ZlibLevel::default());
    encoder.write_all(input)?;
    encoder.finish()
}

/// Encode `input` as an xz container.
pub fn xz(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = XzEncoder::new(Vec::new(), XZ_PRESET);
    encoder.write_all(input)?;
    encoder.finish()
}

/// Encode `input` as a single zstd frame.
pub fn zstd(input: &[u8]) -> io::Result<Vec<u8>> {
    zstd::stream::encode_all(input, ZSTD_LEVEL)
}
