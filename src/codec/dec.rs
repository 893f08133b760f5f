//! Whole-buffer decoders, one per algorithm.
//!
//! Every decoder reads exactly one stream spanning the whole input. Truncated
//! streams, foreign data and bytes trailing a complete stream are reported as
//! an `io::Error` instead of a partial buffer.

use std::io::{self, Read};

use flate2::{Decompress, FlushDecompress, Status};
use lz4_flex::frame::FrameDecoder;
use xz2::read::XzDecoder;

const MIN_GROWTH: usize = 256;

const LZ4_MAGIC: [u8; 4] = [0x04, 0x22, 0x4D, 0x18];
const LZ4_FLG_CONTENT_SIZE: u8 = 0x08;
const LZ4_FLG_CONTENT_CHECKSUM: u8 = 0x04;
const LZ4_END_MARK: [u8; 4] = [0; 4];

/// Decode a single LZ4 frame.
///
/// `FrameDecoder` treats end of input at a block boundary as a clean EOF, so
/// completeness is checked here: against the declared content size when the
/// frame has one, otherwise by requiring the end mark as the last block.
pub fn lz4(input: &[u8]) -> io::Result<Vec<u8>> {
    let Some(flg) = input.strip_prefix(&LZ4_MAGIC).and_then(|rest| rest.first()) else {
        return Err(invalid_data("not an lz4 frame"));
    };
    let mut remaining = input;
    let out = read_all(FrameDecoder::new(&mut remaining))?;
    if !remaining.is_empty() {
        return Err(trailing_data("lz4", remaining.len()));
    }
    let complete = if flg & LZ4_FLG_CONTENT_SIZE != 0 {
        input
            .get(6..14)
            .and_then(|bytes| <[u8; 8]>::try_from(bytes).ok())
            .is_some_and(|size| u64::from_le_bytes(size) == out.len() as u64)
    } else {
        let trailer = if flg & LZ4_FLG_CONTENT_CHECKSUM != 0 { 8 } else { 4 };
        input.len() >= trailer && input[input.len() - trailer..].starts_with(&LZ4_END_MARK)
    };
    if !complete {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "lz4 frame ended before its end mark",
        ));
    }
    Ok(out)
}

/// Decode a zlib stream.
///
/// Drives the inflater by hand: `flate2::read::ZlibDecoder` reports a stream
/// cut short before its adler32 trailer as a clean EOF.
pub fn zlib(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(input.len().saturating_mul(2).max(MIN_GROWTH));
    loop {
        let (in_before, out_before) = (inflater.total_in(), inflater.total_out());
        let consumed = usize::try_from(in_before).map_err(io::Error::other)?;
        let status =
            inflater.decompress_vec(&input[consumed..], &mut out, FlushDecompress::Finish)?;
        if status == Status::StreamEnd {
            let left = input.len() as u64 - inflater.total_in();
            if left != 0 {
                return Err(trailing_data("zlib", left));
            }
            return Ok(out);
        }
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(MIN_GROWTH));
            continue;
        }
        if inflater.total_in() == in_before && inflater.total_out() == out_before {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "zlib stream ended before its trailer",
            ));
        }
    }
}

/// Decode an xz container.
pub fn xz(input: &[u8]) -> io::Result<Vec<u8>> {
    read_all(XzDecoder::new(input))
}

/// Decode a sequence of zstd frames.
///
/// zstd itself rejects truncated frames and bytes that do not form a frame.
pub fn zstd(input: &[u8]) -> io::Result<Vec<u8>> {
    zstd::stream::decode_all(input)
}

fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

fn invalid_data(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn trailing_data(codec: &str, left: impl std::fmt::Display) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{left} bytes trail the {codec} stream"),
    )
}
