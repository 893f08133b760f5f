//! File-level load/store checks.

use std::fs;

use anyhow::Result;
use camino::Utf8PathBuf;
use squashbox::archive::{compress, load_archive, store_archive};
use squashbox::codec::Algorithm;
use squashbox::error::{DecompressionError, LoadError, StoreError};
use tempfile::tempdir;

fn temp_utf8_path(dir: &tempfile::TempDir, segment: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(segment)).expect("utf8 temp path")
}

#[test]
fn missing_file_is_not_found() {
    let result = load_archive("/nonexistent/path.lz4", None);
    assert!(matches!(result, Err(LoadError::NotFound { .. })), "{result:?}");
}

#[test]
fn directory_is_an_io_failure() -> Result<()> {
    let temp = tempdir()?;
    let dir = temp_utf8_path(&temp, "folder.zst");
    fs::create_dir(dir.as_std_path())?;

    let result = load_archive(&dir, None);
    assert!(matches!(result, Err(LoadError::IoFailure { .. })), "{result:?}");
    Ok(())
}

#[test]
fn unknown_extension_fails_without_guessing() -> Result<()> {
    let temp = tempdir()?;
    let path = temp_utf8_path(&temp, "payload.bin");
    fs::write(path.as_std_path(), compress(b"payload", Algorithm::Fast)?)?;

    let result = load_archive(&path, None);
    assert!(matches!(result, Err(LoadError::UnknownAlgorithm { .. })), "{result:?}");

    let no_extension = temp_utf8_path(&temp, "payload");
    fs::write(no_extension.as_std_path(), compress(b"payload", Algorithm::Fast)?)?;
    let result = load_archive(&no_extension, None);
    assert!(matches!(result, Err(LoadError::UnknownAlgorithm { .. })), "{result:?}");
    Ok(())
}

#[test]
fn explicit_algorithm_overrides_extension() -> Result<()> {
    let temp = tempdir()?;
    let path = temp_utf8_path(&temp, "payload.bin");
    fs::write(path.as_std_path(), compress(b"payload", Algorithm::HighRatio)?)?;

    assert_eq!(load_archive(&path, Some(Algorithm::HighRatio))?, b"payload");
    Ok(())
}

#[test]
fn garbage_with_known_extension_fails_to_decompress() -> Result<()> {
    let temp = tempdir()?;
    for algorithm in Algorithm::ALL {
        let path = temp_utf8_path(&temp, &format!("garbage.{}", algorithm.extension()));
        fs::write(path.as_std_path(), b"\xff\x00\x13random bytes, not an archive")?;

        match load_archive(&path, None) {
            Err(LoadError::DecompressionFailed { source, .. }) => {
                assert_eq!(source.algorithm(), algorithm);
            }
            other => panic!("{algorithm}: expected DecompressionFailed, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn empty_file_fails_to_decompress() -> Result<()> {
    let temp = tempdir()?;
    let path = temp_utf8_path(&temp, "empty.zlib");
    fs::write(path.as_std_path(), b"")?;

    let result = load_archive(&path, None);
    assert!(matches!(
        result,
        Err(LoadError::DecompressionFailed {
            source: DecompressionError::Empty { .. },
            ..
        })
    ));
    Ok(())
}

#[test]
fn mismatched_extension_fails_to_decompress() -> Result<()> {
    let temp = tempdir()?;
    let path = temp_utf8_path(&temp, "mislabelled.xz");
    fs::write(path.as_std_path(), compress(b"payload", Algorithm::PlatformOptimized)?)?;

    let result = load_archive(&path, None);
    assert!(matches!(result, Err(LoadError::DecompressionFailed { .. })), "{result:?}");
    Ok(())
}

#[test]
fn store_then_load_by_extension() -> Result<()> {
    let temp = tempdir()?;
    let payload = b"The quick brown fox jumps over the lazy dog".repeat(16);
    for algorithm in Algorithm::ALL {
        let path = temp_utf8_path(&temp, &format!("stored.{}", algorithm.extension()));
        assert_eq!(store_archive(&path, &payload, None)?, algorithm);
        assert_eq!(Algorithm::detect(&fs::read(path.as_std_path())?), Some(algorithm));
        assert_eq!(load_archive(&path, None)?, payload);
    }
    Ok(())
}

#[test]
fn store_rejects_unknown_extension() -> Result<()> {
    let temp = tempdir()?;
    let path = temp_utf8_path(&temp, "stored.dat");

    let result = store_archive(&path, b"payload", None);
    assert!(matches!(result, Err(StoreError::UnknownAlgorithm { .. })), "{result:?}");
    assert!(!path.exists(), "nothing should be written");
    Ok(())
}

#[test]
fn store_into_missing_directory_is_an_io_failure() -> Result<()> {
    let temp = tempdir()?;
    let path = temp_utf8_path(&temp, "missing/stored.lz4");

    let result = store_archive(&path, b"payload", None);
    assert!(matches!(result, Err(StoreError::IoFailure { .. })), "{result:?}");
    Ok(())
}

#[test]
fn lz4_file_holding_only_the_first_block_fails() -> Result<()> {
    let temp = tempdir()?;
    let payload: Vec<u8> = (0..200_000_u32)
        .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
        .collect();
    let packed = compress(&payload, Algorithm::Fast)?;

    // magic, FLG, BD, 8-byte content size, HC, then the first block's size word
    let header = 15;
    let first_block = u32::from_le_bytes(packed[header..header + 4].try_into()?) & 0x7FFF_FFFF;
    let cut = header + 4 + first_block as usize;
    assert!(cut < packed.len());

    let path = temp_utf8_path(&temp, "partial.lz4");
    fs::write(path.as_std_path(), &packed[..cut])?;

    let result = load_archive(&path, None);
    assert!(
        matches!(result, Err(LoadError::DecompressionFailed { .. })),
        "{:?}",
        result.map(|out| out.len())
    );
    Ok(())
}
