//! squashbox library entry points.
//!
//! [`archive`] is the surface most callers need: [`archive::compress`],
//! [`archive::decompress`], [`archive::load_archive`] and
//! [`archive::store_archive`]. [`codec`] holds the algorithm table behind it.

pub mod archive;
pub mod cli;
pub mod codec;
pub mod error;

use std::io::{Read, Write};

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::Serialize;

use crate::archive::{load_archive, store_archive};
use crate::cli::{AlgorithmChoice, Cli, Commands, CompressArgs, DecompressArgs, InspectArgs};
use crate::codec::{resolve_algorithm, Algorithm};
use crate::error::UserInputError;

pub use crate::archive::{compress, decompress};

/// Bytes read from the front of a file when sniffing its format.
const HEADER_SNIFF_LEN: u64 = 8;

/// Execute the command represented by the parsed CLI input.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Compress(args) => handle_compress(args),
        Commands::Decompress(args) => handle_decompress(args),
        Commands::Inspect(args) => handle_inspect(args),
    }
}

fn handle_compress(args: CompressArgs) -> Result<()> {
    ensure_distinct(&args.input, &args.file)?;
    let data = fs_err::read(args.input.as_std_path())
        .with_context(|| format!("failed to read input {}", args.input))?;
    let algorithm = store_archive(&args.file, &data, args.algorithm.map(choose_algorithm))
        .with_context(|| format!("failed to create archive {}", args.file))?;
    if args.verbose {
        eprintln!(
            "compressed {} ({} bytes) into {} using {algorithm}",
            args.input,
            data.len(),
            args.file
        );
    }
    Ok(())
}

fn handle_decompress(args: DecompressArgs) -> Result<()> {
    if let Some(output) = args.output.as_deref().filter(|output| output.as_str() != "-") {
        ensure_distinct(&args.file, output)?;
    }
    let data = load_archive(&args.file, args.algorithm.map(choose_algorithm))
        .with_context(|| format!("failed to extract archive {}", args.file))?;
    match args.output.as_deref() {
        Some(output) if output.as_str() != "-" => {
            fs_err::write(output.as_std_path(), &data)
                .with_context(|| format!("failed to write output {output}"))?;
            if args.verbose {
                eprintln!("extracted {} ({} bytes) to {output}", args.file, data.len());
            }
        }
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&data)
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    path: &'a str,
    by_extension: Option<Algorithm>,
    by_header: Option<Algorithm>,
}

fn handle_inspect(args: InspectArgs) -> Result<()> {
    let header = read_header(&args.file)?;
    let report = InspectReport {
        path: args.file.as_str(),
        by_extension: resolve_algorithm(&args.file),
        by_header: Algorithm::detect(&header),
    };
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        println!("{}", report.path);
        println!("  extension: {}", describe(report.by_extension));
        println!("  header:    {}", describe(report.by_header));
    }
    Ok(())
}

/// Reject writing the result over the file being read.
fn ensure_distinct(source: &Utf8Path, destination: &Utf8Path) -> Result<()> {
    let same = match (source.canonicalize_utf8(), destination.canonicalize_utf8()) {
        (Ok(source), Ok(destination)) => source == destination,
        _ => source == destination,
    };
    if same {
        return Err(UserInputError::new(format!(
            "refusing to overwrite {source} with its own output"
        ))
        .into());
    }
    Ok(())
}

fn read_header(path: &Utf8Path) -> Result<Vec<u8>> {
    let file = fs_err::File::open(path.as_std_path())
        .with_context(|| format!("failed to open {path}"))?;
    let mut header = Vec::new();
    file.take(HEADER_SNIFF_LEN)
        .read_to_end(&mut header)
        .with_context(|| format!("failed to read {path}"))?;
    Ok(header)
}

fn describe(algorithm: Option<Algorithm>) -> String {
    algorithm.map_or_else(|| "unknown".to_owned(), |algorithm| algorithm.to_string())
}

fn choose_algorithm(choice: AlgorithmChoice) -> Algorithm {
    match choice {
        AlgorithmChoice::Lz4 => Algorithm::Fast,
        AlgorithmChoice::Zlib => Algorithm::Balanced,
        AlgorithmChoice::Xz => Algorithm::HighRatio,
        AlgorithmChoice::Zstd => Algorithm::PlatformOptimized,
    }
}
