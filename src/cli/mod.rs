//! Command-line interface definitions for squashbox.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

const CLI_EXAMPLES: &str = "Examples:\n  squashbox compress -f notes.txt.zst notes.txt\n  squashbox decompress -f notes.txt.zst -o notes.txt\n  squashbox inspect -f blob.bin --json\n";

/// Top-level CLI parser.
#[derive(Debug, Parser)]
#[command(
    name = "squashbox",
    version,
    about = "Compress and decompress files with lz4, zlib, xz or zstd",
    long_about = "Picks the codec from the file extension (.lz4, .zlib, .xz, .zst) unless one is given explicitly.",
    after_help = CLI_EXAMPLES,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compress a file.
    #[command(alias = "c")]
    Compress(CompressArgs),
    /// Decompress a file.
    #[command(alias = "x")]
    Decompress(DecompressArgs),
    /// Report which algorithm a file uses.
    #[command(alias = "t")]
    Inspect(InspectArgs),
}

/// User-selected algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmChoice {
    /// LZ4: fastest, lowest ratio.
    #[value(alias = "fast")]
    Lz4,
    /// zlib: balanced.
    #[value(alias = "balanced")]
    Zlib,
    /// xz: highest ratio.
    #[value(aliases = ["lzma", "high-ratio"])]
    Xz,
    /// zstd: fast with a good ratio.
    #[value(alias = "platform-optimized")]
    Zstd,
}

/// Arguments for the `compress` subcommand.
#[derive(Debug, Args)]
pub struct CompressArgs {
    /// Archive path to write.
    #[arg(short = 'f', long = "file", value_hint = ValueHint::FilePath)]
    pub file: Utf8PathBuf,
    /// Algorithm to use instead of the one implied by the archive extension.
    #[arg(short = 'a', long = "algorithm", value_enum)]
    pub algorithm: Option<AlgorithmChoice>,
    /// Emit a summary line after writing.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
    /// File to compress.
    #[arg(value_name = "INPUT", value_hint = ValueHint::FilePath)]
    pub input: Utf8PathBuf,
}

/// Arguments for the `decompress` subcommand.
#[derive(Debug, Args)]
pub struct DecompressArgs {
    /// Archive to decompress.
    #[arg(short = 'f', long = "file", value_hint = ValueHint::FilePath)]
    pub file: Utf8PathBuf,
    /// Algorithm to use instead of the one implied by the archive extension.
    #[arg(short = 'a', long = "algorithm", value_enum)]
    pub algorithm: Option<AlgorithmChoice>,
    /// Output path (default: stdout; `-` also means stdout).
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    pub output: Option<Utf8PathBuf>,
    /// Emit a summary line after writing.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Archive to inspect.
    #[arg(short = 'f', long = "file", value_hint = ValueHint::FilePath)]
    pub file: Utf8PathBuf,
    /// Emit machine-readable JSON.
    #[arg(long = "json")]
    pub json: bool,
}
