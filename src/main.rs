//! Command-line entry point for the squashbox binary.

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use squashbox::error::{DecompressionError, LoadError, StoreError, UserInputError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = squashbox::cli::Cli::parse();

    if let Err(err) = squashbox::run(cli) {
        let mut exit_code = 1;
        for cause in err.chain() {
            if cause.is::<DecompressionError>() {
                exit_code = 3;
                break;
            }
            if cause.is::<UserInputError>() || is_unknown_algorithm(cause) {
                exit_code = 2;
                break;
            }
            if cause.is::<std::io::Error>() {
                exit_code = 1;
            }
        }
        eprintln!("squashbox: {err:#}");
        std::process::exit(exit_code);
    }
}

fn is_unknown_algorithm(cause: &(dyn std::error::Error + 'static)) -> bool {
    matches!(
        cause.downcast_ref::<LoadError>(),
        Some(LoadError::UnknownAlgorithm { .. })
    ) || matches!(
        cause.downcast_ref::<StoreError>(),
        Some(StoreError::UnknownAlgorithm { .. })
    )
}
