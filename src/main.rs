use explorer::cli::{parse_args, run, version_line, CliCommand, USAGE};
use explorer::config::ExplorerConfig;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "explorer=info";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout carries the records
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    // Handle commands that need no server before any initialization
    match &command {
        CliCommand::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Invalid(reason) => {
            eprintln!("Error: {}\n\n{}", reason, USAGE);
            std::process::exit(2);
        }
        _ => {}
    }

    color_eyre::install()?;
    init_logging();

    let config = ExplorerConfig::from_env().wrap_err("Invalid configuration")?;
    tracing::debug!(
        "Using dataset server {} ({:?} failure policy)",
        config.base_url,
        config.failure_policy
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(command, config))
}
