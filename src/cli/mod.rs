//! CLI module for the explorer.
//!
//! Parses the command line and prints what the dataset server returns:
//! whole documents as one JSON document, streams as NDJSON, one record per
//! line. Logging goes to stderr so stdout can be piped.
//!
//! # Usage
//!
//! ```ignore
//! use explorer::cli::{parse_args, run, CliCommand};
//!
//! let command = parse_args(std::env::args());
//! run(command, ExplorerConfig::from_env()?).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, DistillView, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::eyre::{eyre, Result};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;

use crate::adapters::ReqwestHttpClient;
use crate::client::{DatasetClient, RecordStream};
use crate::config::ExplorerConfig;
use crate::models::DatasetIndex;
use crate::traits::HttpClient;

/// Run a command that needs the dataset server, printing to stdout.
pub async fn run(command: CliCommand, config: ExplorerConfig) -> Result<()> {
    let http = ReqwestHttpClient::with_config(&config)?;
    let mut client = DatasetClient::new(http, config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with(&mut client, command, &mut out).await
}

/// Run a command against `client`, writing records to `out`.
pub async fn run_with<C, W>(
    client: &mut DatasetClient<C>,
    command: CliCommand,
    out: &mut W,
) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    match command {
        CliCommand::Version => writeln!(out, "{}", version_line())?,
        CliCommand::Help => writeln!(out, "{}", USAGE)?,
        CliCommand::Invalid(reason) => return Err(eyre!("{}\n\n{}", reason, USAGE)),
        CliCommand::Index => {
            if !client.load_index().await? {
                return Err(eyre!("Index could not be loaded"));
            }
            let index = DatasetIndex {
                checksum: client.checksum().unwrap_or_default().to_string(),
                instances: client.instance_ids().to_vec(),
                heuristics: client.heuristic_ids().to_vec(),
            };
            write_record(out, &index)?;
        }
        CliCommand::Heuristics => {
            if !client.load_heuristics_by_instance().await? {
                return Err(eyre!("Heuristics could not be loaded"));
            }
            write_record(out, &client.state().heuristics_by_instance)?;
        }
        CliCommand::Instances { sort_by, order } => {
            if !client.load_index().await? {
                return Err(eyre!("Index could not be loaded"));
            }
            let ids = match sort_by {
                Some(heuristic) => {
                    if !client.load_heuristics_by_instance().await? {
                        return Err(eyre!("Heuristics could not be loaded"));
                    }
                    client.sorted_instances(&heuristic, order)
                }
                None => client.instance_ids().to_vec(),
            };
            for id in ids {
                writeln!(out, "{}", id)?;
            }
        }
        CliCommand::Events { instance_id, limit } => {
            let stream = client.stream_events(&instance_id).await?;
            print_stream(stream, limit, out).await?;
        }
        CliCommand::Distill {
            view,
            instance_id,
            limit,
        } => match view {
            DistillView::Rp => {
                let stream = client.stream_rp_distill(&instance_id).await?;
                print_stream(stream, limit, out).await?;
            }
            DistillView::Narration => {
                let stream = client.stream_narration_distill(&instance_id).await?;
                print_stream(stream, limit, out).await?;
            }
            DistillView::Time => {
                let stream = client.stream_time_distill(&instance_id).await?;
                print_stream(stream, limit, out).await?;
            }
        },
    }
    out.flush()?;
    Ok(())
}

fn write_record<W: Write, T: Serialize>(out: &mut W, record: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Print records until the stream ends or `limit` records were printed.
///
/// Returns the number of records printed.
async fn print_stream<T, W>(
    mut stream: RecordStream<T>,
    limit: Option<usize>,
    out: &mut W,
) -> Result<usize>
where
    T: DeserializeOwned + Serialize,
    W: Write,
{
    if let Some(failure) = stream.failure() {
        return Err(eyre!("{}", failure.user_message()).wrap_err(failure.to_string()));
    }

    let mut printed = 0;
    while limit.map_or(true, |limit| printed < limit) {
        let Some(record) = stream.next().await else {
            break;
        };
        write_record(out, &record?)?;
        printed += 1;
    }
    stream.close();
    tracing::debug!("Printed {} records", printed);
    Ok(printed)
}
