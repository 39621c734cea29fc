//! Command-line argument parsing for the explorer CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use crate::models::SortOrder;

/// Distillation view selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistillView {
    /// `distill/rp`
    Rp,
    /// `distill/narration`
    Narration,
    /// `distill/experiment1`
    Time,
}

impl DistillView {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "rp" => Some(DistillView::Rp),
            "narration" => Some(DistillView::Narration),
            "time" | "experiment1" => Some(DistillView::Time),
            _ => None,
        }
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Print the dataset index
    Index,
    /// Print the heuristic scores of every instance
    Heuristics,
    /// Print instance ids, optionally ordered by a heuristic
    Instances {
        sort_by: Option<String>,
        order: SortOrder,
    },
    /// Stream the raw events of an instance
    Events {
        instance_id: String,
        limit: Option<usize>,
    },
    /// Stream one distillation view of an instance
    Distill {
        view: DistillView,
        instance_id: String,
        limit: Option<usize>,
    },
    /// The arguments could not be understood
    Invalid(String),
}

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: explorer <command> [options]

Commands:
  index                              Print the dataset index
  heuristics                         Print heuristic scores per instance
  instances [--sort <h>] [--asc|--desc]
                                     Print instance ids
  events <instance>                  Stream raw events as NDJSON
  distill <rp|narration|time> <instance>
                                     Stream a distillation as NDJSON

Options:
  --limit <n>    Stop after n records
  -V, --version  Print version
  -h, --help     Print this help

Environment:
  EXPLORER_API_URL               Dataset server base URL (required)
  EXPLORER_FAILURE_POLICY        soft | strict (default: soft)
  EXPLORER_CONNECT_TIMEOUT_SECS  Connect timeout in seconds
  RUST_LOG                       Log filter (default: explorer=info)";

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use explorer::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["explorer".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut positional = Vec::new();
    let mut limit = None;
    let mut sort_by = None;
    let mut order = SortOrder::None;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--limit" | "-n" => match args.next().map(|value| value.parse::<usize>()) {
                Some(Ok(n)) => limit = Some(n),
                Some(Err(_)) => {
                    return CliCommand::Invalid("--limit expects a number".to_string())
                }
                None => return CliCommand::Invalid("--limit expects a value".to_string()),
            },
            "--sort" => match args.next() {
                Some(heuristic) => sort_by = Some(heuristic),
                None => return CliCommand::Invalid("--sort expects a heuristic".to_string()),
            },
            "--asc" => order = SortOrder::Asc,
            "--desc" => order = SortOrder::Desc,
            flag if flag.starts_with('-') => {
                return CliCommand::Invalid(format!("unknown option {}", flag))
            }
            _ => positional.push(arg),
        }
    }

    let positional: Vec<&str> = positional.iter().map(String::as_str).collect();
    match positional.as_slice() {
        [] => CliCommand::Help,
        ["index"] => CliCommand::Index,
        ["heuristics"] => CliCommand::Heuristics,
        ["instances"] => CliCommand::Instances {
            order: if sort_by.is_some() && order == SortOrder::None {
                SortOrder::Asc
            } else {
                order
            },
            sort_by,
        },
        ["events", instance_id] => CliCommand::Events {
            instance_id: instance_id.to_string(),
            limit,
        },
        ["distill", view, instance_id] => match DistillView::parse(view) {
            Some(view) => CliCommand::Distill {
                view,
                instance_id: instance_id.to_string(),
                limit,
            },
            None => CliCommand::Invalid(format!("unknown distillation {}", view)),
        },
        [command, ..] => CliCommand::Invalid(format!("unexpected arguments for {}", command)),
    }
}
