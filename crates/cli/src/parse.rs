//! ArgMatches → Settings/CliAction conversion, and REPL line parsing.
//!
//! - Global flags → [`Settings`] (how to open the store)
//! - Subcommands → [`CliAction`]
//! - REPL lines → [`MetaCommand`] or a run mode

use clap::ArgMatches;
use docseq::{Docseq, HarnessConfig, RetryConfig, RunMode};
use std::str::FromStr;
use std::time::Duration;

/// Store and output settings taken from global flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub departments: u32,
    pub latency: Duration,
    pub retry: RetryConfig,
    pub json: bool,
}

/// A run requested from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub mode: RunMode,
    pub workers: Option<usize>,
    pub per_worker: Option<usize>,
}

impl RunRequest {
    /// A request for `mode` with its canned sizing.
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            workers: None,
            per_worker: None,
        }
    }

    /// Harness configuration for this request against `db`.
    ///
    /// Work is routed over the departments `db` was seeded with, so
    /// `--departments` changes routing as well as seeding.
    pub fn config(&self, db: &Docseq) -> HarnessConfig {
        let mut config = self
            .mode
            .config()
            .with_departments(db.department_count())
            .with_retry(db.retry_config().clone());
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(per_worker) = self.per_worker {
            config = config.with_per_worker(per_worker);
        }
        config
    }
}

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Reset and run one mode, then exit.
    Run(RunRequest),
    /// Print the mode menu, then exit.
    Modes,
    /// No subcommand: interactive menu.
    Repl,
}

/// REPL meta-commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Quit,
    Help,
    Modes,
    Reset,
    Show,
}

/// Check for REPL meta-commands before treating the line as a mode.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    match line.trim() {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "help" | "?" => Some(MetaCommand::Help),
        "modes" | "ls" => Some(MetaCommand::Modes),
        "reset" => Some(MetaCommand::Reset),
        "show" => Some(MetaCommand::Show),
        _ => None,
    }
}

/// Read the global flags.
pub fn matches_to_settings(matches: &ArgMatches) -> Result<Settings, String> {
    let departments = required::<u32>(matches, "departments")?;
    let latency_ms = required::<u64>(matches, "latency-ms")?;
    let retry = match optional::<usize>(matches, "max-retries")? {
        Some(n) => RetryConfig::new().with_max_retries(n),
        None => RetryConfig::default(),
    };
    Ok(Settings {
        departments,
        latency: Duration::from_millis(latency_ms),
        retry,
        json: matches.get_flag("json"),
    })
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let Some((sub_name, sub_matches)) = matches.subcommand() else {
        return Ok(CliAction::Repl);
    };

    match sub_name {
        "run" => {
            let raw = sub_matches
                .get_one::<String>("mode")
                .ok_or("No mode provided")?;
            let mode = RunMode::from_str(raw).map_err(|e| e.to_string())?;
            let workers = optional::<usize>(sub_matches, "workers")?;
            let per_worker = optional::<usize>(sub_matches, "per-worker")?;
            if workers == Some(0) {
                return Err("--workers must be at least 1".to_string());
            }
            Ok(CliAction::Run(RunRequest {
                mode,
                workers,
                per_worker,
            }))
        }
        "modes" => Ok(CliAction::Modes),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn optional<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, String>
where
    T::Err: std::fmt::Display,
{
    matches
        .get_one::<String>(name)
        .map(|s| s.parse::<T>())
        .transpose()
        .map_err(|e| format!("Invalid --{}: {}", name, e))
}

fn required<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    optional(matches, name)?.ok_or_else(|| format!("Missing --{}", name))
}
