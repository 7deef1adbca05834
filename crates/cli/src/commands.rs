//! Clap command tree for the docseq CLI.

use clap::{Arg, ArgAction, Command};

/// Build the top-level command.
///
/// Global flags configure the store; subcommands select what to do. With no
/// subcommand the binary drops into the interactive menu.
pub fn build_cli() -> Command {
    Command::new("docseq")
        .about("Run document serial allocation strategies under contention")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("DOCSEQ_JSON")
                .help("Print reports as JSON"),
        )
        .arg(
            Arg::new("departments")
                .long("departments")
                .global(true)
                .value_name("N")
                .env("DOCSEQ_DEPARTMENTS")
                .default_value("3")
                .help("Departments seeded in the store"),
        )
        .arg(
            Arg::new("latency-ms")
                .long("latency-ms")
                .global(true)
                .value_name("MS")
                .env("DOCSEQ_LATENCY_MS")
                .default_value("0")
                .help("Simulated round-trip latency per store statement"),
        )
        .arg(
            Arg::new("max-retries")
                .long("max-retries")
                .global(true)
                .value_name("N")
                .env("DOCSEQ_MAX_RETRIES")
                .help("Retry budget for optimistic conflicts"),
        )
        .subcommand(
            Command::new("run")
                .about("Reset the store and run one mode")
                .arg(
                    Arg::new("mode")
                        .required(true)
                        .help("Mode number, name or prefix (see `docseq modes`)"),
                )
                .arg(
                    Arg::new("workers")
                        .long("workers")
                        .value_name("N")
                        .env("DOCSEQ_WORKERS")
                        .help("Override the mode's worker count"),
                )
                .arg(
                    Arg::new("per-worker")
                        .long("per-worker")
                        .value_name("N")
                        .env("DOCSEQ_PER_WORKER")
                        .help("Override the mode's operations per worker"),
                ),
        )
        .subcommand(Command::new("modes").about("List the run modes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_run_requires_mode() {
        assert!(build_cli().try_get_matches_from(["docseq", "run"]).is_err());
        assert!(build_cli()
            .try_get_matches_from(["docseq", "run", "3", "--workers", "2"])
            .is_ok());
    }
}
