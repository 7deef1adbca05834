//! docseq CLI: run document serial allocation strategies and inspect results.
//!
//! Three modes:
//! - **Shell mode**: `docseq [flags] run <mode>` or `docseq modes`, then exit
//! - **REPL mode**: `docseq [flags]` with a TTY, numbered menu prompt
//! - **Pipe mode**: `echo 4 | docseq`, one mode or meta-command per line

mod commands;
mod format;
mod parse;
mod repl;

use std::io::IsTerminal;
use std::process;

use docseq::Docseq;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_modes, format_report, OutputMode};
use parse::{matches_to_action, matches_to_settings, CliAction, RunRequest, Settings};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    let (settings, action) = match matches_to_settings(&matches)
        .and_then(|settings| Ok((settings, matches_to_action(&matches)?)))
    {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(2);
        }
    };
    let output_mode = OutputMode::from_flag(settings.json);

    let db = match open_database(&settings) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };

    match action {
        CliAction::Run(request) => process::exit(run_once(&db, &request, output_mode)),
        CliAction::Modes => println!("{}", format_modes(output_mode)),
        CliAction::Repl if std::io::stdin().is_terminal() => repl::run_repl(&db, output_mode),
        CliAction::Repl => process::exit(repl::run_pipe(&db, output_mode)),
    }
}

fn open_database(settings: &Settings) -> docseq::Result<Docseq> {
    Docseq::builder()
        .departments(settings.departments)
        .statement_latency(settings.latency)
        .retry(settings.retry.clone())
        .open()
}

fn run_once(db: &Docseq, request: &RunRequest, mode: OutputMode) -> i32 {
    match db.reset().and_then(|()| db.run_with(request.config(db))) {
        Ok(report) => {
            println!("{}", format_report(&report, mode));
            if report.failed_workers().next().is_some() {
                1
            } else {
                0
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            1
        }
    }
}
