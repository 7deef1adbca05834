//! Interactive menu and pipe mode.
//!
//! Each line is either a meta-command (`quit`, `modes`, `reset`, ...) or a
//! run mode given by number, name or prefix. A mode is run on a freshly
//! reset store and its report printed.

use std::io::BufRead;
use std::path::PathBuf;

use docseq::{Docseq, RunMode};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;

use crate::format::{format_departments, format_error, format_modes, format_report, OutputMode};
use crate::parse::{check_meta_command, MetaCommand, RunRequest};

const PROMPT: &str = "docseq> ";

const HELP: &str = "\
Enter a mode number, name or prefix to reset the store and run it.
  modes   list the run modes
  show    print department counters
  reset   truncate documents and restore serials
  help    this text
  quit    leave";

/// What the caller should do after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the interactive loop until `quit`, EOF or Ctrl-D.
pub fn run_repl(db: &Docseq, mode: OutputMode) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("(error) cannot start line editor: {}", e);
            return;
        }
    };

    let history = history_path();
    if let Some(path) = &history {
        let _ = rl.load_history(path);
    }

    println!("{}", format_modes(OutputMode::Human));
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                if handle_line(db, &line, mode) == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Err(e) = rl.save_history(path) {
            warn!(error = %e, "could not save history");
        }
    }
}

/// Process lines from stdin without a prompt. Returns the exit code.
pub fn run_pipe(db: &Docseq, mode: OutputMode) -> i32 {
    let stdin = std::io::stdin();
    let mut code = 0;
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("(error) {}", e);
                return 1;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        if check_meta_command(&line).is_none() && RunMode::resolve(&line).is_none() {
            code = 1;
        }
        if handle_line(db, &line, mode) == Flow::Quit {
            break;
        }
    }
    code
}

fn handle_line(db: &Docseq, line: &str, mode: OutputMode) -> Flow {
    if let Some(meta) = check_meta_command(line) {
        match meta {
            MetaCommand::Quit => return Flow::Quit,
            MetaCommand::Help => println!("{}", HELP),
            MetaCommand::Modes => println!("{}", format_modes(mode)),
            MetaCommand::Reset => match db.reset() {
                Ok(()) => println!("OK"),
                Err(e) => eprintln!("{}", format_error(&e, mode)),
            },
            MetaCommand::Show => match db.departments() {
                Ok(rows) => println!("{}", format_departments(&rows, mode)),
                Err(e) => eprintln!("{}", format_error(&e, mode)),
            },
        }
        return Flow::Continue;
    }

    match RunMode::resolve(line) {
        Some(run_mode) => match db
            .reset()
            .and_then(|()| db.run_with(RunRequest::new(run_mode).config(db)))
        {
            Ok(report) => println!("{}", format_report(&report, mode)),
            Err(e) => eprintln!("{}", format_error(&e, mode)),
        },
        None => eprintln!("Invalid mode: {} (try `modes`)", line.trim()),
    }
    Flow::Continue
}

fn history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".docseq_history"))
}
