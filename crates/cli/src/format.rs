//! Output formatting: human tables or JSON.

use docseq::{Department, Error, RunMode, RunReport};
use serde_json::json;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

pub fn format_report(report: &RunReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => report.to_string(),
        OutputMode::Json => to_json(report),
    }
}

pub fn format_modes(mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => RunMode::ALL
            .iter()
            .map(|m| format!("{:<20} {}", m.label(), m.description()))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputMode::Json => {
            let modes: Vec<_> = RunMode::ALL
                .iter()
                .map(|m| {
                    let config = m.config();
                    json!({
                        "number": m.number(),
                        "name": m.name(),
                        "strategy": config.strategy,
                        "workers": config.workers,
                        "per_worker": config.per_worker,
                    })
                })
                .collect();
            to_json(&modes)
        }
    }
}

pub fn format_departments(departments: &[Department], mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => departments
            .iter()
            .map(|d| {
                format!(
                    "{:>4}  {:<6} serial {:>6}  version {:>6}",
                    d.id, d.code, d.serial_num, d.version
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputMode::Json => to_json(&departments),
    }
}

pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format!("(error) {}", err),
        OutputMode::Json => json!({ "error": err.to_string() }).to_string(),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("(error) {}", e))
}
