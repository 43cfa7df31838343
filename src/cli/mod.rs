use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{BufReader, IsTerminal};
use std::path::PathBuf;

mod render;
mod session;

pub use session::*;

/// Budgety - Personal Budget Tracker
#[derive(Parser)]
#[command(name = "budgety")]
#[command(about = "Track incomes and expenses, their totals and each item's share")]
#[command(version)]
pub struct Cli {
    /// Read session commands from a file instead of stdin
    #[arg(short, long, env = "BUDGETY_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, env = "BUDGETY_FORMAT")]
    pub format: OutputFormat,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn", env = "BUDGETY_LOG")]
    pub log_level: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    /// Tracing filter directive derived from the flags.
    pub fn log_filter(&self) -> String {
        let level = if self.verbose {
            "debug"
        } else {
            self.log_level.as_str()
        };
        format!("budgety={}", level)
    }

    pub fn run(self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut session = Session::new(stdout.lock(), self.format);

        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script: {}", path.display()))?;
                session.run(BufReader::new(file), false)
            }
            None => {
                let stdin = std::io::stdin();
                let interactive = stdin.is_terminal();
                session.run(stdin.lock(), interactive)
            }
        }
    }
}
