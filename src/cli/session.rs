use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::application::{BudgetService, ItemAdded, ItemDeleted, NewItem};
use crate::domain::{Category, EntryId};
use crate::io::Exporter;

use super::OutputFormat;
use super::render::{entry_line, entry_lines, summary_line};

/// One line of session input.
#[derive(Parser, Debug)]
#[command(name = "budgety", no_binary_name = true)]
#[command(disable_version_flag = true, color = clap::ColorChoice::Never)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Add an income or expense entry
    Add {
        /// Category: inc, exp
        category: String,

        /// Amount (e.g., "50.00" or "50"), rounded to 2 decimals
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// Description of the entry
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Delete an entry by category and id
    #[command(visible_aliases = ["del", "rm"])]
    Delete {
        /// Category: inc, exp
        category: Category,

        /// Entry id within the category
        id: EntryId,
    },

    /// List entries with their share of the category total
    List {
        /// Category to list (omit for both)
        category: Option<Category>,
    },

    /// Show the budget summary
    #[command(visible_alias = "budget")]
    Summary,

    /// Export the session to CSV or JSON
    Export {
        /// Format: csv, json
        format: ExportFormat,

        /// Output file (session output if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// End the session
    #[command(visible_alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Serialize)]
struct ErrorMessage<'a> {
    error: &'a str,
}

/// Line-oriented presentation over a `BudgetService`.
/// All state lives for the session only.
pub struct Session<W: Write> {
    service: BudgetService,
    out: W,
    format: OutputFormat,
}

impl<W: Write> Session<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            service: BudgetService::new(),
            out,
            format,
        }
    }

    pub fn service(&self) -> &BudgetService {
        &self.service
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute every line of `input` until it ends or a quit command is read.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> Result<()> {
        tracing::info!(interactive, "session started");
        if interactive {
            writeln!(
                self.out,
                "budgety {} - type 'help' for commands",
                env!("CARGO_PKG_VERSION")
            )?;
        }

        let mut lines = input.lines();
        loop {
            if interactive {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read session input")?;
            if self.execute(&line)? == Flow::Quit {
                break;
            }
        }

        let report = self.service.report();
        tracing::info!(entries = report.entry_count(), "session ended");
        Ok(())
    }

    /// Execute a single line. Command errors are reported to the output and
    /// do not end the session; only output failures are returned.
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        tracing::debug!(line, "executing command");

        let parsed = match SessionLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(err) if self.format == OutputFormat::Json && !is_help_request(&err) => {
                self.report_error(&clap_error_message(&err))?;
                return Ok(Flow::Continue);
            }
            Err(err) => {
                // Help and usage text is rendered by clap itself.
                write!(self.out, "{}", err)?;
                return Ok(Flow::Continue);
            }
        };

        match self.dispatch(parsed.command) {
            Ok(flow) => Ok(flow),
            Err(err) => {
                tracing::debug!(error = %err, "command failed");
                self.report_error(&format!("{:#}", err))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Add {
                category,
                amount,
                description,
            } => {
                let item = NewItem::parse(&category, &description.join(" "), &amount)?;
                let added = self.service.add_item(item);
                self.show_added(&added)?;
            }

            SessionCommand::Delete { category, id } => {
                let deleted = self.service.delete_item(category, id);
                self.show_deleted(&deleted)?;
            }

            SessionCommand::List { category } => {
                let categories = match category {
                    Some(category) => vec![category],
                    None => Category::ALL.to_vec(),
                };
                self.show_list(&categories)?;
            }

            SessionCommand::Summary => {
                let summary = self.service.summary();
                match self.format {
                    OutputFormat::Json => self.write_json(&summary)?,
                    OutputFormat::Table => writeln!(self.out, "{}", summary_line(&summary))?,
                }
            }

            SessionCommand::Export { format, output } => {
                self.export(format, output)?;
            }

            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn show_added(&mut self, added: &ItemAdded) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(added),
            OutputFormat::Table => {
                let category = added.entry.category;
                writeln!(self.out, "Added {}: {}", category, added.entry.description)?;
                self.show_refreshed(category, &added.percentages)?;
                writeln!(self.out, "{}", summary_line(&added.summary))?;
                Ok(())
            }
        }
    }

    fn show_deleted(&mut self, deleted: &ItemDeleted) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(deleted),
            OutputFormat::Table => {
                match &deleted.removed {
                    Some(entry) => {
                        writeln!(self.out, "Deleted {}: {}", entry.key(), entry.description)?
                    }
                    None => writeln!(
                        self.out,
                        "No {} entry with id {}",
                        deleted.category, deleted.id
                    )?,
                }
                self.show_refreshed(deleted.category, &deleted.percentages)?;
                writeln!(self.out, "{}", summary_line(&deleted.summary))?;
                Ok(())
            }
        }
    }

    /// Re-render a whole category after its percentages changed.
    fn show_refreshed(&mut self, category: Category, percentages: &[Option<u8>]) -> Result<()> {
        for line in entry_lines(self.service.items(category), percentages) {
            writeln!(self.out, "  {}", line)?;
        }
        Ok(())
    }

    fn show_list(&mut self, categories: &[Category]) -> Result<()> {
        let report = self.service.report();
        if self.format == OutputFormat::Json {
            let selected: Vec<_> = categories.iter().map(|c| report.category(*c)).collect();
            return self.write_json(&selected);
        }

        for category in categories {
            let category_report = report.category(*category);
            writeln!(
                self.out,
                "{} ({} entries)",
                category.label().to_uppercase(),
                category_report.count
            )?;
            if category_report.entries.is_empty() {
                writeln!(self.out, "  No entries.")?;
            }
            for entry in &category_report.entries {
                writeln!(self.out, "  {}", entry_line(entry, Some(entry.share_percent)))?;
            }
        }
        Ok(())
    }

    fn export(&mut self, format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
        let exporter = Exporter::new(&self.service);

        let Some(path) = output else {
            match format {
                ExportFormat::Csv => exporter.export_entries_csv(&mut self.out)?,
                ExportFormat::Json => exporter
                    .export_snapshot_json(&mut self.out)?
                    .report
                    .entry_count(),
            };
            return Ok(());
        };

        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        let count = match format {
            ExportFormat::Csv => exporter.export_entries_csv(file)?,
            ExportFormat::Json => exporter.export_snapshot_json(file)?.report.entry_count(),
        };
        tracing::info!(count, path = %path.display(), "exported session");
        writeln!(self.out, "Exported {} entries to {}", count, path.display())?;
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        writeln!(self.out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    fn report_error(&mut self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(&ErrorMessage { error: message }),
            OutputFormat::Table => {
                writeln!(self.out, "error: {}", message)?;
                Ok(())
            }
        }
    }
}

fn is_help_request(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::DisplayVersion
    )
}

/// First line of a clap error, without the "error: " prefix.
fn clap_error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
