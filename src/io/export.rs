use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::{AppError, BudgetReport, BudgetService};
use crate::domain::{Category, Entry, format_cents};

/// Session snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub report: BudgetReport,
}

pub const ENTRY_CSV_HEADER: [&str; 7] = [
    "category",
    "id",
    "description",
    "amount",
    "amount_cents",
    "share_percent",
    "recorded_at",
];

/// Exporter for dumping the session to various formats.
pub struct Exporter<'a> {
    service: &'a BudgetService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BudgetService) -> Self {
        Self { service }
    }

    /// Export all entries to CSV, incomes first
    pub fn export_entries_csv<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(ENTRY_CSV_HEADER)?;

        let mut count = 0;
        for category in Category::ALL {
            for entry in self.service.items(category) {
                csv_writer.write_record(entry_record(entry))?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the whole session as a JSON snapshot
    pub fn export_snapshot_json<W: Write>(
        &self,
        mut writer: W,
    ) -> Result<SessionSnapshot, AppError> {
        let snapshot = SessionSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            report: self.service.report(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }
}

fn entry_record(entry: &Entry) -> [String; 7] {
    [
        entry.category.as_str().to_string(),
        entry.id.to_string(),
        entry.description.clone(),
        format_cents(entry.amount_cents),
        entry.amount_cents.to_string(),
        entry.share_percent.to_string(),
        entry.recorded_at.to_rfc3339(),
    ]
}
