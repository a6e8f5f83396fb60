//! Batch relation analysis over CSV exports of charts.
//!
//! Expected header: `Label,Year,Month,Day,Time`. Each pillar cell holds a two-character
//! pillar in either script (`甲子`, `갑자`). `Time` may be blank for unknown birth hours.

use super::options::RelationOptions;
use super::relations::{FourPillars, PillarInput, RelationAnalyzer, RelationFact};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum PillarImportError {
    #[error("failed to read pillar export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pillar CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {line} has {found} columns, expected {expected}")]
    ColumnCount {
        line: u64,
        found: usize,
        expected: usize,
    },
}

/// One analyzed CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarBatchEntry {
    pub label: String,
    pub pillars: FourPillars,
    pub facts: Vec<RelationFact>,
}

#[derive(Debug, Deserialize)]
struct PillarRow {
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Day")]
    day: String,
    #[serde(rename = "Time", default, deserialize_with = "empty_string_as_none")]
    time: Option<String>,
}

impl PillarRow {
    fn into_pillars(self) -> (String, FourPillars) {
        let pillars = FourPillars::new(
            PillarInput::from_ganzhi(&self.year),
            PillarInput::from_ganzhi(&self.month),
            PillarInput::from_ganzhi(&self.day),
            self.time
                .as_deref()
                .map(PillarInput::from_ganzhi)
                .unwrap_or_default(),
        );
        (self.label, pillars)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub struct PillarBatchImporter {
    analyzer: RelationAnalyzer,
}

impl PillarBatchImporter {
    pub fn new(options: RelationOptions) -> Self {
        Self {
            analyzer: RelationAnalyzer::new(options),
        }
    }

    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PillarBatchEntry>, PillarImportError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Vec<PillarBatchEntry>, PillarImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut entries = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |position| position.line());
            if record.len() != headers.len() {
                return Err(PillarImportError::ColumnCount {
                    line,
                    found: record.len(),
                    expected: headers.len(),
                });
            }

            let row: PillarRow = record.deserialize(Some(&headers))?;
            let (label, pillars) = row.into_pillars();
            let unrecognized = [&pillars.year, &pillars.month, &pillars.day, &pillars.time]
                .into_iter()
                .filter(|pillar| !pillar.is_empty() && !pillar.is_recognized())
                .count();
            if unrecognized > 0 {
                warn!(line, %label, unrecognized, "row contains unrecognized pillar symbols");
            }

            let facts = self.analyzer.analyze(&pillars);
            entries.push(PillarBatchEntry {
                label,
                pillars,
                facts,
            });
        }

        debug!(rows = entries.len(), "pillar batch analyzed");
        Ok(entries)
    }
}

impl Default for PillarBatchImporter {
    fn default() -> Self {
        Self::new(RelationOptions::default())
    }
}
