//! CSV ingestion and column profiling
//!
//! A [`DataTable`] is the loaded file held as strings. Profiling infers a
//! coarse kind per column and a few summary statistics, enough to give a
//! model an accurate picture of the data without sending every row.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::debug;

use crate::config::TableConfig;
use crate::error::{AnalystError, Result};

const EXAMPLE_VALUES: usize = 3;

#[derive(Debug, Clone)]
pub struct DataTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
    Empty,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub non_empty: usize,
    pub distinct: usize,
    pub numeric: Option<NumericSummary>,
    pub examples: Vec<String>,
}

impl DataTable {
    /// Load a CSV file. A missing file is reported with the path as given.
    pub fn from_path(path: &Path, config: &TableConfig) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AnalystError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => AnalystError::Io(e),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(name, file, config)
    }

    pub fn from_reader<R: Read>(
        name: impl Into<String>,
        source: R,
        config: &TableConfig,
    ) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(config.delimiter_byte()?)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(AnalystError::Config {
                message: "CSV has no header row".to_string(),
            });
        }

        let width = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        let name = name.into();
        debug!("Loaded {}: {} rows x {} columns", name, rows.len(), width);
        Ok(Self {
            name,
            headers,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn profile(&self) -> Vec<ColumnProfile> {
        (0..self.headers.len()).map(|i| self.profile_column(i)).collect()
    }

    fn profile_column(&self, index: usize) -> ColumnProfile {
        let values: Vec<&str> = self
            .rows
            .iter()
            .map(|r| r[index].as_str())
            .filter(|v| !v.is_empty())
            .collect();

        let distinct: HashSet<&str> = values.iter().copied().collect();
        let mut examples: Vec<String> = Vec::new();
        for &v in &values {
            if examples.len() == EXAMPLE_VALUES {
                break;
            }
            if !examples.iter().any(|e| e == v) {
                examples.push(v.to_string());
            }
        }

        let kind = infer_kind(&values);
        let numeric = match kind {
            ColumnKind::Integer | ColumnKind::Float => summarize(&values),
            _ => None,
        };

        ColumnProfile {
            name: self.headers[index].clone(),
            kind,
            non_empty: values.len(),
            distinct: distinct.len(),
            numeric,
            examples,
        }
    }

    /// Header plus the first `limit` rows, re-encoded as CSV.
    pub fn render_rows(&self, limit: usize) -> Result<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in self.rows.iter().take(limit) {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AnalystError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Column summary in the form shown to the model.
    pub fn render_profile(&self) -> String {
        let mut out = String::new();
        for col in self.profile() {
            let _ = write!(
                out,
                "- {} ({}): {} non-empty, {} distinct",
                col.name,
                col.kind.as_str(),
                col.non_empty,
                col.distinct
            );
            if let Some(n) = col.numeric {
                let _ = write!(out, ", min {}, max {}, mean {:.2}", n.min, n.max, n.mean);
            }
            if !col.examples.is_empty() {
                let _ = write!(out, ", e.g. {}", col.examples.join(" | "));
            }
            out.push('\n');
        }
        out
    }
}

fn infer_kind(values: &[&str]) -> ColumnKind {
    if values.is_empty() {
        return ColumnKind::Empty;
    }
    if values.iter().all(|v| v.parse::<i64>().is_ok()) {
        return ColumnKind::Integer;
    }
    if values.iter().all(|v| v.parse::<f64>().is_ok()) {
        return ColumnKind::Float;
    }
    if values
        .iter()
        .all(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "false"))
    {
        return ColumnKind::Boolean;
    }
    ColumnKind::Text
}

fn summarize(values: &[&str]) -> Option<NumericSummary> {
    let nums: Vec<f64> = values.iter().filter_map(|v| v.parse().ok()).collect();
    if nums.is_empty() {
        return None;
    }
    let min = nums.iter().copied().fold(f64::INFINITY, f64::min);
    let max = nums.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = nums.iter().sum::<f64>() / nums.len() as f64;
    Some(NumericSummary { min, max, mean })
}
