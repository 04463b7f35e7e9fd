//! # Domain Entities
//!
//! Entities are the "Nouns" of the runner: where the data lives
//! (`DataSourceConfig`), what to extract and where to put it
//! (`ExtractionJob`), and what a query hands back (`TabularResult`).
//!
//! They are built from the loaded configuration by `config::AppConfig`.

use crate::domain::errors::{ExtractError, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;

/// Default pause between two cycles of a repeating job.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 3600;

/// `OutputFormat` defines how the result set is saved on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Comma-separated values with standard quoting (`.csv`).
    Csv,
    /// Tab-separated display strings (`.txt`).
    Tsv,
    /// Single-sheet Excel workbook (`.xlsx`).
    Workbook,
}

impl OutputFormat {
    /// Maps an external extension (`.csv`, `.txt`, `.xlsx`) to a format.
    ///
    /// The value is trimmed and lowercased first. Anything else is rejected;
    /// there is no fallback format.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.trim().to_lowercase().as_str() {
            ".csv" => Ok(OutputFormat::Csv),
            ".txt" => Ok(OutputFormat::Tsv),
            ".xlsx" => Ok(OutputFormat::Workbook),
            _ => Err(ExtractError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => ".csv",
            OutputFormat::Tsv => ".txt",
            OutputFormat::Workbook => ".xlsx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Tsv => write!(f, "TSV"),
            OutputFormat::Workbook => write!(f, "XLSX"),
        }
    }
}

/// A single cell value as returned by the data source.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Timestamp(NaiveDateTime),
    /// Raw bytes (BLOB); displayed as Base64.
    Binary(Vec<u8>),
}

impl Value {
    /// The display-string form used by the text writers.
    ///
    /// `Null` renders as an empty string.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => s.clone(),
            Value::Boolean(b) => b.to_string(),
            Value::Timestamp(ts) => ts.to_string(),
            Value::Binary(bytes) => general_purpose::STANDARD.encode(bytes),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// The in-memory column/row output of one query.
///
/// Column names may repeat; rows keep the query's order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TabularResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Number of data records (the header is not counted).
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }
}

/// Where the database lives and how to log into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceConfig {
    /// Either a bare database path or `host|path`.
    pub address: String,
    pub user: String,
    pub password: String,
    /// Optional; empty means "driver default".
    pub port: String,
}

impl DataSourceConfig {
    /// All of `address`, `user` and `password` must be present.
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(ExtractError::Configuration(
                "database address is not defined".to_string(),
            ));
        }
        if self.user.trim().is_empty() {
            return Err(ExtractError::Configuration(
                "database user is not defined".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(ExtractError::Configuration(
                "database password is not defined".to_string(),
            ));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            user: self.user.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// Login pair handed to the data source. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// `ExtractionJob` holds the instructions for every cycle of a run:
/// which query to execute and which file to overwrite with its result.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionJob {
    pub query: String,
    pub output_dir: String,
    pub output_name: String,
    pub format: OutputFormat,
    /// Seconds to wait between cycles when `repeat` is set.
    pub interval_seconds: u64,
    pub repeat: bool,
}

impl ExtractionJob {
    /// Builds a job, trimming the path fields and rejecting missing ones.
    pub fn new(
        query: impl Into<String>,
        output_dir: impl Into<String>,
        output_name: impl Into<String>,
        format: OutputFormat,
    ) -> Result<Self> {
        let job = Self {
            query: query.into(),
            output_dir: output_dir.into().trim().to_string(),
            output_name: output_name.into().trim().to_string(),
            format,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            repeat: false,
        };
        job.validate()?;
        Ok(job)
    }

    pub fn with_repeat(mut self, interval_seconds: u64) -> Self {
        self.repeat = true;
        self.interval_seconds = interval_seconds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(ExtractError::Configuration("QUERY is not defined".to_string()));
        }
        if self.output_dir.trim().is_empty() {
            return Err(ExtractError::Configuration(
                "output directory is not defined".to_string(),
            ));
        }
        if self.output_name.trim().is_empty() {
            return Err(ExtractError::Configuration(
                "output file name is not defined".to_string(),
            ));
        }
        Ok(())
    }

    /// `output_dir/output_name<extension>`; identical on every cycle.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
            .join(format!("{}{}", self.output_name, self.format.extension()))
    }
}
