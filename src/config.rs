use crate::domain::entities::{
    DataSourceConfig, ExtractionJob, OutputFormat, DEFAULT_INTERVAL_SECONDS,
};
use crate::domain::errors::{ExtractError, Result};
use clap::Parser;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;

pub const DEFAULT_USER: &str = "SYSDBA";
pub const DEFAULT_PASSWORD: &str = "masterkey";
pub const DEFAULT_PORT: &str = "3050";
pub const DEFAULT_FORMAT: &str = ".xlsx";

/// Environment variable consulted when no password is configured.
pub const PASSWORD_ENV: &str = "ISC_PASSWORD";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub job: JobConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Database path, or `host|path` for a remote server.
    #[serde(default)]
    pub address: String,
    #[serde(default = "default_user")]
    pub user: String,
    pub password: Option<String>,
    #[serde(default = "default_port", deserialize_with = "string_or_number")]
    pub port: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            user: default_user(),
            password: None,
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JobConfig {
    #[serde(default)]
    pub query: String,
    /// Read the query text from this file when `query` is empty.
    pub query_file: Option<String>,
    #[serde(default)]
    pub output_dir: String,
    #[serde(default)]
    pub output_name: String,
    /// One of `.csv`, `.txt`, `.xlsx`.
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    /// `S` (or `true`) repeats the job every `interval_seconds`.
    #[serde(default, deserialize_with = "repeat_flag")]
    pub repeat: bool,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            query_file: None,
            output_dir: String::new(),
            output_name: String::new(),
            format: default_format(),
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            repeat: false,
        }
    }
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_SECONDS
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(u64),
}

/// Ports show up both as `3050` and `"3050"` in hand-written files.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

/// Single-character flag: only `S` (any case) means yes.
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("S")
}

fn repeat_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => parse_flag(&s),
    })
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    // Overrides for ad-hoc runs
    /// Database path or `host|path`
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub user: Option<String>,
    /// Falls back to ISC_PASSWORD when neither CLI nor file set it
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub port: Option<String>,
    #[arg(short, long)]
    pub query: Option<String>,
    #[arg(short, long)]
    pub output_dir: Option<String>,
    #[arg(long)]
    pub output_name: Option<String>,
    /// Output extension: .csv, .txt or .xlsx
    #[arg(short, long)]
    pub format: Option<String>,
    /// Seconds between cycles when repeating
    #[arg(short, long)]
    pub interval: Option<u64>,
    /// Repeat the job until interrupted
    #[arg(short, long)]
    pub repeat: bool,
    /// Only check that the database accepts a connection, then exit
    #[arg(long)]
    pub test_connection: bool,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            ExtractError::Configuration(format!("cannot open config file {}: {}", path, e))
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: AppConfig = if path.ends_with(".json") {
            serde_json::from_str(&contents)
                .map_err(|e| ExtractError::Configuration(format!("{}: {}", path, e)))?
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| ExtractError::Configuration(format!("{}: {}", path, e)))?
        };

        Ok(config)
    }

    /// File values (when a file is given) with CLI overrides on top.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_cli(args);
        Ok(config)
    }

    pub fn merge_cli(&mut self, args: &CliArgs) {
        if let Some(a) = &args.address { self.database.address = a.clone(); }
        if let Some(u) = &args.user { self.database.user = u.clone(); }
        if let Some(p) = &args.password { self.database.password = Some(p.clone()); }
        if let Some(p) = &args.port { self.database.port = p.clone(); }
        if let Some(q) = &args.query { self.job.query = q.clone(); }
        if let Some(o) = &args.output_dir { self.job.output_dir = o.clone(); }
        if let Some(n) = &args.output_name { self.job.output_name = n.clone(); }
        if let Some(f) = &args.format { self.job.format = f.clone(); }
        if let Some(i) = args.interval { self.job.interval_seconds = i; }
        if args.repeat { self.job.repeat = true; }
    }

    /// Connection settings with surrounding whitespace removed and the
    /// password resolved from the environment when not configured.
    pub fn data_source(&self) -> DataSourceConfig {
        let env_password = std::env::var(PASSWORD_ENV).ok();
        DataSourceConfig {
            address: self.database.address.trim().to_string(),
            user: self.database.user.trim().to_string(),
            password: resolve_password(self.database.password.as_deref(), env_password),
            port: self.database.port.trim().to_string(),
        }
    }

    /// Builds the extraction job; an unknown format is a configuration error.
    pub fn extraction_job(&self) -> Result<ExtractionJob> {
        let format = OutputFormat::from_extension(&self.job.format)
            .map_err(|e| ExtractError::Configuration(e.to_string()))?;

        let query = match (&self.job.query_file, self.job.query.trim().is_empty()) {
            (Some(path), true) => std::fs::read_to_string(path).map_err(|e| {
                ExtractError::Configuration(format!("cannot read query file {}: {}", path, e))
            })?,
            _ => self.job.query.clone(),
        };

        let mut job = ExtractionJob::new(
            query,
            self.job.output_dir.as_str(),
            self.job.output_name.as_str(),
            format,
        )?;
        job.interval_seconds = self.job.interval_seconds;
        job.repeat = self.job.repeat;
        Ok(job)
    }

    pub fn validate(&self) -> Result<()> {
        self.data_source().validate()?;
        self.extraction_job().map(|_| ())
    }
}

/// Configured value first, then the environment, then the server default.
fn resolve_password(configured: Option<&str>, env: Option<String>) -> String {
    configured
        .map(str::to_string)
        .or(env)
        .unwrap_or_else(|| DEFAULT_PASSWORD.to_string())
}
