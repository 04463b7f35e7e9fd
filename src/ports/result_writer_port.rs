use crate::domain::entities::{OutputFormat, TabularResult};
use crate::domain::errors::Result;
use std::path::Path;

/// Port for materializing a query result to a file.
pub trait ResultWriterPort: Send + Sync {
    /// Writes `result` to `file_path` in `format`, creating parent directories
    /// and overwriting any previous file.
    fn write(&self, result: &TabularResult, file_path: &Path, format: OutputFormat) -> Result<()>;
}
