//! Infrastructure adapter for writing query results to the local filesystem.

use crate::domain::entities::{OutputFormat, TabularResult, Value};
use crate::domain::errors::{ExtractError, Result};
use crate::ports::result_writer_port::ResultWriterPort;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Concrete implementation of `ResultWriterPort` for local storage.
///
/// Every call opens the target path directly and truncates it, so the file is
/// replaced in place on each cycle. The handle is flushed and dropped before
/// `write` returns.
#[derive(Debug, Default, Clone)]
pub struct LocalResultWriter;

impl LocalResultWriter {
    pub fn new() -> Self {
        Self
    }

    /// Writes using the external extension form of the format (`.csv`,
    /// `.txt`, `.xlsx`).
    ///
    /// An unknown extension fails before anything touches the filesystem.
    pub fn write_as(&self, result: &TabularResult, file_path: &Path, extension: &str) -> Result<()> {
        let format = OutputFormat::from_extension(extension)?;
        self.write(result, file_path, format)
    }

    fn ensure_parent_dir(file_path: &Path) -> Result<()> {
        match file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
                .map_err(|e| ExtractError::file_op(dir, format!("cannot create directory: {}", e))),
            _ => Ok(()),
        }
    }

    fn write_csv(result: &TabularResult, file_path: &Path) -> Result<()> {
        let file = File::create(file_path).map_err(|e| ExtractError::file_op(file_path, e))?;
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(BufWriter::new(file));

        // A zero-row result has no column names; the file stays empty.
        if !result.columns.is_empty() {
            wtr.write_record(&result.columns)
                .map_err(|e| ExtractError::file_op(file_path, e))?;
        }

        for row in &result.rows {
            wtr.write_record(row.iter().map(Value::to_display_string))
                .map_err(|e| ExtractError::file_op(file_path, e))?;
        }

        wtr.flush().map_err(|e| ExtractError::file_op(file_path, e))?;
        Ok(())
    }

    fn write_tsv(result: &TabularResult, file_path: &Path) -> Result<()> {
        let file = File::create(file_path).map_err(|e| ExtractError::file_op(file_path, e))?;
        let mut out = BufWriter::new(file);

        if !result.columns.is_empty() {
            writeln!(out, "{}", result.columns.join("\t"))
                .map_err(|e| ExtractError::file_op(file_path, e))?;
        }

        for row in &result.rows {
            let line: Vec<String> = row.iter().map(Value::to_display_string).collect();
            writeln!(out, "{}", line.join("\t")).map_err(|e| ExtractError::file_op(file_path, e))?;
        }

        out.flush().map_err(|e| ExtractError::file_op(file_path, e))?;
        Ok(())
    }

    fn write_workbook(result: &TabularResult, file_path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        Self::fill_sheet(sheet, result).map_err(|e| ExtractError::file_op(file_path, e))?;

        workbook
            .save(file_path)
            .map_err(|e| ExtractError::file_op(file_path, e))
    }

    /// Header on row 0, data from row 1; nulls leave the cell empty.
    fn fill_sheet(sheet: &mut Worksheet, result: &TabularResult) -> std::result::Result<(), XlsxError> {
        for (c, name) in result.columns.iter().enumerate() {
            sheet.write_string(0, Self::col_index(c)?, name.as_str())?;
        }

        for (r, row) in result.rows.iter().enumerate() {
            let r = u32::try_from(r + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (c, value) in row.iter().enumerate() {
                let c = Self::col_index(c)?;
                match value {
                    Value::Null => {}
                    Value::Integer(i) => {
                        sheet.write_number(r, c, *i as f64)?;
                    }
                    Value::Float(f) => {
                        sheet.write_number(r, c, *f)?;
                    }
                    Value::Boolean(b) => {
                        sheet.write_boolean(r, c, *b)?;
                    }
                    other => {
                        sheet.write_string(r, c, other.to_display_string())?;
                    }
                }
            }
        }
        Ok(())
    }

    fn col_index(c: usize) -> std::result::Result<u16, XlsxError> {
        u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)
    }
}

impl ResultWriterPort for LocalResultWriter {
    fn write(&self, result: &TabularResult, file_path: &Path, format: OutputFormat) -> Result<()> {
        Self::ensure_parent_dir(file_path)?;

        match format {
            OutputFormat::Csv => Self::write_csv(result, file_path),
            OutputFormat::Tsv => Self::write_tsv(result, file_path),
            OutputFormat::Workbook => Self::write_workbook(result, file_path),
        }
    }
}
