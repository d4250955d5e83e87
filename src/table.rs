//! CSV boundary: reading scraped tables and writing cleaned ones.

use crate::error::{RecordIssue, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// One data row and the line it started on in the source file
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub line: u64,
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Read a headed CSV file. Rows whose fields cannot be decoded are returned
/// as `MalformedRow` issues instead of failing the read; I/O errors are fatal.
pub fn read_table(path: &Path) -> Result<(Table, Vec<RecordIssue>)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    let mut rejected = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                rows.push(TableRow {
                    line,
                    cells: record.iter().map(str::to_string).collect(),
                });
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                warn!(line, error = %e, "Skipping undecodable row");
                rejected.push(RecordIssue::MalformedRow {
                    line,
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(path = %path.display(), rows = rows.len(), "Read table");
    Ok((Table { headers, rows }, rejected))
}

/// Write `headers` and `rows` as CSV, creating parent directories as needed
pub fn write_table<I>(path: &Path, headers: &[String], rows: I) -> Result<usize>
where
    I: IntoIterator<Item = Vec<String>>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    let mut written = 0;
    for row in rows {
        writer.write_record(&row)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}
