use crate::error::{JobsError, Result};
use crate::table::{self, Table};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct CombineResult {
    pub files: Vec<PathBuf>,
    pub rows_written: usize,
    pub columns: Vec<String>,
    pub output_file: PathBuf,
}

/// All `*.csv` files directly inside `dir`, sorted by name, excluding `skip`
pub fn csv_files(dir: &Path, skip: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv || !path.is_file() {
            continue;
        }
        if skip.map_or(false, |s| same_file(s, &path)) {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Union of headers in first-seen order
fn merged_headers(tables: &[Table]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for table in tables {
        for header in &table.headers {
            if !headers.contains(header) {
                headers.push(header.clone());
            }
        }
    }
    headers
}

/// Concatenate every CSV file of `input_dir` into `output`. Columns are
/// aligned by header name; a file lacking a column contributes empty cells.
pub fn combine_csv_files(input_dir: &Path, output: &Path) -> Result<CombineResult> {
    let files = csv_files(input_dir, Some(output))?;
    if files.is_empty() {
        return Err(JobsError::Config(format!(
            "No CSV files found in {}",
            input_dir.display()
        )));
    }
    info!("Found {} CSV files to combine", files.len());

    let mut tables = Vec::with_capacity(files.len());
    for file in &files {
        let (table, rejected) = table::read_table(file)?;
        for issue in &rejected {
            warn!(file = %file.display(), "Dropping row: {}", issue);
        }
        tables.push(table);
    }

    let columns = merged_headers(&tables);
    let rows = tables.iter().flat_map(|table| {
        let positions: Vec<Option<usize>> = columns.iter().map(|c| table.column_index(c)).collect();
        table.rows.iter().map(move |row| {
            positions
                .iter()
                .map(|p| p.and_then(|i| row.get(i)).unwrap_or_default().to_string())
                .collect::<Vec<String>>()
        })
    });
    let rows_written = table::write_table(output, &columns, rows)?;
    info!(
        "Successfully combined {} CSV files into {}",
        files.len(),
        output.display()
    );

    Ok(CombineResult {
        files,
        rows_written,
        columns,
        output_file: output.to_path_buf(),
    })
}
