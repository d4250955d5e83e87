use crate::error::Result;
use crate::table::{self, TableRow};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Rows sharing identical cells
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DuplicateGroup {
    pub fingerprint: String,
    /// Source lines of every copy, first occurrence included
    pub lines: Vec<u64>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    pub total_rows: usize,
    pub duplicate_rows: usize,
    pub groups: Vec<DuplicateGroup>,
}

/// Hex SHA-256 over the row's cells. Cells are length-prefixed so that
/// ("ab", "c") and ("a", "bc") never collide.
pub fn row_fingerprint(cells: &[String]) -> String {
    let mut hasher = Sha256::new();
    for cell in cells {
        hasher.update((cell.len() as u64).to_le_bytes());
        hasher.update(cell.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Group identical rows, keeping every copy. Groups are ordered by first appearance.
pub fn find_duplicates(rows: &[TableRow]) -> Vec<DuplicateGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, DuplicateGroup> = HashMap::new();

    for row in rows {
        let fingerprint = row_fingerprint(&row.cells);
        groups
            .entry(fingerprint.clone())
            .or_insert_with(|| {
                order.push(fingerprint.clone());
                DuplicateGroup {
                    fingerprint,
                    lines: Vec::new(),
                    cells: row.cells.clone(),
                }
            })
            .lines
            .push(row.line);
    }

    order
        .into_iter()
        .filter_map(|fp| groups.remove(&fp))
        .filter(|group| group.lines.len() > 1)
        .collect()
}

pub fn check_duplicates(path: &Path) -> Result<DuplicateReport> {
    let (table, _) = table::read_table(path)?;
    let groups = find_duplicates(&table.rows);
    let duplicate_rows = groups.iter().map(|g| g.lines.len()).sum();

    if groups.is_empty() {
        info!("No duplicate rows found in {}", path.display());
    } else {
        info!(
            "{} duplicate rows in {} groups found in {}",
            duplicate_rows,
            groups.len(),
            path.display()
        );
    }

    Ok(DuplicateReport {
        total_rows: table.rows.len(),
        duplicate_rows,
        groups,
    })
}
