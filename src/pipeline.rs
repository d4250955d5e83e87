use crate::config::PipelineConfig;
use crate::constants;
use crate::error::{RecordIssue, Result};
use crate::metrics::PipelineMetrics;
use crate::normalize::{NormalizationOutcome, RecordNormalizer};
use crate::table::{self, Table, TableRow};
use crate::types::RawJobRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub total_rows: usize,
    pub written_rows: usize,
    /// Records with at least one derived field left empty
    pub degraded_records: usize,
    /// Records where some present text matched no rule
    pub unparsable_records: usize,
    pub rejected: Vec<RecordIssue>,
    /// field -> issue kind -> count
    pub issues_by_field: BTreeMap<String, BTreeMap<String, usize>>,
}

/// Row ready for normalization: where it came from and what passes through untouched
#[derive(Debug)]
struct PreparedRow {
    line: u64,
    passthrough: Vec<String>,
    raw: RawJobRecord,
}

pub struct Pipeline {
    normalizer: Arc<RecordNormalizer>,
    workers: usize,
}

impl Pipeline {
    pub fn new(normalizer: RecordNormalizer, workers: usize) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
            workers: workers.max(1),
        }
    }

    /// Columns carried over from the input. Derived columns from an earlier
    /// run are dropped so that re-running on an output table is idempotent.
    fn passthrough_columns(headers: &[String]) -> Vec<usize> {
        headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !constants::DERIVED_COLUMNS.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Build the raw record for one row, or reject it when a raw column is absent
    fn prepare_row(
        row: TableRow,
        raw_positions: &[(&'static str, Option<usize>)],
        passthrough: &[usize],
    ) -> std::result::Result<PreparedRow, RecordIssue> {
        let mut raw = RawJobRecord::default();
        for (column, position) in raw_positions {
            let cell = position.and_then(|i| row.get(i)).ok_or_else(|| RecordIssue::MalformedRow {
                line: row.line,
                reason: format!("missing column '{}'", column),
            })?;
            if let Some(slot) = raw.get_mut(column) {
                *slot = cell.to_string();
            }
        }

        let passthrough = passthrough
            .iter()
            .map(|&i| row.get(i).unwrap_or_default().to_string())
            .collect();

        Ok(PreparedRow {
            line: row.line,
            passthrough,
            raw,
        })
    }

    /// Normalize records on `workers` blocking tasks. Output order matches input order.
    pub async fn normalize_batch(
        normalizer: Arc<RecordNormalizer>,
        records: Vec<RawJobRecord>,
        workers: usize,
    ) -> Result<Vec<NormalizationOutcome>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let chunk_size = records.len().div_ceil(workers.max(1));

        let mut handles = Vec::new();
        let mut remaining = records.into_iter().peekable();
        while remaining.peek().is_some() {
            let chunk: Vec<RawJobRecord> = remaining.by_ref().take(chunk_size).collect();
            let normalizer = Arc::clone(&normalizer);
            handles.push(tokio::task::spawn_blocking(move || {
                chunk
                    .iter()
                    .map(|raw| normalizer.normalize(raw))
                    .collect::<Vec<_>>()
            }));
        }
        debug!(chunks = handles.len(), chunk_size, "Dispatched normalization chunks");

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.extend(handle.await?);
        }
        Ok(outcomes)
    }

    /// Path of the JSON run report for an output table
    pub fn report_path(output: &Path) -> PathBuf {
        output.with_extension(constants::REPORT_SUFFIX)
    }

    /// Read, normalize and write one table
    #[instrument(skip(self, config), fields(input = %config.input_path.display()))]
    pub async fn run(&self, config: &PipelineConfig) -> Result<PipelineResult> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let t_run = std::time::Instant::now();
        info!(%run_id, "Starting normalization run");

        // Step 1: read the raw table
        let (table, mut rejected) = table::read_table(&config.input_path)?;
        let Table { headers, rows } = table;
        let total_rows = rows.len() + rejected.len();
        info!("Read {} rows from {}", total_rows, config.input_path.display());

        let raw_positions: Vec<(&'static str, Option<usize>)> = constants::RAW_COLUMNS
            .iter()
            .map(|&column| (column, headers.iter().position(|h| h == column)))
            .collect();
        for (column, position) in &raw_positions {
            if position.is_none() {
                warn!(column, "Input header lacks a required column; every row will be rejected");
            }
        }
        let passthrough = Self::passthrough_columns(&headers);

        // Step 2: validate rows
        let mut prepared = Vec::with_capacity(rows.len());
        for row in rows {
            match Self::prepare_row(row, &raw_positions, &passthrough) {
                Ok(row) => prepared.push(row),
                Err(issue) => {
                    warn!("Rejecting row: {}", issue);
                    rejected.push(issue);
                }
            }
        }
        rejected.sort_by_key(|issue| match issue {
            RecordIssue::MalformedRow { line, .. } => *line,
            _ => 0,
        });

        // Step 3: normalize
        let (lines_and_cells, records): (Vec<_>, Vec<_>) = prepared
            .into_iter()
            .map(|row| ((row.line, row.passthrough), row.raw))
            .unzip();
        let outcomes = Self::normalize_batch(Arc::clone(&self.normalizer), records, self.workers).await?;

        // Step 4: tally issues
        let mut issues_by_field: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        let mut degraded_records = 0;
        let mut unparsable_records = 0;
        for ((line, _), outcome) in lines_and_cells.iter().zip(&outcomes) {
            if outcome.record.is_degraded() {
                degraded_records += 1;
            }
            if outcome.has_unparsable() {
                unparsable_records += 1;
                debug!(line, "Record has unparsable fields");
            }
            for issue in &outcome.issues {
                let field = match issue {
                    RecordIssue::MissingField { field } | RecordIssue::UnparsableText { field, .. } => field,
                    RecordIssue::MalformedRow { .. } => continue,
                };
                *issues_by_field
                    .entry(field.clone())
                    .or_default()
                    .entry(issue.kind().to_string())
                    .or_default() += 1;
                PipelineMetrics::record_issue(issue.kind(), field.clone());
            }
        }

        // Step 5: write the cleaned table
        let mut out_headers: Vec<String> = passthrough.iter().map(|&i| headers[i].clone()).collect();
        out_headers.extend(constants::DERIVED_COLUMNS.iter().map(|c| c.to_string()));
        let out_rows = lines_and_cells
            .into_iter()
            .zip(&outcomes)
            .map(|((_, mut cells), outcome)| {
                cells.extend(outcome.record.derived_cells());
                cells
            });
        let written_rows = table::write_table(&config.output_path, &out_headers, out_rows)?;
        info!("💾 Wrote {} rows to {}", written_rows, config.output_path.display());

        let result = PipelineResult {
            run_id,
            started_at,
            finished_at: Utc::now(),
            input_file: config.input_path.clone(),
            output_file: config.output_path.clone(),
            total_rows,
            written_rows,
            degraded_records,
            unparsable_records,
            rejected,
            issues_by_field,
        };

        if config.write_report {
            let report = Self::report_path(&config.output_path);
            fs::write(&report, serde_json::to_string_pretty(&result)?)?;
            info!("Saved run report to {}", report.display());
        }

        PipelineMetrics::record_run(
            result.total_rows,
            result.written_rows,
            result.rejected.len(),
            result.degraded_records,
            t_run.elapsed().as_secs_f64(),
        );
        info!(
            "✅ Normalized {} rows ({} rejected, {} degraded)",
            result.written_rows,
            result.rejected.len(),
            result.degraded_records
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: u64, cells: &[&str]) -> TableRow {
        TableRow {
            line,
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_previous_derived_columns_are_dropped() {
        let headers: Vec<String> = ["Job Title", "salary_min", "Extra", "state"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(Pipeline::passthrough_columns(&headers), vec![0, 2]);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let positions: Vec<(&str, Option<usize>)> = vec![(constants::JOB_TITLE, Some(0)), (constants::SALARY, Some(1))];
        let err = Pipeline::prepare_row(row(7, &["Engineer"]), &positions, &[0]).unwrap_err();
        assert_eq!(
            err,
            RecordIssue::MalformedRow {
                line: 7,
                reason: "missing column 'Salary'".to_string()
            }
        );
    }

    #[test]
    fn test_prepared_row_keeps_raw_text() {
        let positions: Vec<(&str, Option<usize>)> = vec![(constants::JOB_TITLE, Some(0)), (constants::SALARY, Some(1))];
        let prepared = Pipeline::prepare_row(row(2, &["Engineer", "N/A", "x"]), &positions, &[0, 1, 2]).unwrap();
        assert_eq!(prepared.raw.job_title, "Engineer");
        assert_eq!(prepared.raw.salary, "N/A");
        assert_eq!(prepared.passthrough, vec!["Engineer", "N/A", "x"]);
    }

    #[tokio::test]
    async fn test_batch_preserves_order_across_workers() {
        let records: Vec<RawJobRecord> = (0..25)
            .map(|i| RawJobRecord {
                experience: format!("{} years", i),
                ..Default::default()
            })
            .collect();
        let normalizer = Arc::new(RecordNormalizer::default());

        let single = Pipeline::normalize_batch(Arc::clone(&normalizer), records.clone(), 1).await.unwrap();
        let many = Pipeline::normalize_batch(normalizer, records, 4).await.unwrap();
        assert_eq!(single, many);
        assert_eq!(many.len(), 25);
        assert_eq!(many[0].record.experience_level, Some(1));
        assert_eq!(many[24].record.experience_level, Some(4));
    }

    #[test]
    fn test_report_path_sits_next_to_output() {
        assert_eq!(
            Pipeline::report_path(Path::new("out/clean.csv")),
            PathBuf::from("out/clean.report.json")
        );
    }
}
