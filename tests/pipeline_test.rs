use anyhow::Result;
use jobs_normalizer::config::PipelineConfig;
use jobs_normalizer::constants;
use jobs_normalizer::table::read_table;
use jobs_normalizer::{NormalizerSettings, Pipeline, RecordIssue, RecordNormalizer};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const RAW_TABLE: &str = "\
Job Title,Company,Location,Skills,Education,Experience,Job Level,Salary
Senior Software Engineer,Acme,\"Austin, TX\",\"Rust, SQL\",Bachelor's degree,5+ years,Senior level,$121K - $160K (Glassdoor est.)
Data Scientist,Initech,Remote,N/A,PhD,10+ years,N/A,$30/hour
Research Scientist,Hooli,United States,N/A,N/A,N/A,N/A,N/A
Accountant,Globex,Somewhere,N/A,High school,none,Entry level,Competitive
Broken row,Only,Three
";

fn config(dir: &Path) -> PipelineConfig {
    PipelineConfig {
        input_path: dir.join("combined_output.csv"),
        output_path: dir.join("combined_output_CLEANED.csv"),
        workers: 2,
        write_report: true,
    }
}

fn rows_by_title(path: &Path) -> Result<Vec<HashMap<String, String>>> {
    let (table, _) = read_table(path)?;
    Ok(table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .cloned()
                .zip(row.cells.iter().cloned())
                .collect()
        })
        .collect())
}

#[tokio::test]
async fn test_normalizes_table_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path());
    fs::write(&config.input_path, RAW_TABLE)?;

    let pipeline = Pipeline::new(RecordNormalizer::default(), config.workers);
    let result = pipeline.run(&config).await?;

    assert_eq!(result.total_rows, 5);
    assert_eq!(result.written_rows, 4);
    assert_eq!(result.rejected.len(), 1);
    assert!(matches!(result.rejected[0], RecordIssue::MalformedRow { line: 6, .. }));
    assert_eq!(result.degraded_records, 3);
    assert_eq!(result.unparsable_records, 1);

    let rows = rows_by_title(&config.output_path)?;
    assert_eq!(rows.len(), 4);

    let swe = &rows[0];
    assert_eq!(swe["Job Title"], "Senior Software Engineer");
    assert_eq!(swe["salary_min"], "121000");
    assert_eq!(swe["salary_max"], "160000");
    assert_eq!(swe["salary_avg"], "140500");
    assert_eq!(swe["salary_type"], "yearly");
    assert_eq!(swe["salary_standardized"], "140500");
    assert_eq!(swe["state"], "TX");
    assert_eq!(swe["standardized_title"], "Software Engineer");
    assert_eq!(swe["education_level"], "2");
    assert_eq!(swe["experience_level"], "2");
    assert_eq!(swe["job_level"], "3");

    let ds = &rows[1];
    assert_eq!(ds["salary_type"], "hourly");
    assert_eq!(ds["salary_standardized"], "62400");
    assert_eq!(ds["state"], "Remote");
    assert_eq!(ds["education_level"], "4");
    assert_eq!(ds["experience_level"], "4");
    assert_eq!(ds["job_level"], "");

    let rs = &rows[2];
    assert_eq!(rs["Salary"], "N/A");
    assert_eq!(rs["salary_min"], "");
    assert_eq!(rs["salary_type"], "");
    assert_eq!(rs["state"], "United States");
    assert_eq!(rs["standardized_title"], "Research Scientist");

    let other = &rows[3];
    assert_eq!(other["standardized_title"], "Other");
    assert_eq!(other["state"], "");
    assert_eq!(other["education_level"], "");
    assert_eq!(other["experience_level"], "");
    assert_eq!(other["job_level"], "1");
    assert_eq!(other["salary_min"], "");

    let by_field = &result.issues_by_field;
    assert_eq!(by_field["Salary"]["missing_field"], 1);
    assert_eq!(by_field["Salary"]["unparsable_text"], 1);

    Ok(())
}

#[tokio::test]
async fn test_output_keeps_row_order_and_columns() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path());
    fs::write(&config.input_path, RAW_TABLE)?;

    Pipeline::new(RecordNormalizer::default(), 3).run(&config).await?;

    let (table, _) = read_table(&config.output_path)?;
    let expected: Vec<&str> = constants::RAW_COLUMNS
        .iter()
        .chain(constants::DERIVED_COLUMNS.iter())
        .copied()
        .collect();
    assert_eq!(table.headers, expected);
    let titles: Vec<&str> = table.rows.iter().map(|r| r.cells[0].as_str()).collect();
    assert_eq!(
        titles,
        vec!["Senior Software Engineer", "Data Scientist", "Research Scientist", "Accountant"]
    );
    Ok(())
}

#[tokio::test]
async fn test_rerun_on_output_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    let first = config(dir.path());
    fs::write(&first.input_path, RAW_TABLE)?;
    let pipeline = Pipeline::new(RecordNormalizer::default(), 2);
    pipeline.run(&first).await?;

    let second = PipelineConfig {
        input_path: first.output_path.clone(),
        output_path: dir.path().join("second_pass.csv"),
        ..first.clone()
    };
    pipeline.run(&second).await?;

    assert_eq!(fs::read_to_string(&first.output_path)?, fs::read_to_string(&second.output_path)?);
    Ok(())
}

#[tokio::test]
async fn test_full_state_names_flag() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path());
    fs::write(&config.input_path, RAW_TABLE)?;

    let normalizer = RecordNormalizer::new(NormalizerSettings {
        use_full_state_names: true,
        ..Default::default()
    });
    Pipeline::new(normalizer, 1).run(&config).await?;

    let rows = rows_by_title(&config.output_path)?;
    assert_eq!(rows[0]["state"], "Texas");
    assert_eq!(rows[1]["state"], "Remote");
    Ok(())
}

#[tokio::test]
async fn test_missing_header_column_rejects_rows_but_finishes() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path());
    fs::write(
        &config.input_path,
        "Job Title,Company,Location\nDeveloper,Acme,Remote\n",
    )?;

    let result = Pipeline::new(RecordNormalizer::default(), 1).run(&config).await?;
    assert_eq!(result.written_rows, 0);
    assert_eq!(result.rejected.len(), 1);
    assert!(config.output_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_report_is_written() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path());
    fs::write(&config.input_path, RAW_TABLE)?;

    let result = Pipeline::new(RecordNormalizer::default(), 2).run(&config).await?;

    let report_path = Pipeline::report_path(&config.output_path);
    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(report_path)?)?;
    assert_eq!(report["run_id"], result.run_id.to_string());
    assert_eq!(report["written_rows"], 4);
    assert_eq!(report["rejected"][0]["kind"], "malformed_row");
    Ok(())
}
