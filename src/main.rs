use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use jobs_normalizer::config::{Config, DEFAULT_CONFIG_PATH};
use jobs_normalizer::{logging, metrics, tools, Pipeline, RecordNormalizer};

#[derive(Parser)]
#[command(name = "jobs_normalizer")]
#[command(about = "Normalizes scraped job-posting tables")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize salary, location, title and level fields of a table
    Normalize {
        /// Raw table written by the collectors
        #[arg(long)]
        input: Option<PathBuf>,
        /// Where to write the cleaned table
        #[arg(long)]
        output: Option<PathBuf>,
        /// Emit full state names ("Texas") instead of codes ("TX")
        #[arg(long)]
        full_state_names: bool,
        /// Number of worker units to split the batch across
        #[arg(long)]
        workers: Option<usize>,
        /// Fill empty Education/Experience/Job Level cells from Skills
        #[arg(long)]
        backfill_from_skills: bool,
    },
    /// Concatenate every CSV file in a directory into one table
    Combine {
        #[arg(long, default_value = ".")]
        input_dir: PathBuf,
        #[arg(long, default_value = "combined_output.csv")]
        output: PathBuf,
    },
    /// Report rows that appear more than once in a table
    Duplicates {
        #[arg(long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    let _log_guard = logging::init_logging(&config.logging);
    if let Some(addr) = config.metrics.prometheus_addr {
        metrics::init_metrics(addr);
    }

    match cli.command {
        Commands::Normalize {
            input,
            output,
            full_state_names,
            workers,
            backfill_from_skills,
        } => {
            if let Some(input) = input {
                config.pipeline.input_path = input;
            }
            if let Some(output) = output {
                config.pipeline.output_path = output;
            }
            if let Some(workers) = workers {
                config.pipeline.workers = workers;
            }
            config.normalizer.use_full_state_names |= full_state_names;
            config.normalizer.backfill_from_skills |= backfill_from_skills;
            config.validate()?;

            println!("🔧 Normalizing {}...", config.pipeline.input_path.display());
            let pipeline = Pipeline::new(
                RecordNormalizer::new(config.normalizer.clone()),
                config.pipeline.workers,
            );
            match pipeline.run(&config.pipeline).await {
                Ok(result) => {
                    println!("\n📊 Normalization results:");
                    println!("   Rows read: {}", result.total_rows);
                    println!("   Rows written: {}", result.written_rows);
                    println!("   Rejected: {}", result.rejected.len());
                    println!("   Degraded: {}", result.degraded_records);
                    println!("   Output file: {}", result.output_file.display());
                    if !result.rejected.is_empty() {
                        println!("\n⚠️  Rejected rows:");
                        for issue in &result.rejected {
                            println!("   - {}", issue);
                        }
                    }
                }
                Err(e) => {
                    error!("Normalization failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Combine { input_dir, output } => {
            let result = tools::combine_csv_files(&input_dir, &output)
                .with_context(|| format!("combining CSV files in {}", input_dir.display()))?;
            println!(
                "✅ Combined {} files ({} rows) into {}",
                result.files.len(),
                result.rows_written,
                result.output_file.display()
            );
        }
        Commands::Duplicates { input } => {
            let report = tools::check_duplicates(&input)
                .with_context(|| format!("checking {} for duplicates", input.display()))?;
            if report.groups.is_empty() {
                println!("No duplicate rows found.");
            } else {
                println!("Duplicate rows found:");
                for group in &report.groups {
                    let lines: Vec<String> = group.lines.iter().map(|l| l.to_string()).collect();
                    println!("   lines {}: {}", lines.join(", "), group.cells.join(" | "));
                }
            }
            info!(
                total_rows = report.total_rows,
                duplicate_rows = report.duplicate_rows,
                "Duplicate check finished"
            );
        }
    }
    Ok(())
}
