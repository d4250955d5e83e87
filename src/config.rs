use crate::error::{JobsError, Result};
use crate::normalize::NormalizerSettings;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub normalizer: NormalizerSettings,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Number of blocking worker units the batch is split across
    pub workers: usize,
    /// Write `<output>.report.json` next to the output table
    pub write_report: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("combined_output.csv"),
            output_path: PathBuf::from("combined_output_CLEANED.csv"),
            workers: 4,
            write_report: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
    pub file_name: String,
    /// Filter used when RUST_LOG is unset
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_name: "normalizer.log".to_string(),
            default_filter: "jobs_normalizer=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Serve Prometheus metrics on this address when set
    pub prometheus_addr: Option<SocketAddr>,
}

impl Config {
    /// Load from `path`. A missing file at the default location yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() && path == Path::new(DEFAULT_CONFIG_PATH) {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            JobsError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.workers == 0 {
            return Err(JobsError::Config(
                "pipeline.workers must be at least 1".to_string(),
            ));
        }
        if self.pipeline.input_path == self.pipeline.output_path {
            return Err(JobsError::Config(
                "pipeline.output_path must differ from pipeline.input_path".to_string(),
            ));
        }
        Ok(())
    }
}
