pub mod classifier;
pub mod levels;
pub mod location;
pub mod salary;
pub mod skills;
pub mod title;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants;
use crate::error::RecordIssue;
use crate::types::{NormalizedJobRecord, RawJobRecord};

/// Knobs shared by every stage
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerSettings {
    /// Emit "Texas" instead of "TX"
    pub use_full_state_names: bool,
    /// Fill empty Education/Experience/Job Level cells from the Skills list
    pub backfill_from_skills: bool,
    /// Extra cell values meaning "no data", compared case-insensitively
    pub extra_sentinels: Vec<String>,
}

/// A normalized record and what went missing or unparsed along the way
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationOutcome {
    pub record: NormalizedJobRecord,
    pub issues: Vec<RecordIssue>,
}

impl NormalizationOutcome {
    pub fn has_unparsable(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i, RecordIssue::UnparsableText { .. }))
    }
}

/// Applies the salary, location, title and level stages to one record.
/// Stateless apart from its settings, so one instance can be shared by workers.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    settings: NormalizerSettings,
    sentinels: Vec<String>,
}

impl RecordNormalizer {
    pub fn new(settings: NormalizerSettings) -> Self {
        let sentinels = constants::DEFAULT_SENTINELS
            .iter()
            .map(|s| s.to_string())
            .chain(settings.extra_sentinels.iter().map(|s| s.trim().to_lowercase()))
            .collect();
        Self {
            settings,
            sentinels,
        }
    }

    /// `None` for empty cells and sentinels such as "N/A"
    pub fn present<'a>(&self, cell: &'a str) -> Option<&'a str> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();
        if self.sentinels.iter().any(|s| *s == lowered) {
            return None;
        }
        Some(trimmed)
    }

    /// Run a stage on one field, recording why its output is absent
    fn stage<T>(
        &self,
        field: &str,
        cell: Option<&str>,
        issues: &mut Vec<RecordIssue>,
        f: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        let Some(text) = cell else {
            issues.push(RecordIssue::missing(field));
            return None;
        };
        let out = f(text);
        if out.is_none() {
            debug!(field, text, "No rule matched, leaving derived value empty");
            issues.push(RecordIssue::unparsable(field, text));
        }
        out
    }

    /// Cells for the level stages, back-filled from Skills when enabled
    fn level_sources(&self, raw: &RawJobRecord) -> [Option<String>; 3] {
        let mut sources = [
            self.present(&raw.education).map(str::to_string),
            self.present(&raw.experience).map(str::to_string),
            self.present(&raw.job_level).map(str::to_string),
        ];
        if !self.settings.backfill_from_skills || sources.iter().all(Option::is_some) {
            return sources;
        }

        let items = self.present(&raw.skills).map(skills::split_skills).unwrap_or_default();
        let title = self.present(&raw.job_title).unwrap_or("");
        let partition = skills::partition_skills(&items, title);
        let buckets = [partition.education, partition.experience, partition.levels];

        for (source, bucket) in sources.iter_mut().zip(buckets) {
            if source.is_none() && !bucket.is_empty() {
                *source = Some(bucket.join(", "));
            }
        }
        sources
    }

    pub fn normalize(&self, raw: &RawJobRecord) -> NormalizationOutcome {
        let mut issues = Vec::new();

        let salary = self.stage(
            constants::SALARY,
            self.present(&raw.salary),
            &mut issues,
            salary::normalize_salary,
        );
        let state = self.stage(
            constants::LOCATION,
            self.present(&raw.location),
            &mut issues,
            |text| location::resolve_state(text, self.settings.use_full_state_names),
        );
        let standardized_title = self.stage(
            constants::JOB_TITLE,
            self.present(&raw.job_title),
            &mut issues,
            |text| Some(title::standardize_title(text)),
        );

        let [education, experience, job_level] = self.level_sources(raw);
        let education_level = self.stage(
            constants::EDUCATION,
            education.as_deref(),
            &mut issues,
            levels::education_level,
        );
        let experience_level = self.stage(
            constants::EXPERIENCE,
            experience.as_deref(),
            &mut issues,
            levels::experience_level,
        );
        let job_level = self.stage(
            constants::JOB_LEVEL,
            job_level.as_deref(),
            &mut issues,
            levels::job_level,
        );

        NormalizationOutcome {
            record: NormalizedJobRecord {
                raw: raw.clone(),
                salary,
                state,
                standardized_title,
                education_level,
                experience_level,
                job_level,
            },
            issues,
        }
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(NormalizerSettings::default())
    }
}
