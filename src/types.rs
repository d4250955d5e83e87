use crate::constants;
use crate::normalize::location::StateValue;
use crate::normalize::salary::SalaryFields;
use crate::normalize::title::TitleCategory;
use serde::Serialize;

/// One scraped job posting, cells exactly as the collector wrote them.
/// Sentinel detection happens in the normalizer, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawJobRecord {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub skills: String,
    pub education: String,
    pub experience: String,
    pub job_level: String,
}

impl RawJobRecord {
    /// Mutable access by column name, used when building records from table rows
    pub fn get_mut(&mut self, column: &str) -> Option<&mut String> {
        match column {
            constants::JOB_TITLE => Some(&mut self.job_title),
            constants::COMPANY => Some(&mut self.company),
            constants::LOCATION => Some(&mut self.location),
            constants::SALARY => Some(&mut self.salary),
            constants::SKILLS => Some(&mut self.skills),
            constants::EDUCATION => Some(&mut self.education),
            constants::EXPERIENCE => Some(&mut self.experience),
            constants::JOB_LEVEL => Some(&mut self.job_level),
            _ => None,
        }
    }
}

/// A raw record plus every derived field. `None` means absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedJobRecord {
    pub raw: RawJobRecord,
    pub salary: Option<SalaryFields>,
    pub state: Option<StateValue>,
    pub standardized_title: Option<TitleCategory>,
    pub education_level: Option<u8>,
    pub experience_level: Option<u8>,
    pub job_level: Option<u8>,
}

impl NormalizedJobRecord {
    /// Derived cells in `constants::DERIVED_COLUMNS` order; absent fields are empty cells
    pub fn derived_cells(&self) -> Vec<String> {
        let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        let ordinal = |v: Option<u8>| v.map(|n| n.to_string()).unwrap_or_default();
        let salary = self.salary.as_ref();

        vec![
            number(salary.map(|s| s.min)),
            number(salary.map(|s| s.max)),
            number(salary.map(|s| s.avg)),
            salary.map(|s| s.salary_type.as_str().to_string()).unwrap_or_default(),
            number(salary.map(|s| s.standardized)),
            self.state.map(|s| s.as_str().to_string()).unwrap_or_default(),
            self.standardized_title
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            ordinal(self.education_level),
            ordinal(self.experience_level),
            ordinal(self.job_level),
        ]
    }

    /// True when any derived field came out absent
    pub fn is_degraded(&self) -> bool {
        self.salary.is_none()
            || self.state.is_none()
            || self.standardized_title.is_none()
            || self.education_level.is_none()
            || self.experience_level.is_none()
            || self.job_level.is_none()
    }
}
