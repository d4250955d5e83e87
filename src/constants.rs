/// Column names shared with the collectors and the output table.
/// These must match the header row the scrapers write.

// Raw columns, in the order the collectors emit them
pub const JOB_TITLE: &str = "Job Title";
pub const COMPANY: &str = "Company";
pub const LOCATION: &str = "Location";
pub const SKILLS: &str = "Skills";
pub const EDUCATION: &str = "Education";
pub const EXPERIENCE: &str = "Experience";
pub const JOB_LEVEL: &str = "Job Level";
pub const SALARY: &str = "Salary";

pub const RAW_COLUMNS: [&str; 8] = [
    JOB_TITLE, COMPANY, LOCATION, SKILLS, EDUCATION, EXPERIENCE, JOB_LEVEL, SALARY,
];

// Derived columns, appended after the raw ones
pub const SALARY_MIN: &str = "salary_min";
pub const SALARY_MAX: &str = "salary_max";
pub const SALARY_AVG: &str = "salary_avg";
pub const SALARY_TYPE: &str = "salary_type";
pub const SALARY_STANDARDIZED: &str = "salary_standardized";
pub const STATE: &str = "state";
pub const STANDARDIZED_TITLE: &str = "standardized_title";
pub const EDUCATION_LEVEL: &str = "education_level";
pub const EXPERIENCE_LEVEL: &str = "experience_level";
pub const JOB_LEVEL_ORDINAL: &str = "job_level";

pub const DERIVED_COLUMNS: [&str; 10] = [
    SALARY_MIN,
    SALARY_MAX,
    SALARY_AVG,
    SALARY_TYPE,
    SALARY_STANDARDIZED,
    STATE,
    STANDARDIZED_TITLE,
    EDUCATION_LEVEL,
    EXPERIENCE_LEVEL,
    JOB_LEVEL_ORDINAL,
];

/// Values treated as absent regardless of case (besides the empty cell)
pub const DEFAULT_SENTINELS: [&str; 2] = ["n/a", "nan"];

// Yearly-equivalent assumptions
pub const HOURS_PER_WEEK: f64 = 40.0;
pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

pub const THOUSAND: f64 = 1_000.0;
pub const MILLION: f64 = 1_000_000.0;

/// Suffix of the run report written next to the output table
pub const REPORT_SUFFIX: &str = "report.json";
