//! Splits a scraped skills list into genuine skills and the education,
//! experience and seniority items job boards mix into it.

use serde::Serialize;

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "b.s.",
    "b.a.",
    "master",
    "m.s.",
    "m.a.",
    "phd",
    "ph.d",
    "doctorate",
    "doctor",
    "degree",
    "education",
    "diploma",
    "certificate",
    "certification",
    "graduate",
    "undergraduate",
    "associate",
];

const EXPERIENCE_KEYWORDS: &[&str] = &["year"];

const LEVEL_KEYWORDS: &[&str] = &[
    "junior level",
    "entry level",
    "mid level",
    "mid-level",
    "senior level",
];

pub const SENIOR_HINT: &str = "Senior level";
pub const JUNIOR_HINT: &str = "Junior level";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillPartition {
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub levels: Vec<String>,
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Split a comma-separated skills cell into trimmed, non-empty items
pub fn split_skills(cell: &str) -> Vec<&str> {
    cell.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Sort each item into every bucket whose keywords it mentions; items that
/// match no bucket stay skills. A seniority hint from the title is appended
/// to the level bucket.
pub fn partition_skills(items: &[&str], job_title: &str) -> SkillPartition {
    let mut partition = SkillPartition::default();

    for item in items {
        let lowered = item.to_lowercase();
        let mut is_skill = true;

        if contains_any(&lowered, EDUCATION_KEYWORDS) {
            partition.education.push(item.to_string());
            is_skill = false;
        }
        if contains_any(&lowered, EXPERIENCE_KEYWORDS) {
            partition.experience.push(item.to_string());
            is_skill = false;
        }
        if contains_any(&lowered, LEVEL_KEYWORDS) {
            partition.levels.push(item.to_string());
            is_skill = false;
        }
        if is_skill {
            partition.skills.push(item.to_string());
        }
    }

    let title = job_title.to_lowercase();
    if title.contains("sr. ") || title.contains("senior") {
        partition.levels.push(SENIOR_HINT.to_string());
    } else if title.contains("jr. ") || title.contains("junior") {
        partition.levels.push(JUNIOR_HINT.to_string());
    }

    partition
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_are_routed_to_buckets() {
        let items = split_skills("Python, Bachelor's degree, 3 years, Mid-level, SQL");
        let p = partition_skills(&items, "Data Engineer");
        assert_eq!(p.skills, vec!["Python", "SQL"]);
        assert_eq!(p.education, vec!["Bachelor's degree"]);
        assert_eq!(p.experience, vec!["3 years"]);
        assert_eq!(p.levels, vec!["Mid-level"]);
    }

    #[test]
    fn test_item_can_land_in_several_buckets() {
        let p = partition_skills(&["Master's degree plus 2 years"], "");
        assert_eq!(p.education.len(), 1);
        assert_eq!(p.experience.len(), 1);
        assert!(p.skills.is_empty());
    }

    #[test]
    fn test_title_seniority_hint() {
        assert_eq!(partition_skills(&[], "Sr. Data Scientist").levels, vec![SENIOR_HINT]);
        assert_eq!(partition_skills(&[], "Junior Developer").levels, vec![JUNIOR_HINT]);
        assert!(partition_skills(&[], "Developer").levels.is_empty());
    }

    #[test]
    fn test_split_ignores_blank_items() {
        assert_eq!(split_skills(" Rust, ,Go ,"), vec!["Rust", "Go"]);
        assert!(split_skills("").is_empty());
    }
}
