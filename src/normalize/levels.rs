//! Ordinal scales for education, years of experience and seniority.

use super::classifier::{Predicate, Rule, TextClassifier};
use once_cell::sync::Lazy;
use regex::Regex;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([0-9]+)\b").expect("integer pattern"));

static EDUCATION: Lazy<TextClassifier<u8>> = Lazy::new(|| {
    TextClassifier::new(vec![
        Rule::new(Predicate::AnyOf(&["phd", "doctoral", "doctorate", "ph.d"]), 4),
        Rule::new(Predicate::AnyOf(&["master", "m.s.", "m.a."]), 3),
        Rule::new(Predicate::AnyOf(&["bachelor", "bs", "b.s.", "b.a."]), 2),
        Rule::new(Predicate::AnyOf(&["associate", "diploma", "certificate"]), 1),
    ])
});

// "junior" is tested before "senior", so text naming both reads as 1
static JOB_LEVEL: Lazy<TextClassifier<u8>> = Lazy::new(|| {
    TextClassifier::new(vec![
        Rule::new(Predicate::AnyOf(&["junior", "entry"]), 1),
        Rule::new(Predicate::AnyOf(&["mid"]), 2),
        Rule::new(Predicate::AnyOf(&["senior"]), 3),
    ])
});

/// 4 doctoral, 3 master's, 2 bachelor's, 1 associate/diploma/certificate
pub fn education_level(text: &str) -> Option<u8> {
    EDUCATION.classify(&text.to_lowercase())
}

/// Bucket the largest integer in the text as a year count:
/// 1 for up to 2 years, 2 up to 5, 3 up to 9, 4 beyond.
///
/// Every integer is taken as years, so a team size or a date fragment can
/// inflate the result.
pub fn experience_level(text: &str) -> Option<u8> {
    let max_years = INTEGER
        .captures_iter(text)
        // digits too long for u64 are certainly past the top bucket
        .map(|caps| caps[1].parse::<u64>().unwrap_or(u64::MAX))
        .max()?;

    Some(match max_years {
        0..=2 => 1,
        3..=5 => 2,
        6..=9 => 3,
        _ => 4,
    })
}

/// 1 junior/entry, 2 mid, 3 senior
pub fn job_level(text: &str) -> Option<u8> {
    JOB_LEVEL.classify(&text.to_lowercase())
}
