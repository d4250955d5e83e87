use crate::constants::{HOURS_PER_WEEK, MILLION, MONTHS_PER_YEAR, THOUSAND, WEEKS_PER_YEAR};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)").expect("annotation pattern"));
static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9][0-9,]*(?:\.[0-9]+)?").expect("number pattern"));

/// Pay period the figures were quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryType {
    Hourly,
    Monthly,
    Yearly,
    Unknown,
}

impl SalaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryType::Hourly => "hourly",
            SalaryType::Monthly => "monthly",
            SalaryType::Yearly => "yearly",
            SalaryType::Unknown => "unknown",
        }
    }

    /// Multiplier that turns one unit of this period into a yearly figure
    pub fn yearly_factor(&self) -> f64 {
        match self {
            SalaryType::Hourly => HOURS_PER_WEEK * WEEKS_PER_YEAR,
            SalaryType::Monthly => MONTHS_PER_YEAR,
            SalaryType::Yearly | SalaryType::Unknown => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryFields {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub salary_type: SalaryType,
    pub standardized: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Magnitude {
    Thousand,
    Million,
}

impl Magnitude {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "k" | "thousand" => Some(Magnitude::Thousand),
            "m" | "million" => Some(Magnitude::Million),
            _ => None,
        }
    }
}

/// A number found in the salary text, with the magnitude marker written right after it
#[derive(Debug, Clone, Copy)]
struct Token {
    value: f64,
    magnitude: Option<Magnitude>,
}

/// Magnitude marker following a number: optional spaces, then a whole word
/// that is `k`, `m`, `thousand` or `million` ("120k", "1.2 M", "2 million").
/// "10 months" and "85000 minimum" do not count.
fn magnitude_after(text: &str, end: usize) -> Option<Magnitude> {
    let rest = text[end..].trim_start_matches(' ');
    let word_end = rest
        .find(|c: char| !c.is_alphabetic())
        .unwrap_or(rest.len());
    Magnitude::from_word(&rest[..word_end].to_lowercase())
}

fn tokenize(text: &str) -> Vec<Token> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| {
            let digits: String = m.as_str().chars().filter(|c| *c != ',').collect();
            let value = digits.parse::<f64>().ok()?;
            Some(Token {
                value,
                magnitude: magnitude_after(text, m.end()),
            })
        })
        .collect()
}

/// Expand a token to its full value. A token's own suffix wins; otherwise the
/// string-wide marker applies, thousand before million.
fn expand(token: Token, has_thousand: bool, has_million: bool) -> f64 {
    match token.magnitude {
        Some(Magnitude::Thousand) if token.value < THOUSAND => token.value * THOUSAND,
        Some(Magnitude::Million) if token.value < MILLION => token.value * MILLION,
        Some(_) => token.value,
        None if has_thousand && token.value < THOUSAND => token.value * THOUSAND,
        None if !has_thousand && has_million && token.value < MILLION => token.value * MILLION,
        None => token.value,
    }
}

fn detect_type(lowered: &str, has_marker: bool) -> SalaryType {
    if lowered.contains("hour") {
        SalaryType::Hourly
    } else if lowered.contains("month") {
        SalaryType::Monthly
    } else if lowered.contains("year") || has_marker {
        SalaryType::Yearly
    } else {
        SalaryType::Unknown
    }
}

/// Remove parenthetical source annotations ("(Glassdoor est.)") and quotes
pub fn clean_salary_text(text: &str) -> String {
    ANNOTATION.replace_all(text, "").replace('"', "")
}

/// Parse a free-text compensation string.
///
/// Returns `None` when the text holds no number at all. Magnitude markers are
/// matched case-insensitively ("120K" and "120k" behave the same).
pub fn normalize_salary(text: &str) -> Option<SalaryFields> {
    let cleaned = clean_salary_text(text);
    let lowered = cleaned.to_lowercase();

    let tokens = tokenize(&lowered);
    let (first, second) = match tokens.as_slice() {
        [] => return None,
        [only] => (*only, *only),
        [first, second, ..] => (*first, *second),
    };

    let has_thousand = tokens.iter().any(|t| t.magnitude == Some(Magnitude::Thousand));
    let has_million = tokens.iter().any(|t| t.magnitude == Some(Magnitude::Million));
    let salary_type = detect_type(&lowered, has_thousand || has_million);

    let mut min = expand(first, has_thousand, has_million);
    let mut max = expand(second, has_thousand, has_million);
    if min > max {
        debug!(text = %text, min, max, "Reversed salary range, swapping bounds");
        std::mem::swap(&mut min, &mut max);
    }

    let avg = (min + max) / 2.0;
    Some(SalaryFields {
        min,
        max,
        avg,
        salary_type,
        standardized: avg * salary_type.yearly_factor(),
    })
}
