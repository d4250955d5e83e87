use serde::Serialize;

/// The 50 states plus DC. Read-only; the scan order below is this order.
pub static STATES: [(&str, &str); 51] = [
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("DC", "District of Columbia"),
];

/// Resolved location; always drawn from the state table or one of two tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum StateValue {
    Remote,
    UnitedStates,
    Code(&'static str),
    Name(&'static str),
}

impl StateValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateValue::Remote => "Remote",
            StateValue::UnitedStates => "United States",
            StateValue::Code(code) => code,
            StateValue::Name(name) => name,
        }
    }
}

impl From<StateValue> for String {
    fn from(value: StateValue) -> Self {
        value.as_str().to_string()
    }
}

/// Look a state up by its two-letter code (upper case)
pub fn state_by_code(code: &str) -> Option<(&'static str, &'static str)> {
    STATES.iter().copied().find(|(c, _)| *c == code)
}

fn is_word_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| !c.is_alphanumeric())
}

/// Longest full state name found on word boundaries in `lowered`,
/// so "west virginia" beats "virginia" and "arkansas" never reads as "kansas".
fn find_state_name(lowered: &str) -> Option<(&'static str, &'static str)> {
    let mut best: Option<(&'static str, &'static str)> = None;
    for &(code, name) in STATES.iter() {
        let needle = name.to_lowercase();
        let found = lowered.match_indices(&needle).any(|(start, m)| {
            let before = lowered[..start].chars().next_back();
            let after = lowered[start + m.len()..].chars().next();
            is_word_boundary(before) && is_word_boundary(after)
        });
        if found && best.map_or(true, |(_, current)| name.len() > current.len()) {
            best = Some((code, name));
        }
    }
    best
}

/// Map free-text location to a state. `use_full_name` selects "Texas" over "TX".
pub fn resolve_state(location: &str, use_full_name: bool) -> Option<StateValue> {
    let lowered = location.trim().to_lowercase();

    if lowered == "remote" {
        return Some(StateValue::Remote);
    }
    if lowered == "united states" {
        return Some(StateValue::UnitedStates);
    }

    let pick = |(code, name): (&'static str, &'static str)| {
        if use_full_name {
            StateValue::Name(name)
        } else {
            StateValue::Code(code)
        }
    };

    // "City, ST": third-from-last character is a space
    let chars: Vec<char> = lowered.chars().collect();
    if chars.len() >= 3 && chars[chars.len() - 3] == ' ' {
        let code: String = chars[chars.len() - 2..].iter().collect::<String>().to_uppercase();
        if let Some(state) = state_by_code(&code) {
            return Some(pick(state));
        }
    }

    find_state_name(&lowered).map(pick)
}
