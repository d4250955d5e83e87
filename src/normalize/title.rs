use super::classifier::{Predicate, Rule, TextClassifier};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Closed set of role categories a job title is mapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum TitleCategory {
    SoftwareEngineer,
    ComputerScientist,
    ResearchScientist,
    Researcher,
    DataScientist,
    Scientist,
    DevOpsSre,
    FrontendDeveloper,
    BackendDeveloper,
    FullStackDeveloper,
    QaEngineer,
    MobileDeveloper,
    ProductManager,
    SoftwareDeveloper,
    SoftwareSystemsArchitect,
    OtherEngineering,
    ResearchAssistant,
    DataAnalyst,
    Programmer,
    Other,
}

impl TitleCategory {
    /// Every category, in rule priority order with the fallback last
    pub const ALL: [TitleCategory; 20] = [
        TitleCategory::SoftwareEngineer,
        TitleCategory::ComputerScientist,
        TitleCategory::ResearchScientist,
        TitleCategory::Researcher,
        TitleCategory::DataScientist,
        TitleCategory::Scientist,
        TitleCategory::DevOpsSre,
        TitleCategory::FrontendDeveloper,
        TitleCategory::BackendDeveloper,
        TitleCategory::FullStackDeveloper,
        TitleCategory::QaEngineer,
        TitleCategory::MobileDeveloper,
        TitleCategory::ProductManager,
        TitleCategory::SoftwareDeveloper,
        TitleCategory::SoftwareSystemsArchitect,
        TitleCategory::OtherEngineering,
        TitleCategory::ResearchAssistant,
        TitleCategory::DataAnalyst,
        TitleCategory::Programmer,
        TitleCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TitleCategory::SoftwareEngineer => "Software Engineer",
            TitleCategory::ComputerScientist => "Computer Scientist",
            TitleCategory::ResearchScientist => "Research Scientist",
            TitleCategory::Researcher => "Researcher",
            TitleCategory::DataScientist => "Data Scientist",
            TitleCategory::Scientist => "Scientist",
            TitleCategory::DevOpsSre => "DevOps/SRE",
            TitleCategory::FrontendDeveloper => "Frontend Developer",
            TitleCategory::BackendDeveloper => "Backend Developer",
            TitleCategory::FullStackDeveloper => "Full Stack Developer",
            TitleCategory::QaEngineer => "QA Engineer",
            TitleCategory::MobileDeveloper => "Mobile Developer",
            TitleCategory::ProductManager => "Product Manager",
            TitleCategory::SoftwareDeveloper => "Software Developer",
            TitleCategory::SoftwareSystemsArchitect => "Software/Systems Architect",
            TitleCategory::OtherEngineering => "Other Engineering",
            TitleCategory::ResearchAssistant => "Research Assistant",
            TitleCategory::DataAnalyst => "Data Analyst",
            TitleCategory::Programmer => "Programmer",
            TitleCategory::Other => "Other",
        }
    }
}

impl From<TitleCategory> for String {
    fn from(value: TitleCategory) -> Self {
        value.label().to_string()
    }
}

impl std::fmt::Display for TitleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Most specific first. Specific scientist roles precede the generic
// "scientist" rule, and the engineer/developer catch-all sits near the end.
static TAXONOMY: Lazy<TextClassifier<TitleCategory>> = Lazy::new(|| {
    use TitleCategory::*;
    let rule = |pattern: &str, label| Rule::new(Predicate::pattern(pattern), label);

    TextClassifier::with_fallback(
        vec![
            rule(r"software\s+engineer|swe|engineer,?\s+software", SoftwareEngineer),
            rule(r"computer\s+scientist", ComputerScientist),
            rule(r"research\s+scientist", ResearchScientist),
            rule(r"researcher", Researcher),
            rule(r"data\s+scien(?:ce|tist)|machine\s+learning|ml\s+engineer", DataScientist),
            rule(r"scientist", Scientist),
            rule(r"devops|site\s+reliability|sre|platform\s+engineer|infrastructure", DevOpsSre),
            rule(r"front\s*end|frontend|ui\s+developer|react|angular|vue", FrontendDeveloper),
            rule(r"back\s*end|backend|api\s+developer|server", BackendDeveloper),
            rule(r"full\s*stack|fullstack", FullStackDeveloper),
            rule(r"qa|quality\s+assurance|test\s+engineer|automation\s+engineer", QaEngineer),
            rule(r"mobile|ios|android|app\s+developer", MobileDeveloper),
            rule(r"product\s+manager|pm,?\s+software", ProductManager),
            rule(r"software\s+developer|developer,?\s+software", SoftwareDeveloper),
            rule(r"architect", SoftwareSystemsArchitect),
            rule(r"engineer|developer", OtherEngineering),
            rule(r"research\sassistant", ResearchAssistant),
            rule(r"data\sanalyst", DataAnalyst),
            rule(r"programmer", Programmer),
        ],
        Other,
    )
});

/// Map a job title onto the taxonomy. Any casing is accepted.
pub fn standardize_title(title: &str) -> TitleCategory {
    TAXONOMY
        .classify(&title.to_lowercase())
        .unwrap_or(TitleCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seniority_does_not_change_category() {
        assert_eq!(standardize_title("Senior Software Engineer"), TitleCategory::SoftwareEngineer);
        assert_eq!(standardize_title("Engineer, Software II"), TitleCategory::SoftwareEngineer);
    }

    #[test]
    fn test_specific_scientist_roles_before_generic() {
        assert_eq!(standardize_title("Computer Scientist"), TitleCategory::ComputerScientist);
        assert_eq!(standardize_title("Principal Research Scientist"), TitleCategory::ResearchScientist);
        assert_eq!(standardize_title("Researcher, Applied ML"), TitleCategory::Researcher);
        assert_eq!(standardize_title("Data Scientist II"), TitleCategory::DataScientist);
        assert_eq!(standardize_title("Machine Learning Lead"), TitleCategory::DataScientist);
        assert_eq!(standardize_title("Staff Scientist"), TitleCategory::Scientist);
    }

    #[test]
    fn test_developer_specialisations() {
        assert_eq!(standardize_title("Site Reliability Lead"), TitleCategory::DevOpsSre);
        assert_eq!(standardize_title("React Developer"), TitleCategory::FrontendDeveloper);
        assert_eq!(standardize_title("Backend Developer (Go)"), TitleCategory::BackendDeveloper);
        assert_eq!(standardize_title("Full-Stack Developer"), TitleCategory::OtherEngineering);
        assert_eq!(standardize_title("Fullstack Developer"), TitleCategory::FullStackDeveloper);
        assert_eq!(standardize_title("Android Developer"), TitleCategory::MobileDeveloper);
        assert_eq!(standardize_title("Technical Product Manager"), TitleCategory::ProductManager);
        assert_eq!(standardize_title("Software Developer"), TitleCategory::SoftwareDeveloper);
        assert_eq!(standardize_title("Solutions Architect"), TitleCategory::SoftwareSystemsArchitect);
    }

    #[test]
    fn test_catch_all_and_late_rules() {
        assert_eq!(standardize_title("Hardware Engineer"), TitleCategory::OtherEngineering);
        assert_eq!(standardize_title("Graduate Research Assistant"), TitleCategory::ResearchAssistant);
        assert_eq!(standardize_title("Data Analyst"), TitleCategory::DataAnalyst);
        assert_eq!(standardize_title("COBOL Programmer"), TitleCategory::Programmer);
    }

    #[test]
    fn test_rule_order_matches_category_order() {
        let labels: Vec<_> = TAXONOMY.labels().chain([TitleCategory::Other]).collect();
        assert_eq!(labels, TitleCategory::ALL.to_vec());
    }

    #[test]
    fn test_unmatched_title_is_other() {
        assert_eq!(standardize_title("Accountant"), TitleCategory::Other);
        assert_eq!(standardize_title(""), TitleCategory::Other);
    }
}
