use std::{fmt, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Given,
    When,
    Then,
    And,
    But,
    Star,
}

impl Keyword {
    pub const ALL: [Keyword; 6] = [
        Keyword::Given,
        Keyword::When,
        Keyword::Then,
        Keyword::And,
        Keyword::But,
        Keyword::Star,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Given => "Given",
            Keyword::When => "When",
            Keyword::Then => "Then",
            Keyword::And => "And",
            Keyword::But => "But",
            Keyword::Star => "*",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step line with its placeholders already expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLine {
    pub keyword: Keyword,
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub line: usize,
    pub steps: Vec<StepLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: Option<String>,
    pub path: PathBuf,
    pub scenarios: Vec<Scenario>,
}
