use std::sync::LazyLock;

use regex::Regex;

use super::error::FieldError;
use super::strategy::{Strategy, StrategyChain};

static EXPERIENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(\+)?\s*(?:years?|yrs?|experience)\b")
        .expect("experience pattern is valid")
});

/// First `<n>[+] <unit>` mention, unit normalized to `years`.
///
/// `"3.5+ yrs"` becomes `"3.5+ years"`.
pub fn extract(text: &str) -> Option<String> {
    let caps = EXPERIENCE.captures(text)?;
    let amount = caps.get(1)?.as_str();
    let plus = if caps.get(2).is_some() { "+" } else { "" };
    Some(format!("{amount}{plus} years"))
}

#[derive(Debug, Default)]
pub struct ExperiencePattern;

impl Strategy<String> for ExperiencePattern {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn apply(&self, text: &str) -> Result<Option<String>, FieldError> {
        Ok(extract(text))
    }
}

pub fn chain() -> StrategyChain<String> {
    StrategyChain::new("experience").then(ExperiencePattern)
}
