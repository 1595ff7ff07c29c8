use std::sync::LazyLock;

use regex::Regex;

use super::error::FieldError;
use super::strategy::{Strategy, StrategyChain};
use crate::inference::Entity;

/// Label is case-insensitive; the captured name is a run of capitalized words on one line.
static NAME_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b(?i:name)\s*[:\-]?\s*|\b(?i:resume of)\s+)([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*)")
        .expect("name label pattern is valid")
});

/// `Name: X`, `Name - X`, `Resume of X`.
#[derive(Debug, Default)]
pub struct LabeledName;

impl Strategy<String> for LabeledName {
    fn name(&self) -> &'static str {
        "label"
    }

    fn apply(&self, text: &str) -> Result<Option<String>, FieldError> {
        Ok(NAME_LABEL
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()))
    }
}

/// First non-empty entity of `group`, in document order.
pub fn first_person(entities: &[Entity], group: &str) -> Option<String> {
    entities
        .iter()
        .filter(|e| e.group == group)
        .map(|e| e.word.trim())
        .find(|word| !word.is_empty())
        .map(str::to_string)
}

/// Label patterns. The tagger fallback runs on entities shared with skill extraction.
pub fn chain() -> StrategyChain<String> {
    StrategyChain::new("name").then(LabeledName)
}
