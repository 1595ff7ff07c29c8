use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::error::FieldError;
use super::strategy::{Strategy, StrategyChain};
use crate::constants::education::{MAX_NEW_TOKENS, PROMPT_PREFIX, PROMPT_SLICE_CHARS};
use crate::inference::{GenerationParams, TextGenerator};

/// Degree abbreviation, then a four-digit year later on the same line.
static DEGREE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(B\.?Tech|M\.?Tech|B\.?Sc|M\.?Sc|Ph\.?D|MBA|MCA|BCA)\b[^\n]*?\b(\d{4})\b")
        .expect("degree pattern is valid")
});

/// Every `<degree> <year>` pair in document order, comma-joined.
pub fn degrees(text: &str) -> Option<String> {
    let found: Vec<String> = DEGREE_YEAR
        .captures_iter(text)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]))
        .collect();

    (!found.is_empty()).then(|| found.join(", "))
}

#[derive(Debug, Default)]
pub struct DegreePattern;

impl Strategy<String> for DegreePattern {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn apply(&self, text: &str) -> Result<Option<String>, FieldError> {
        Ok(degrees(text))
    }
}

/// Asks the generator for the qualifications in the opening slice of the CV.
///
/// Yields nothing when the generator is a stub.
pub struct GeneratedEducation {
    generator: Arc<dyn TextGenerator>,
}

impl GeneratedEducation {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn prompt(text: &str) -> String {
        let slice: String = text.chars().take(PROMPT_SLICE_CHARS).collect();
        format!("{PROMPT_PREFIX}{slice}")
    }
}

impl Strategy<String> for GeneratedEducation {
    fn name(&self) -> &'static str {
        "generative"
    }

    fn apply(&self, text: &str) -> Result<Option<String>, FieldError> {
        if self.generator.is_stub() {
            return Ok(None);
        }

        let generated = self
            .generator
            .generate(&Self::prompt(text), GenerationParams::new(MAX_NEW_TOKENS, 0))
            .map_err(|source| FieldError::Generation { source })?;

        let generated = generated.trim();
        Ok((!generated.is_empty()).then(|| generated.to_string()))
    }
}

pub fn chain(generator: Arc<dyn TextGenerator>) -> StrategyChain<String> {
    StrategyChain::new("education")
        .then(DegreePattern)
        .then(GeneratedEducation::new(generator))
}
