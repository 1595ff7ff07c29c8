//! Phone and email patterns.

use std::sync::LazyLock;

use regex::Regex;

use super::error::FieldError;
use super::strategy::{Strategy, StrategyChain};

/// Ten digits, optionally preceded by a 1–3 digit country code (`+91 `, `91-`, `+1`).
/// Longer digit runs such as IDs never match.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[ \t-]?|\b\d{1,3}[ \t-]?|\b)\d{10}\b").expect("phone pattern is valid")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("email pattern is valid"));

pub fn phone(text: &str) -> Option<String> {
    PHONE.find(text).map(|m| m.as_str().to_string())
}

pub fn email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

#[derive(Debug, Default)]
pub struct PhonePattern;

impl Strategy<String> for PhonePattern {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn apply(&self, text: &str) -> Result<Option<String>, FieldError> {
        Ok(phone(text))
    }
}

#[derive(Debug, Default)]
pub struct EmailPattern;

impl Strategy<String> for EmailPattern {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn apply(&self, text: &str) -> Result<Option<String>, FieldError> {
        Ok(email(text))
    }
}

pub fn phone_chain() -> StrategyChain<String> {
    StrategyChain::new("phone").then(PhonePattern)
}

pub fn email_chain() -> StrategyChain<String> {
    StrategyChain::new("email").then(EmailPattern)
}
