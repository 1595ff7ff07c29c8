//! Structured field extraction from raw CV text.
//!
//! Each field is an ordered [`StrategyChain`]; the first strategy that yields a value wins.
//! Fields nothing matched get [`SENTINEL`]. Strategy errors never abort a document, they
//! surface as [`FieldWarning`]s.

pub mod contact;
pub mod education;
mod error;
pub mod experience;
pub mod name;
pub mod skills;
pub mod strategy;


pub use error::FieldError;
pub use skills::SkillExtractor;
pub use strategy::{FieldWarning, Outcome, Strategy, StrategyChain};

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::SENTINEL;
use crate::inference::{Entity, EntityTagger, ModelSet, TextGenerator};
use crate::record::CandidateFields;

/// All field extractors, wired to shared model handles.
pub struct FieldExtractor {
    name: StrategyChain<String>,
    experience: StrategyChain<String>,
    phone: StrategyChain<String>,
    email: StrategyChain<String>,
    education: StrategyChain<String>,
    skills: SkillExtractor,
    tagger: Arc<dyn EntityTagger>,
    person_group: String,
}

impl std::fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldExtractor")
            .field("name", &self.name)
            .field("experience", &self.experience)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("education", &self.education)
            .field("skills", &self.skills)
            .field("person_group", &self.person_group)
            .finish()
    }
}

impl FieldExtractor {
    pub fn new(
        tagger: Arc<dyn EntityTagger>,
        generator: Arc<dyn TextGenerator>,
        person_group: &str,
        skill_group: &str,
    ) -> Self {
        Self {
            name: name::chain(),
            experience: experience::chain(),
            phone: contact::phone_chain(),
            email: contact::email_chain(),
            education: education::chain(generator),
            skills: SkillExtractor::new(skill_group),
            tagger,
            person_group: person_group.to_string(),
        }
    }

    pub fn from_models(models: &ModelSet, config: &Config) -> Self {
        Self::new(
            Arc::clone(&models.tagger),
            Arc::clone(&models.generator),
            &config.person_entity_group,
            &config.skill_entity_group,
        )
    }

    fn entities(&self, text: &str) -> Result<Vec<Entity>, FieldError> {
        self.tagger
            .tag(text)
            .map_err(|source| FieldError::Tagging { source })
    }

    /// Entity spans, or an empty list plus one warning attributed to `field`.
    fn entities_or_warn(
        &self,
        text: &str,
        field: &'static str,
        warnings: &mut Vec<FieldWarning>,
    ) -> Vec<Entity> {
        self.entities(text).unwrap_or_else(|e| {
            warn!(field, error = %e, "Entity tagging failed");
            warnings.push(FieldWarning {
                field,
                strategy: "entity",
                reason: e.to_string(),
            });
            Vec::new()
        })
    }

    /// Label first; the tagger only runs when no label matched.
    pub fn name(&self, text: &str) -> Outcome<String> {
        let mut outcome = self.name.run(text);
        if outcome.value.is_none() {
            let entities = self.entities_or_warn(text, "name", &mut outcome.warnings);
            outcome.value = name::first_person(&entities, &self.person_group);
        }
        outcome
    }

    pub fn experience(&self, text: &str) -> Outcome<String> {
        self.experience.run(text)
    }

    pub fn phone(&self, text: &str) -> Outcome<String> {
        self.phone.run(text)
    }

    pub fn email(&self, text: &str) -> Outcome<String> {
        self.email.run(text)
    }

    /// Never fails: a tagger error leaves only the canonical matches and a warning.
    pub fn skills(&self, text: &str) -> Outcome<BTreeSet<String>> {
        let mut warnings = Vec::new();
        let entities = self.entities_or_warn(text, "skills", &mut warnings);
        Outcome {
            value: Some(self.skills.extract(&entities, text)),
            warnings,
        }
    }

    pub fn education(&self, text: &str) -> Outcome<String> {
        self.education.run(text)
    }

    /// Runs every extractor and applies the sentinel to fields nothing matched.
    ///
    /// The tagger runs once per document; name and skills share its output.
    pub fn extract_all(&self, text: &str) -> (CandidateFields, Vec<FieldWarning>) {
        let mut warnings = Vec::new();
        let entities = self.entities_or_warn(text, "entities", &mut warnings);

        let mut name = self.name.run(text);
        if name.value.is_none() {
            name.value = name::first_person(&entities, &self.person_group);
        }

        let fields = CandidateFields {
            name: name.or_sentinel(SENTINEL, &mut warnings),
            experience: self.experience(text).or_sentinel(SENTINEL, &mut warnings),
            phone: self.phone(text).or_sentinel(SENTINEL, &mut warnings),
            email: self.email(text).or_sentinel(SENTINEL, &mut warnings),
            skills: self.skills.extract(&entities, text),
            education: self.education(text).or_sentinel(SENTINEL, &mut warnings),
        };

        debug!(
            name = %fields.name,
            skills = fields.skills.len(),
            warnings = warnings.len(),
            "Fields extracted"
        );

        (fields, warnings)
    }
}
