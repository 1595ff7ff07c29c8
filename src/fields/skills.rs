use std::collections::BTreeSet;

use crate::constants::{CANONICAL_SKILLS, SKILL_STOPLIST};
use crate::inference::Entity;

/// Canonical skills whose name appears anywhere in `text`, ignoring case.
pub fn canonical_skills(text: &str) -> BTreeSet<String> {
    let haystack = text.to_lowercase();
    CANONICAL_SKILLS
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

/// Tagger spans of the skill group, unioned with [`canonical_skills`].
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    group: String,
}

impl SkillExtractor {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
        }
    }

    /// Skill-group spans minus word pieces and stoplisted words.
    pub fn tagged(&self, entities: &[Entity]) -> BTreeSet<String> {
        entities
            .iter()
            .filter(|e| e.group == self.group)
            .map(|e| e.word.trim().to_string())
            .filter(|word| {
                !word.is_empty() && !word.starts_with("##") && !SKILL_STOPLIST.contains(&word.as_str())
            })
            .collect()
    }

    pub fn extract(&self, entities: &[Entity], text: &str) -> BTreeSet<String> {
        let mut skills = self.tagged(entities);
        skills.extend(canonical_skills(text));
        skills
    }
}
