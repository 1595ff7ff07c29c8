//! Result rows and the job description they are scored against.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::scoring::MatchScore;

/// Shortlisting outcome, a pure function of score and threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Selected,
    Rejected,
}

impl Decision {
    /// `Selected` iff `score >= threshold`. NaN scores are Rejected.
    pub fn from_score(score: f32, threshold: f32) -> Self {
        if score >= threshold {
            Decision::Selected
        } else {
            Decision::Rejected
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Selected => "Selected",
            Decision::Rejected => "Rejected",
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Decision::Selected)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured fields pulled from one document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFields {
    pub name: String,
    pub experience: String,
    pub phone: String,
    pub email: String,
    pub skills: BTreeSet<String>,
    pub education: String,
}

/// One scored candidate. Built once per processed document and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    fields: CandidateFields,
    summary: String,
    source_file: String,
    match_score: f32,
    decision: Decision,
}

impl CandidateRecord {
    /// Assembles a record; the decision is derived here so it cannot disagree with the score.
    pub fn new(
        fields: CandidateFields,
        summary: String,
        source_file: String,
        match_score: f32,
        threshold: f32,
    ) -> Self {
        Self {
            fields,
            summary,
            source_file,
            match_score,
            decision: Decision::from_score(match_score, threshold),
        }
    }

    /// Assembles a record from a scorer outcome, keeping its decision.
    ///
    /// A failed score stays Rejected whatever the threshold.
    pub fn scored(
        fields: CandidateFields,
        summary: String,
        source_file: String,
        score: &MatchScore,
    ) -> Self {
        Self {
            fields,
            summary,
            source_file,
            match_score: score.value,
            decision: score.decision,
        }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn experience(&self) -> &str {
        &self.fields.experience
    }

    pub fn phone(&self) -> &str {
        &self.fields.phone
    }

    pub fn email(&self) -> &str {
        &self.fields.email
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.fields.skills
    }

    pub fn education(&self) -> &str {
        &self.fields.education
    }

    pub fn fields(&self) -> &CandidateFields {
        &self.fields
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn match_score(&self) -> f32 {
        self.match_score
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }
}

/// Free-text job description; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobDescription(String);

impl JobDescription {
    /// Returns `None` for empty or whitespace-only text.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JobDescription {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("job description cannot be empty")
    }
}

impl From<JobDescription> for String {
    fn from(value: JobDescription) -> Self {
        value.0
    }
}

impl std::fmt::Display for JobDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
