use crate::record::Decision;

/// A score with its decision. `error` is set when embedding failed and the score was defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    pub value: f32,
    pub decision: Decision,
    pub error: Option<String>,
}

impl MatchScore {
    pub fn new(value: f32, threshold: f32) -> Self {
        Self {
            value,
            decision: Decision::from_score(value, threshold),
            error: None,
        }
    }

    /// Score 0, Rejected regardless of threshold.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            value: 0.0,
            decision: Decision::Rejected,
            error: Some(reason.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

impl std::fmt::Display for MatchScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error {
            None => write!(f, "{} (score: {:.2})", self.decision, self.value),
            Some(reason) => write!(f, "{} (scoring failed: {})", self.decision, reason),
        }
    }
}
