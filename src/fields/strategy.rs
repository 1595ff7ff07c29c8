//! Ordered fallback chains.

use tracing::{debug, warn};

use super::error::FieldError;

/// One way of deriving a field from CV text.
///
/// `Ok(None)` means "no match here, try the next strategy".
pub trait Strategy<T>: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, text: &str) -> Result<Option<T>, FieldError>;
}

/// A strategy error downgraded to a per-field warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: &'static str,
    pub strategy: &'static str,
    pub reason: String,
}

impl std::fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.strategy, self.reason)
    }
}

/// Result of running a chain: the first value found plus any warnings raised on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: Option<T>,
    pub warnings: Vec<FieldWarning>,
}

impl Outcome<String> {
    /// The value, or `sentinel` when nothing matched.
    pub fn or_sentinel(self, sentinel: &str, warnings: &mut Vec<FieldWarning>) -> String {
        warnings.extend(self.warnings);
        self.value.unwrap_or_else(|| sentinel.to_string())
    }
}

/// Strategies for one field, tried in priority order until one yields a value.
pub struct StrategyChain<T> {
    field: &'static str,
    strategies: Vec<Box<dyn Strategy<T>>>,
}

impl<T> std::fmt::Debug for StrategyChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyChain")
            .field("field", &self.field)
            .field(
                "strategies",
                &self.strategies.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T> StrategyChain<T> {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            strategies: Vec::new(),
        }
    }

    pub fn then(mut self, strategy: impl Strategy<T> + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn run(&self, text: &str) -> Outcome<T> {
        let mut warnings = Vec::new();

        for strategy in &self.strategies {
            match strategy.apply(text) {
                Ok(Some(value)) => {
                    debug!(field = self.field, strategy = strategy.name(), "Field matched");
                    return Outcome {
                        value: Some(value),
                        warnings,
                    };
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!(
                        field = self.field,
                        strategy = strategy.name(),
                        error = %e,
                        "Field strategy failed, trying next"
                    );
                    warnings.push(FieldWarning {
                        field: self.field,
                        strategy: strategy.name(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(field = self.field, "No strategy matched");
        Outcome {
            value: None,
            warnings,
        }
    }
}
