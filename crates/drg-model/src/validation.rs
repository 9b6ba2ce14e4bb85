use serde::{Deserialize, Serialize};

/// Verdict of checking one submission against a DRG rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Violations in check order: cost first, then metrics in rule order.
    pub messages: Vec<String>,
}

impl ValidationResult {
    pub fn from_messages(messages: Vec<String>) -> Self {
        Self {
            is_valid: messages.is_empty(),
            messages,
        }
    }
}
