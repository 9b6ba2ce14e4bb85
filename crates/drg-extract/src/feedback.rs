//! Summary of how an extraction measures up against its rule.

use serde::Serialize;

use drg_model::DrgRule;
use drg_validate::Violation;
use drg_validate::checks;

use crate::Extraction;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionFeedback {
    pub success: bool,
    /// Labels of required metrics the note did not mention.
    pub missing_fields: Vec<String>,
    /// `label (value)` for each extracted metric outside its range.
    pub out_of_range_fields: Vec<String>,
    pub cost_exceeded: bool,
    pub message: String,
}

/// Classify `extraction` using the same checks as submission validation.
pub fn review(rule: &DrgRule, extraction: &Extraction) -> ExtractionFeedback {
    let mut missing_fields = Vec::new();
    let mut out_of_range_fields = Vec::new();
    for violation in checks::metrics::check(rule, &extraction.metrics) {
        match violation {
            Violation::MetricMissing { label, .. } => missing_fields.push(label),
            Violation::MetricOutOfRange { label, value, .. } => {
                out_of_range_fields.push(format!("{label} ({value})"));
            }
            Violation::CostExceeded { .. } => {}
        }
    }
    let cost_exceeded = extraction
        .cost
        .is_some_and(|cost| checks::cost::check(rule, cost).is_some());

    let mut problems = Vec::new();
    if !missing_fields.is_empty() {
        problems.push(format!("missing: {}", missing_fields.join(", ")));
    }
    if !out_of_range_fields.is_empty() {
        problems.push(format!("out of range: {}", out_of_range_fields.join(", ")));
    }
    if cost_exceeded {
        problems.push(format!("cost exceeds limit {}", rule.max_cost));
    }

    let success = problems.is_empty();
    let message = if success {
        "all required fields extracted and within range".to_string()
    } else {
        problems.join("; ")
    };

    ExtractionFeedback {
        success,
        missing_fields,
        out_of_range_fields,
        cost_exceeded,
        message,
    }
}
