//! Rule violation types.
//!
//! Each variant carries only the data its message needs, so callers can
//! classify violations without parsing the rendered text.

use serde::{Deserialize, Serialize};

/// Kind of check that produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    Cost,
    Missing,
    Range,
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Violation {
    /// Declared cost is above the rule's cap.
    CostExceeded {
        disease: String,
        cost: f64,
        limit: f64,
    },
    /// Required metric is absent or not a number.
    MetricMissing { key: String, label: String },
    /// Metric value lies outside `[min, max]`.
    MetricOutOfRange {
        key: String,
        label: String,
        value: f64,
        unit: String,
        min: f64,
        max: f64,
    },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::CostExceeded { .. } => ViolationKind::Cost,
            Violation::MetricMissing { .. } => ViolationKind::Missing,
            Violation::MetricOutOfRange { .. } => ViolationKind::Range,
        }
    }

    /// Metric key, `None` for the cost check.
    pub fn metric_key(&self) -> Option<&str> {
        match self {
            Violation::CostExceeded { .. } => None,
            Violation::MetricMissing { key, .. } => Some(key),
            Violation::MetricOutOfRange { key, .. } => Some(key),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Violation::CostExceeded {
                disease,
                cost,
                limit,
            } => format!("cost {cost} exceeds limit {limit} for {disease}"),
            Violation::MetricMissing { label, .. } => {
                format!("missing required field: {label}")
            }
            Violation::MetricOutOfRange {
                label,
                value,
                unit,
                min,
                max,
                ..
            } => format!("{label} {value} {unit} out of range {min}-{max} {unit}"),
        }
    }
}
