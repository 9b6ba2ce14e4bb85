use serde::{Deserialize, Serialize};

/// One required clinical measurement with its admissible range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRule {
    /// Stable identifier, unique within the owning rule.
    pub key: String,
    pub label: String,
    pub unit: String,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl MetricRule {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            unit: unit.into(),
            min,
            max,
        }
    }

    /// Returns true when `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Compliance policy for one diagnosis-related group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrgRule {
    pub id: String,
    pub disease_name: String,
    pub drg_code: String,
    /// Inclusive upper bound on the reimbursable cost.
    pub max_cost: f64,
    pub required_metrics: Vec<MetricRule>,
    /// Inactive rules are not offered for new submissions but are never deleted.
    pub is_active: bool,
}

impl DrgRule {
    pub fn metric(&self, key: &str) -> Option<&MetricRule> {
        self.required_metrics.iter().find(|metric| metric.key == key)
    }

    pub fn metric_keys(&self) -> impl Iterator<Item = &str> {
        self.required_metrics.iter().map(|metric| metric.key.as_str())
    }

    pub fn within_cost_cap(&self, cost: f64) -> bool {
        cost <= self.max_cost
    }
}
