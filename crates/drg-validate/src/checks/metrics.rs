//! Required metric presence and range checks.

use drg_model::{DrgRule, MetricValues};

use crate::violation::Violation;

/// Check required metrics are present and inside their ranges.
///
/// A missing metric is reported once as missing and never also as out of
/// range. Values submitted for keys the rule does not require are ignored.
pub fn check(rule: &DrgRule, metrics: &MetricValues) -> Vec<Violation> {
    let mut violations = Vec::new();

    for metric in &rule.required_metrics {
        let Some(value) = metrics.get(&metric.key).copied().filter(|v| !v.is_nan()) else {
            violations.push(Violation::MetricMissing {
                key: metric.key.clone(),
                label: metric.label.clone(),
            });
            continue;
        };

        if !metric.contains(value) {
            violations.push(Violation::MetricOutOfRange {
                key: metric.key.clone(),
                label: metric.label.clone(),
                value,
                unit: metric.unit.clone(),
                min: metric.min,
                max: metric.max,
            });
        }
    }

    violations
}
