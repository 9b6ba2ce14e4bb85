//! Individual compliance checks.

pub mod cost;
pub mod metrics;

use drg_model::{DrgRule, MetricValues};

use crate::violation::Violation;

/// Run every check for a rule. Order matters: cost first, then metrics in
/// the rule's declared order.
pub fn run_all(rule: &DrgRule, metrics: &MetricValues, cost: f64) -> Vec<Violation> {
    let mut violations = Vec::new();
    violations.extend(cost::check(rule, cost));
    violations.extend(metrics::check(rule, metrics));
    violations
}
