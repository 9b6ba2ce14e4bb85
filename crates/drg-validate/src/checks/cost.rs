//! Cost cap check.

use drg_model::DrgRule;

use crate::violation::Violation;

/// The cap itself is compliant.
pub fn check(rule: &DrgRule, cost: f64) -> Option<Violation> {
    if cost > rule.max_cost {
        return Some(Violation::CostExceeded {
            disease: rule.disease_name.clone(),
            cost,
            limit: rule.max_cost,
        });
    }
    None
}
