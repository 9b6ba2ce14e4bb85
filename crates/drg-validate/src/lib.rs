//! DRG compliance validation.
//!
//! Checks a submission (metric values plus declared cost) against a DRG rule:
//!
//! - **Cost cap**: the declared cost must not exceed the rule's `max_cost`
//! - **Required metrics**: every metric the rule requires must be present
//! - **Ranges**: present metrics must lie within their inclusive range
//!
//! All checks run; nothing short-circuits. The engine is pure: it performs no
//! I/O and identical inputs always produce identical results.
//!
//! # Example
//!
//! ```ignore
//! use drg_validate::validate;
//!
//! let result = validate(&rule, &metrics, 120.0);
//! if !result.is_valid {
//!     for message in &result.messages {
//!         println!("{message}");
//!     }
//! }
//! ```

pub mod checks;
mod violation;

use drg_model::{DrgRule, MetricValues, ValidationResult};

pub use violation::{Violation, ViolationKind};

/// Collect every violation of `rule` by the submission, in report order.
pub fn check_record(rule: &DrgRule, metrics: &MetricValues, cost: f64) -> Vec<Violation> {
    let violations = checks::run_all(rule, metrics, cost);
    tracing::debug!(
        rule_id = %rule.id,
        drg_code = %rule.drg_code,
        violation_count = violations.len(),
        "validated submission"
    );
    violations
}

/// Validate a submission and render the violations as messages.
pub fn validate(rule: &DrgRule, metrics: &MetricValues, cost: f64) -> ValidationResult {
    let messages = check_record(rule, metrics, cost)
        .iter()
        .map(Violation::message)
        .collect();
    ValidationResult::from_messages(messages)
}
