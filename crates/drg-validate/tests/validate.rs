//! Behavioural tests for the validation engine.

use drg_model::{DrgRule, MetricRule, MetricValues};
use drg_validate::{Violation, ViolationKind, check_record, validate};

fn hypertension_rule() -> DrgRule {
    DrgRule {
        id: "1".to_string(),
        disease_name: "Essential hypertension".to_string(),
        drg_code: "I10.x".to_string(),
        max_cost: 150.0,
        required_metrics: vec![
            MetricRule::new("systolic", "systolic", "mmHg", 90.0, 180.0),
            MetricRule::new("diastolic", "diastolic", "mmHg", 60.0, 110.0),
        ],
        is_active: true,
    }
}

fn metrics(values: &[(&str, f64)]) -> MetricValues {
    values
        .iter()
        .map(|(key, value)| ((*key).to_string(), *value))
        .collect()
}

#[test]
fn compliant_submission_has_no_messages() {
    let result = validate(
        &hypertension_rule(),
        &metrics(&[("systolic", 130.0), ("diastolic", 85.0)]),
        120.0,
    );
    assert!(result.is_valid);
    assert!(result.messages.is_empty());
}

#[test]
fn cost_violation_precedes_metric_violations() {
    let result = validate(
        &hypertension_rule(),
        &metrics(&[("systolic", 200.0), ("diastolic", 85.0)]),
        160.0,
    );
    assert!(!result.is_valid);
    assert_eq!(
        result.messages,
        vec![
            "cost 160 exceeds limit 150 for Essential hypertension".to_string(),
            "systolic 200 mmHg out of range 90-180 mmHg".to_string(),
        ]
    );
}

#[test]
fn all_violations_are_reported_in_rule_order() {
    let violations = check_record(
        &hypertension_rule(),
        &metrics(&[("systolic", 60.0), ("diastolic", 130.0)]),
        500.0,
    );
    let kinds: Vec<_> = violations.iter().map(Violation::kind).collect();
    assert_eq!(
        kinds,
        vec![ViolationKind::Cost, ViolationKind::Range, ViolationKind::Range]
    );
    let keys: Vec<_> = violations.iter().filter_map(Violation::metric_key).collect();
    assert_eq!(keys, vec!["systolic", "diastolic"]);
}

#[test]
fn cost_exactly_at_cap_is_compliant() {
    let result = validate(
        &hypertension_rule(),
        &metrics(&[("systolic", 130.0), ("diastolic", 85.0)]),
        150.0,
    );
    assert!(result.is_valid);

    let result = validate(
        &hypertension_rule(),
        &metrics(&[("systolic", 130.0), ("diastolic", 85.0)]),
        150.01,
    );
    assert!(!result.is_valid);
}

#[test]
fn metric_bounds_are_inclusive() {
    let rule = hypertension_rule();
    for (systolic, diastolic) in [(90.0, 60.0), (180.0, 110.0)] {
        let result = validate(
            &rule,
            &metrics(&[("systolic", systolic), ("diastolic", diastolic)]),
            100.0,
        );
        assert!(result.is_valid, "{systolic}/{diastolic} should pass");
    }
    for (systolic, diastolic) in [(89.9, 85.0), (180.1, 85.0), (130.0, 59.9), (130.0, 110.1)] {
        let result = validate(
            &rule,
            &metrics(&[("systolic", systolic), ("diastolic", diastolic)]),
            100.0,
        );
        assert!(!result.is_valid, "{systolic}/{diastolic} should fail");
        assert_eq!(result.messages.len(), 1);
    }
}

#[test]
fn missing_metric_is_not_also_reported_out_of_range() {
    let result = validate(&hypertension_rule(), &metrics(&[("diastolic", 85.0)]), 100.0);
    assert_eq!(result.messages, vec!["missing required field: systolic".to_string()]);
}

#[test]
fn nan_metric_counts_as_missing() {
    let violations = check_record(
        &hypertension_rule(),
        &metrics(&[("systolic", f64::NAN), ("diastolic", 85.0)]),
        100.0,
    );
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind(), ViolationKind::Missing);
}

#[test]
fn empty_metric_map_reports_every_required_metric() {
    let result = validate(&hypertension_rule(), &MetricValues::new(), 100.0);
    assert_eq!(
        result.messages,
        vec![
            "missing required field: systolic".to_string(),
            "missing required field: diastolic".to_string(),
        ]
    );
}

#[test]
fn extra_metrics_are_ignored() {
    let result = validate(
        &hypertension_rule(),
        &metrics(&[("systolic", 130.0), ("diastolic", 85.0), ("weight", 999.0)]),
        100.0,
    );
    assert!(result.is_valid);
}

#[test]
fn rule_without_metrics_only_checks_cost() {
    let mut rule = hypertension_rule();
    rule.required_metrics.clear();
    assert!(validate(&rule, &MetricValues::new(), 10.0).is_valid);
    assert!(!validate(&rule, &MetricValues::new(), 151.0).is_valid);
}
