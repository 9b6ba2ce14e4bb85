//! End-to-end submission scenarios.

use chrono::{NaiveDate, TimeZone, Utc};
use drg_core::{SubmissionError, SubmissionForm, set_rule_active, submit};
use drg_model::{DrgRule, MetricRule, RecordStatus, Role, User};
use drg_store::{MemoryStore, RecordStore};

fn hypertension_rule() -> DrgRule {
    DrgRule {
        id: "1".to_string(),
        disease_name: "Essential hypertension".to_string(),
        drg_code: "I10.x".to_string(),
        max_cost: 150.0,
        required_metrics: vec![
            MetricRule::new("systolic", "Systolic BP", "mmHg", 90.0, 180.0),
            MetricRule::new("diastolic", "Diastolic BP", "mmHg", 60.0, 110.0),
        ],
        is_active: true,
    }
}

fn doctor() -> User {
    User {
        id: "u1".to_string(),
        username: "dr_wang".to_string(),
        role: Role::Doctor,
        clinic_name: "Happy Valley Community Clinic".to_string(),
    }
}

fn form(systolic: &str, diastolic: &str, cost: &str) -> SubmissionForm {
    let mut form = SubmissionForm::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    form.patient_name = "Li Lei".to_string();
    form.patient_id = "ID00001234".to_string();
    form.age = "56".to_string();
    form.gender = "Male".to_string();
    form.ethnicity = "Han".to_string();
    form.metrics.insert("systolic".to_string(), systolic.to_string());
    form.metrics.insert("diastolic".to_string(), diastolic.to_string());
    form.total_cost = cost.to_string();
    form
}

#[test]
fn compliant_submission_is_stored() {
    let mut store = MemoryStore::seeded();
    let record = submit(&mut store, &doctor(), &hypertension_rule(), &form("130", "85", "120")).unwrap();

    assert_eq!(record.status, RecordStatus::Compliant);
    assert!(record.validation_messages.is_empty());
    assert_eq!(record.doctor_name, "dr_wang");
    assert_eq!(record.clinic_name, "Happy Valley Community Clinic");
    assert_eq!(record.disease_id, "1");
    assert_eq!(record.disease_name, "Essential hypertension");
    assert_eq!(record.age, 56);
    assert_eq!(record.total_cost, 120.0);
    assert_eq!(record.record_date, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    assert_eq!(uuid::Uuid::parse_str(&record.id).unwrap().get_version_num(), 4);

    assert_eq!(store.list_records().unwrap(), vec![record]);
}

#[test]
fn violations_are_reported_in_order_and_nothing_is_stored() {
    let mut store = MemoryStore::seeded();
    let error = submit(&mut store, &doctor(), &hypertension_rule(), &form("200", "85", "160")).unwrap_err();

    let SubmissionError::RuleViolation { messages } = error else {
        panic!("expected rule violation");
    };
    assert_eq!(
        messages,
        vec![
            "cost 160 exceeds limit 150 for Essential hypertension",
            "Systolic BP 200 mmHg out of range 90-180 mmHg",
        ]
    );
    assert!(store.list_records().unwrap().is_empty());
}

#[test]
fn cap_and_bounds_are_inclusive() {
    let mut store = MemoryStore::seeded();
    let record = submit(&mut store, &doctor(), &hypertension_rule(), &form("180", "60", "150")).unwrap();
    assert!(record.is_compliant());
}

#[test]
fn blank_metric_is_malformed_and_skips_validation() {
    let mut store = MemoryStore::seeded();
    let error = submit(&mut store, &doctor(), &hypertension_rule(), &form("130", "", "100")).unwrap_err();
    let SubmissionError::MalformedInput(problems) = error else {
        panic!("expected malformed input");
    };
    assert_eq!(problems, vec![r#"Diastolic BP "" is not a number"#]);
    assert!(store.list_records().unwrap().is_empty());
}

#[test]
fn absent_metric_is_malformed() {
    let mut store = MemoryStore::seeded();
    let mut form = form("130", "85", "100");
    form.metrics.remove("diastolic");
    assert!(matches!(
        submit(&mut store, &doctor(), &hypertension_rule(), &form),
        Err(SubmissionError::MalformedInput(_))
    ));
}

#[test]
fn malformed_numbers_skip_validation() {
    let mut store = MemoryStore::seeded();
    let error = submit(&mut store, &doctor(), &hypertension_rule(), &form("abc", "85", "NaN")).unwrap_err();
    let SubmissionError::MalformedInput(problems) = error else {
        panic!("expected malformed input");
    };
    assert_eq!(problems.len(), 2);
    assert!(store.list_records().unwrap().is_empty());
}

#[test]
fn zero_or_missing_age_is_malformed() {
    let mut store = MemoryStore::seeded();
    for age in ["0", "", "forty"] {
        let mut form = form("130", "85", "120");
        form.age = age.to_string();
        assert!(matches!(
            submit(&mut store, &doctor(), &hypertension_rule(), &form),
            Err(SubmissionError::MalformedInput(_))
        ));
    }
}

#[test]
fn blank_ethnicity_is_a_missing_field() {
    let mut store = MemoryStore::seeded();
    let mut form = form("130", "85", "120");
    form.ethnicity = "   ".to_string();
    assert!(matches!(
        submit(&mut store, &doctor(), &hypertension_rule(), &form),
        Err(SubmissionError::MissingField("ethnicity"))
    ));
}

#[test]
fn inactive_rule_is_rejected() {
    let mut store = MemoryStore::seeded();
    let rule = set_rule_active(&mut store, "1", false).unwrap();
    let error = submit(&mut store, &doctor(), &rule, &form("130", "85", "120")).unwrap_err();
    assert_eq!(error.to_string(), "rule I10.x is not active");
}
