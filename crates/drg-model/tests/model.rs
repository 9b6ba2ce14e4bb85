//! Tests for drg-model types.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use drg_model::{DrgRule, MetricRule, PatientRecord, RecordStatus, Role, User, ValidationResult};

fn sample_record() -> PatientRecord {
    PatientRecord {
        id: "rec-1".to_string(),
        record_date: Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap(),
        doctor_name: "dr_wang".to_string(),
        clinic_name: "Happy Valley Clinic".to_string(),
        patient_name: "Li Lei".to_string(),
        patient_id: "ID123456".to_string(),
        age: 54,
        gender: "M".to_string(),
        ethnicity: "Han".to_string(),
        contact_number: "13800000000".to_string(),
        allergy_history: String::new(),
        past_medical_history: String::new(),
        disease_id: "1".to_string(),
        disease_name: "Essential hypertension".to_string(),
        metrics: BTreeMap::from([("systolic".to_string(), 130.0)]),
        total_cost: 120.0,
        status: RecordStatus::Compliant,
        validation_messages: vec![],
    }
}

#[test]
fn status_and_role_use_upper_case_wire_names() {
    assert_eq!(
        serde_json::to_string(&RecordStatus::Flagged).unwrap(),
        "\"FLAGGED\""
    );
    assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"DOCTOR\"");
    assert_eq!(RecordStatus::Compliant.to_string(), "COMPLIANT");
    assert_eq!(Role::Admin.to_string(), "ADMIN");
}

#[test]
fn record_serializes_with_camel_case_fields() {
    let json = serde_json::to_value(sample_record()).expect("serialize record");
    assert_eq!(json["doctorName"], "dr_wang");
    assert_eq!(json["recordDate"], "2024-05-02T00:00:00Z");
    assert_eq!(json["status"], "COMPLIANT");
    assert_eq!(json["metrics"]["systolic"], 130.0);
    assert!(json["validationMessages"].as_array().unwrap().is_empty());
}

#[test]
fn record_deserializes_from_stored_json() {
    let json = serde_json::to_string(&sample_record()).unwrap();
    let record: PatientRecord = serde_json::from_str(&json).expect("deserialize record");
    assert_eq!(record, sample_record());
    assert!(record.is_compliant());
}

#[test]
fn rule_metric_lookup_by_key() {
    let rule = DrgRule {
        id: "2".to_string(),
        disease_name: "Type 2 diabetes".to_string(),
        drg_code: "E11.9".to_string(),
        max_cost: 200.0,
        required_metrics: vec![
            MetricRule::new("fastingGlucose", "Fasting glucose", "mmol/L", 3.9, 10.0),
            MetricRule::new("hba1c", "HbA1c", "%", 4.0, 9.0),
        ],
        is_active: true,
    };
    assert_eq!(rule.metric("hba1c").map(|m| m.max), Some(9.0));
    assert!(rule.metric("weight").is_none());
    assert_eq!(rule.metric_keys().collect::<Vec<_>>(), ["fastingGlucose", "hba1c"]);
    assert!(rule.within_cost_cap(200.0));
    assert!(!rule.within_cost_cap(200.5));
}

#[test]
fn validation_result_validity_follows_messages() {
    assert!(ValidationResult::from_messages(vec![]).is_valid);
    let result = ValidationResult::from_messages(vec!["cost 160 exceeds limit 150".to_string()]);
    assert!(!result.is_valid);
}

#[test]
fn user_role_helpers() {
    let user = User {
        id: "u2".to_string(),
        username: "admin_li".to_string(),
        role: Role::Admin,
        clinic_name: "Central Health Bureau".to_string(),
    };
    assert!(user.is_admin());
    assert!(!user.is_doctor());
    assert_eq!(user.role.label(), "Administrator");
}
