//! Role-scoped record access.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use drg_core::{RecordError, find_record, login, visible_records};
use drg_model::{PatientRecord, RecordStatus};
use drg_store::{MemoryStore, RecordStore};

fn record(id: &str, doctor: &str, status: RecordStatus) -> PatientRecord {
    PatientRecord {
        id: id.to_string(),
        record_date: Utc.with_ymd_and_hms(2024, 4, 10, 0, 0, 0).unwrap(),
        doctor_name: doctor.to_string(),
        clinic_name: "Happy Valley Community Clinic".to_string(),
        patient_name: "Han Meimei".to_string(),
        patient_id: "ID00004321".to_string(),
        age: 61,
        gender: "Female".to_string(),
        ethnicity: "Hui".to_string(),
        contact_number: "13900000000".to_string(),
        allergy_history: "penicillin".to_string(),
        past_medical_history: String::new(),
        disease_id: "1".to_string(),
        disease_name: "Essential hypertension".to_string(),
        metrics: BTreeMap::from([("systolic".to_string(), 150.0), ("diastolic".to_string(), 95.0)]),
        total_cost: 130.0,
        status,
        validation_messages: vec![],
    }
}

fn store_with_records() -> MemoryStore {
    let mut store = MemoryStore::seeded();
    store.append_record(record("r1", "dr_wang", RecordStatus::Compliant)).unwrap();
    store.append_record(record("r2", "dr_zhang", RecordStatus::Compliant)).unwrap();
    store.append_record(record("r3", "dr_wang", RecordStatus::Flagged)).unwrap();
    store
}

fn ids(records: &[PatientRecord]) -> Vec<&str> {
    records.iter().map(|record| record.id.as_str()).collect()
}

#[test]
fn doctors_see_only_their_own_records() {
    let mut store = store_with_records();
    let doctor = login(&mut store, "dr_wang").unwrap();

    assert_eq!(ids(&visible_records(&store, &doctor, None).unwrap()), ["r1", "r3"]);
    assert_eq!(
        ids(&visible_records(&store, &doctor, Some(RecordStatus::Flagged)).unwrap()),
        ["r3"]
    );
}

#[test]
fn admins_see_every_record() {
    let mut store = store_with_records();
    let admin = login(&mut store, "admin_li").unwrap();

    assert_eq!(ids(&visible_records(&store, &admin, None).unwrap()), ["r1", "r2", "r3"]);
    assert_eq!(find_record(&store, &admin, "r2").unwrap().doctor_name, "dr_zhang");
}

#[test]
fn lookup_hides_other_doctors_records() {
    let mut store = store_with_records();
    let doctor = login(&mut store, "dr_wang").unwrap();

    let own = find_record(&store, &doctor, "r1").unwrap();
    assert_eq!(own.allergy_history, "penicillin");

    let error = find_record(&store, &doctor, "r2").unwrap_err();
    assert!(matches!(error, RecordError::UnknownRecord(ref id) if id == "r2"));
    assert_eq!(error.to_string(), "no record with id r2");
    assert!(matches!(
        find_record(&store, &doctor, "missing"),
        Err(RecordError::UnknownRecord(_))
    ));
}
