//! CSV export of the record collection.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use drg_model::PatientRecord;

use crate::error::{ReportError, Result};

/// Header row, in column order.
pub const EXPORT_COLUMNS: [&str; 20] = [
    "id",
    "recordDate",
    "doctorName",
    "clinicName",
    "patientName",
    "patientId",
    "age",
    "gender",
    "ethnicity",
    "contactNumber",
    "allergyHistory",
    "pastMedicalHistory",
    "diseaseId",
    "diseaseName",
    "metrics",
    "totalCost",
    "status",
    "validationMessages",
    "fullPatientInfo",
    "medicalHistory",
];

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() { placeholder } else { value }
}

fn patient_summary(record: &PatientRecord) -> String {
    format!(
        "{} ({}/{}y/{}) - {}",
        record.patient_name,
        record.gender,
        record.age,
        or_placeholder(&record.ethnicity, "not given"),
        record.contact_number,
    )
}

fn history_summary(record: &PatientRecord) -> String {
    format!(
        "Allergies: {} | History: {}",
        or_placeholder(&record.allergy_history, "none"),
        or_placeholder(&record.past_medical_history, "none"),
    )
}

fn row(record: &PatientRecord) -> Result<[String; 20]> {
    let metrics = serde_json::to_string(&record.metrics).map_err(|source| ReportError::Metrics {
        record_id: record.id.clone(),
        source,
    })?;
    Ok([
        record.id.clone(),
        record.record_date.to_rfc3339(),
        record.doctor_name.clone(),
        record.clinic_name.clone(),
        record.patient_name.clone(),
        record.patient_id.clone(),
        record.age.to_string(),
        record.gender.clone(),
        record.ethnicity.clone(),
        record.contact_number.clone(),
        record.allergy_history.clone(),
        record.past_medical_history.clone(),
        record.disease_id.clone(),
        record.disease_name.clone(),
        metrics,
        record.total_cost.to_string(),
        record.status.to_string(),
        record.validation_messages.join("; "),
        patient_summary(record),
        history_summary(record),
    ])
}

/// Write `records` as CSV with a header row.
pub fn write_csv<W: Write>(records: &[PatientRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EXPORT_COLUMNS)?;
    for record in records {
        csv.write_record(row(record)?)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `records` to a CSV file at `path`.
pub fn export_csv(records: &[PatientRecord], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(records, file)?;
    tracing::info!(path = %path.display(), count = records.len(), "exported records");
    Ok(())
}
