use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Submitted metric values keyed by metric key.
pub type MetricValues = BTreeMap<String, f64>;

/// Verdict stored on a record at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Compliant,
    Flagged,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Compliant => "COMPLIANT",
            RecordStatus::Flagged => "FLAGGED",
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, RecordStatus::Compliant)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compliance-checked clinical submission.
///
/// Doctor, clinic and disease names are snapshots taken at submission time;
/// later edits to the user or rule do not touch stored records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: String,
    /// Clinical visit date, not the submission time.
    pub record_date: DateTime<Utc>,
    pub doctor_name: String,
    pub clinic_name: String,
    pub patient_name: String,
    /// External identifier such as an ID card number.
    pub patient_id: String,
    pub age: u32,
    pub gender: String,
    pub ethnicity: String,
    pub contact_number: String,
    pub allergy_history: String,
    pub past_medical_history: String,
    pub disease_id: String,
    pub disease_name: String,
    pub metrics: MetricValues,
    pub total_cost: f64,
    pub status: RecordStatus,
    pub validation_messages: Vec<String>,
}

impl PatientRecord {
    pub fn is_compliant(&self) -> bool {
        self.status.is_compliant()
    }
}
