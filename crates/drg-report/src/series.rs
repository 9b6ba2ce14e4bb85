//! Chart-ready series.

use serde::Serialize;

use drg_model::PatientRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceBreakdown {
    pub compliant: usize,
    pub flagged: usize,
}

pub fn compliance_breakdown(records: &[PatientRecord]) -> ComplianceBreakdown {
    let compliant = records.iter().filter(|r| r.is_compliant()).count();
    ComplianceBreakdown {
        compliant,
        flagged: records.len() - compliant,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: usize,
}

/// Submission count per doctor, in order of first appearance.
pub fn submissions_by_doctor(records: &[PatientRecord]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = Vec::new();
    for record in records {
        match points.iter_mut().find(|p| p.label == record.doctor_name) {
            Some(point) => point.value += 1,
            None => points.push(SeriesPoint {
                label: record.doctor_name.clone(),
                value: 1,
            }),
        }
    }
    points
}
