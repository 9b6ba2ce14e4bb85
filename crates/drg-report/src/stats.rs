//! Aggregate statistics over stored records.

use serde::Serialize;

use drg_model::PatientRecord;

/// Percentage of compliant records, rounded to the nearest integer.
///
/// An empty collection is vacuously 100% compliant.
pub fn compliance_rate(records: &[PatientRecord]) -> u32 {
    if records.is_empty() {
        return 100;
    }
    let compliant = records.iter().filter(|r| r.is_compliant()).count();
    (compliant as f64 * 100.0 / records.len() as f64).round() as u32
}

/// Group records by `key`, keeping groups in order of first appearance.
fn group_by<'a, F>(records: &'a [PatientRecord], key: F) -> Vec<(&'a str, Vec<&'a PatientRecord>)>
where
    F: Fn(&'a PatientRecord) -> &'a str,
{
    let mut groups: Vec<(&str, Vec<&PatientRecord>)> = Vec::new();
    for record in records {
        let name = key(record);
        match groups.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, members)) => members.push(record),
            None => groups.push((name, vec![record])),
        }
    }
    groups
}

fn total_cost(records: &[&PatientRecord]) -> f64 {
    records.iter().map(|r| r.total_cost).sum()
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorStats {
    pub doctor_name: String,
    /// Clinic of the doctor's first record.
    pub clinic_name: String,
    pub count: usize,
    pub total_cost: f64,
    pub average_cost: f64,
}

pub fn doctor_stats(records: &[PatientRecord]) -> Vec<DoctorStats> {
    group_by(records, |r| r.doctor_name.as_str())
        .into_iter()
        .map(|(doctor, members)| {
            let total = total_cost(&members);
            DoctorStats {
                doctor_name: doctor.to_string(),
                clinic_name: members[0].clinic_name.clone(),
                count: members.len(),
                total_cost: total,
                average_cost: average(total, members.len()),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicStats {
    pub clinic_name: String,
    pub count: usize,
    pub total_cost: f64,
    pub average_cost: f64,
    /// Distinct doctor names seen for the clinic.
    pub doctor_count: usize,
}

pub fn clinic_stats(records: &[PatientRecord]) -> Vec<ClinicStats> {
    group_by(records, |r| r.clinic_name.as_str())
        .into_iter()
        .map(|(clinic, members)| {
            let total = total_cost(&members);
            let doctor_count = distinct_doctors(&members);
            ClinicStats {
                clinic_name: clinic.to_string(),
                count: members.len(),
                total_cost: total,
                average_cost: average(total, members.len()),
                doctor_count,
            }
        })
        .collect()
}

fn distinct_doctors(members: &[&PatientRecord]) -> usize {
    let mut names: Vec<&str> = members.iter().map(|r| r.doctor_name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names.len()
}

/// Everything the admin report shows, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_records: usize,
    pub compliant_records: usize,
    pub flagged_records: usize,
    pub compliance_rate: u32,
    pub doctors: Vec<DoctorStats>,
    pub clinics: Vec<ClinicStats>,
}

pub fn summarize(records: &[PatientRecord]) -> ReportSummary {
    let compliant_records = records.iter().filter(|r| r.is_compliant()).count();
    ReportSummary {
        total_records: records.len(),
        compliant_records,
        flagged_records: records.len() - compliant_records,
        compliance_rate: compliance_rate(records),
        doctors: doctor_stats(records),
        clinics: clinic_stats(records),
    }
}
