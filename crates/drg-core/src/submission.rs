//! Record submission workflow.
//!
//! Raw form input is parsed, validated against the selected rule and, only
//! when compliant, stored as a new record. Real submissions never produce a
//! flagged record.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use drg_extract::Extraction;
use drg_model::{DrgRule, MetricValues, PatientRecord, RecordStatus, User};
use drg_store::RecordStore;

use crate::error::SubmissionError;

/// Data entered for one visit, before any parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionForm {
    pub visit_date: NaiveDate,
    pub patient_name: String,
    pub patient_id: String,
    pub age: String,
    pub gender: String,
    pub ethnicity: String,
    pub contact_number: String,
    pub allergy_history: String,
    pub past_medical_history: String,
    /// Raw metric input keyed by metric key.
    pub metrics: BTreeMap<String, String>,
    pub total_cost: String,
}

impl SubmissionForm {
    pub fn new(visit_date: NaiveDate) -> Self {
        Self {
            visit_date,
            patient_name: String::new(),
            patient_id: String::new(),
            age: String::new(),
            gender: String::new(),
            ethnicity: String::new(),
            contact_number: String::new(),
            allergy_history: String::new(),
            past_medical_history: String::new(),
            metrics: BTreeMap::new(),
            total_cost: String::new(),
        }
    }

    /// Overwrite metric and cost fields with extracted values.
    pub fn apply_extraction(&mut self, extraction: &Extraction) {
        for (key, value) in &extraction.metrics {
            self.metrics.insert(key.clone(), value.to_string());
        }
        if let Some(cost) = extraction.cost {
            self.total_cost = cost.to_string();
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

struct ParsedForm {
    age: u32,
    metrics: MetricValues,
    cost: f64,
}

/// Convert every numeric field, collecting all failures.
///
/// A blank or absent required metric counts as malformed input.
fn parse_form(rule: &DrgRule, form: &SubmissionForm) -> Result<ParsedForm, SubmissionError> {
    let mut problems = Vec::new();

    let age = match form.age.trim().parse::<u32>() {
        Ok(age) if age > 0 => Some(age),
        _ => {
            problems.push(format!("age {:?} must be a positive whole number", form.age.trim()));
            None
        }
    };

    let mut metrics = MetricValues::new();
    for metric in &rule.required_metrics {
        let raw = form.metrics.get(&metric.key).map_or("", String::as_str);
        match parse_number(raw) {
            Some(value) => {
                metrics.insert(metric.key.clone(), value);
            }
            None => problems.push(format!("{} {:?} is not a number", metric.label, raw.trim())),
        }
    }
    for key in form.metrics.keys().filter(|key| rule.metric(key).is_none()) {
        tracing::debug!(metric = %key, rule_id = %rule.id, "ignoring metric not required by rule");
    }

    let cost = parse_number(&form.total_cost);
    if cost.is_none() {
        problems.push(format!("total cost {:?} is not a number", form.total_cost.trim()));
    }

    match (age, cost) {
        (Some(age), Some(cost)) if problems.is_empty() => Ok(ParsedForm { age, metrics, cost }),
        _ => Err(SubmissionError::MalformedInput(problems)),
    }
}

/// Validate `form` against `rule` and store it as a compliant record.
///
/// Nothing is persisted unless every check passes.
pub fn submit<S>(
    store: &mut S,
    user: &User,
    rule: &DrgRule,
    form: &SubmissionForm,
) -> Result<PatientRecord, SubmissionError>
where
    S: RecordStore + ?Sized,
{
    if !rule.is_active {
        return Err(SubmissionError::InactiveRule {
            drg_code: rule.drg_code.clone(),
        });
    }

    let parsed = parse_form(rule, form)?;

    if form.ethnicity.trim().is_empty() {
        return Err(SubmissionError::MissingField("ethnicity"));
    }

    let result = drg_validate::validate(rule, &parsed.metrics, parsed.cost);
    if !result.is_valid {
        tracing::info!(
            rule_id = %rule.id,
            doctor = %user.username,
            violation_count = result.messages.len(),
            "submission rejected"
        );
        return Err(SubmissionError::RuleViolation {
            messages: result.messages,
        });
    }

    let record = PatientRecord {
        id: Uuid::new_v4().to_string(),
        record_date: form.visit_date.and_time(NaiveTime::MIN).and_utc(),
        doctor_name: user.username.clone(),
        clinic_name: user.clinic_name.clone(),
        patient_name: form.patient_name.trim().to_string(),
        patient_id: form.patient_id.trim().to_string(),
        age: parsed.age,
        gender: form.gender.trim().to_string(),
        ethnicity: form.ethnicity.trim().to_string(),
        contact_number: form.contact_number.trim().to_string(),
        allergy_history: form.allergy_history.trim().to_string(),
        past_medical_history: form.past_medical_history.trim().to_string(),
        disease_id: rule.id.clone(),
        disease_name: rule.disease_name.clone(),
        metrics: parsed.metrics,
        total_cost: parsed.cost,
        status: RecordStatus::Compliant,
        validation_messages: Vec::new(),
    };
    store.append_record(record.clone())?;
    tracing::info!(record_id = %record.id, rule_id = %rule.id, doctor = %user.username, "record stored");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drg_model::MetricRule;

    fn rule() -> DrgRule {
        DrgRule {
            id: "5".to_string(),
            disease_name: "Acute upper respiratory infection".to_string(),
            drg_code: "J06.9".to_string(),
            max_cost: 80.0,
            required_metrics: vec![MetricRule::new("temperature", "Temperature", "°C", 36.0, 40.0)],
            is_active: true,
        }
    }

    #[test]
    fn blank_metric_is_malformed() {
        let mut form = SubmissionForm::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        form.age = "30".to_string();
        form.total_cost = "60".to_string();
        form.metrics.insert("temperature".to_string(), "  ".to_string());

        let Err(SubmissionError::MalformedInput(problems)) = parse_form(&rule(), &form) else {
            panic!("expected malformed input");
        };
        assert_eq!(problems, vec![r#"Temperature "" is not a number"#.to_string()]);
    }

    #[test]
    fn absent_metric_is_malformed() {
        let mut form = SubmissionForm::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        form.age = "30".to_string();
        form.total_cost = "60".to_string();

        assert!(matches!(
            parse_form(&rule(), &form),
            Err(SubmissionError::MalformedInput(_))
        ));
    }

    #[test]
    fn all_parse_failures_are_reported_together() {
        let mut form = SubmissionForm::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        form.age = "0".to_string();
        form.total_cost = "abc".to_string();
        form.metrics.insert("temperature".to_string(), "hot".to_string());

        let Err(SubmissionError::MalformedInput(problems)) = parse_form(&rule(), &form) else {
            panic!("expected malformed input");
        };
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn extraction_overwrites_raw_fields() {
        let mut form = SubmissionForm::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        form.total_cost = "10".to_string();
        let extraction = Extraction {
            metrics: MetricValues::from([("temperature".to_string(), 38.5)]),
            cost: Some(75.0),
        };
        form.apply_extraction(&extraction);
        assert_eq!(form.metrics["temperature"], "38.5");
        assert_eq!(form.total_cost, "75");
    }
}
