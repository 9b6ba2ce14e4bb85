//! Synthetic records for demonstrations.
//!
//! Generated records are labelled synthetic. Their status is derived from
//! the cost cap alone, so a record with an out-of-range metric can still be
//! compliant.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Builder;

use drg_model::{DrgRule, MetricValues, PatientRecord, RecordStatus, Role, User};
use drg_store::{RecordStore, RuleStore, UserStore};

use crate::error::DemoError;

/// Records produced by [`reset_with_demo_data`] when no count is given.
pub const DEFAULT_DEMO_RECORDS: usize = 20;

pub const SYNTHETIC_FLAG_MESSAGE: &str = "synthetic record: cost exceeds DRG limit";

const FAMILY_NAMES: &[&str] = &["Zhang", "Wang", "Li", "Zhao", "Chen", "Liu", "Yang", "Huang"];
const GIVEN_NAMES: &[&str] = &["Wei", "Fang", "Min", "Jing", "Lei", "Yan", "Tao", "Xin"];
const GENDERS: &[&str] = &["Male", "Female"];
const ETHNICITIES: &[&str] = &["Han", "Zhuang", "Hui", "Manchu", "Uyghur"];
const ALLERGIES: &[&str] = &["None", "Penicillin", "Sulfonamides", "Seafood"];
const HISTORIES: &[&str] = &["None", "Hypertension", "Diabetes", "Asthma", "Appendectomy"];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn random_float<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min >= max {
        return round2(min);
    }
    round2(rng.gen_range(min..=max))
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, values: &'a [&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn synthetic_metrics<R: Rng + ?Sized>(rng: &mut R, rule: &DrgRule, compliant: bool) -> MetricValues {
    rule.required_metrics
        .iter()
        .map(|metric| {
            let value = if compliant || rng.gen_bool(0.5) {
                random_float(rng, metric.min, metric.max)
            } else if rng.gen_bool(0.5) {
                random_float(rng, metric.max + 1.0, metric.max + 10.0)
            } else {
                random_float(rng, metric.min - 5.0, metric.min - 0.1)
            };
            (metric.key.clone(), value)
        })
        .collect()
}

fn synthetic_cost<R: Rng + ?Sized>(rng: &mut R, rule: &DrgRule, compliant: bool) -> f64 {
    let cap = rule.max_cost;
    if !compliant && rng.gen_bool(0.5) {
        random_float(rng, cap + 10.0, cap + 100.0)
    } else {
        random_float(rng, cap * 0.5, cap)
    }
}

fn synthetic_record<R: Rng + ?Sized>(
    rng: &mut R,
    rule: &DrgRule,
    doctor: &User,
    now: DateTime<Utc>,
) -> PatientRecord {
    let compliant = rng.gen_bool(0.8);
    let metrics = synthetic_metrics(rng, rule, compliant);
    let total_cost = synthetic_cost(rng, rule, compliant);
    let status = if rule.within_cost_cap(total_cost) {
        RecordStatus::Compliant
    } else {
        RecordStatus::Flagged
    };
    let validation_messages = match status {
        RecordStatus::Compliant => Vec::new(),
        RecordStatus::Flagged => vec![SYNTHETIC_FLAG_MESSAGE.to_string()],
    };

    let visit = now - Duration::days(rng.gen_range(0..=30));
    let mut id_bytes = [0u8; 16];
    rng.fill(&mut id_bytes);

    PatientRecord {
        id: Builder::from_random_bytes(id_bytes).into_uuid().to_string(),
        record_date: visit.date_naive().and_time(NaiveTime::MIN).and_utc(),
        doctor_name: doctor.username.clone(),
        clinic_name: doctor.clinic_name.clone(),
        patient_name: format!("{} {}", pick(rng, FAMILY_NAMES), pick(rng, GIVEN_NAMES)),
        patient_id: format!("ID{:08}", rng.gen_range(0..100_000_000u32)),
        age: rng.gen_range(18..=90),
        gender: pick(rng, GENDERS).to_string(),
        ethnicity: pick(rng, ETHNICITIES).to_string(),
        contact_number: format!("138{:08}", rng.gen_range(0..100_000_000u32)),
        allergy_history: pick(rng, ALLERGIES).to_string(),
        past_medical_history: pick(rng, HISTORIES).to_string(),
        disease_id: rule.id.clone(),
        disease_name: rule.disease_name.clone(),
        metrics,
        total_cost,
        status,
        validation_messages,
    }
}

/// Generate `count` synthetic records spread over the 30 days before `now`.
pub fn generate_demo_records<R: Rng + ?Sized>(
    rules: &[DrgRule],
    users: &[User],
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<PatientRecord>, DemoError> {
    let rules: Vec<&DrgRule> = rules.iter().filter(|rule| rule.is_active).collect();
    if rules.is_empty() {
        return Err(DemoError::NoRules);
    }
    let doctors: Vec<&User> = users.iter().filter(|user| user.role == Role::Doctor).collect();
    if doctors.is_empty() {
        return Err(DemoError::NoDoctors);
    }

    let records = (0..count)
        .map(|_| {
            let rule = rules[rng.gen_range(0..rules.len())];
            let doctor = doctors[rng.gen_range(0..doctors.len())];
            synthetic_record(rng, rule, doctor, now)
        })
        .collect();
    Ok(records)
}

/// Replace every stored record with freshly generated synthetic ones.
pub fn reset_with_demo_data<S, R>(store: &mut S, count: usize, rng: &mut R) -> Result<Vec<PatientRecord>, DemoError>
where
    S: RuleStore + RecordStore + UserStore + ?Sized,
    R: Rng + ?Sized,
{
    let records = generate_demo_records(&store.list_rules()?, &store.list_users()?, count, Utc::now(), rng)?;
    store.replace_records(records.clone())?;
    let flagged = records.iter().filter(|record| !record.is_compliant()).count();
    tracing::info!(count = records.len(), flagged, "demo records generated");
    Ok(records)
}

/// Remove every stored record.
pub fn clear_records<S>(store: &mut S) -> Result<(), DemoError>
where
    S: RecordStore + ?Sized,
{
    store.replace_records(Vec::new())?;
    tracing::info!("records cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_float_stays_in_bounds_with_two_decimals() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let value = random_float(&mut rng, 3.9, 10.0);
            assert!((3.9..=10.0).contains(&value));
            assert_eq!(round2(value), value);
        }
    }

    #[test]
    fn degenerate_range_returns_lower_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_float(&mut rng, 5.0, 5.0), 5.0);
    }
}
