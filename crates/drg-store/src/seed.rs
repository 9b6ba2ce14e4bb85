//! First-run catalog and accounts.

use drg_model::{DrgRule, MetricRule, Role, User};

fn rule(id: &str, disease: &str, code: &str, max_cost: f64, metrics: Vec<MetricRule>) -> DrgRule {
    DrgRule {
        id: id.to_string(),
        disease_name: disease.to_string(),
        drg_code: code.to_string(),
        max_cost,
        required_metrics: metrics,
        is_active: true,
    }
}

/// Rules written to an empty store on first access.
pub fn initial_rules() -> Vec<DrgRule> {
    vec![
        rule(
            "1",
            "Essential hypertension",
            "I10.x",
            150.0,
            vec![
                MetricRule::new("systolic", "Systolic BP", "mmHg", 90.0, 180.0),
                MetricRule::new("diastolic", "Diastolic BP", "mmHg", 60.0, 110.0),
            ],
        ),
        rule(
            "2",
            "Type 2 diabetes mellitus",
            "E11.9",
            200.0,
            vec![
                MetricRule::new("fastingGlucose", "Fasting glucose", "mmol/L", 3.9, 10.0),
                MetricRule::new("hba1c", "HbA1c", "%", 4.0, 9.0),
            ],
        ),
        rule(
            "3",
            "Acute bronchitis",
            "J20.9",
            120.0,
            vec![
                MetricRule::new("temperature", "Temperature", "°C", 36.0, 39.5),
                MetricRule::new("wbc", "WBC count", "10^9/L", 3.5, 12.0),
            ],
        ),
        rule(
            "4",
            "Chronic obstructive pulmonary disease (COPD)",
            "J44.9",
            350.0,
            vec![
                MetricRule::new("spo2", "SpO2", "%", 88.0, 100.0),
                MetricRule::new("fev1", "FEV1 % predicted", "%", 30.0, 100.0),
            ],
        ),
        rule(
            "5",
            "Acute upper respiratory infection",
            "J06.9",
            80.0,
            vec![MetricRule::new(
                "temperature",
                "Temperature",
                "°C",
                36.0,
                40.0,
            )],
        ),
        rule(
            "6",
            "Acute gastritis",
            "K29.1",
            150.0,
            vec![
                MetricRule::new("wbc", "WBC count", "10^9/L", 3.5, 15.0),
                MetricRule::new("painLevel", "Pain score (NRS)", "pts", 0.0, 10.0),
            ],
        ),
    ]
}

/// Accounts written to an empty store on first access.
pub fn initial_users() -> Vec<User> {
    vec![
        User {
            id: "u1".to_string(),
            username: "dr_wang".to_string(),
            role: Role::Doctor,
            clinic_name: "Happy Valley Community Clinic".to_string(),
        },
        User {
            id: "u2".to_string(),
            username: "admin_li".to_string(),
            role: Role::Admin,
            clinic_name: "Central Health Bureau".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn seeded_rules_are_well_formed() {
        let rules = initial_rules();
        assert_eq!(rules.len(), 6);
        for rule in &rules {
            assert!(rule.max_cost > 0.0);
            assert!(!rule.required_metrics.is_empty());
            let keys: BTreeSet<_> = rule.metric_keys().collect();
            assert_eq!(keys.len(), rule.required_metrics.len());
            assert!(rule.required_metrics.iter().all(|m| m.min <= m.max));
        }
    }

    #[test]
    fn seeded_users_include_an_admin() {
        assert!(initial_users().iter().any(User::is_admin));
    }
}
