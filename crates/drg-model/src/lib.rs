pub mod record;
pub mod rule;
pub mod user;
pub mod validation;

pub use record::{MetricValues, PatientRecord, RecordStatus};
pub use rule::{DrgRule, MetricRule};
pub use user::{Role, User};
pub use validation::ValidationResult;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_range_is_inclusive() {
        let metric = MetricRule::new("systolic", "Systolic BP", "mmHg", 90.0, 180.0);
        assert!(metric.contains(90.0));
        assert!(metric.contains(180.0));
        assert!(!metric.contains(89.99));
        assert!(!metric.contains(180.01));
    }

    #[test]
    fn rule_serializes_camel_case() {
        let rule = DrgRule {
            id: "1".to_string(),
            disease_name: "Essential hypertension".to_string(),
            drg_code: "I10.x".to_string(),
            max_cost: 150.0,
            required_metrics: vec![],
            is_active: true,
        };
        let json = serde_json::to_value(&rule).expect("serialize rule");
        assert_eq!(json["diseaseName"], "Essential hypertension");
        assert_eq!(json["maxCost"], 150.0);
        assert_eq!(json["isActive"], true);
    }
}
