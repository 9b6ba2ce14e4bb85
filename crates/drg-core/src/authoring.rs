//! Rule authoring and cost cap maintenance.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drg_model::{DrgRule, MetricRule};
use drg_store::RuleStore;

use crate::error::AuthoringError;

/// A rule as entered by an administrator, e.g. from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDraft {
    pub disease_name: String,
    pub drg_code: String,
    pub max_cost: f64,
    #[serde(default)]
    pub metrics: Vec<MetricDraft>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDraft {
    /// Generated when omitted.
    #[serde(default)]
    pub key: Option<String>,
    pub label: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
}

fn generated_key() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("m_{}", &hex[..8])
}

fn check_max_cost(max_cost: f64) -> Result<(), AuthoringError> {
    if !max_cost.is_finite() || max_cost <= 0.0 {
        return Err(AuthoringError::InvalidMaxCost(max_cost));
    }
    Ok(())
}

/// Check a draft and turn it into metric rules with final keys.
fn build_metrics(draft: &RuleDraft) -> Result<Vec<MetricRule>, AuthoringError> {
    if draft.metrics.is_empty() {
        return Err(AuthoringError::NoMetrics);
    }

    let mut keys = BTreeSet::new();
    for metric in &draft.metrics {
        if let Some(key) = metric.key.as_deref().map(str::trim).filter(|k| !k.is_empty())
            && !keys.insert(key.to_string())
        {
            return Err(AuthoringError::DuplicateMetricKey(key.to_string()));
        }
    }

    let mut metrics = Vec::with_capacity(draft.metrics.len());
    for (index, metric) in draft.metrics.iter().enumerate() {
        let label = metric.label.trim();
        let unit = metric.unit.trim();
        if label.is_empty() || unit.is_empty() {
            return Err(AuthoringError::IncompleteMetric { index: index + 1 });
        }
        if !metric.min.is_finite() || !metric.max.is_finite() {
            return Err(AuthoringError::NonFiniteBounds {
                label: label.to_string(),
            });
        }
        if metric.min > metric.max {
            return Err(AuthoringError::InvertedRange {
                label: label.to_string(),
                min: metric.min,
                max: metric.max,
            });
        }

        let key = match metric.key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => key.to_string(),
            None => loop {
                let candidate = generated_key();
                if keys.insert(candidate.clone()) {
                    break candidate;
                }
            },
        };
        metrics.push(MetricRule::new(key, label, unit, metric.min, metric.max));
    }
    Ok(metrics)
}

/// Check `draft` and append it to the catalog as an active rule.
pub fn create_rule<S>(store: &mut S, draft: &RuleDraft) -> Result<DrgRule, AuthoringError>
where
    S: RuleStore + ?Sized,
{
    if draft.disease_name.trim().is_empty() {
        return Err(AuthoringError::MissingField("disease name"));
    }
    if draft.drg_code.trim().is_empty() {
        return Err(AuthoringError::MissingField("DRG code"));
    }
    check_max_cost(draft.max_cost)?;
    let required_metrics = build_metrics(draft)?;

    let rule = DrgRule {
        id: Uuid::new_v4().to_string(),
        disease_name: draft.disease_name.trim().to_string(),
        drg_code: draft.drg_code.trim().to_string(),
        max_cost: draft.max_cost,
        required_metrics,
        is_active: true,
    };

    let mut rules = store.list_rules()?;
    rules.push(rule.clone());
    store.replace_rules(rules)?;
    tracing::info!(rule_id = %rule.id, drg_code = %rule.drg_code, "rule created");
    Ok(rule)
}

/// Apply `change` to the rule with `rule_id` and persist the catalog.
fn modify_rule<S, F>(store: &mut S, rule_id: &str, change: F) -> Result<DrgRule, AuthoringError>
where
    S: RuleStore + ?Sized,
    F: FnOnce(&mut DrgRule),
{
    let mut rules = store.list_rules()?;
    let rule = rules
        .iter_mut()
        .find(|rule| rule.id == rule_id)
        .ok_or_else(|| AuthoringError::UnknownRule(rule_id.to_string()))?;
    change(rule);
    let updated = rule.clone();
    store.replace_rules(rules)?;
    Ok(updated)
}

/// Replace a rule's cost cap. Stored records keep their status.
pub fn update_max_cost<S>(store: &mut S, rule_id: &str, max_cost: f64) -> Result<DrgRule, AuthoringError>
where
    S: RuleStore + ?Sized,
{
    check_max_cost(max_cost)?;
    let rule = modify_rule(store, rule_id, |rule| rule.max_cost = max_cost)?;
    tracing::info!(rule_id, max_cost, "cost cap updated");
    Ok(rule)
}

/// Offer or withdraw a rule for new submissions.
pub fn set_rule_active<S>(store: &mut S, rule_id: &str, active: bool) -> Result<DrgRule, AuthoringError>
where
    S: RuleStore + ?Sized,
{
    let rule = modify_rule(store, rule_id, |rule| rule.is_active = active)?;
    tracing::info!(rule_id, active, "rule availability changed");
    Ok(rule)
}
