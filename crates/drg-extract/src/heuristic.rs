//! Local keyword/number matching.

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};

use drg_model::{DrgRule, MetricValues};

use crate::error::Result;
use crate::{Extraction, Extractor};

const COST_KEYWORDS: &[&str] = &["cost", "fee", "amount", "total", "费用", "金额", "花费", "总价", "合计"];

/// Extra keywords recognised for well-known metric keys, besides the label.
fn aliases(key: &str) -> &'static [&'static str] {
    match key {
        "systolic" => &["SBP", "systolic", "高压", "上压"],
        "diastolic" => &["DBP", "diastolic", "低压", "下压"],
        "temperature" => &["temp", "temperature", "体温", "温度"],
        "weight" => &["weight", "体重"],
        "fastingGlucose" => &["FPG", "glucose", "血糖", "空腹"],
        "hba1c" => &["HbA1c", "A1c", "糖化"],
        _ => &[],
    }
}

/// Matches a keyword followed by an optional colon and a number.
fn keyword_pattern(keywords: &[String]) -> Result<Regex> {
    let alternatives = keywords
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?:{alternatives})[:：]?(\d+(?:\.\d+)?)");
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

fn first_number(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Regex-based extractor that runs entirely on the local machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_now(&self, note: &str, rule: &DrgRule) -> Result<Option<Extraction>> {
        let normalized = strip_whitespace(note);
        let mut extraction = Extraction::default();

        let cost_keywords: Vec<String> = COST_KEYWORDS.iter().map(|k| (*k).to_string()).collect();
        extraction.cost = first_number(&keyword_pattern(&cost_keywords)?, &normalized);

        let mut metrics = MetricValues::new();
        for metric in &rule.required_metrics {
            let mut keywords = vec![strip_whitespace(&metric.label)];
            keywords.extend(aliases(&metric.key).iter().map(|k| (*k).to_string()));
            keywords.retain(|k| !k.is_empty());
            if keywords.is_empty() {
                continue;
            }
            if let Some(value) = first_number(&keyword_pattern(&keywords)?, &normalized) {
                metrics.insert(metric.key.clone(), value);
            }
        }
        extraction.metrics = metrics;

        if extraction.is_empty() {
            return Ok(None);
        }
        Ok(Some(extraction))
    }
}

#[async_trait]
impl Extractor for HeuristicExtractor {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn extract(&self, note: &str, rule: &DrgRule) -> Result<Option<Extraction>> {
        self.extract_now(note, rule)
    }
}
