//! OpenAI-compatible chat-completions extractor.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use drg_model::{DrgRule, MetricValues};

use crate::error::{ExtractError, Result};
use crate::{Extraction, Extractor};

const SYSTEM_PROMPT: &str = "You extract structured clinical values from medical notes. \
Reply with a single JSON object and nothing else.";

/// Connection settings for [`RemoteExtractor`].
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

pub struct RemoteExtractor {
    client: Client,
    config: RemoteConfig,
}

impl RemoteExtractor {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    fn with_client(client: Client, config: RemoteConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "temperature": 0.0,
        });

        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let json: Value = response.json().await?;
        json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or(ExtractError::MissingContent)
    }
}

/// Build the user prompt listing the rule's metrics.
fn build_prompt(note: &str, rule: &DrgRule) -> String {
    let fields = rule
        .required_metrics
        .iter()
        .map(|m| format!("- \"{}\": {} ({})", m.key, m.label, m.unit))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Disease: {disease}\n\
         Extract these fields as numbers, omitting any you cannot find:\n\
         {fields}\n\
         - \"cost\": total treatment cost\n\n\
         Note:\n{note}",
        disease = rule.disease_name,
    )
}

/// Drop a surrounding Markdown code fence, if any.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Skip an info string such as `json`.
    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => inner.trim(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}

/// Interpret a model reply for `rule`.
///
/// Only numeric values under the rule's metric keys and `cost` are kept.
pub fn parse_model_reply(reply: &str, rule: &DrgRule) -> Result<Option<Extraction>> {
    let body = strip_code_fence(reply);
    let value: Value =
        serde_json::from_str(body).map_err(|e| ExtractError::InvalidReply(e.to_string()))?;
    let Value::Object(object) = value else {
        return Err(ExtractError::InvalidReply(format!("expected object, got {body}")));
    };

    let mut metrics = MetricValues::new();
    for key in rule.metric_keys() {
        if let Some(number) = object.get(key).and_then(as_number) {
            metrics.insert(key.to_string(), number);
        }
    }
    let extraction = Extraction {
        metrics,
        cost: object.get("cost").and_then(as_number),
    };

    if extraction.is_empty() {
        return Ok(None);
    }
    Ok(Some(extraction))
}

#[async_trait]
impl Extractor for RemoteExtractor {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn extract(&self, note: &str, rule: &DrgRule) -> Result<Option<Extraction>> {
        tracing::debug!(endpoint = %self.endpoint(), model = %self.config.model, "requesting extraction");
        let reply = self.complete(build_prompt(note, rule)).await?;
        parse_model_reply(&reply, rule)
    }
}
