//! Advisory extraction of metric values from free-text clinical notes.
//!
//! An [`Extractor`] turns a note into a partial metric map and an optional
//! cost for one DRG rule. Results only pre-fill a submission form; the
//! submission still goes through the full validation pipeline.
//!
//! Two implementations are provided:
//!
//! - [`HeuristicExtractor`]: keyword and alias matching, fully local
//! - [`RemoteExtractor`]: an OpenAI-compatible chat-completions endpoint

mod error;
mod feedback;
mod heuristic;
mod remote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use drg_model::{DrgRule, MetricValues};

pub use error::{ExtractError, Result};
pub use feedback::{ExtractionFeedback, review};
pub use heuristic::HeuristicExtractor;
pub use remote::{RemoteConfig, RemoteExtractor, parse_model_reply};

/// Values recovered from a note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Only keys of the rule's required metrics.
    pub metrics: MetricValues,
    pub cost: Option<f64>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty() && self.cost.is_none()
    }
}

/// Strategy for reading metric values out of a note.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// `Ok(None)` when nothing usable was found.
    async fn extract(&self, note: &str, rule: &DrgRule) -> Result<Option<Extraction>>;
}
