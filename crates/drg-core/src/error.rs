//! Workflow errors.
//!
//! Every variant except `Store` is user-correctable and renders as a plain
//! sentence. `Store` keeps the storage failure's message and exposes it as
//! the error source so callers can reach its remediation hint.

use thiserror::Error;

use drg_model::Role;
use drg_store::StoreError;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("malformed numeric input: {}", .0.join("; "))]
    MalformedInput(Vec<String>),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("rule {drg_code} is not active")]
    InactiveRule { drg_code: String },

    #[error("record is not compliant: {}", .messages.join("; "))]
    RuleViolation { messages: Vec<String> },

    #[error("{0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum AuthoringError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("maximum cost must be a positive number, got {0}")]
    InvalidMaxCost(f64),

    #[error("a rule needs at least one required metric")]
    NoMetrics,

    #[error("metric #{index} needs a label and a unit")]
    IncompleteMetric { index: usize },

    #[error("metric {label} has non-numeric bounds")]
    NonFiniteBounds { label: String },

    #[error("metric {label} has min {min} greater than max {max}")]
    InvertedRange { label: String, min: f64, max: f64 },

    #[error("metric key {0} is used more than once")]
    DuplicateMetricKey(String),

    #[error("no rule with id {0}")]
    UnknownRule(String),

    #[error("{0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("username {0} is already taken")]
    DuplicateUsername(String),

    #[error("no user with id {0}")]
    UnknownUser(String),

    #[error("{0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for UserError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateUsername { username } => UserError::DuplicateUsername(username),
            StoreError::UserNotFound { id } => UserError::UnknownUser(id),
            other => UserError::Store(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no user named {0}")]
    UnknownUser(String),

    #[error("not logged in; run `drg login <username>` first")]
    NotLoggedIn,

    #[error("this action requires the {} role", .required.label())]
    Forbidden { required: Role },

    #[error("{0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("no record with id {0}")]
    UnknownRecord(String),

    #[error("{0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("no active DRG rules to generate records for")]
    NoRules,

    #[error("demo data needs at least one doctor account")]
    NoDoctors,

    #[error("{0}")]
    Store(#[from] StoreError),
}
