use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("extraction service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("extraction service returned no content")]
    MissingContent,
    #[error("extraction service reply is not a JSON object: {0}")]
    InvalidReply(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
