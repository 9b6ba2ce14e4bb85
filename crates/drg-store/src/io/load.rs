//! Collection loading.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::codec::{self, DecodeError};
use crate::error::{Result, StoreError};

/// Load a collection from `path`.
///
/// Returns `Ok(None)` when the file does not exist yet.
pub fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io("read", path, e)),
    };

    let value = codec::decode(&text).map_err(|error| match error {
        DecodeError::Base64(source) => StoreError::InvalidFormat {
            path: path.to_path_buf(),
            reason: source.to_string(),
        },
        DecodeError::Json(source) => StoreError::Deserialization {
            path: path.to_path_buf(),
            source,
        },
    })?;

    tracing::debug!(path = %path.display(), "loaded collection");
    Ok(Some(value))
}
