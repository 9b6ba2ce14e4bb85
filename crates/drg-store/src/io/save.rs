//! Collection saving.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::codec;
use crate::error::{Result, StoreError};

/// Save a collection to `path`.
///
/// Uses atomic write (temp file + rename) so a crash never leaves a
/// half-written collection behind.
pub fn save_collection<T: Serialize + ?Sized>(
    value: &T,
    path: &Path,
    collection: &'static str,
) -> Result<()> {
    let encoded = codec::encode(value).map_err(|source| StoreError::Serialization {
        collection,
        source,
    })?;

    let temp_path = path.with_extension("dat.tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io("create directory", parent, e))?;
    }

    let mut file =
        File::create(&temp_path).map_err(|e| StoreError::io("create", temp_path.clone(), e))?;
    file.write_all(encoded.as_bytes())
        .map_err(|e| StoreError::io("write", temp_path.clone(), e))?;
    file.sync_all()
        .map_err(|e| StoreError::io("sync", temp_path.clone(), e))?;

    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(collection, path = %path.display(), "saved collection");
    Ok(())
}
