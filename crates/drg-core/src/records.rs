//! Read access to stored records.
//!
//! Doctors only ever see records they submitted; administrators see all.

use drg_model::{PatientRecord, RecordStatus, User};
use drg_store::RecordStore;

use crate::error::RecordError;

/// Records `user` may see, optionally narrowed to one status.
pub fn visible_records<S>(
    store: &S,
    user: &User,
    status: Option<RecordStatus>,
) -> Result<Vec<PatientRecord>, RecordError>
where
    S: RecordStore + ?Sized,
{
    let mut records = store.list_records()?;
    if user.is_doctor() {
        records.retain(|record| record.doctor_name == user.username);
    }
    if let Some(status) = status {
        records.retain(|record| record.status == status);
    }
    Ok(records)
}

/// One record by id. A doctor asking for someone else's record gets
/// [`RecordError::UnknownRecord`].
pub fn find_record<S>(store: &S, user: &User, record_id: &str) -> Result<PatientRecord, RecordError>
where
    S: RecordStore + ?Sized,
{
    visible_records(store, user, None)?
        .into_iter()
        .find(|record| record.id == record_id)
        .ok_or_else(|| RecordError::UnknownRecord(record_id.to_string()))
}
