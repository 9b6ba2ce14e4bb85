//! Collection contracts consumed by the workflows.

use drg_model::{DrgRule, PatientRecord, User};

use crate::error::{Result, StoreError};

/// Catalog of DRG rules.
pub trait RuleStore {
    fn list_rules(&self) -> Result<Vec<DrgRule>>;
    fn replace_rules(&mut self, rules: Vec<DrgRule>) -> Result<()>;
}

/// Submitted patient records. Append-mostly, with bulk replace for resets.
pub trait RecordStore {
    fn list_records(&self) -> Result<Vec<PatientRecord>>;
    fn append_record(&mut self, record: PatientRecord) -> Result<()>;
    fn replace_records(&mut self, records: Vec<PatientRecord>) -> Result<()>;
}

/// User accounts.
pub trait UserStore {
    fn list_users(&self) -> Result<Vec<User>>;

    /// Fails with [`StoreError::DuplicateUsername`] when the username is taken.
    fn add_user(&mut self, user: User) -> Result<()>;

    /// Replace the user with the same id.
    fn update_user(&mut self, user: User) -> Result<()>;
}

/// The signed-in user, if any.
pub trait SessionStore {
    fn current_user(&self) -> Result<Option<User>>;
    fn save_session(&mut self, user: &User) -> Result<()>;
    fn clear_session(&mut self) -> Result<()>;
}

/// Everything the workflows need from a backend.
pub trait DataStore: RuleStore + RecordStore + UserStore + SessionStore {}

impl<T: RuleStore + RecordStore + UserStore + SessionStore> DataStore for T {}

pub(crate) fn insert_user(users: &mut Vec<User>, user: User) -> Result<()> {
    if users.iter().any(|existing| existing.username == user.username) {
        return Err(StoreError::DuplicateUsername {
            username: user.username,
        });
    }
    users.push(user);
    Ok(())
}

pub(crate) fn replace_user(users: &mut [User], user: User) -> Result<()> {
    let index = users
        .iter()
        .position(|existing| existing.id == user.id)
        .ok_or_else(|| StoreError::UserNotFound {
            id: user.id.clone(),
        })?;
    if users
        .iter()
        .any(|existing| existing.username == user.username && existing.id != user.id)
    {
        return Err(StoreError::DuplicateUsername {
            username: user.username,
        });
    }
    users[index] = user;
    Ok(())
}
