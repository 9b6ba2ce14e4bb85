//! Account provisioning and maintenance.

use uuid::Uuid;

use drg_model::{Role, User};
use drg_store::{SessionStore, UserStore};

use crate::error::UserError;

fn required(value: &str, field: &'static str) -> Result<String, UserError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(UserError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Create a doctor account attached to `clinic_name`.
pub fn provision_doctor<S>(store: &mut S, username: &str, clinic_name: &str) -> Result<User, UserError>
where
    S: UserStore + ?Sized,
{
    let user = User {
        id: Uuid::new_v4().to_string(),
        username: required(username, "username")?,
        role: Role::Doctor,
        clinic_name: required(clinic_name, "clinic name")?,
    };
    store.add_user(user.clone())?;
    tracing::info!(user_id = %user.id, username = %user.username, "doctor provisioned");
    Ok(user)
}

/// Replace the account with `user.id`.
///
/// When the signed-in user edits their own account the session is refreshed
/// so later commands see the new name and clinic.
pub fn update_user<S>(store: &mut S, user: User) -> Result<User, UserError>
where
    S: UserStore + SessionStore + ?Sized,
{
    let user = User {
        username: required(&user.username, "username")?,
        clinic_name: required(&user.clinic_name, "clinic name")?,
        ..user
    };
    store.update_user(user.clone())?;

    if store.current_user()?.is_some_and(|current| current.id == user.id) {
        store.save_session(&user)?;
        tracing::debug!(user_id = %user.id, "session refreshed");
    }
    tracing::info!(user_id = %user.id, username = %user.username, "user updated");
    Ok(user)
}
