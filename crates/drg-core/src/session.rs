//! Username-only sign-in.

use drg_model::{Role, User};
use drg_store::{SessionStore, UserStore};

use crate::error::SessionError;

/// Sign in as the user with exactly `username`.
pub fn login<S>(store: &mut S, username: &str) -> Result<User, SessionError>
where
    S: UserStore + SessionStore + ?Sized,
{
    let user = store
        .list_users()?
        .into_iter()
        .find(|user| user.username == username)
        .ok_or_else(|| SessionError::UnknownUser(username.to_string()))?;
    store.save_session(&user)?;
    tracing::info!(username = %user.username, role = %user.role, "logged in");
    Ok(user)
}

pub fn logout<S>(store: &mut S) -> Result<(), SessionError>
where
    S: SessionStore + ?Sized,
{
    store.clear_session()?;
    tracing::info!("logged out");
    Ok(())
}

/// The signed-in user, or [`SessionError::NotLoggedIn`].
pub fn require_user<S>(store: &S) -> Result<User, SessionError>
where
    S: SessionStore + ?Sized,
{
    store.current_user()?.ok_or(SessionError::NotLoggedIn)
}

/// The signed-in user, who must be an administrator.
pub fn require_admin<S>(store: &S) -> Result<User, SessionError>
where
    S: SessionStore + ?Sized,
{
    let user = require_user(store)?;
    if user.role != Role::Admin {
        return Err(SessionError::Forbidden {
            required: Role::Admin,
        });
    }
    Ok(user)
}
