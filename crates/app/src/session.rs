//! Login state kept outside the tracker core.

use engine::Store;

use crate::{
    error::{AppError, Result},
    local_state::LocalState,
};

/// True when a `/users` record matches both fields.
///
/// A store failure counts as a mismatch.
pub async fn authenticate<S: Store>(store: &S, username: &str, password: &str) -> bool {
    match store.list_users().await {
        Ok(users) => users
            .iter()
            .any(|user| user.username == username && user.password == password),
        Err(err) => {
            tracing::error!("error fetching users: {err}");
            false
        }
    }
}

/// Check the credentials and record the outcome in `state`.
pub async fn login<S: Store>(
    store: &S,
    state: &mut LocalState,
    username: &str,
    password: &str,
) -> Result<()> {
    if authenticate(store, username, password).await {
        state.login(username);
        tracing::info!(username, "logged in");
        Ok(())
    } else {
        state.authenticated = false;
        tracing::warn!(username, "login rejected");
        Err(AppError::LoginFailed)
    }
}

pub fn logout(state: &mut LocalState) {
    state.logout();
    tracing::info!("logged out");
}

pub fn auth_status(state: &LocalState) -> bool {
    state.authenticated
}

pub fn require_login(state: &LocalState) -> Result<()> {
    if auth_status(state) {
        Ok(())
    } else {
        Err(AppError::NotLoggedIn)
    }
}
