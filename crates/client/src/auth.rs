//! Auth state and its login/logout lifecycle
//!
//! The controller owns the volatile [`AuthState`] and mirrors the
//! credentials into the `authToken`/`authUser` keys of the injected store so
//! a restarted client resumes the session.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use taskdeck_core::auth::{LoginCredentials, User};
use taskdeck_core::storage::{delete_keys, keys, load_json, save_json, KeyValueStore};

use crate::api::ApiClient;
use crate::error::{ClientError, Result};

const SESSION_KEYS: [&str; 2] = [keys::AUTH_TOKEN, keys::AUTH_USER];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Set when `error` came from a rejected login rather than a logout
    login_failed: bool,
}

impl AuthState {
    fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            is_loading: false,
            error: None,
            login_failed: false,
        }
    }

    /// Drop credentials, keeping `is_loading` and `error` as they are
    fn reset_credentials(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
    }
}

/// Where the auth state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
    /// Not authenticated, with the last failure recorded in `error`
    AuthError,
}

impl AuthPhase {
    pub fn of(state: &AuthState) -> Self {
        if state.is_authenticated {
            Self::Authenticated
        } else if state.is_loading {
            Self::Authenticating
        } else if state.error.is_some() && state.login_failed {
            Self::AuthError
        } else {
            Self::Anonymous
        }
    }
}

pub struct AuthController {
    api: ApiClient,
    store: Arc<dyn KeyValueStore>,
    state: RwLock<AuthState>,
}

impl AuthController {
    /// Rebuild the state from the persisted token and user.
    ///
    /// The session is only resumed when both halves are present and valid;
    /// otherwise any remnant is removed.
    pub async fn restore(api: ApiClient, store: Arc<dyn KeyValueStore>) -> Self {
        let state = match Self::load_session(store.as_ref()).await {
            Some((user, token)) => {
                info!("Restored session for {}", user.username);
                AuthState::authenticated(user, token)
            }
            None => {
                if let Err(err) = delete_keys(store.as_ref(), &SESSION_KEYS).await {
                    warn!("Failed to clear stale session: {}", err);
                }
                AuthState::default()
            }
        };

        Self {
            api,
            store,
            state: RwLock::new(state),
        }
    }

    async fn load_session(store: &dyn KeyValueStore) -> Option<(User, String)> {
        let token = store.get(keys::AUTH_TOKEN).await.ok().flatten();
        let user = load_json::<User>(store, keys::AUTH_USER).await.ok().flatten();
        match (user, token) {
            (Some(user), Some(token)) if !token.is_empty() => Some((user, token)),
            _ => None,
        }
    }

    async fn persist_session(&self, user: &User, token: &str) -> taskdeck_core::Result<()> {
        self.store.set(keys::AUTH_TOKEN, token).await?;
        save_json(self.store.as_ref(), keys::AUTH_USER, user).await
    }

    async fn clear_session(&self) {
        if let Err(err) = delete_keys(self.store.as_ref(), &SESSION_KEYS).await {
            warn!("Failed to clear persisted session: {}", err);
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn phase(&self) -> AuthPhase {
        AuthPhase::of(&*self.state.read().await)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    async fn fail_login(&self, err: ClientError) -> ClientError {
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.reset_credentials();
        state.error = Some(err.message().to_string());
        state.login_failed = true;
        err
    }

    /// Exchange credentials for a session.
    ///
    /// On failure the client ends up unauthenticated with `error` set and
    /// nothing persisted. Blank input is rejected before any request and
    /// leaves an existing session alone.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            let err = ClientError::validation("Username and password are required");
            let mut state = self.state.write().await;
            state.error = Some(err.message().to_string());
            state.login_failed = !state.is_authenticated;
            return Err(err);
        }

        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
            state.login_failed = false;
        }

        let credentials = LoginCredentials::new(username, password);
        let response = match self.api.login(&credentials).await {
            Ok(response) => response,
            Err(err) => {
                info!("Login failed: {}", err);
                self.clear_session().await;
                return Err(self.fail_login(err).await);
            }
        };

        if let Err(err) = self.persist_session(&response.user, &response.token).await {
            warn!("Failed to persist session: {}", err);
            self.clear_session().await;
            return Err(self
                .fail_login(ClientError::storage("Failed to save session"))
                .await);
        }

        let user = response.user.clone();
        *self.state.write().await = AuthState::authenticated(response.user, response.token);
        info!("Logged in as {}", user.username);
        Ok(user)
    }

    /// End the session.
    ///
    /// Local credentials are dropped whatever the API answers; a failed
    /// request is still reported through `error` and the returned `Err`.
    pub async fn logout(&self) -> Result<()> {
        self.state.write().await.is_loading = true;

        let result = self.api.logout().await;
        self.clear_session().await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        state.login_failed = false;
        state.reset_credentials();
        match result {
            Ok(()) => {
                state.error = None;
                info!("Logged out");
                Ok(())
            }
            Err(err) => {
                warn!("Logout request failed, session cleared locally: {}", err);
                state.error = Some(err.message().to_string());
                Err(err)
            }
        }
    }

    pub async fn clear_error(&self) {
        let mut state = self.state.write().await;
        state.error = None;
        state.login_failed = false;
    }

    /// Drop the session immediately, without contacting the API
    pub async fn clear_auth(&self) {
        self.clear_session().await;
        let mut state = self.state.write().await;
        state.reset_credentials();
        state.error = None;
        state.login_failed = false;
    }
}
