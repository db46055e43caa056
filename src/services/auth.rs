//! Authentication service: login, logout and the session-derived guard

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::user::{LoginRequest, LoginResponse};
use crate::repository::auth::AuthRepository;
use crate::session::SessionStore;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Authentication state for display
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<LoginResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct AuthService {
    repository: AuthRepository,
    session: Arc<SessionStore>,
    state: AuthState,
}

impl AuthService {
    /// A previous run's session survives restarts: the initial state is
    /// rebuilt from the store.
    pub fn new(repository: AuthRepository, session: Arc<SessionStore>) -> Self {
        let state = AuthState {
            authenticated: session.is_authenticated(),
            user: session.stored_user(),
            loading: false,
            error: None,
        };
        Self {
            repository,
            session,
            state,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Presence check against the session store; the backend decides
    /// whether the token is still good.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Guard for protected actions: fails before any network call is made.
    pub fn require_authenticated(&self) -> AppResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    /// Authenticate and persist the session. Tokens and the user snapshot
    /// are written to the store before the state flips to authenticated.
    pub async fn login(&mut self, user_name: &str, password: &str) -> AppResult<()> {
        self.state.loading = true;
        self.state.error = None;

        let credentials = LoginRequest {
            user_name: user_name.to_string(),
            password: password.to_string(),
        };

        match self.repository.login(&credentials).await {
            Ok(user) => {
                self.session.save_tokens(&user.access_token, &user.refresh_token);
                self.session.save_user(&user);
                info!("Logged in as {}", user.user_name);
                self.state.loading = false;
                self.state.authenticated = true;
                self.state.user = Some(user);
                Ok(())
            }
            Err(e) => {
                debug!("Login failed: {}", e);
                self.state.loading = false;
                self.state.authenticated = false;
                self.state.user = None;
                self.state.error = Some(LOGIN_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Drop the session: both tokens and the user snapshot. Idempotent.
    pub fn logout(&mut self) {
        self.session.clear();
        self.session.clear_user();
        self.state.authenticated = false;
        self.state.user = None;
        info!("Logged out");
    }

    /// Re-derive the authenticated flag from the store, e.g. after an
    /// irrecoverable refresh failure cleared the tokens mid-session.
    pub fn check_auth(&mut self) -> bool {
        self.state.authenticated = self.session.is_authenticated();
        if !self.state.authenticated {
            self.state.user = None;
        }
        self.state.authenticated
    }
}
