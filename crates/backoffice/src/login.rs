//! Login flow: one credential submission per call, no retry.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use backoffice_client::{ApiClient, AuthResponse, LoginRequest};
use backoffice_client::error::{HTTP_FALLBACK_PREFIX, UNAUTHORIZED};
use backoffice_session::SessionStore;
use parking_lot::Mutex;
use tracing::{info, warn};

/// Shown when the server rejects the credentials.
pub const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

/// Shown when the server failed without explaining why.
pub const SERVER_ERROR: &str = "Error del servidor";

/// Failure of a login attempt.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The login request itself failed.
    #[error(transparent)]
    Api(#[from] backoffice_client::Error),

    /// The token came back but could not be stored.
    #[error(transparent)]
    Session(#[from] backoffice_session::Error),
}

/// Map a failure to the message shown to the user.
pub fn classify_error(err: &LoginError) -> String {
    let message = match err {
        LoginError::Api(api) => api.message(),
        LoginError::Session(session) => session.to_string(),
    };
    if message == UNAUTHORIZED {
        INVALID_CREDENTIALS.to_string()
    } else if message.starts_with(HTTP_FALLBACK_PREFIX) {
        SERVER_ERROR.to_string()
    } else {
        message
    }
}

/// Orchestrates a login against the API and records the result in the session.
pub struct LoginFlow {
    client: ApiClient,
    session: Arc<SessionStore>,
    busy: AtomicBool,
    error: Mutex<Option<String>>,
}

/// Clears the busy flag on every exit path.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl LoginFlow {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            client,
            session,
            busy: AtomicBool::new(false),
            error: Mutex::new(None),
        }
    }

    /// Whether a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Message of the last failed submission, cleared on the next one.
    pub fn error(&self) -> Option<String> {
        self.error.lock().clone()
    }

    /// Submit credentials.
    ///
    /// On success the token is stored in the session and the session becomes
    /// the client's token source. On failure the classified message is kept
    /// in [`error`](Self::error) and the original error is returned.
    pub async fn submit(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<AuthResponse, LoginError> {
        let _busy = BusyGuard::engage(&self.busy);
        *self.error.lock() = None;

        match self.attempt(username_or_email, password).await {
            Ok(response) => Ok(response),
            Err(err) => {
                let message = classify_error(&err);
                warn!(error = %err, shown = %message, "login failed");
                *self.error.lock() = Some(message);
                Err(err)
            }
        }
    }

    async fn attempt(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<AuthResponse, LoginError> {
        let response = self
            .client
            .auth()
            .login(LoginRequest {
                username_or_email: username_or_email.to_string(),
                password: password.to_string(),
            })
            .await?;

        if let Some(token) = &response.token {
            self.session.set_token(Some(token.clone()))?;
            let role = response
                .user
                .as_ref()
                .and_then(|u| u.role_name())
                .map(str::to_string);
            self.session.set_role(role)?;
            self.client.set_token_source(self.session.clone());
            info!(role = self.session.role().as_deref(), "login succeeded");
        }

        if let Some(user) = &response.user
            && let Err(e) = self.session.remember_user(user)
        {
            warn!(error = %e, "could not remember user");
        }

        Ok(response)
    }
}
