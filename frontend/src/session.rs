//! Session store.
//!
//! Owns "who is signed in". State moves
//! `Unknown -> Authenticated | Unauthenticated` through [`SessionStore::bootstrap`],
//! then between the two settled states through login, registration and
//! logout. The persisted token and the in-memory identity change together.

use crate::api::DesyncApi;
use crate::gateway::{RequestError, TokenStore, Transport};
use desync_shared::protocol::{AuthResponse, RegisterRequest};
use desync_shared::{DEFAULT_BAN_REASON, Identity};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use thiserror::Error;

/// Marker the backend puts in the message when a banned account signs in.
const BANNED_MARKER: &str = "Account is banned";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Bootstrap has not settled yet.
    #[default]
    Unknown,
    Authenticated(Identity),
    Unauthenticated,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Unknown => "unknown",
            SessionState::Authenticated(_) => "authenticated",
            SessionState::Unauthenticated => "unauthenticated",
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, SessionState::Unknown)
    }
}

/// Result of a credential exchange that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Authenticated(Identity),
    Banned { reason: String },
    Rejected { message: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// The request never got an answer.
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },
}

/// Input of [`SessionStore::register`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    pub invitation_code: String,
}

type Listener = Box<dyn Fn(&SessionState)>;

pub struct SessionStore<T, S> {
    api: DesyncApi<T, S>,
    state: RefCell<SessionState>,
    bootstrapped: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

impl<T: Transport, S: TokenStore> SessionStore<T, S> {
    pub fn new(api: DesyncApi<T, S>) -> Self {
        Self {
            api,
            state: RefCell::new(SessionState::Unknown),
            bootstrapped: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn api(&self) -> &DesyncApi<T, S> {
        &self.api
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    /// Registers a listener called synchronously after every state change.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Resolves the persisted token into a session.
    ///
    /// Runs once per store; later calls return the current state untouched.
    pub async fn bootstrap(&self) -> SessionState {
        if self.bootstrapped.replace(true) {
            return self.state();
        }

        let tokens = self.api.gateway().tokens();
        let Some(token) = tokens.load() else {
            tracing::debug!("no persisted token");
            self.settle_bootstrap(SessionState::Unauthenticated);
            return self.state();
        };

        let next = match self.api.verify_token(&token).await {
            Ok(AuthResponse {
                success: true,
                user: Some(user),
                ..
            }) if !user.banned => {
                tracing::info!(uid = user.uid, "session restored");
                SessionState::Authenticated(user)
            }
            Ok(resp) => {
                tracing::info!(reason = ?resp.message, "persisted token rejected");
                tokens.clear();
                SessionState::Unauthenticated
            }
            Err(e) => {
                tracing::warn!(error = %e, "token verification failed");
                tokens.clear();
                SessionState::Unauthenticated
            }
        };
        self.settle_bootstrap(next);
        self.state()
    }

    /// Exchanges credentials for a session.
    ///
    /// Only valid while unauthenticated. Backend rejections are outcomes;
    /// only transport and decoding failures are errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, SessionError> {
        self.ensure_unauthenticated("log in")?;

        let outcome = match self.api.login(email, password).await {
            Ok(resp) => self.accept_auth_response(resp, "Invalid email or password"),
            Err(RequestError::Status { message, body, .. }) if message.contains(BANNED_MARKER) => {
                LoginOutcome::Banned {
                    reason: ban_reason_from_body(body.as_ref()),
                }
            }
            Err(e @ (RequestError::Status { .. } | RequestError::Rejected(_))) => {
                LoginOutcome::Rejected {
                    message: e.to_string(),
                }
            }
            Err(e) => return Err(e.into()),
        };

        if let LoginOutcome::Banned { reason } = &outcome {
            tracing::info!(%reason, "login refused for banned account");
        }
        Ok(outcome)
    }

    /// Creates an account and signs it in.
    pub async fn register(&self, registration: &Registration) -> Result<LoginOutcome, SessionError> {
        self.ensure_unauthenticated("register")?;

        let request = RegisterRequest {
            email: registration.email.clone(),
            username: registration.username.clone(),
            password: registration.password.clone(),
            invitation_code: registration.invitation_code.clone(),
        };
        match self.api.register(&request).await {
            Ok(resp) => Ok(self.accept_auth_response(resp, "Registration failed")),
            Err(RequestError::Status {
                status, message, ..
            }) => Ok(LoginOutcome::Rejected {
                message: registration_message(status, message),
            }),
            Err(RequestError::Rejected(message)) => Ok(LoginOutcome::Rejected { message }),
            Err(e) => Err(e.into()),
        }
    }

    /// Drops the token and the identity. Accepted from any state.
    pub fn logout(&self) {
        self.api.gateway().tokens().clear();
        self.transition(SessionState::Unauthenticated);
        tracing::info!("logged out");
    }

    /// Swaps in a refreshed copy of the signed-in identity.
    pub fn replace_identity(&self, identity: Identity) -> Result<(), SessionError> {
        let same_user = matches!(
            &*self.state.borrow(),
            SessionState::Authenticated(current) if current.uid == identity.uid
        );
        if !same_user {
            return Err(self.invalid("replace identity"));
        }
        self.transition(SessionState::Authenticated(identity));
        Ok(())
    }

    fn accept_auth_response(&self, resp: AuthResponse, fallback: &str) -> LoginOutcome {
        if let Some(user) = resp.user.as_ref().filter(|u| u.banned) {
            return LoginOutcome::Banned {
                reason: user.ban_reason_or_default().to_string(),
            };
        }
        match resp {
            AuthResponse {
                success: true,
                token: Some(token),
                user: Some(user),
                ..
            } => {
                self.api.gateway().tokens().save(&token);
                tracing::info!(uid = user.uid, "signed in");
                self.transition(SessionState::Authenticated(user.clone()));
                LoginOutcome::Authenticated(user)
            }
            other => LoginOutcome::Rejected {
                message: other
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            },
        }
    }

    fn settle_bootstrap(&self, next: SessionState) {
        // A logout racing the verification wins.
        if !self.state.borrow().is_settled() {
            self.transition(next);
        }
    }

    fn ensure_unauthenticated(&self, operation: &'static str) -> Result<(), SessionError> {
        match &*self.state.borrow() {
            SessionState::Unauthenticated => Ok(()),
            _ => Err(self.invalid(operation)),
        }
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            operation,
            state: self.state.borrow().name(),
        }
    }

    fn transition(&self, next: SessionState) {
        *self.state.borrow_mut() = next.clone();
        for listener in self.listeners.borrow().iter() {
            listener(&next);
        }
    }
}

/// `user.banReason` from a rejection body, if present.
fn ban_reason_from_body(body: Option<&Value>) -> String {
    body.and_then(|b| b.pointer("/user/banReason"))
        .and_then(Value::as_str)
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(DEFAULT_BAN_REASON)
        .to_string()
}

/// Registration failures keep the backend's message; bare status errors
/// get a readable one.
fn registration_message(status: u16, message: String) -> String {
    if !message.starts_with("API Error") {
        return message;
    }
    match status {
        409 => "Email or username already exists".to_string(),
        400 => "Invalid invitation code or missing information".to_string(),
        _ => message,
    }
}

#[cfg(test)]
mod tests;
