//! Session context.
//!
//! Wraps the [`SessionStore`] in a Leptos context. The store stays the single
//! source of truth; a signal mirrors its state so views and the router
//! re-render on every transition.

use crate::api::DesyncApi;
use crate::config::AppConfig;
use crate::gateway::Gateway;
use crate::session::{LoginOutcome, Registration, SessionError, SessionState, SessionStore};
use crate::web::{BrowserTokenStore, FetchTransport};
use desync_shared::Identity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

pub type AppApi = DesyncApi<FetchTransport, BrowserTokenStore>;
pub type AppSession = SessionStore<FetchTransport, BrowserTokenStore>;

/// Copyable handle to the session, provided at the application root.
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: StoredValue<Rc<AppSession>, LocalStorage>,
    config: StoredValue<AppConfig>,
    /// Mirror of the session state.
    pub state: ReadSignal<SessionState>,
}

impl AuthContext {
    pub fn new(config: AppConfig) -> Self {
        let gateway = Gateway::new(
            config.api_base.clone(),
            FetchTransport,
            BrowserTokenStore::new(config.token_key),
        );
        let session = Rc::new(SessionStore::new(DesyncApi::new(gateway)));

        let (state, set_state) = signal(session.state());
        session.subscribe(move |next| set_state.set(next.clone()));

        Self {
            session: StoredValue::new_local(session),
            config: StoredValue::new(config),
            state,
        }
    }

    pub fn session(&self) -> Rc<AppSession> {
        self.session.get_value()
    }

    pub fn api(&self) -> AppApi {
        self.session.with_value(|s| s.api().clone())
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn state_signal(&self) -> Signal<SessionState> {
        self.state.into()
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Starts bootstrapping the persisted token in the background.
pub fn init_auth(ctx: &AuthContext) {
    let session = ctx.session();
    spawn_local(async move {
        let state = session.bootstrap().await;
        tracing::debug!(state = state.name(), "session bootstrapped");
    });
}

pub async fn login(
    ctx: &AuthContext,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, SessionError> {
    ctx.session().login(email, password).await
}

pub async fn register(
    ctx: &AuthContext,
    registration: &Registration,
) -> Result<LoginOutcome, SessionError> {
    ctx.session().register(registration).await
}

/// Signs out. The router reacts to the state change and redirects.
pub fn logout(ctx: &AuthContext) {
    ctx.session().logout();
}

/// Stores a refreshed identity after a profile edit.
pub fn refresh_identity(ctx: &AuthContext, identity: Identity) {
    if let Err(e) = ctx.session().replace_identity(identity) {
        tracing::warn!(error = %e, "identity refresh ignored");
    }
}
