//! Desync web client.
//!
//! Context-driven layout:
//! - `gateway` / `api`: transport and typed backend calls
//! - `session` / `auth`: session lifecycle and its reactive context
//! - `guard` + `web::router`: route guard and navigation
//! - `components`: pages and shared UI

mod admin;
mod api;
mod auth;
mod config;
mod gateway;
mod guard;
mod panic_hook;
mod poll;
mod reactions;
mod session;
mod store;
mod validation;

mod components {
    pub mod admin_panel;
    pub mod auth_page;
    pub mod common;
    pub mod create_thread;
    pub mod dashboard;
    pub mod error_fallback;
    pub mod forum;
    pub mod landing;
    pub mod live_chat;
    mod notification_badge;
    pub mod profile;
    pub mod server_status;
    pub mod settings;
    pub mod thread;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::admin_panel::AdminPanelPage;
use crate::components::auth_page::AuthPage;
use crate::components::create_thread::CreateThreadPage;
use crate::components::dashboard::DashboardPage;
use crate::components::error_fallback::ErrorFallback;
use crate::components::forum::ForumPage;
use crate::components::landing::LandingPage;
use crate::components::profile::ProfilePage;
use crate::components::settings::SettingsPage;
use crate::components::thread::ThreadPage;
use crate::config::AppConfig;
use desync_shared::Identity;

use leptos::prelude::*;

// Thin wrappers over browser APIs.
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::FetchTransport;
    pub use storage::{BrowserTokenStore, LocalStorage};
    pub use timer::Interval;
}

use web::route::AppRoute;
use web::router::{PageLoader, Router, RouterOutlet};

/// Maps a permitted route to its page.
///
/// Gated routes always arrive with an identity; the loader covers the gap
/// if one ever does not.
fn route_matcher(route: AppRoute, identity: Option<Identity>) -> AnyView {
    match (route, identity) {
        (AppRoute::Landing, _) => view! { <LandingPage /> }.into_any(),
        (AppRoute::Auth, _) => view! { <AuthPage /> }.into_any(),
        (AppRoute::Dashboard, Some(identity)) => view! { <DashboardPage identity=identity /> }.into_any(),
        (AppRoute::Forum, Some(identity)) => view! { <ForumPage identity=identity /> }.into_any(),
        (AppRoute::Profile(uid), Some(identity)) => view! { <ProfilePage identity=identity uid=uid /> }.into_any(),
        (AppRoute::Thread(thread_id), Some(identity)) => {
            view! { <ThreadPage identity=identity thread_id=thread_id /> }.into_any()
        }
        (AppRoute::CreateThread, Some(identity)) => view! { <CreateThreadPage identity=identity /> }.into_any(),
        (AppRoute::Settings, Some(identity)) => view! { <SettingsPage identity=identity /> }.into_any(),
        (AppRoute::Admin, Some(identity)) => view! { <AdminPanelPage identity=identity /> }.into_any(),
        (AppRoute::NotFound, _) => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
        (_, None) => view! { <PageLoader /> }.into_any(),
    }
}

/// Routes `tracing` output to the browser console.
pub fn init_tracing() {
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

#[component]
pub fn App() -> impl IntoView {
    // 1. Session context
    let auth = AuthContext::new(AppConfig::from_build());
    provide_context(auth);

    // 2. Resume a stored session, if any
    init_auth(&auth);

    // 3. The router reads the session state to run the guard
    view! {
        <Router session=auth.state_signal()>
            <ErrorBoundary fallback=|errors| view! { <ErrorFallback errors=errors /> }>
                <RouterOutlet matcher=route_matcher />
            </ErrorBoundary>
        </Router>
    }
}
