//! Router service.
//!
//! Owns every `window.history` call. The requested route lives in a signal;
//! an effect re-runs the guard whenever the route or the session changes and
//! applies redirects with `replaceState`.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::guard::{self, GuardDecision};
use crate::session::SessionState;
use desync_shared::{Identity, Role};

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Navigation handle, provided through context.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<SessionState>,
}

impl RouterService {
    fn new(session: Signal<SessionState>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Guard outcome for the current route and session.
    pub fn decision(&self) -> GuardDecision {
        let route = self.current_route.get();
        self.session.with(|state| guard::evaluate(route, state))
    }

    /// Pushes `path` and lets the guard decide what renders.
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path));
    }

    pub fn navigate_to_route(&self, target: AppRoute) {
        tracing::debug!(%target, "navigate");
        push_history_state(&target.to_path());
        self.set_route.set(target);
    }

    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // The listener lives as long as the page.
        closure.forget();
    }

    /// Watches the session settle out of `Unknown`; a restored session on the
    /// landing page goes straight to the forum.
    fn setup_bootstrap_redirect(&self) {
        let router = *self;
        Effect::new(move |previous: Option<SessionState>| {
            let current = router.session.get();
            let to = previous.as_ref().and_then(|previous| {
                guard::after_bootstrap(router.current_route.get_untracked(), previous, &current)
            });
            if let Some(to) = to {
                tracing::info!(%to, "session restored");
                replace_history_state(&to.to_path());
                router.set_route.set(to);
            }
            current
        });
    }

    /// Re-evaluates the guard on every route or session change.
    fn setup_guard_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            if let GuardDecision::Redirect(to) = router.decision() {
                let from = router.current_route.get_untracked();
                tracing::info!(%from, %to, "guard redirect");
                replace_history_state(&to.to_path());
                router.set_route.set(to);
            }
        });
    }
}

fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);
    router.init_popstate_listener();
    router.setup_guard_redirect();
    router.setup_bootstrap_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI components
// ============================================================================

#[component]
pub fn Router(session: Signal<SessionState>, children: Children) -> impl IntoView {
    provide_router(session);
    children()
}

/// Renders the current route once the guard allows it.
#[component]
pub fn RouterOutlet(
    /// Maps a permitted route to its view; the identity is set on gated routes.
    matcher: fn(AppRoute, Option<Identity>) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || match router.decision() {
        GuardDecision::Render(identity) => matcher(router.current_route().get(), identity),
        GuardDecision::Forbidden { required } => view! { <Forbidden required=required /> }.into_any(),
        GuardDecision::Pending | GuardDecision::Redirect(_) => view! { <PageLoader /> }.into_any(),
    }
}

#[component]
pub fn PageLoader() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

#[component]
fn Forbidden(required: Role) -> impl IntoView {
    let router = use_router();
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"403"</h1>
                <p class="text-xl">{format!("This area requires the {required} rank.")}</p>
                <button class="btn btn-primary" on:click=move |_| router.navigate_to_route(AppRoute::Forum)>
                    "Back to forum"
                </button>
            </div>
        </div>
    }
}

/// In-app link that goes through the router instead of reloading the page.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
