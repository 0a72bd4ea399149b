//! Pieces shared by every page: navbar, badges, toast.

use crate::auth::{logout, use_auth};
use crate::components::notification_badge::NotificationBadge;
use crate::components::server_status::ServerStatus;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use desync_shared::{Identity, Role};
use leptos::prelude::*;
use std::time::Duration;

/// Message plus error flag.
pub type Notice = Option<(String, bool)>;

/// Toast signal that clears itself after three seconds.
pub fn use_notice() -> (ReadSignal<Notice>, WriteSignal<Notice>) {
    let (notice, set_notice) = signal(Notice::None);
    Effect::new(move |_| {
        if notice.get().is_some() {
            set_timeout(move || set_notice.set(None), Duration::from_secs(3));
        }
    });
    (notice, set_notice)
}

#[component]
pub fn Toast(notice: ReadSignal<Notice>) -> impl IntoView {
    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    match notice.get() {
                        Some((_, true)) => "alert alert-error shadow-lg",
                        _ => "alert alert-success shadow-lg",
                    }
                }>
                    <span>{move || notice.get().map(|(m, _)| m).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn RoleBadge(role: Role) -> impl IntoView {
    view! { <span class=format!("badge {}", role.css_class())>{role.as_str()}</span> }
}

/// First letter of the username, upper-cased.
pub fn avatar_letter(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[component]
pub fn Avatar(#[prop(into)] username: String) -> impl IntoView {
    view! {
        <div class="avatar placeholder">
            <div class="bg-neutral text-neutral-content rounded-full w-10">
                <span>{avatar_letter(&username)}</span>
            </div>
        </div>
    }
}

/// Top bar for signed-in pages.
#[component]
pub fn Navbar(identity: Identity, active: AppRoute) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (unread, set_unread) = signal(0usize);

    leptos::task::spawn_local(async move {
        match auth.api().notifications().await {
            Ok(list) => set_unread.set(list.iter().filter(|n| !n.read).count()),
            Err(e) => tracing::warn!(error = %e, "failed to load notifications"),
        }
    });

    let link_class = move |route: AppRoute| {
        if route == active {
            "btn btn-ghost btn-sm btn-active"
        } else {
            "btn btn-ghost btn-sm"
        }
    };
    let is_admin = identity.role().is_staff();
    let profile_path = AppRoute::Profile(identity.uid).to_path();

    let on_logout = move |_| {
        logout(&auth);
        router.navigate_to_route(AppRoute::Landing);
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl mb-6">
            <div class="flex-1 gap-1 flex-wrap">
                <Link to="/dashboard" class=link_class(AppRoute::Dashboard)>"DASHBOARD"</Link>
                <Link to="/forum" class=link_class(AppRoute::Forum)>"FORUMS"</Link>
                <ServerStatus />
                <Link to="/settings" class=link_class(AppRoute::Settings)>"SETTINGS"</Link>
            </div>
            <div class="flex-none gap-2">
                <Link to=profile_path class="btn btn-ghost btn-sm gap-2">
                    {identity.username.clone()}
                    <NotificationBadge count=unread />
                </Link>
                <Show when=move || is_admin>
                    <Link to="/admin" class=link_class(AppRoute::Admin)>"ADMIN PANEL"</Link>
                </Show>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm">"LOG OUT"</button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_letter() {
        assert_eq!(avatar_letter("neo"), "N");
        assert_eq!(avatar_letter("ßeta"), "SS");
        assert_eq!(avatar_letter(""), "?");
    }
}
