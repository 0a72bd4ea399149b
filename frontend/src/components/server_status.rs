//! Game server status modal, refreshed while open.

use crate::auth::use_auth;
use crate::poll::Poller;
use desync_shared::ServerStatus as ServerSnapshot;
use desync_shared::date;
use leptos::prelude::*;

pub const GREEN: &str = "#10b981";
pub const YELLOW: &str = "#f59e0b";
pub const RED: &str = "#ef4444";

pub fn status_color(rate: u8) -> &'static str {
    match rate {
        80.. => GREEN,
        50.. => YELLOW,
        _ => RED,
    }
}

pub fn format_ping(ping: i64) -> String {
    if ping < 0 {
        "N/A".to_string()
    } else {
        format!("{ping}ms")
    }
}

/// `1h 5m` / `12m` from seconds on the server.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0m".to_string();
    }
    let mins = (seconds / 60.0).floor() as u64;
    let hours = mins / 60;
    if hours > 0 {
        format!("{hours}h {}m", mins % 60)
    } else {
        format!("{mins}m")
    }
}

#[component]
pub fn ServerStatus() -> impl IntoView {
    let auth = use_auth();
    let (open, set_open) = signal(false);
    let (snapshot, set_snapshot) = signal(Option::<ServerSnapshot>::None);
    let (error, set_error) = signal(Option::<String>::None);
    let (updated_at, set_updated_at) = signal(Option::<String>::None);
    let poller = StoredValue::new_local(Option::<Poller>::None);

    Effect::new(move |_| {
        if !open.get() {
            poller.set_value(None);
            return;
        }
        let api = auth.api();
        let started = Poller::start(
            auth.config().server_status_poll_interval,
            move || {
                let api = api.clone();
                async move { api.server_status().await }
            },
            move |result| match result {
                Ok(Some(server)) => {
                    set_snapshot.set(Some(server));
                    set_error.set(None);
                    set_updated_at.set(Some(date::now().format("%H:%M:%S").to_string()));
                }
                Ok(None) => set_error.set(Some("Invalid response format".to_string())),
                Err(e) => {
                    tracing::warn!(error = %e, "server status refresh failed");
                    set_error.set(Some(e.user_message()));
                }
            },
        );
        poller.set_value(Some(started));
    });
    on_cleanup(move || {
        poller.try_update_value(|p| p.take());
    });

    let body = move || match (snapshot.get(), error.get()) {
        (Some(server), _) => {
            let players = server.players.clone();
            let online = server.online;
            view! {
                <div class="space-y-2">
                    <p>"Server Name: " <b>{server.name.clone()}</b></p>
                    <p>
                        "Status: "
                        <b style=format!("color: {}", if online { GREEN } else { RED })>
                            {if online { "Online" } else { "Offline" }}
                        </b>
                    </p>
                    <p>"Map: " {server.map.clone()}</p>
                    <p>"Players: " {format!("{} / {}", players.current, players.max)}</p>
                    <p>"Ping: " {format_ping(server.ping)}</p>
                    <p>
                        "Status Rate: "
                        <b style=format!("color: {}", status_color(server.status_rate))>
                            {format!("{}%", server.status_rate)}
                        </b>
                    </p>
                    <Show when=move || online && !players.list.is_empty()>
                        <table class="table table-zebra table-sm">
                            <thead><tr><th>"Name"</th><th>"Score"</th><th>"Time"</th></tr></thead>
                            <tbody>
                                {server.players.list.iter().map(|p| view! {
                                    <tr>
                                        <td>{p.name.clone()}</td>
                                        <td>{p.score}</td>
                                        <td>{format_duration(p.duration)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    </Show>
                    <Show when=move || !online>
                        <div class="alert alert-warning">"⚠️ Server is currently offline"</div>
                    </Show>
                    <p class="text-xs opacity-60">
                        "Last updated: " {move || updated_at.get().unwrap_or_default()}
                    </p>
                </div>
            }
            .into_any()
        }
        (None, Some(message)) => view! {
            <div class="alert alert-error flex-col items-start">
                <p>"Unable to connect to server status API."</p>
                <p class="text-xs">{message}</p>
            </div>
        }
        .into_any(),
        (None, None) => view! {
            <div class="flex items-center gap-2">
                <span class="loading loading-spinner"></span>
                "Loading server status..."
            </div>
        }
        .into_any(),
    };

    view! {
        <button class="btn btn-ghost btn-sm" title="Server Status" on:click=move |_| set_open.set(true)>
            "STATUS"
        </button>
        <Show when=move || open.get()>
            <div class="modal modal-open" on:click=move |_| set_open.set(false)>
                <div class="modal-box" on:click=|ev| ev.stop_propagation()>
                    <div class="flex justify-between items-center mb-4">
                        <h2 class="text-xl font-bold">"CS2 Server Status"</h2>
                        <button class="btn btn-sm btn-circle" on:click=move |_| set_open.set(false)>"×"</button>
                    </div>
                    {body}
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color_thresholds() {
        assert_eq!(status_color(100), GREEN);
        assert_eq!(status_color(80), GREEN);
        assert_eq!(status_color(79), YELLOW);
        assert_eq!(status_color(50), YELLOW);
        assert_eq!(status_color(49), RED);
        assert_eq!(status_color(0), RED);
    }

    #[test]
    fn test_ping_and_duration() {
        assert_eq!(format_ping(-1), "N/A");
        assert_eq!(format_ping(0), "0ms");
        assert_eq!(format_ping(42), "42ms");
        assert_eq!(format_duration(0.0), "0m");
        assert_eq!(format_duration(125.0), "2m");
        assert_eq!(format_duration(3_900.0), "1h 5m");
    }
}
