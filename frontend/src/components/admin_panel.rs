//! Admin panel. Only reachable for `Admin` and above; the router enforces it.

use crate::admin::{
    self, AdminTab, InviteAmount, REVIEWED_REPORTS_LIMIT, ReportDecision, code_expiry,
    run_invite_wave,
};
use crate::auth::use_auth;
use crate::components::common::{Notice, RoleBadge, Toast, use_notice};
use crate::validation;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use desync_shared::protocol::ListReportsRequest;
use desync_shared::{AdminEvent, AdminStats, EventKind, Identity, InvitationCode, Report, Role, date};
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEFAULT_EXPIRY_TIME: &str = "23:59";

#[derive(Clone, Copy)]
struct PanelData {
    users: RwSignal<Vec<Identity>>,
    codes: RwSignal<Vec<InvitationCode>>,
    stats: RwSignal<Option<AdminStats>>,
    reports: RwSignal<Vec<Report>>,
    events: RwSignal<Vec<AdminEvent>>,
    loading: RwSignal<bool>,
}

impl PanelData {
    fn new() -> Self {
        Self {
            users: RwSignal::new(Vec::new()),
            codes: RwSignal::new(Vec::new()),
            stats: RwSignal::new(None),
            reports: RwSignal::new(Vec::new()),
            events: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
        }
    }
}

fn report_notice(notify: WriteSignal<Notice>, ok: &str, failed: &str, result: Result<(), String>) {
    match result {
        Ok(()) => notify.set(Some((ok.to_string(), false))),
        Err(e) => {
            tracing::warn!(error = %e, "{failed}");
            notify.set(Some((failed.to_string(), true)));
        }
    }
}

#[component]
pub fn AdminPanelPage(identity: Identity) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (notice, set_notice) = use_notice();
    let data = PanelData::new();
    let (tab, set_tab) = signal(AdminTab::default());
    let admin_uid = identity.uid;

    let load = move |tab: AdminTab| {
        let api = auth.api();
        data.loading.set(true);
        spawn_local(async move {
            match tab {
                AdminTab::Overview => {
                    let (stats, codes) = futures::join!(api.admin_stats(), api.codes());
                    match stats {
                        Ok(s) => data.stats.set(s),
                        Err(e) => tracing::warn!(error = %e, "failed to load stats"),
                    }
                    match codes {
                        Ok(c) => data.codes.set(c),
                        Err(e) => tracing::warn!(error = %e, "failed to load codes"),
                    }
                }
                AdminTab::Users | AdminTab::Activity => match api.users().await {
                    Ok(u) => data.users.set(u),
                    Err(e) => tracing::warn!(error = %e, "failed to load users"),
                },
                AdminTab::Banned => {
                    let (users, stats) = futures::join!(api.users(), api.admin_stats());
                    match users {
                        Ok(u) => data.users.set(u),
                        Err(e) => tracing::warn!(error = %e, "failed to load users"),
                    }
                    if let Ok(s) = stats {
                        data.stats.set(s);
                    }
                }
                AdminTab::Reports => match api.reports(&ListReportsRequest::default()).await {
                    Ok(r) => data.reports.set(r),
                    Err(e) => tracing::warn!(error = %e, "failed to load reports"),
                },
                AdminTab::Events => {
                    let (events, users) = futures::join!(api.events(), api.users());
                    data.events.set(admin::events_or_fallback(events, date::now()));
                    if let Ok(u) = users {
                        data.users.set(u);
                    }
                }
            }
            data.loading.set(false);
        });
    };
    Effect::new(move |_| load(tab.get()));
    let reload = move || load(tab.get_untracked());

    view! {
        <div class="min-h-screen bg-base-200 p-4">
            <Toast notice=notice />
            <div class="navbar bg-base-100 rounded-box shadow-xl mb-6">
                <div class="flex-1"><h1 class="text-xl font-bold px-2">"ADMIN PANEL"</h1></div>
                <div class="flex-none gap-2">
                    <RoleBadge role=identity.role() />
                    <button class="btn btn-ghost btn-sm" on:click=move |_| router.navigate_to_route(AppRoute::Forum)>"← BACK"</button>
                </div>
            </div>
            <div class="grid lg:grid-cols-5 gap-6">
                <ul class="menu bg-base-100 rounded-box shadow h-fit">
                    {AdminTab::ALL
                        .into_iter()
                        .map(|t| view! {
                            <li>
                                <a class=move || if tab.get() == t { "active" } else { "" } on:click=move |_| set_tab.set(t)>
                                    {t.label()}
                                </a>
                            </li>
                        })
                        .collect_view()}
                </ul>
                <div class="lg:col-span-4 card bg-base-100 shadow">
                    <div class="card-body">
                        <Show when=move || data.loading.get()>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        {move || match tab.get() {
                            AdminTab::Overview => view! { <OverviewTab data=data notify=set_notice reload=Callback::new(move |_| reload()) /> }.into_any(),
                            AdminTab::Users => view! { <UsersTab data=data admin_uid=admin_uid notify=set_notice reload=Callback::new(move |_| reload()) /> }.into_any(),
                            AdminTab::Activity => view! { <ActivityTab data=data /> }.into_any(),
                            AdminTab::Banned => view! { <BannedTab data=data notify=set_notice reload=Callback::new(move |_| reload()) /> }.into_any(),
                            AdminTab::Reports => view! { <ReportsTab data=data notify=set_notice reload=Callback::new(move |_| reload()) /> }.into_any(),
                            AdminTab::Events => view! { <EventsTab data=data notify=set_notice /> }.into_any(),
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

// ============================================================================
// Tabs
// ============================================================================

#[component]
fn OverviewTab(data: PanelData, notify: WriteSignal<Notice>, reload: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let (expiry_date, set_expiry_date) = signal(String::new());
    let (expiry_time, set_expiry_time) = signal(DEFAULT_EXPIRY_TIME.to_string());

    let generate = move |_: MouseEvent| {
        let expires_at = match code_expiry(&expiry_date.get_untracked(), &expiry_time.get_untracked()) {
            Ok(ts) => ts,
            Err(e) => {
                notify.set(Some((e.to_string(), true)));
                return;
            }
        };
        let api = auth.api();
        spawn_local(async move {
            let result = api.generate_code(expires_at, None, None).await.map_err(|e| e.to_string());
            let ok = result.is_ok();
            report_notice(notify, "Invitation code generated successfully!", "Failed to generate code", result);
            if ok {
                reload.run(());
            }
        });
    };

    let delete = move |code: String| {
        let api = auth.api();
        spawn_local(async move {
            let result = api.delete_code(&code).await.map_err(|e| e.to_string());
            let ok = result.is_ok();
            report_notice(notify, "Invitation code deleted", "Failed to delete code", result);
            if ok {
                reload.run(());
            }
        });
    };

    let stat = |label: &'static str, value: u64| view! {
        <div class="stat">
            <div class="stat-title">{label}</div>
            <div class="stat-value">{value}</div>
        </div>
    };

    view! {
        <h2 class="text-2xl font-bold">"📊 Overview"</h2>
        <h3 class="font-bold mt-2">"SYSTEM STATISTICS"</h3>
        {move || {
            let s = data.stats.get().unwrap_or_default();
            view! {
                <div class="stats shadow">
                    {stat("Total Users", s.users.total)}
                    {stat("Active Users", s.users.active)}
                    {stat("Banned Users", s.users.banned)}
                    {stat("Pending Reports", s.reports.pending)}
                </div>
                <div class="stats shadow">
                    {stat("Threads", s.content.threads)}
                    {stat("Posts", s.content.posts)}
                    {stat("New Users This Week", s.users.new_this_week)}
                </div>
            }
        }}

        <h3 class="font-bold mt-6">"GENERATE INVITATION CODE"</h3>
        <div class="flex flex-wrap gap-2 items-end">
            <label class="form-control">
                <span class="label-text">"Expiry date"</span>
                <input type="date" class="input input-bordered input-sm" prop:value=expiry_date
                    on:input=move |ev| set_expiry_date.set(event_target_value(&ev)) />
            </label>
            <label class="form-control">
                <span class="label-text">"Expiry time"</span>
                <input type="time" class="input input-bordered input-sm" prop:value=expiry_time
                    on:input=move |ev| set_expiry_time.set(event_target_value(&ev)) />
            </label>
            <button class="btn btn-primary btn-sm" on:click=generate>"GENERATE CODE"</button>
        </div>

        <h3 class="font-bold mt-6">{move || format!("INVITATION CODES ({})", data.codes.with(Vec::len))}</h3>
        <Show
            when=move || data.codes.with(|c| !c.is_empty())
            fallback=|| view! { <p class="opacity-60">"No invitation codes generated yet"</p> }
        >
            <div class="space-y-1">
                <For
                    each=move || data.codes.get()
                    key=|c| (c.code.clone(), c.used)
                    children=move |c| {
                        let code = c.code.clone();
                        view! {
                            <div class="flex items-center gap-3 bg-base-200 rounded p-2">
                                <code class="font-mono">{c.code.clone()}</code>
                                <span class=if c.used { "badge badge-ghost" } else { "badge badge-success" }>
                                    {if c.used { "USED" } else { "ACTIVE" }}
                                </span>
                                <span class="text-sm opacity-70">{format!("Expires: {}", c.expires_at.format_date_time())}</span>
                                <button class="btn btn-ghost btn-xs ml-auto" on:click=move |_| delete(code.clone())>"Delete"</button>
                            </div>
                        }
                    }
                />
            </div>
        </Show>
    }
}

#[component]
fn UsersTab(
    data: PanelData,
    admin_uid: u64,
    notify: WriteSignal<Notice>,
    reload: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let (ban_target, set_ban_target) = signal(Option::<Identity>::None);
    let (ban_reason, set_ban_reason) = signal(String::new());
    let (rank_target, set_rank_target) = signal(Option::<Identity>::None);
    let (new_rank, set_new_rank) = signal(Role::Member);

    let confirm_ban = move |_: MouseEvent| {
        let Some(target) = ban_target.get_untracked() else {
            return;
        };
        let reason = ban_reason.get_untracked();
        let reason = match validation::ban_reason(&reason) {
            Ok(r) => r.to_string(),
            Err(e) => {
                notify.set(Some((e.to_string(), true)));
                return;
            }
        };
        let api = auth.api();
        spawn_local(async move {
            let result = api.ban_user(target.uid, &reason, admin_uid).await.map_err(|e| e.to_string());
            let ok = result.is_ok();
            report_notice(notify, "User banned successfully!", "Failed to ban user", result);
            if ok {
                tracing::info!(uid = target.uid, by = admin_uid, "user banned");
                set_ban_target.set(None);
                set_ban_reason.set(String::new());
                reload.run(());
            }
        });
    };

    let unban = move |uid: u64| {
        let api = auth.api();
        spawn_local(async move {
            let result = api.unban_user(uid).await.map_err(|e| e.to_string());
            let ok = result.is_ok();
            report_notice(notify, "User unbanned successfully!", "Failed to unban user", result);
            if ok {
                reload.run(());
            }
        });
    };

    let confirm_rank = move |_: MouseEvent| {
        let Some(target) = rank_target.get_untracked() else {
            return;
        };
        let rank = new_rank.get_untracked();
        let api = auth.api();
        spawn_local(async move {
            let result = api.change_rank(target.uid, rank).await.map_err(|e| e.to_string());
            let ok = result.is_ok();
            report_notice(notify, "User rank changed successfully!", "Failed to change rank", result);
            if ok {
                tracing::info!(uid = target.uid, %rank, "rank changed");
                set_rank_target.set(None);
                reload.run(());
            }
        });
    };

    view! {
        <h2 class="text-2xl font-bold">{move || format!("👥 Users ({})", data.users.with(Vec::len))}</h2>
        <table class="table table-sm">
            <thead><tr><th>"User"</th><th>"Email"</th><th>"Rank"</th><th>"Joined"</th><th>"Status"</th><th></th></tr></thead>
            <tbody>
                <For
                    each=move || data.users.get()
                    key=|u| (u.uid, u.banned, u.badge)
                    children=move |u| {
                        let uid = u.uid;
                        let banned = u.banned;
                        let for_ban = u.clone();
                        let for_rank = u.clone();
                        view! {
                            <tr>
                                <td>{u.username.clone()}</td>
                                <td>{u.email.clone()}</td>
                                <td><RoleBadge role=u.role() /></td>
                                <td>{u.join_date.format_date()}</td>
                                <td>{if banned { "Banned" } else { "Active" }}</td>
                                <td class="flex gap-1">
                                    <button class="btn btn-xs" on:click=move |_| {
                                        set_new_rank.set(for_rank.role());
                                        set_rank_target.set(Some(for_rank.clone()));
                                    }>"Rank"</button>
                                    {if banned {
                                        view! { <button class="btn btn-xs btn-success" on:click=move |_| unban(uid)>"Unban"</button> }.into_any()
                                    } else {
                                        view! {
                                            <button class="btn btn-xs btn-error" on:click=move |_| set_ban_target.set(Some(for_ban.clone()))>"Ban"</button>
                                        }.into_any()
                                    }}
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>

        {move || ban_target.get().map(|u| view! {
            <div class="modal modal-open" on:click=move |_| set_ban_target.set(None)>
                <div class="modal-box" on:click=|ev| ev.stop_propagation()>
                    <h2 class="text-xl font-bold">{format!("Ban User: {}", u.username)}</h2>
                    <textarea
                        class="textarea textarea-bordered w-full mt-4"
                        rows=3
                        placeholder="Reason for ban"
                        prop:value=ban_reason
                        on:input=move |ev| set_ban_reason.set(event_target_value(&ev))
                    ></textarea>
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| set_ban_target.set(None)>"Cancel"</button>
                        <button class="btn btn-error" on:click=confirm_ban>"Ban User"</button>
                    </div>
                </div>
            </div>
        })}

        {move || rank_target.get().map(|u| view! {
            <div class="modal modal-open" on:click=move |_| set_rank_target.set(None)>
                <div class="modal-box" on:click=|ev| ev.stop_propagation()>
                    <h2 class="text-xl font-bold">{format!("Change Rank: {}", u.username)}</h2>
                    <select
                        class="select select-bordered w-full mt-4"
                        on:change=move |ev| {
                            if let Ok(role) = event_target_value(&ev).parse::<Role>() {
                                set_new_rank.set(role);
                            }
                        }
                    >
                        {Role::ALL.into_iter().map(|r| view! {
                            <option value=r.as_str() selected=move || new_rank.get() == r>{r.as_str()}</option>
                        }).collect_view()}
                    </select>
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| set_rank_target.set(None)>"Cancel"</button>
                        <button class="btn btn-primary" on:click=confirm_rank>"Change Rank"</button>
                    </div>
                </div>
            </div>
        })}
    }
}

#[component]
fn ActivityTab(data: PanelData) -> impl IntoView {
    view! {
        <h2 class="text-2xl font-bold">"📈 Recent Activity"</h2>
        <h3 class="font-bold mt-2">"Recent User Registrations"</h3>
        <div class="space-y-2">
            {move || data.users.with(|u| admin::recent_members(u)).into_iter().map(|u| view! {
                <div class="flex items-center gap-3 bg-base-200 rounded p-2">
                    <span>"👤"</span>
                    <div>
                        <div><b>{u.username.clone()}</b>" joined the forum"</div>
                        <div class="text-xs opacity-60">{u.join_date.format_date_time()}</div>
                    </div>
                </div>
            }).collect_view()}
        </div>
    }
}

#[component]
fn BannedTab(data: PanelData, notify: WriteSignal<Notice>, reload: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let banned = Memo::new(move |_| data.users.with(|u| admin::banned_users(u)));

    let unban = move |uid: u64| {
        let api = auth.api();
        spawn_local(async move {
            let result = api.unban_user(uid).await.map_err(|e| e.to_string());
            let ok = result.is_ok();
            report_notice(notify, "User unbanned successfully!", "Failed to unban user", result);
            if ok {
                reload.run(());
            }
        });
    };

    view! {
        <h2 class="text-2xl font-bold">{move || format!("🚫 Banned Users ({})", banned.with(Vec::len))}</h2>
        {move || data.stats.get().filter(|s| !s.banned_by_country.is_empty()).map(|s| view! {
            <h3 class="font-bold mt-2">"Bans by Country"</h3>
            <div class="flex flex-wrap gap-2">
                {s.banned_by_country.into_iter().map(|(country, count)| view! {
                    <span class="badge badge-lg">{format!("{country}: {count}")}</span>
                }).collect_view()}
            </div>
        })}
        <h3 class="font-bold mt-4">"Banned Users"</h3>
        <Show
            when=move || banned.with(|b| !b.is_empty())
            fallback=|| view! { <p class="opacity-60">"No banned users"</p> }
        >
            <div class="space-y-2">
                <For
                    each=move || banned.get()
                    key=|u| u.uid
                    children=move |u| {
                        let uid = u.uid;
                        view! {
                            <div class="flex items-center gap-3 bg-base-200 rounded p-2">
                                <div class="flex-1">
                                    <b>{u.username.clone()}</b>
                                    <div class="text-sm">{format!("Reason: {}", u.ban_reason_or_default())}</div>
                                    <div class="text-xs opacity-60">
                                        {u.banned_at.as_ref().map(|t| format!("Banned: {}", t.format_date_time()))}
                                    </div>
                                </div>
                                <button class="btn btn-success btn-xs" on:click=move |_| unban(uid)>"Unban"</button>
                            </div>
                        }
                    }
                />
            </div>
        </Show>
    }
}

#[component]
fn ReportsTab(data: PanelData, notify: WriteSignal<Notice>, reload: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let split = Memo::new(move |_| data.reports.with(|r| admin::split_reports(r)));

    let decide = move |report_id: u64, decision: ReportDecision| {
        let api = auth.api();
        spawn_local(async move {
            let result = api
                .update_report(report_id, decision.status(), Some(decision.action()))
                .await
                .map_err(|e| e.to_string());
            let ok = result.is_ok();
            report_notice(notify, "Report updated successfully!", "Failed to update report", result);
            if ok {
                tracing::info!(report_id, status = decision.status(), "report reviewed");
                reload.run(());
            }
        });
    };

    let header = |r: &Report| {
        format!(
            "{} #{} • {}",
            format!("{:?}", r.target).to_uppercase(),
            r.target_id,
            r.created_at.format_date_time()
        )
    };

    view! {
        <h2 class="text-2xl font-bold">{move || format!("🚩 Reports ({})", data.reports.with(Vec::len))}</h2>
        <h3 class="font-bold mt-2">{move || format!("Pending Reports ({})", split.with(|(p, _)| p.len()))}</h3>
        <div class="space-y-2">
            {move || {
                let pending = split.with(|(p, _)| p.clone());
                if pending.is_empty() {
                    return view! { <p class="opacity-60">"No pending reports"</p> }.into_any();
                }
                pending.into_iter().map(|r| {
                    let id = r.id;
                    view! {
                        <div class="bg-base-200 rounded p-3 border-l-4 border-warning">
                            <div class="text-sm opacity-70">{header(&r)}</div>
                            <div><b>"Reason: "</b>{r.reason.clone()}</div>
                            {r.description.clone().map(|d| view! { <div><b>"Details: "</b>{d}</div> })}
                            <div class="flex gap-2 mt-2">
                                <button class="btn btn-error btn-xs" on:click=move |_| decide(id, ReportDecision::RemoveContent)>"Remove Content"</button>
                                <button class="btn btn-ghost btn-xs" on:click=move |_| decide(id, ReportDecision::Dismiss)>"Dismiss"</button>
                            </div>
                        </div>
                    }
                }).collect_view().into_any()
            }}
        </div>
        <h3 class="font-bold mt-4">{move || format!("Reviewed Reports ({})", split.with(|(_, r)| r.len()))}</h3>
        <div class="space-y-2">
            {move || split.with(|(_, reviewed)| reviewed.iter().take(REVIEWED_REPORTS_LIMIT).cloned().collect::<Vec<_>>())
                .into_iter()
                .map(|r| view! {
                    <div class="bg-base-200 rounded p-3 opacity-80">
                        <div class="text-sm opacity-70">{header(&r)}</div>
                        <div><b>"Reason: "</b>{r.reason.clone()}</div>
                        <div class="text-sm">
                            {format!("Status: {}", r.status)}
                            {r.action.clone().map(|a| format!(" • Action: {a}"))}
                        </div>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn EventsTab(data: PanelData, notify: WriteSignal<Notice>) -> impl IntoView {
    let auth = use_auth();
    let (amount, set_amount) = signal(InviteAmount::default());
    let (confirming, set_confirming) = signal(false);
    let (running, set_running) = signal(false);

    let execute = move |_: MouseEvent| {
        set_confirming.set(false);
        set_running.set(true);
        let amount = amount.get_untracked();
        let api = auth.api();
        spawn_local(async move {
            let users = match api.users().await {
                Ok(users) => users,
                Err(e) => {
                    tracing::warn!(error = %e, "invite wave aborted: user list unavailable");
                    notify.set(Some(("Failed to execute invite wave. Please try again.".to_string(), true)));
                    set_running.set(false);
                    return;
                }
            };
            let now = date::now();
            let report = run_invite_wave(&api, &users, amount, now).await;
            if report.granted > 0 {
                data.events.update(|events| admin::mark_executed(events, EventKind::InviteWave, now));
            }
            notify.set(Some((report.summary(amount), report.failed > 0)));
            data.users.set(users);
            set_running.set(false);
        });
    };

    view! {
        <h2 class="text-2xl font-bold">{move || format!("🎉 Events ({})", data.events.with(Vec::len))}</h2>
        <h3 class="font-bold mt-2">"Available Events"</h3>
        <For
            each=move || data.events.get()
            key=|e| (e.id, e.executed_at.clone())
            children=move |event| {
                let is_wave = event.kind == EventKind::InviteWave;
                view! {
                    <div class="bg-base-200 rounded p-4 space-y-2">
                        <div class="flex justify-between">
                            <b>{event.name.clone()}</b>
                            <span class=if event.is_active { "badge badge-success" } else { "badge" }>
                                {if event.is_active { "Active" } else { "Inactive" }}
                            </span>
                        </div>
                        <p class="text-sm opacity-80">{event.description.clone()}</p>
                        <Show when=move || is_wave>
                            <div class="flex items-center gap-2">
                                <span class="text-sm">"Invites per user:"</span>
                                <div class="join">
                                    <button class="btn btn-sm join-item" on:click=move |_| set_amount.update(|a| *a = a.decrement())>"−"</button>
                                    <span class="btn btn-sm join-item no-animation">{move || amount.get().get()}</span>
                                    <button class="btn btn-sm join-item" on:click=move |_| set_amount.update(|a| *a = a.increment())>"+"</button>
                                </div>
                                <button class="btn btn-primary btn-sm" disabled=running on:click=move |_| set_confirming.set(true)>
                                    {move || if running.get() { "Sending..." } else { "Execute" }}
                                </button>
                            </div>
                        </Show>
                    </div>
                }
            }
        />

        <h3 class="font-bold mt-4">"Event Impact"</h3>
        <div class="stats shadow">
            <div class="stat"><div class="stat-title">"Total Users"</div><div class="stat-value">{move || data.users.with(Vec::len)}</div></div>
            <div class="stat"><div class="stat-title">"Events Executed"</div><div class="stat-value">{move || data.events.with(|e| admin::execution_history(e).len())}</div></div>
            <div class="stat"><div class="stat-title">"Active Events"</div><div class="stat-value">{move || data.events.with(|e| e.iter().filter(|e| e.is_active).count())}</div></div>
        </div>

        <h3 class="font-bold mt-4">"Recent Event History"</h3>
        {move || {
            let history = data.events.with(|e| admin::execution_history(e));
            if history.is_empty() {
                return view! { <p class="opacity-60">"No events have been executed yet"</p> }.into_any();
            }
            history.into_iter().map(|e| view! {
                <div class="flex gap-2 items-center">
                    <span>"🎉"</span>
                    <b>{e.name.clone()}</b>" was executed"
                    <span class="text-xs opacity-60">{e.executed_at.as_ref().map(|t| t.format_date_time())}</span>
                </div>
            }).collect_view().into_any()
        }}

        <Show when=move || confirming.get()>
            <div class="modal modal-open">
                <div class="modal-box">
                    <p>
                        {move || format!(
                            "This will give ALL users {} invite(s) that expire in {} months. Continue?",
                            amount.get().get(),
                            admin::INVITE_VALIDITY_MONTHS
                        )}
                    </p>
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| set_confirming.set(false)>"Cancel"</button>
                        <button class="btn btn-primary" on:click=execute>"Continue"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
