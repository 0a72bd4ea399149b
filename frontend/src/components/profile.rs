//! Member profile. Own profile adds the inbox and notifications.

use crate::auth::use_auth;
use crate::components::common::{Avatar, Navbar, RoleBadge, Toast, use_notice};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use desync_shared::{Identity, Notification, PrivateMessage};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileTab {
    Overview,
    About,
    Messages,
    Notifications,
}

impl ProfileTab {
    pub fn label(self) -> &'static str {
        match self {
            ProfileTab::Overview => "Profile posts",
            ProfileTab::About => "About",
            ProfileTab::Messages => "Messages",
            ProfileTab::Notifications => "Notifications",
        }
    }

    /// Tabs available to the viewer; inbox tabs only on one's own profile.
    pub fn visible(own_profile: bool) -> &'static [ProfileTab] {
        if own_profile {
            &[
                ProfileTab::Overview,
                ProfileTab::About,
                ProfileTab::Messages,
                ProfileTab::Notifications,
            ]
        } else {
            &[ProfileTab::Overview, ProfileTab::About]
        }
    }
}

pub fn unread<T>(items: &[T], is_read: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|i| !is_read(i)).count()
}

#[component]
pub fn ProfilePage(identity: Identity, uid: u64) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (notice, set_notice) = use_notice();
    let own_profile = identity.uid == uid;
    let viewer_uid = identity.uid;

    let (member, set_member) = signal(own_profile.then(|| identity.clone()));
    let (missing, set_missing) = signal(false);
    let (tab, set_tab) = signal(ProfileTab::Overview);
    let (messages, set_messages) = signal(Vec::<PrivateMessage>::new());
    let (notifications, set_notifications) = signal(Vec::<Notification>::new());

    let (subject, set_subject) = signal(String::new());
    let (body, set_body) = signal(String::new());
    let (sending, set_sending) = signal(false);

    if !own_profile {
        let api = auth.api();
        spawn_local(async move {
            match api.user(uid).await {
                Ok(Some(user)) => set_member.set(Some(user)),
                Ok(None) => set_missing.set(true),
                Err(e) => {
                    tracing::warn!(uid, error = %e, "failed to load profile");
                    set_missing.set(true);
                }
            }
        });
    } else {
        let api = auth.api();
        spawn_local(async move {
            let (inbox, alerts) = futures::join!(api.messages(), api.notifications());
            match inbox {
                Ok(list) => set_messages.set(list),
                Err(e) => tracing::warn!(error = %e, "failed to load messages"),
            }
            match alerts {
                Ok(list) => set_notifications.set(list),
                Err(e) => tracing::warn!(error = %e, "failed to load notifications"),
            }
        });
    }

    let mark_message = move |id: u64| {
        let api = auth.api();
        spawn_local(async move {
            match api.mark_message_read(id).await {
                Ok(()) => set_messages.update(|list| {
                    if let Some(m) = list.iter_mut().find(|m| m.id == id) {
                        m.read = true;
                    }
                }),
                Err(e) => set_notice.set(Some((e.user_message(), true))),
            }
        });
    };
    let mark_notification = move |id: u64| {
        let api = auth.api();
        spawn_local(async move {
            match api.mark_notification_read(id).await {
                Ok(()) => set_notifications.update(|list| {
                    if let Some(n) = list.iter_mut().find(|n| n.id == id) {
                        n.read = true;
                    }
                }),
                Err(e) => set_notice.set(Some((e.user_message(), true))),
            }
        });
    };

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let subject = subject.get_untracked();
        let content = body.get_untracked();
        if subject.trim().is_empty() || content.trim().is_empty() {
            set_notice.set(Some(("Please fill in all required fields".to_string(), true)));
            return;
        }
        set_sending.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.send_message(uid, subject.trim(), content.trim()).await {
                Ok(()) => {
                    tracing::info!(from = viewer_uid, to = uid, "message sent");
                    set_subject.set(String::new());
                    set_body.set(String::new());
                    set_notice.set(Some(("Message sent".to_string(), false)));
                }
                Err(e) => set_notice.set(Some((e.user_message(), true))),
            }
            set_sending.set(false);
        });
    };

    let tab_body = move |member: Identity| match tab.get() {
        ProfileTab::Overview => view! {
            <div class="stats shadow w-full">
                <div class="stat"><div class="stat-title">"Messages"</div><div class="stat-value">{member.messages}</div></div>
                <div class="stat"><div class="stat-title">"Reaction score"</div><div class="stat-value">{member.reaction_score}</div></div>
                <div class="stat"><div class="stat-title">"Points"</div><div class="stat-value">{member.points}</div></div>
            </div>
            <p class="opacity-60 text-center py-8">
                {format!("There are no messages on {}'s profile yet.", member.username)}
            </p>
        }
        .into_any(),
        ProfileTab::About => view! {
            <div class="space-y-2">
                <h3 class="font-bold">{format!("About {}", member.username)}</h3>
                <div class="flex justify-between"><span class="opacity-70">"Joined"</span><span>{member.join_date.format_date()}</span></div>
                <div class="flex justify-between"><span class="opacity-70">"Last seen"</span><span>{member.last_seen.format_date_time()}</span></div>
                <div class="flex justify-between"><span class="opacity-70">"Badge"</span><RoleBadge role=member.role() /></div>
                {member.about_me.clone().filter(|a| !a.trim().is_empty()).map(|about| view! {
                    <h4 class="font-semibold mt-4">"About Me"</h4>
                    <p class="whitespace-pre-wrap">{about}</p>
                })}
            </div>
        }
        .into_any(),
        ProfileTab::Messages => view! {
            <div class="space-y-2">
                <Show when=move || messages.with(Vec::is_empty)>
                    <p class="opacity-60">"No messages yet"</p>
                </Show>
                <For
                    each=move || messages.get()
                    key=|m| (m.id, m.read)
                    children=move |m| {
                        let id = m.id;
                        let read = m.read;
                        view! {
                            <div class=if read { "card bg-base-200" } else { "card bg-base-300 border-l-4 border-primary" }>
                                <div class="card-body p-3">
                                    <div class="flex justify-between">
                                        <b>{m.subject.clone()}</b>
                                        <span class="text-xs opacity-60">{m.created_at.format_date_time()}</span>
                                    </div>
                                    <p class="text-sm">{m.content.clone()}</p>
                                    <Show when=move || !read>
                                        <button class="btn btn-xs self-end" on:click=move |_| mark_message(id)>"Mark as read"</button>
                                    </Show>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        }
        .into_any(),
        ProfileTab::Notifications => view! {
            <div class="space-y-2">
                <Show when=move || notifications.with(Vec::is_empty)>
                    <p class="opacity-60">"No notifications"</p>
                </Show>
                <For
                    each=move || notifications.get()
                    key=|n| (n.id, n.read)
                    children=move |n| {
                        let id = n.id;
                        let read = n.read;
                        view! {
                            <div class="flex justify-between items-center bg-base-200 rounded p-2">
                                <span class=if read { "opacity-60" } else { "font-semibold" }>{n.message.clone()}</span>
                                <Show when=move || !read>
                                    <button class="btn btn-xs" on:click=move |_| mark_notification(id)>"Mark as read"</button>
                                </Show>
                            </div>
                        }
                    }
                />
            </div>
        }
        .into_any(),
    };

    let tab_label = move |t: ProfileTab| match t {
        ProfileTab::Messages => {
            let count = messages.with(|m| unread(m, |m| m.read));
            if count > 0 { format!("{} ({count})", t.label()) } else { t.label().to_string() }
        }
        ProfileTab::Notifications => {
            let count = notifications.with(|n| unread(n, |n| n.read));
            if count > 0 { format!("{} ({count})", t.label()) } else { t.label().to_string() }
        }
        _ => t.label().to_string(),
    };

    let page = move || {
        if missing.get() {
            return view! {
                <div class="text-center py-16 space-y-4">
                    <p class="text-2xl">"User not found"</p>
                    <button class="btn btn-primary" on:click=move |_| router.navigate_to_route(AppRoute::Forum)>"Back to Forum"</button>
                </div>
            }
            .into_any();
        }
        let Some(member) = member.get() else {
            return view! { <span class="loading loading-spinner loading-lg"></span> }.into_any();
        };
        view! {
            <div class="card bg-base-100 shadow mb-4">
                <div class="card-body flex-row items-center gap-4">
                    <Avatar username=member.username.clone() />
                    <div>
                        <h1 class="text-3xl font-bold">{member.username.clone()}</h1>
                        <RoleBadge role=member.role() />
                        <div class="text-sm opacity-70">{format!("Joined: {}", member.join_date.format_date())}</div>
                    </div>
                    <Show when=move || own_profile>
                        <button class="btn btn-outline btn-sm ml-auto" on:click=move |_| router.navigate_to_route(AppRoute::Settings)>
                            "Edit profile"
                        </button>
                    </Show>
                </div>
            </div>

            <div class="tabs tabs-boxed mb-4">
                {ProfileTab::visible(own_profile)
                    .iter()
                    .map(|&t| view! {
                        <a class=move || if tab.get() == t { "tab tab-active" } else { "tab" } on:click=move |_| set_tab.set(t)>
                            {move || tab_label(t)}
                        </a>
                    })
                    .collect_view()}
            </div>

            <div class="grid lg:grid-cols-3 gap-4">
                <div class="lg:col-span-2 card bg-base-100 shadow">
                    <div class="card-body">{
                        let member = member.clone();
                        move || tab_body(member.clone())
                    }</div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="font-bold">"About"</h3>
                        <div class="flex justify-between"><span class="opacity-70">"User ID"</span><span>{format!("#{}", member.uid)}</span></div>
                        <div class="flex justify-between"><span class="opacity-70">"Last seen"</span><span>{member.last_seen.format_date_time()}</span></div>
                        <Show when=move || !own_profile>
                            <form class="space-y-2 mt-4" on:submit=on_send>
                                <h3 class="font-bold">"Send a message"</h3>
                                <input
                                    class="input input-bordered input-sm w-full"
                                    placeholder="Subject"
                                    prop:value=subject
                                    on:input=move |ev| set_subject.set(event_target_value(&ev))
                                />
                                <textarea
                                    class="textarea textarea-bordered w-full"
                                    rows=4
                                    placeholder="Message"
                                    prop:value=body
                                    on:input=move |ev| set_body.set(event_target_value(&ev))
                                ></textarea>
                                <button type="submit" class="btn btn-primary btn-sm" disabled=sending>"Send"</button>
                            </form>
                        </Show>
                    </div>
                </div>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4">
            <Navbar identity=identity active=AppRoute::Profile(uid) />
            <Toast notice=notice />
            <div class="max-w-5xl mx-auto">{page}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbox_tabs_only_on_own_profile() {
        assert!(ProfileTab::visible(true).contains(&ProfileTab::Messages));
        assert!(!ProfileTab::visible(false).contains(&ProfileTab::Messages));
        assert!(!ProfileTab::visible(false).contains(&ProfileTab::Notifications));
    }

    #[test]
    fn test_unread_count() {
        let flags = [true, false, false];
        assert_eq!(unread(&flags, |read| *read), 2);
        assert_eq!(unread::<bool>(&[], |read| *read), 0);
    }
}
