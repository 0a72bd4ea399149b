//! Forum index: categories, thread lists, member sidebar and live chat.

use crate::auth::use_auth;
use crate::components::common::{Avatar, Navbar, RoleBadge};
use crate::components::live_chat::LiveChat;
use crate::poll::RequestSequence;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use desync_shared::{ForumCategory, ForumThread, Identity, Role, date};
use leptos::prelude::*;
use leptos::task::spawn_local;

const LATEST_THREADS_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub threads: usize,
    /// Opening posts plus replies.
    pub messages: u64,
}

pub fn threads_in(threads: &[ForumThread], category_id: u64) -> Vec<ForumThread> {
    threads
        .iter()
        .filter(|t| t.category_id == category_id)
        .cloned()
        .collect()
}

pub fn category_stats(threads: &[ForumThread], category_id: u64) -> CategoryStats {
    threads
        .iter()
        .filter(|t| t.category_id == category_id)
        .fold(CategoryStats::default(), |acc, t| CategoryStats {
            threads: acc.threads + 1,
            messages: acc.messages + t.replies + 1,
        })
}

/// Case-insensitive title search; an empty query keeps everything.
pub fn search_threads(threads: &[ForumThread], query: &str) -> Vec<ForumThread> {
    let query = query.trim().to_lowercase();
    threads
        .iter()
        .filter(|t| query.is_empty() || t.title.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

pub fn active_members(users: &[Identity]) -> Vec<Identity> {
    users.iter().filter(|u| !u.banned).cloned().collect()
}

/// Members shown under "staff online".
pub fn staff(users: &[Identity]) -> Vec<Identity> {
    users
        .iter()
        .filter(|u| u.role().is_staff())
        .cloned()
        .collect()
}

pub fn username_of(users: &[Identity], uid: u64) -> Option<String> {
    users
        .iter()
        .find(|u| u.uid == uid)
        .map(|u| u.username.clone())
}

#[component]
pub fn ForumPage(identity: Identity) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (categories, set_categories) = signal(Vec::<ForumCategory>::new());
    let (threads, set_threads) = signal(Vec::<ForumThread>::new());
    let (members, set_members) = signal(Vec::<Identity>::new());
    let (selected, set_selected) = signal(Option::<u64>::None);
    let (search, set_search) = signal(String::new());
    let (loading, set_loading) = signal(true);
    let sequence = StoredValue::new_local(RequestSequence::new());

    Effect::new(move |_| {
        let category = selected.get();
        let api = auth.api();
        let load = sequence.with_value(|seq| {
            seq.guarded(async move {
                futures::join!(api.categories(), api.threads(category), api.users())
            })
        });
        set_loading.set(true);
        spawn_local(async move {
            let Some((cats, list, users)) = load.await else {
                return;
            };
            match cats {
                Ok(cats) => set_categories.set(cats),
                Err(e) => tracing::warn!(error = %e, "failed to load categories"),
            }
            match list {
                Ok(list) => set_threads.set(list),
                Err(e) => tracing::warn!(error = %e, "failed to load threads"),
            }
            match users {
                Ok(users) => set_members.set(active_members(&users)),
                Err(e) => tracing::warn!(error = %e, "failed to load members"),
            }
            set_loading.set(false);
        });
    });

    let section_title = move || {
        selected
            .get()
            .and_then(|id| categories.with(|c| c.iter().find(|c| c.id == id).map(|c| c.name.to_uppercase())))
            .unwrap_or_else(|| "PUBLIC".to_string())
    };
    let toggle_category = move |id: u64| {
        set_selected.update(|current| {
            *current = if *current == Some(id) { None } else { Some(id) };
        });
    };
    let open_thread = move |id: u64| router.navigate_to_route(AppRoute::Thread(id));

    let category_list = move || {
        let now = date::now();
        let list = threads.get();
        let users = members.get();
        categories
            .get()
            .into_iter()
            .map(|category| {
                let id = category.id;
                let stats = category_stats(&list, id);
                let latest = threads_in(&list, id).into_iter().next();
                let latest_view = match latest {
                    Some(thread) => {
                        let thread_id = thread.id;
                        let by = thread.last_reply_by.unwrap_or(thread.author_uid);
                        let author = username_of(&users, by).unwrap_or_default();
                        let when = thread
                            .last_reply_at
                            .as_ref()
                            .unwrap_or(&thread.created_at)
                            .format_relative(now);
                        view! {
                            <div class="text-sm">
                                <a class="link link-hover font-semibold" on:click=move |ev| {
                                    ev.stop_propagation();
                                    open_thread(thread_id);
                                }>{thread.title.clone()}</a>
                                <div class="opacity-60">{format!("{when} • {author}")}</div>
                            </div>
                        }
                        .into_any()
                    }
                    None => view! { <div class="text-sm opacity-60">"No threads yet"</div> }.into_any(),
                };
                view! {
                    <div class="card bg-base-100 shadow cursor-pointer hover:bg-base-300" on:click=move |_| toggle_category(id)>
                        <div class="card-body flex-row items-center gap-4 p-4">
                            <div class="text-2xl">{category.icon.clone()}</div>
                            <div class="flex-1">
                                <h3 class="font-bold">{category.name.clone()}</h3>
                                <p class="text-sm opacity-70">{category.description.clone()}</p>
                            </div>
                            <div class="text-center text-sm">
                                <div class="opacity-60">"Threads"</div>
                                <div class="font-bold">{stats.threads}</div>
                            </div>
                            <div class="text-center text-sm">
                                <div class="opacity-60">"Messages"</div>
                                <div class="font-bold">{stats.messages}</div>
                            </div>
                            <div class="w-48">{latest_view}</div>
                        </div>
                    </div>
                }
            })
            .collect_view()
    };

    let thread_list = move || {
        let now = date::now();
        let users = members.get();
        let found = threads.with(|list| search_threads(list, &search.get()));
        if found.is_empty() {
            return view! { <div class="text-center opacity-60 py-8">"No threads found"</div> }.into_any();
        }
        found
            .into_iter()
            .map(|thread| {
                let id = thread.id;
                let pinned = thread.pinned;
                let author_uid = thread.author_uid;
                let author = thread
                    .author_username
                    .clone()
                    .or_else(|| username_of(&users, author_uid))
                    .unwrap_or_default();
                view! {
                    <div class="card bg-base-100 shadow cursor-pointer hover:bg-base-300" on:click=move |_| open_thread(id)>
                        <div class="card-body flex-row items-center gap-4 p-4">
                            <Show when=move || pinned>
                                <span>"📌"</span>
                            </Show>
                            <Avatar username=author.clone() />
                            <div class="flex-1">
                                <h4 class="font-semibold">{thread.title.clone()}</h4>
                                <div class="text-sm opacity-70">
                                    "Started by "
                                    <a class="link link-hover" on:click=move |ev| {
                                        ev.stop_propagation();
                                        router.navigate_to_route(AppRoute::Profile(author_uid));
                                    }>{author.clone()}</a>
                                    {format!(" • {}", thread.created_at.format_relative(now))}
                                </div>
                            </div>
                            <div class="text-sm">{format!("💬 {}", thread.replies)}</div>
                            <div class="text-sm">{format!("👁 {}", thread.views)}</div>
                        </div>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4">
            <Navbar identity=identity.clone() active=AppRoute::Forum />

            <div class="grid lg:grid-cols-4 gap-6">
                <div class="lg:col-span-3 space-y-4">
                    <LiveChat />

                    <div class="flex flex-wrap justify-between items-center gap-2">
                        <h2 class="text-2xl font-bold">{section_title}</h2>
                        <div class="flex gap-2">
                            <input
                                class="input input-bordered input-sm"
                                placeholder="Search threads..."
                                prop:value=search
                                on:input=move |ev| set_search.set(event_target_value(&ev))
                            />
                            <Link to="/create-thread" class="btn btn-primary btn-sm">"+ CREATE THREAD"</Link>
                        </div>
                    </div>
                    <Show when=move || selected.with(Option::is_some)>
                        <button class="btn btn-ghost btn-sm" on:click=move |_| set_selected.set(None)>
                            "← Back to All Categories"
                        </button>
                    </Show>

                    <Show
                        when=move || !loading.get()
                        fallback=|| view! { <span class="loading loading-spinner loading-lg"></span> }
                    >
                        <div class="space-y-2">
                            {move || if selected.with(Option::is_none) {
                                category_list().into_any()
                            } else {
                                thread_list()
                            }}
                        </div>
                    </Show>
                </div>

                <div class="space-y-4">
                    <div class="card bg-base-100 shadow">
                        <div class="card-body p-4">
                            <h3 class="font-bold">"STAFF ONLINE"</h3>
                            {move || members.with(|m| staff(m)).into_iter().map(|u| view! {
                                <div class="flex items-center gap-2">
                                    <span class="text-success">"●"</span>
                                    <span>{u.username.clone()}</span>
                                    <RoleBadge role=u.role() />
                                </div>
                            }).collect_view()}
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow">
                        <div class="card-body p-4">
                            <h3 class="font-bold">"MEMBERS ONLINE"</h3>
                            <div class="flex flex-wrap gap-1 text-sm">
                                {move || members.get().into_iter().map(|u| view! {
                                    <span class="badge badge-ghost">{u.username}</span>
                                }).collect_view()}
                            </div>
                            <div class="text-xs opacity-70">
                                {move || members.with(|m| {
                                    let plain = m.iter().filter(|u| u.role() == Role::Member).count();
                                    format!("Total: {} (members: {plain}, guests: 0)", m.len())
                                })}
                            </div>
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow">
                        <div class="card-body p-4">
                            <h3 class="font-bold">"LATEST THREADS"</h3>
                            {move || {
                                let list = threads.get();
                                if list.is_empty() {
                                    return view! { <div class="text-sm opacity-60">"No threads yet"</div> }.into_any();
                                }
                                let now = date::now();
                                list.into_iter().take(LATEST_THREADS_LIMIT).map(|t| {
                                    let id = t.id;
                                    view! {
                                        <div class="text-sm">
                                            <a class="link link-hover" on:click=move |_| open_thread(id)>{t.title.clone()}</a>
                                            <div class="opacity-60">{t.created_at.format_relative(now)}</div>
                                        </div>
                                    }
                                }).collect_view().into_any()
                            }}
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desync_shared::Timestamp;

    fn thread(id: u64, category_id: u64, title: &str, replies: u64) -> ForumThread {
        ForumThread {
            id,
            category_id,
            title: title.to_string(),
            content: String::new(),
            author_uid: 1,
            author_username: None,
            author_badge: None,
            created_at: Timestamp::default(),
            last_reply_at: None,
            last_reply_by: None,
            replies,
            views: 0,
            pinned: false,
            locked: false,
        }
    }

    fn member(uid: u64, badge: Role, banned: bool) -> Identity {
        serde_json::from_value(serde_json::json!({
            "uid": uid,
            "email": format!("u{uid}@gmail.com"),
            "username": format!("u{uid}"),
            "badge": badge.as_str(),
            "banned": banned,
        }))
        .unwrap()
    }

    #[test]
    fn test_category_stats_count_opening_posts() {
        let list = vec![thread(1, 1, "a", 3), thread(2, 1, "b", 0), thread(3, 2, "c", 9)];
        assert_eq!(
            category_stats(&list, 1),
            CategoryStats {
                threads: 2,
                messages: 5
            }
        );
        assert_eq!(category_stats(&list, 7), CategoryStats::default());
        assert_eq!(threads_in(&list, 2).len(), 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let list = vec![thread(1, 1, "Best Configs", 0), thread(2, 1, "Bug report", 0)];
        assert_eq!(search_threads(&list, "configs").len(), 1);
        assert_eq!(search_threads(&list, "  ").len(), 2);
        assert!(search_threads(&list, "zzz").is_empty());
    }

    #[test]
    fn test_staff_and_members() {
        let users = vec![
            member(1, Role::Owner, false),
            member(2, Role::Admin, false),
            member(3, Role::Moderator, false),
            member(4, Role::Member, true),
        ];
        let active = active_members(&users);
        assert_eq!(active.len(), 3);
        let staff_ids: Vec<u64> = staff(&active).iter().map(|u| u.uid).collect();
        assert_eq!(staff_ids, vec![1, 2]);
        assert_eq!(username_of(&users, 3).as_deref(), Some("u3"));
        assert_eq!(username_of(&users, 99), None);
    }
}
