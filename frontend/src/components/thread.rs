//! Thread view with replies, reactions and reporting.

use crate::auth::use_auth;
use crate::components::common::{Avatar, Navbar, Notice, RoleBadge, Toast, use_notice};
use crate::reactions::{REACTION_EMOJIS, ReactionBoard};
use crate::validation;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use desync_shared::{ForumPost, ForumThread, Identity, ReportTarget};
use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{BTreeMap, BTreeSet};

pub const REPORT_REASONS: [&str; 6] = [
    "Spam or unwanted content",
    "Harassment or bullying",
    "Inappropriate content",
    "Misinformation",
    "Copyright violation",
    "Other",
];

/// Everything the thread view renders, fetched in one go.
#[derive(Debug, Clone, Default)]
struct ThreadData {
    thread: Option<ForumThread>,
    posts: Vec<ForumPost>,
    category: Option<String>,
    authors: BTreeMap<u64, Identity>,
}

/// Distinct author uids of the thread and its posts, opener first.
pub fn author_ids(thread: Option<&ForumThread>, posts: &[ForumPost]) -> Vec<u64> {
    let mut seen = BTreeSet::new();
    thread
        .map(|t| t.author_uid)
        .into_iter()
        .chain(posts.iter().map(|p| p.author_uid))
        .filter(|uid| seen.insert(*uid))
        .collect()
}

#[component]
pub fn ThreadPage(identity: Identity, thread_id: u64) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let (notice, set_notice) = use_notice();

    let (data, set_data) = signal(ThreadData::default());
    let (loaded, set_loaded) = signal(false);
    let (board, set_board) = signal(ReactionBoard::new());
    let (reply, set_reply) = signal(String::new());
    let (reply_error, set_reply_error) = signal(Option::<String>::None);
    let (posting, set_posting) = signal(false);
    let (report, set_report) = signal(Option::<(ReportTarget, u64)>::None);

    let load = move || {
        let api = auth.api();
        spawn_local(async move {
            let (thread, posts) = futures::join!(api.thread(thread_id), api.posts(thread_id));
            let thread = thread.unwrap_or_else(|e| {
                tracing::warn!(thread_id, error = %e, "failed to load thread");
                None
            });
            let posts = posts.unwrap_or_else(|e| {
                tracing::warn!(thread_id, error = %e, "failed to load posts");
                Vec::new()
            });

            let reactions = join_all(posts.iter().map(|p| {
                let api = api.clone();
                let id = p.id;
                async move { (id, api.reactions(id).await) }
            }))
            .await;
            set_board.update(|b| {
                for (id, result) in &reactions {
                    match result {
                        Ok(map) => b.load(*id, map),
                        Err(e) => tracing::warn!(post_id = id, error = %e, "failed to load reactions"),
                    }
                }
            });

            let uids = author_ids(thread.as_ref(), &posts);
            let authors = join_all(uids.into_iter().map(|uid| {
                let api = api.clone();
                async move { api.user(uid).await }
            }))
            .await
            .into_iter()
            .filter_map(|r| r.ok().flatten())
            .map(|u| (u.uid, u))
            .collect();

            let category = match &thread {
                Some(t) => api.categories().await.ok().and_then(|cats| {
                    cats.into_iter()
                        .find(|c| c.id == t.category_id)
                        .map(|c| c.name)
                }),
                None => None,
            };

            set_data.set(ThreadData {
                thread,
                posts,
                category,
                authors,
            });
            set_loaded.set(true);
        });
    };
    load();

    let react = move |post_id: u64, emoji: &'static str| {
        if board.with_untracked(|b| b.is_pending(post_id)) {
            return;
        }
        set_board.update(|b| b.begin(post_id, emoji));
        let api = auth.api();
        spawn_local(async move {
            match api.add_reaction(post_id, emoji).await {
                Ok(map) => set_board.update(|b| b.reconcile(post_id, &map)),
                Err(e) => {
                    tracing::warn!(post_id, emoji, error = %e, "reaction rejected");
                    set_board.update(|b| b.rollback(post_id));
                    set_notice.set(Some((e.user_message(), true)));
                }
            }
        });
    };

    let on_reply = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let content = reply.get_untracked();
        if let Err(e) = validation::reply(&content) {
            set_reply_error.set(Some(e.to_string()));
            return;
        }
        set_reply_error.set(None);
        set_posting.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.create_post(thread_id, &content).await {
                Ok(_) => {
                    set_reply.set(String::new());
                    load();
                }
                Err(e) => {
                    tracing::warn!(thread_id, error = %e, "reply failed");
                    set_reply_error.set(Some(e.user_message()));
                }
            }
            set_posting.set(false);
        });
    };

    let author_stats = move |uid: u64| {
        data.with(|d| d.authors.get(&uid).cloned()).map(|a| {
            view! {
                <div class="text-xs opacity-70 space-y-1 mt-2">
                    <div>{format!("Messages: {}", a.messages)}</div>
                    <div>{format!("Reactions: {}", a.reaction_score)}</div>
                    <div>{format!("Points: {}", a.points)}</div>
                </div>
            }
        })
    };

    let body = move || {
        if !loaded.get() {
            return view! { <span class="loading loading-spinner loading-lg"></span> }.into_any();
        }
        let ThreadData {
            thread,
            posts,
            category,
            ..
        } = data.get();
        let Some(thread) = thread else {
            return view! {
                <div class="text-center space-y-4 py-16">
                    <div class="text-2xl">"Thread not found"</div>
                    <Link to="/forum" class="btn btn-primary">"Back to Forum"</Link>
                </div>
            }
            .into_any();
        };

        let opener_uid = thread.author_uid;
        let opener_name = thread
            .author_username
            .clone()
            .or_else(|| data.with_untracked(|d| d.authors.get(&opener_uid).map(|a| a.username.clone())))
            .unwrap_or_default();
        let opener_role = thread.author_badge.unwrap_or_default();
        let opener_id = thread.id;

        view! {
            <div class="breadcrumbs text-sm">
                <ul>
                    <li><Link to="/forum">"Forums"</Link></li>
                    <li>{category.unwrap_or_default()}</li>
                    <li>{thread.title.clone()}</li>
                </ul>
            </div>
            <div class="flex justify-between items-end mb-4">
                <h1 class="text-3xl font-bold">{thread.title.clone()}</h1>
                <div class="text-sm opacity-70">
                    {format!("👁 {} views  💬 {} replies", thread.views, thread.replies)}
                </div>
            </div>

            <div class="card bg-base-100 shadow mb-4">
                <div class="card-body flex-row gap-6">
                    <div class="w-40 flex flex-col items-center text-center">
                        <Avatar username=opener_name.clone() />
                        <a class="link link-hover font-bold" on:click=move |_| router.navigate_to_route(AppRoute::Profile(opener_uid))>
                            {opener_name.clone()}
                        </a>
                        <RoleBadge role=opener_role />
                        {author_stats(opener_uid)}
                    </div>
                    <div class="flex-1">
                        <div class="flex justify-between text-sm opacity-70">
                            <span>"#1 (Original Post)"</span>
                            <span>{thread.created_at.format_date_time()}</span>
                        </div>
                        <p class="whitespace-pre-wrap my-4">{thread.content.clone()}</p>
                        <div class="flex justify-end">
                            <button class="btn btn-ghost btn-xs" on:click=move |_| set_report.set(Some((ReportTarget::Thread, opener_id)))>
                                "🚩 Report"
                            </button>
                        </div>
                    </div>
                </div>
            </div>

            {posts
                .into_iter()
                .enumerate()
                .map(|(index, post)| {
                    let post_id = post.id;
                    let author_uid = post.author_uid;
                    view! {
                        <div class="card bg-base-100 shadow mb-4">
                            <div class="card-body flex-row gap-6">
                                <div class="w-40 flex flex-col items-center text-center">
                                    <Avatar username=post.author_username.clone() />
                                    <a class="link link-hover font-bold" on:click=move |_| router.navigate_to_route(AppRoute::Profile(author_uid))>
                                        {post.author_username.clone()}
                                    </a>
                                    <RoleBadge role=post.author_badge />
                                    {author_stats(author_uid)}
                                </div>
                                <div class="flex-1">
                                    <div class="flex justify-between text-sm opacity-70">
                                        <span>{format!("#{}", index + 2)}</span>
                                        <span>
                                            {post.created_at.format_date_time()}
                                            {post.edited.then_some(" (edited)")}
                                        </span>
                                    </div>
                                    <p class="whitespace-pre-wrap my-4">{post.content.clone()}</p>
                                    <div class="flex justify-between">
                                        <div class="join">
                                            {REACTION_EMOJIS
                                                .into_iter()
                                                .map(|emoji| view! {
                                                    <button
                                                        class="btn btn-ghost btn-xs join-item"
                                                        disabled=move || board.with(|b| b.is_pending(post_id))
                                                        on:click=move |_| react(post_id, emoji)
                                                    >
                                                        {emoji} " " {move || board.with(|b| b.count(post_id, emoji))}
                                                    </button>
                                                })
                                                .collect_view()}
                                        </div>
                                        <button class="btn btn-ghost btn-xs" on:click=move |_| set_report.set(Some((ReportTarget::Post, post_id)))>
                                            "🚩 Report"
                                        </button>
                                    </div>
                                </div>
                            </div>
                        </div>
                    }
                })
                .collect_view()}

            <div class="card bg-base-100 shadow">
                <form class="card-body" on:submit=on_reply>
                    <h3 class="card-title">"POST REPLY"</h3>
                    <Show when=move || reply_error.with(Option::is_some)>
                        <div class="alert alert-error text-sm py-2">{move || reply_error.get().unwrap_or_default()}</div>
                    </Show>
                    <textarea
                        class="textarea textarea-bordered"
                        rows=6
                        placeholder="Write your reply here..."
                        prop:value=reply
                        on:input=move |ev| set_reply.set(event_target_value(&ev))
                    ></textarea>
                    <div class="flex gap-2">
                        <button type="submit" class="btn btn-primary" disabled=posting>
                            {move || if posting.get() { "POSTING..." } else { "POST REPLY" }}
                        </button>
                        <button type="button" class="btn btn-secondary" on:click=move |_| router.navigate_to_route(AppRoute::Forum)>
                            "CANCEL"
                        </button>
                    </div>
                </form>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4">
            <Navbar identity=identity active=AppRoute::Forum />
            <Toast notice=notice />
            <div class="max-w-5xl mx-auto">{body}</div>
            {move || report.get().map(|(target, id)| view! {
                <ReportModal
                    target=target
                    target_id=id
                    on_close=Callback::new(move |_| set_report.set(None))
                    notify=set_notice
                />
            })}
        </div>
    }
}

#[component]
fn ReportModal(
    target: ReportTarget,
    target_id: u64,
    on_close: Callback<()>,
    notify: WriteSignal<Notice>,
) -> impl IntoView {
    let auth = use_auth();
    let (reason, set_reason) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let reason = reason.get_untracked();
        let description = description.get_untracked();
        if let Err(e) = validation::report(&reason, &description) {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_submitting.set(true);
        let api = auth.api();
        spawn_local(async move {
            let details = Some(description.trim()).filter(|d| !d.is_empty());
            match api.create_report(target, target_id, &reason, details).await {
                Ok(()) => {
                    tracing::info!(?target, target_id, "report submitted");
                    notify.set(Some(("Report submitted successfully!".to_string(), false)));
                    on_close.run(());
                }
                Err(e) => {
                    tracing::warn!(?target, target_id, error = %e, "report failed");
                    set_error.set(Some("Failed to submit report. Please try again.".to_string()));
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal modal-open" on:click=move |_| on_close.run(())>
            <div class="modal-box" on:click=|ev| ev.stop_propagation()>
                <h2 class="text-xl font-bold mb-4">
                    {match target {
                        ReportTarget::Thread => "Report Thread",
                        ReportTarget::Post => "Report Post",
                        ReportTarget::User => "Report User",
                    }}
                </h2>
                <form class="space-y-3" on:submit=on_submit>
                    <Show when=move || error.with(Option::is_some)>
                        <div class="alert alert-error text-sm py-2">{move || error.get().unwrap_or_default()}</div>
                    </Show>
                    <select
                        class="select select-bordered w-full"
                        on:change=move |ev| set_reason.set(event_target_value(&ev))
                    >
                        <option value="" selected>"Select a reason..."</option>
                        {REPORT_REASONS.into_iter().map(|r| view! { <option value=r>{r}</option> }).collect_view()}
                    </select>
                    <textarea
                        class="textarea textarea-bordered w-full"
                        rows=4
                        placeholder="Additional details (optional)"
                        maxlength=validation::REPORT_DESCRIPTION_MAX
                        prop:value=description
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                    <div class="text-xs opacity-60 text-right">
                        {move || format!("{}/{}", description.with(|d| d.chars().count()), validation::REPORT_DESCRIPTION_MAX)}
                    </div>
                    <div class="modal-action">
                        <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button type="submit" class="btn btn-error" disabled=submitting>"Submit Report"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desync_shared::{Role, Timestamp};

    fn post(id: u64, author_uid: u64) -> ForumPost {
        ForumPost {
            id,
            thread_id: 1,
            content: "a reply long enough".to_string(),
            author_uid,
            author_username: format!("u{author_uid}"),
            author_badge: Role::Member,
            created_at: Timestamp::default(),
            edited: false,
            deleted: false,
        }
    }

    #[test]
    fn test_author_ids_are_distinct_and_ordered() {
        let thread: ForumThread = serde_json::from_value(serde_json::json!({
            "id": 1, "categoryId": 1, "title": "Configs", "authorUid": 9
        }))
        .unwrap();
        let posts = vec![post(1, 3), post(2, 9), post(3, 3), post(4, 4)];
        assert_eq!(author_ids(Some(&thread), &posts), vec![9, 3, 4]);
        assert_eq!(author_ids(None, &[]), Vec::<u64>::new());
    }

    #[test]
    fn test_report_reasons_are_selectable() {
        for reason in REPORT_REASONS {
            assert!(validation::report(reason, "").is_ok());
        }
        assert!(validation::report("", "").is_err());
    }
}
