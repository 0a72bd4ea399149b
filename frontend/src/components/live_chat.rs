//! Forum side chat, polled every few seconds.

use crate::auth::use_auth;
use crate::poll::Poller;
use crate::validation;
use desync_shared::ChatMessage;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeSet;

/// Members seen among the loaded messages.
pub fn online_count(messages: &[ChatMessage]) -> usize {
    messages
        .iter()
        .map(|m| m.user_uid)
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn online_label(count: usize) -> String {
    match count {
        0 => "No users".to_string(),
        1 => "1 user".to_string(),
        n => format!("{n} users"),
    }
}

#[component]
pub fn LiveChat() -> impl IntoView {
    let auth = use_auth();
    let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
    let (draft, set_draft) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (sending, set_sending) = signal(false);

    let api = auth.api();
    let poller = Poller::start(
        auth.config().chat_poll_interval,
        move || {
            let api = api.clone();
            async move { api.chat_messages().await }
        },
        move |result| match result {
            Ok(list) => set_messages.set(list),
            Err(e) => tracing::warn!(error = %e, "chat refresh failed"),
        },
    );
    let poller = StoredValue::new_local(Some(poller));
    on_cleanup(move || {
        poller.try_update_value(|p| p.take());
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let raw = draft.get_untracked();
        let content = match validation::chat_message(&raw) {
            Ok(content) => content.to_string(),
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };
        set_error.set(None);
        set_sending.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.post_chat_message(&content).await {
                Ok(()) => {
                    set_draft.set(String::new());
                    poller.try_with_value(|p| {
                        if let Some(p) = p {
                            p.refresh();
                        }
                    });
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_sending.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-4">
                <div class="flex justify-between items-center">
                    <h3 class="card-title text-base">"Live Chat"</h3>
                    <span class="text-xs opacity-70">
                        {move || messages.with(|m| online_label(online_count(m)))}
                    </span>
                </div>
                <div class="h-64 overflow-y-auto space-y-1 text-sm">
                    <For
                        each=move || messages.get()
                        key=|m| m.id
                        children=|m| view! {
                            <div>
                                <span class="opacity-50 mr-1">{m.created_at.format_clock()}</span>
                                <b style=format!("color: {}", m.user_badge.color())>{m.username.clone()}</b>
                                ": " {m.content.clone()}
                            </div>
                        }
                    />
                </div>
                <Show when=move || error.with(Option::is_some)>
                    <p class="text-error text-xs">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <form class="join w-full" on:submit=on_submit>
                    <input
                        class="input input-bordered input-sm join-item flex-1"
                        placeholder="Type a message..."
                        maxlength=validation::CHAT_MESSAGE_MAX
                        prop:value=draft
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary btn-sm join-item" disabled=sending>"Send"</button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desync_shared::{Role, Timestamp};

    fn message(id: u64, user_uid: u64) -> ChatMessage {
        ChatMessage {
            id,
            user_uid,
            username: format!("user{user_uid}"),
            user_badge: Role::Member,
            content: "hi".to_string(),
            created_at: Timestamp::default(),
        }
    }

    #[test]
    fn test_online_count_is_distinct_authors() {
        assert_eq!(online_count(&[]), 0);
        let list = vec![message(1, 7), message(2, 8), message(3, 7)];
        assert_eq!(online_count(&list), 2);
    }

    #[test]
    fn test_online_label() {
        assert_eq!(online_label(0), "No users");
        assert_eq!(online_label(1), "1 user");
        assert_eq!(online_label(4), "4 users");
    }
}
