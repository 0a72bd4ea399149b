use crate::auth::use_auth;
use crate::components::common::Navbar;
use crate::validation::{self, TITLE_MAX};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use desync_shared::{ForumCategory, Identity};
use leptos::prelude::*;
use leptos::task::spawn_local;

const DEFAULT_CATEGORY: u64 = 1;

#[component]
pub fn CreateThreadPage(identity: Identity) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (categories, set_categories) = signal(Vec::<ForumCategory>::new());
    let (category, set_category) = signal(DEFAULT_CATEGORY);
    let (title, set_title) = signal(String::new());
    let (content, set_content) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    {
        let api = auth.api();
        spawn_local(async move {
            match api.categories().await {
                Ok(list) => {
                    if let Some(first) = list.first() {
                        if !list.iter().any(|c| c.id == DEFAULT_CATEGORY) {
                            set_category.set(first.id);
                        }
                    }
                    set_categories.set(list);
                }
                Err(e) => tracing::warn!(error = %e, "failed to load categories"),
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let title = title.get_untracked();
        let content = content.get_untracked();
        if let Err(e) = validation::thread_form(&title, &content) {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        set_submitting.set(true);
        let category_id = category.get_untracked();
        let api = auth.api();
        spawn_local(async move {
            match api.create_thread(category_id, title.trim(), content.trim()).await {
                Ok(Some(thread)) => {
                    tracing::info!(thread_id = thread.id, category_id, "thread created");
                    router.navigate_to_route(AppRoute::Thread(thread.id));
                }
                Ok(None) => {
                    set_error.set(Some("Failed to create thread. Please try again.".to_string()));
                }
                Err(e) => {
                    tracing::warn!(category_id, error = %e, "thread creation failed");
                    set_error.set(Some(e.user_message()));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4">
            <Navbar identity=identity active=AppRoute::Forum />
            <div class="max-w-3xl mx-auto">
                <h1 class="text-3xl font-bold">"CREATE NEW THREAD"</h1>
                <p class="opacity-70 mb-4">"Share your thoughts with the community"</p>
                <Show when=move || error.with(Option::is_some)>
                    <div class="alert alert-error mb-4">{move || error.get().unwrap_or_default()}</div>
                </Show>
                <form class="card bg-base-100 shadow" on:submit=on_submit>
                    <div class="card-body space-y-3">
                        <label class="form-control">
                            <span class="label-text">"CATEGORY"</span>
                            <select
                                class="select select-bordered"
                                on:change=move |ev| {
                                    if let Ok(id) = event_target_value(&ev).parse() {
                                        set_category.set(id);
                                    }
                                }
                            >
                                <For
                                    each=move || categories.get()
                                    key=|c| c.id
                                    children=move |c| {
                                        let id = c.id;
                                        view! {
                                            <option value=id.to_string() selected=move || category.get() == id>
                                                {c.name.clone()}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                        </label>
                        <label class="form-control">
                            <span class="label-text">"THREAD TITLE"</span>
                            <input
                                class="input input-bordered"
                                placeholder="Enter a descriptive title"
                                maxlength=TITLE_MAX
                                prop:value=title
                                on:input=move |ev| set_title.set(event_target_value(&ev))
                            />
                            <span class="label-text-alt text-right">
                                {move || format!("{}/{TITLE_MAX}", title.with(|t| t.chars().count()))}
                            </span>
                        </label>
                        <label class="form-control">
                            <span class="label-text">"CONTENT"</span>
                            <textarea
                                class="textarea textarea-bordered"
                                rows=12
                                placeholder="Write your thread content here..."
                                prop:value=content
                                on:input=move |ev| set_content.set(event_target_value(&ev))
                            ></textarea>
                        </label>
                        <div class="flex gap-2">
                            <button type="submit" class="btn btn-primary" disabled=submitting>"CREATE THREAD"</button>
                            <button type="button" class="btn btn-secondary" on:click=move |_| router.navigate_to_route(AppRoute::Forum)>
                                "CANCEL"
                            </button>
                        </div>
                    </div>
                </form>
            </div>
        </div>
    }
}
