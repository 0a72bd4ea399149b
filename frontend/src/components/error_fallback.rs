use leptos::prelude::*;

/// Shown when a view below the boundary fails. Offers a full page reload.
#[component]
pub fn ErrorFallback(errors: ArcRwSignal<Errors>) -> impl IntoView {
    let messages = errors.with(|errors| {
        errors
            .iter()
            .map(|(_, e)| e.to_string())
            .collect::<Vec<_>>()
    });
    for message in &messages {
        tracing::error!(error = %message, "view failed to render");
    }

    let reload = |_: leptos::ev::MouseEvent| {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                tracing::error!(error = ?e, "page reload failed");
            }
        }
    };

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card bg-base-100 shadow-xl max-w-lg">
                <div class="card-body text-center space-y-4">
                    <h1 class="text-3xl font-bold text-error">"Something went wrong"</h1>
                    <ul class="text-sm opacity-70">
                        {messages.into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                    </ul>
                    <button class="btn btn-primary" on:click=reload>"Reload page"</button>
                </div>
            </div>
        </div>
    }
}
