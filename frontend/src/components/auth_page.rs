//! Login / registration form.

use crate::auth::{self, use_auth};
use crate::session::{LoginOutcome, Registration, SessionError};
use crate::validation::{self, ValidationError};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "LOGIN",
            AuthMode::Register => "REGISTER",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "LOGIN",
            AuthMode::Register => "CREATE ACCOUNT",
        }
    }
}

/// Checks the form for `mode` before anything is sent.
pub fn validate(mode: AuthMode, form: &Registration) -> Result<(), ValidationError> {
    match mode {
        AuthMode::Login => validation::login_form(&form.email, &form.password),
        AuthMode::Register => validation::register_form(
            &form.email,
            &form.username,
            &form.password,
            &form.invitation_code,
        ),
    }
}

fn session_error_message(error: &SessionError) -> String {
    match error {
        SessionError::Request(e) => e.user_message(),
        other => other.to_string(),
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (mode, set_mode) = signal(AuthMode::Login);
    let (email, set_email) = signal(String::new());
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (invitation_code, set_invitation_code) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (banned, set_banned) = signal(Option::<String>::None);

    let switch_to = move |next: AuthMode| {
        set_mode.set(next);
        set_error_msg.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mode = mode.get_untracked();
        let form = Registration {
            email: email.get_untracked().trim().to_string(),
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            invitation_code: invitation_code.get_untracked().trim().to_string(),
        };
        if let Err(e) = validate(mode, &form) {
            set_error_msg.set(Some(e.to_string()));
            return;
        }

        set_submitting.set(true);
        set_error_msg.set(None);
        spawn_local(async move {
            let result = match mode {
                AuthMode::Login => auth::login(&auth, &form.email, &form.password).await,
                AuthMode::Register => auth::register(&auth, &form).await,
            };
            match result {
                Ok(LoginOutcome::Authenticated(identity)) => {
                    tracing::info!(uid = identity.uid, "signed in");
                    router.navigate_to_route(AppRoute::auth_success_redirect());
                }
                Ok(LoginOutcome::Banned { reason }) => set_banned.set(Some(reason)),
                Ok(LoginOutcome::Rejected { message }) => set_error_msg.set(Some(message)),
                Err(e) => {
                    tracing::warn!(error = %e, "authentication failed");
                    set_error_msg.set(Some(session_error_message(&e)));
                }
            }
            set_submitting.set(false);
        });
    };

    let is_register = move || mode.get() == AuthMode::Register;

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow">
                <div class="flex-1 gap-2">
                    <Link to="/" class="btn btn-ghost btn-sm">"HOME"</Link>
                    <a href="https://discord.gg/desync" target="_blank" rel="noopener noreferrer" class="btn btn-ghost btn-sm">
                        "DISCORD"
                    </a>
                </div>
                <div class="flex-none gap-2">
                    <button class="btn btn-ghost btn-sm" on:click=move |_| switch_to(AuthMode::Login)>"Log in"</button>
                    <button class="btn btn-ghost btn-sm" on:click=move |_| switch_to(AuthMode::Register)>"Register"</button>
                </div>
            </div>

            <div class="hero py-16">
                <div class="card w-full max-w-md shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <h1 class="text-3xl font-bold text-center">{move || mode.get().title()}</h1>

                        <Show when=move || error_msg.with(Option::is_some)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <label class="form-control">
                            <span class="label-text">"EMAIL"</span>
                            <input
                                type="email"
                                class="input input-bordered"
                                placeholder="Enter your email"
                                prop:value=email
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </label>
                        <Show when=is_register>
                            <label class="form-control">
                                <span class="label-text">"USERNAME"</span>
                                <input
                                    class="input input-bordered"
                                    placeholder="Choose a username"
                                    prop:value=username
                                    on:input=move |ev| set_username.set(event_target_value(&ev))
                                />
                            </label>
                        </Show>
                        <label class="form-control">
                            <span class="label-text">"PASSWORD"</span>
                            <input
                                type="password"
                                class="input input-bordered"
                                placeholder="Enter your password"
                                prop:value=password
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                        </label>
                        <Show when=is_register>
                            <label class="form-control">
                                <span class="label-text">"INVITATION CODE"</span>
                                <input
                                    class="input input-bordered"
                                    placeholder="Enter invitation code"
                                    prop:value=invitation_code
                                    on:input=move |ev| set_invitation_code.set(event_target_value(&ev))
                                />
                            </label>
                        </Show>

                        <button type="submit" class="btn btn-primary mt-4" disabled=submitting>
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> }.into_any()
                            } else {
                                mode.get().submit_label().into_any()
                            }}
                        </button>

                        <p class="text-center text-sm">
                            {move || match mode.get() {
                                AuthMode::Login => view! {
                                    "Don't have an account? "
                                    <a class="link link-primary" on:click=move |_| switch_to(AuthMode::Register)>"Register here"</a>
                                }.into_any(),
                                AuthMode::Register => view! {
                                    "Already have an account? "
                                    <a class="link link-primary" on:click=move |_| switch_to(AuthMode::Login)>"Login here"</a>
                                }.into_any(),
                            }}
                        </p>
                    </form>
                </div>
            </div>

            <Show when=move || banned.with(Option::is_some)>
                <div class="modal modal-open" on:click=move |_| set_banned.set(None)>
                    <div class="modal-box text-center" on:click=|ev| ev.stop_propagation()>
                        <div class="text-5xl">"🚫"</div>
                        <h2 class="text-2xl font-bold text-error mt-2">"ACCOUNT BANNED"</h2>
                        <p class="mt-2">"Your account has been permanently banned from Desync."</p>
                        <div class="bg-base-200 rounded p-3 mt-4 text-left">
                            <div class="text-xs font-bold opacity-70">"REASON:"</div>
                            <div>{move || banned.get().unwrap_or_default()}</div>
                        </div>
                        <button class="btn btn-error mt-4" on:click=move |_| set_banned.set(None)>"CLOSE"</button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, username: &str, code: &str) -> Registration {
        Registration {
            email: email.to_string(),
            username: username.to_string(),
            password: "hunter22".to_string(),
            invitation_code: code.to_string(),
        }
    }

    #[test]
    fn test_login_ignores_registration_fields() {
        assert!(validate(AuthMode::Login, &form("neo@gmail.com", "", "")).is_ok());
        assert_eq!(
            validate(AuthMode::Login, &form("neo@example.com", "", "")),
            Err(ValidationError::EmailDomain)
        );
    }

    #[test]
    fn test_register_requires_code_and_username() {
        assert_eq!(
            validate(AuthMode::Register, &form("neo@gmail.com", "neo", "")),
            Err(ValidationError::MissingFields)
        );
        assert!(validate(AuthMode::Register, &form("neo@outlook.com", "neo", "WAVE")).is_ok());
    }

    #[test]
    fn test_session_error_message_hides_transport_details() {
        use crate::gateway::{NETWORK_ERROR_MESSAGE, RequestError, TransportError};
        let err = SessionError::Request(RequestError::Transport(TransportError::Network(
            "connection refused".to_string(),
        )));
        assert_eq!(session_error_message(&err), NETWORK_ERROR_MESSAGE);

        let err = SessionError::InvalidTransition {
            operation: "log in",
            state: "authenticated",
        };
        assert_eq!(session_error_message(&err), "cannot log in while authenticated");
    }
}
