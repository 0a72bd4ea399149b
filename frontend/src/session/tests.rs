use super::*;
use crate::gateway::{Gateway, MemoryTokenStore, MockTransport};
use desync_shared::Role;
use desync_shared::protocol::HttpMethod;
use serde_json::json;
use std::rc::Rc;

const BASE: &str = "http://api.test/api";

// =========================================================
// Helpers
// =========================================================

fn url(endpoint: &str) -> String {
    format!("{BASE}/{endpoint}")
}

fn create_store(
    transport: &MockTransport,
    tokens: &MemoryTokenStore,
) -> SessionStore<MockTransport, MemoryTokenStore> {
    let gateway = Gateway::new(BASE, transport.clone(), tokens.clone());
    SessionStore::new(DesyncApi::new(gateway))
}

fn user_json(uid: u64, badge: &str, banned: bool) -> Value {
    let ban_reason = banned.then_some("Selling accounts");
    json!({
        "uid": uid,
        "email": "neo@gmail.com",
        "username": "neo",
        "badge": badge,
        "banned": banned,
        "banReason": ban_reason,
    })
}

async fn signed_in_store(
    transport: &MockTransport,
    tokens: &MemoryTokenStore,
) -> SessionStore<MockTransport, MemoryTokenStore> {
    transport.respond(
        HttpMethod::Post,
        &url("auth/login"),
        200,
        json!({"success": true, "token": "fresh", "user": user_json(7, "Member", false)}),
    );
    let store = create_store(transport, tokens);
    store.bootstrap().await;
    store.login("neo@gmail.com", "pw").await.unwrap();
    store
}

// =========================================================
// bootstrap
// =========================================================

#[tokio::test]
async fn test_bootstrap_without_token_makes_no_request() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    let store = create_store(&transport, &tokens);

    let state = store.bootstrap().await;

    assert_eq!(state, SessionState::Unauthenticated);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_bootstrap_restores_valid_token() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("good");
    transport.respond(
        HttpMethod::Post,
        &url("auth/verify-token"),
        200,
        json!({"success": true, "user": user_json(3, "Admin", false)}),
    );
    let store = create_store(&transport, &tokens);

    let state = store.bootstrap().await;

    assert_eq!(state.identity().map(|u| u.uid), Some(3));
    assert_eq!(store.identity().map(|u| u.role()), Some(Role::Admin));
    assert_eq!(tokens.current().as_deref(), Some("good"));
    assert_eq!(
        transport.requests.borrow()[0].body.as_deref(),
        Some(r#"{"token":"good"}"#)
    );
}

#[tokio::test]
async fn test_bootstrap_invalid_token_is_removed() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("stale");
    transport.respond(
        HttpMethod::Post,
        &url("auth/verify-token"),
        401,
        json!({"message": "Invalid token"}),
    );
    let store = create_store(&transport, &tokens);

    assert_eq!(store.bootstrap().await, SessionState::Unauthenticated);
    assert_eq!(tokens.current(), None);
}

#[tokio::test]
async fn test_bootstrap_unsuccessful_or_banned_answer_is_removed() {
    for body in [
        json!({"success": false, "message": "expired"}),
        json!({"success": true, "user": user_json(4, "Member", true)}),
        json!({"success": true}),
    ] {
        let transport = MockTransport::new();
        let tokens = MemoryTokenStore::with_token("t");
        transport.respond(HttpMethod::Post, &url("auth/verify-token"), 200, body);
        let store = create_store(&transport, &tokens);

        assert_eq!(store.bootstrap().await, SessionState::Unauthenticated);
        assert_eq!(tokens.current(), None);
    }
}

#[tokio::test]
async fn test_bootstrap_network_failure_settles_unauthenticated() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("t");
    transport.fail(HttpMethod::Post, &url("auth/verify-token"));
    let store = create_store(&transport, &tokens);

    assert_eq!(store.bootstrap().await, SessionState::Unauthenticated);
    assert_eq!(tokens.current(), None);
}

#[tokio::test]
async fn test_bootstrap_runs_once() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::with_token("good");
    transport.respond(
        HttpMethod::Post,
        &url("auth/verify-token"),
        200,
        json!({"success": true, "user": user_json(3, "Member", false)}),
    );
    let store = create_store(&transport, &tokens);

    store.bootstrap().await;
    store.bootstrap().await;

    assert_eq!(transport.request_count(), 1);
}

// =========================================================
// login / register
// =========================================================

#[tokio::test]
async fn test_login_persists_token_and_identity() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    let store = signed_in_store(&transport, &tokens).await;

    assert_eq!(tokens.current().as_deref(), Some("fresh"));
    assert_eq!(store.identity().map(|u| u.uid), Some(7));
}

#[tokio::test]
async fn test_login_banned_payload_never_populates_identity() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.respond(
        HttpMethod::Post,
        &url("auth/login"),
        200,
        json!({"success": true, "token": "t", "user": user_json(9, "Member", true)}),
    );
    let store = create_store(&transport, &tokens);
    store.bootstrap().await;

    let outcome = store.login("neo@gmail.com", "pw").await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::Banned {
            reason: "Selling accounts".into()
        }
    );
    assert_eq!(store.state(), SessionState::Unauthenticated);
    assert_eq!(tokens.current(), None);
}

#[tokio::test]
async fn test_login_banned_rejection_reads_reason_from_body() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.respond(
        HttpMethod::Post,
        &url("auth/login"),
        403,
        json!({"message": "Account is banned", "user": {"banReason": "Chargeback"}}),
    );
    let store = create_store(&transport, &tokens);
    store.bootstrap().await;

    let outcome = store.login("neo@gmail.com", "pw").await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::Banned {
            reason: "Chargeback".into()
        }
    );
    assert!(store.identity().is_none());
}

#[tokio::test]
async fn test_login_banned_without_reason_uses_default() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.respond(
        HttpMethod::Post,
        &url("auth/login"),
        403,
        json!({"message": "Account is banned"}),
    );
    let store = create_store(&transport, &tokens);
    store.bootstrap().await;

    let outcome = store.login("neo@gmail.com", "pw").await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::Banned {
            reason: DEFAULT_BAN_REASON.into()
        }
    );
}

#[tokio::test]
async fn test_login_wrong_password_is_rejected() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.respond(
        HttpMethod::Post,
        &url("auth/login"),
        401,
        json!({"message": "Invalid credentials"}),
    );
    let store = create_store(&transport, &tokens);
    store.bootstrap().await;

    let outcome = store.login("neo@gmail.com", "bad").await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::Rejected {
            message: "Invalid credentials".into()
        }
    );
    assert_eq!(store.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_login_network_failure_is_an_error() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.fail(HttpMethod::Post, &url("auth/login"));
    let store = create_store(&transport, &tokens);
    store.bootstrap().await;

    let err = store.login("neo@gmail.com", "pw").await.unwrap_err();

    assert!(matches!(err, SessionError::Request(e) if e.is_transport()));
}

#[tokio::test]
async fn test_login_before_bootstrap_is_invalid() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    let store = create_store(&transport, &tokens);

    let err = store.login("neo@gmail.com", "pw").await.unwrap_err();

    assert_eq!(
        err,
        SessionError::InvalidTransition {
            operation: "log in",
            state: "unknown"
        }
    );
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_login_while_authenticated_is_invalid() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    let store = signed_in_store(&transport, &tokens).await;

    let err = store.login("neo@gmail.com", "pw").await.unwrap_err();

    assert!(matches!(err, SessionError::InvalidTransition { .. }));
    assert!(store.state().is_authenticated());
}

#[tokio::test]
async fn test_register_conflict_keeps_backend_message() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.respond(
        HttpMethod::Post,
        &url("auth/register"),
        409,
        json!({"message": "Email or username already exists"}),
    );
    let store = create_store(&transport, &tokens);
    store.bootstrap().await;

    let outcome = store.register(&Registration::default()).await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::Rejected {
            message: "Email or username already exists".into()
        }
    );
}

#[tokio::test]
async fn test_register_bare_400_gets_readable_message() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.respond_raw(HttpMethod::Post, &url("auth/register"), 400, "");
    let store = create_store(&transport, &tokens);
    store.bootstrap().await;

    let outcome = store.register(&Registration::default()).await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::Rejected {
            message: "Invalid invitation code or missing information".into()
        }
    );
}

#[tokio::test]
async fn test_register_success_signs_in() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.respond(
        HttpMethod::Post,
        &url("auth/register"),
        201,
        json!({"success": true, "token": "new", "user": user_json(11, "Member", false)}),
    );
    let store = create_store(&transport, &tokens);
    store.bootstrap().await;

    let registration = Registration {
        email: "neo@gmail.com".into(),
        username: "neo".into(),
        password: "pw".into(),
        invitation_code: "WAVE1".into(),
    };
    let outcome = store.register(&registration).await.unwrap();

    assert!(matches!(outcome, LoginOutcome::Authenticated(ref u) if u.uid == 11));
    assert_eq!(tokens.current().as_deref(), Some("new"));
    let body: Value =
        serde_json::from_str(transport.requests.borrow()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["invitationCode"], "WAVE1");
}

// =========================================================
// logout / replace_identity / subscribe
// =========================================================

#[tokio::test]
async fn test_logout_clears_everything_from_any_state() {
    // Authenticated
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    let store = signed_in_store(&transport, &tokens).await;
    store.logout();
    assert_eq!(store.state(), SessionState::Unauthenticated);
    assert_eq!(tokens.current(), None);

    // Unknown, with a token still persisted
    let tokens = MemoryTokenStore::with_token("left-over");
    let store = create_store(&MockTransport::new(), &tokens);
    store.logout();
    assert_eq!(store.state(), SessionState::Unauthenticated);
    assert_eq!(tokens.current(), None);

    // Unauthenticated
    store.logout();
    assert_eq!(store.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_logout_before_bootstrap_is_not_overwritten() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    let store = create_store(&transport, &tokens);

    store.logout();
    assert_eq!(store.bootstrap().await, SessionState::Unauthenticated);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_replace_identity_requires_same_user() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    let store = signed_in_store(&transport, &tokens).await;

    let mut updated = store.identity().unwrap();
    updated.about_me = Some("hello".into());
    store.replace_identity(updated).unwrap();
    assert_eq!(
        store.identity().and_then(|u| u.about_me).as_deref(),
        Some("hello")
    );

    let mut stranger = store.identity().unwrap();
    stranger.uid = 99;
    assert!(store.replace_identity(stranger).is_err());
    assert_eq!(store.identity().map(|u| u.uid), Some(7));
}

#[tokio::test]
async fn test_subscribers_see_every_transition() {
    let transport = MockTransport::new();
    let tokens = MemoryTokenStore::default();
    transport.respond(
        HttpMethod::Post,
        &url("auth/login"),
        200,
        json!({"success": true, "token": "t", "user": user_json(1, "Owner", false)}),
    );
    let store = create_store(&transport, &tokens);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |state| sink.borrow_mut().push(state.name()));

    store.bootstrap().await;
    store.login("a@gmail.com", "pw").await.unwrap();
    store.logout();

    assert_eq!(
        *seen.borrow(),
        vec!["unauthenticated", "authenticated", "unauthenticated"]
    );
}
