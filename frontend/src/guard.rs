//! Route guard.
//!
//! Decides what may render for a route given the current session. Pure: it
//! reads the session state and never changes it.

use crate::session::SessionState;
use crate::web::route::AppRoute;
use desync_shared::{Identity, Role};

#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    /// Mount the route's view, with the identity when signed in.
    Render(Option<Identity>),
    /// Replace the current entry with `to`.
    Redirect(AppRoute),
    /// Signed in, but the role is too low.
    Forbidden { required: Role },
    /// Bootstrap still running.
    Pending,
}

/// Evaluates `route` against `state`.
pub fn evaluate(route: AppRoute, state: &SessionState) -> GuardDecision {
    let identity = match state {
        SessionState::Unknown if route.requires_auth() || route.should_redirect_when_authenticated() => {
            return GuardDecision::Pending;
        }
        SessionState::Unknown | SessionState::Unauthenticated => None,
        SessionState::Authenticated(identity) => Some(identity),
    };

    match identity {
        None if route.requires_auth() => GuardDecision::Redirect(AppRoute::auth_failure_redirect()),
        None => GuardDecision::Render(None),
        Some(_) if route.should_redirect_when_authenticated() => {
            GuardDecision::Redirect(AppRoute::auth_success_redirect())
        }
        Some(identity) => match route.required_role() {
            Some(required) if !identity.role().at_least(required) => {
                GuardDecision::Forbidden { required }
            }
            _ => GuardDecision::Render(Some(identity.clone())),
        },
    }
}

/// Redirect applied once bootstrap settles: a restored session moves the
/// visitor off the landing page.
pub fn after_bootstrap(
    route: AppRoute,
    previous: &SessionState,
    current: &SessionState,
) -> Option<AppRoute> {
    match (previous, current) {
        (SessionState::Unknown, SessionState::Authenticated(_)) if route == AppRoute::Landing => {
            Some(AppRoute::auth_success_redirect())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        serde_json::from_value(serde_json::json!({
            "uid": 1,
            "email": "a@gmail.com",
            "username": "a",
            "badge": role.as_str(),
        }))
        .unwrap()
    }

    fn signed_in(role: Role) -> SessionState {
        SessionState::Authenticated(identity(role))
    }

    #[test]
    fn test_member_requesting_admin_is_forbidden() {
        assert_eq!(
            evaluate(AppRoute::Admin, &signed_in(Role::Member)),
            GuardDecision::Forbidden {
                required: Role::Admin
            }
        );
    }

    #[test]
    fn test_role_gate_over_all_role_pairs() {
        for &holder in Role::ALL.iter() {
            let decision = evaluate(AppRoute::Admin, &signed_in(holder));
            if holder < Role::Admin {
                assert!(
                    matches!(decision, GuardDecision::Forbidden { .. }),
                    "{holder} must not reach /admin"
                );
            } else {
                assert!(
                    matches!(decision, GuardDecision::Render(Some(_))),
                    "{holder} should reach /admin"
                );
            }
        }
    }

    #[test]
    fn test_anonymous_visitors_are_sent_to_auth() {
        for route in [
            AppRoute::Dashboard,
            AppRoute::Forum,
            AppRoute::Profile(2),
            AppRoute::Thread(3),
            AppRoute::CreateThread,
            AppRoute::Settings,
            AppRoute::Admin,
        ] {
            assert_eq!(
                evaluate(route, &SessionState::Unauthenticated),
                GuardDecision::Redirect(AppRoute::Auth)
            );
        }
    }

    #[test]
    fn test_public_routes_render_for_everyone() {
        assert_eq!(
            evaluate(AppRoute::Landing, &SessionState::Unauthenticated),
            GuardDecision::Render(None)
        );
        assert_eq!(
            evaluate(AppRoute::Landing, &SessionState::Unknown),
            GuardDecision::Render(None)
        );
        assert_eq!(
            evaluate(AppRoute::NotFound, &SessionState::Unauthenticated),
            GuardDecision::Render(None)
        );
        assert_eq!(
            evaluate(AppRoute::Auth, &SessionState::Unauthenticated),
            GuardDecision::Render(None)
        );
    }

    #[test]
    fn test_signed_in_users_leave_auth_page() {
        assert_eq!(
            evaluate(AppRoute::Auth, &signed_in(Role::Member)),
            GuardDecision::Redirect(AppRoute::Forum)
        );
    }

    #[test]
    fn test_unknown_session_is_pending_for_gated_routes() {
        assert_eq!(
            evaluate(AppRoute::Forum, &SessionState::Unknown),
            GuardDecision::Pending
        );
        assert_eq!(
            evaluate(AppRoute::Auth, &SessionState::Unknown),
            GuardDecision::Pending
        );
    }

    #[test]
    fn test_identity_is_injected_on_render() {
        let decision = evaluate(AppRoute::Settings, &signed_in(Role::Premium));
        assert!(matches!(decision, GuardDecision::Render(Some(ref u)) if u.badge == Role::Premium));
    }

    #[test]
    fn test_restored_session_leaves_landing() {
        assert_eq!(
            after_bootstrap(AppRoute::Landing, &SessionState::Unknown, &signed_in(Role::Member)),
            Some(AppRoute::Forum)
        );
    }

    #[test]
    fn test_no_bootstrap_redirect_elsewhere() {
        // Anonymous bootstrap stays put.
        assert_eq!(
            after_bootstrap(AppRoute::Landing, &SessionState::Unknown, &SessionState::Unauthenticated),
            None
        );
        // A deep link keeps its target.
        assert_eq!(
            after_bootstrap(AppRoute::Thread(4), &SessionState::Unknown, &signed_in(Role::Member)),
            None
        );
        // Logging in later from the landing page is not a bootstrap.
        assert_eq!(
            after_bootstrap(AppRoute::Landing, &SessionState::Unauthenticated, &signed_in(Role::Member)),
            None
        );
    }
}
