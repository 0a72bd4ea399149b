//! Route table.
//!
//! Pure domain model: no DOM access. Parses URL paths into [`AppRoute`] and
//! declares what each route needs before it may render.

use desync_shared::Role;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Landing,
    Auth,
    Dashboard,
    Forum,
    Profile(u64),
    Thread(u64),
    CreateThread,
    Settings,
    Admin,
    NotFound,
}

impl AppRoute {
    /// Parses a URL path. Query strings, fragments and a trailing slash are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] => Self::Landing,
            ["auth"] => Self::Auth,
            ["dashboard"] => Self::Dashboard,
            ["forum"] => Self::Forum,
            ["profile", uid] => uid.parse().map_or(Self::NotFound, Self::Profile),
            ["thread", id] => id.parse().map_or(Self::NotFound, Self::Thread),
            ["create-thread"] => Self::CreateThread,
            ["settings"] => Self::Settings,
            ["admin"] => Self::Admin,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Auth => "/auth".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Forum => "/forum".to_string(),
            Self::Profile(uid) => format!("/profile/{uid}"),
            Self::Thread(id) => format!("/thread/{id}"),
            Self::CreateThread => "/create-thread".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::Admin => "/admin".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::Forum
                | Self::Profile(_)
                | Self::Thread(_)
                | Self::CreateThread
                | Self::Settings
                | Self::Admin
        )
    }

    /// Minimum role, for role-gated routes.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::Admin => Some(Role::Admin),
            _ => None,
        }
    }

    /// Signed-in users are sent away from the auth page.
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Auth
    }

    pub fn auth_success_redirect() -> Self {
        Self::Forum
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_route() {
        let cases = [
            ("/", AppRoute::Landing),
            ("", AppRoute::Landing),
            ("/auth", AppRoute::Auth),
            ("/dashboard", AppRoute::Dashboard),
            ("/forum/", AppRoute::Forum),
            ("/profile/42", AppRoute::Profile(42)),
            ("/thread/7?page=2", AppRoute::Thread(7)),
            ("/create-thread", AppRoute::CreateThread),
            ("/settings#security", AppRoute::Settings),
            ("/admin", AppRoute::Admin),
        ];
        for (path, route) in cases {
            assert_eq!(AppRoute::from_path(path), route, "{path}");
        }
    }

    #[test]
    fn test_unknown_or_malformed_paths_are_not_found() {
        for path in ["/nope", "/profile/abc", "/thread", "/thread/1/extra", "/admin/users"] {
            assert_eq!(AppRoute::from_path(path), AppRoute::NotFound, "{path}");
        }
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [
            AppRoute::Landing,
            AppRoute::Profile(3),
            AppRoute::Thread(9),
            AppRoute::CreateThread,
            AppRoute::Admin,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_access_requirements() {
        assert!(!AppRoute::Landing.requires_auth());
        assert!(!AppRoute::Auth.requires_auth());
        assert!(AppRoute::Thread(1).requires_auth());
        assert_eq!(AppRoute::Admin.required_role(), Some(Role::Admin));
        assert_eq!(AppRoute::Settings.required_role(), None);
    }
}
