//! Member roles ("badges").
//!
//! The seven roles form a total order; every privilege check in the client
//! goes through [`Role::at_least`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege level of a member, lowest first.
///
/// The derived `Ord` follows declaration order, so the variant order here
/// *is* the privilege order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Role {
    #[default]
    Member,
    Known,
    Premium,
    Support,
    Moderator,
    Admin,
    Owner,
}

impl Role {
    /// All roles, lowest privilege first.
    pub const ALL: [Role; 7] = [
        Role::Member,
        Role::Known,
        Role::Premium,
        Role::Support,
        Role::Moderator,
        Role::Admin,
        Role::Owner,
    ];

    /// Whether this role meets or exceeds `required`.
    #[inline]
    pub fn at_least(self, required: Role) -> bool {
        self >= required
    }

    /// Roles allowed into the admin panel.
    #[inline]
    pub fn is_staff(self) -> bool {
        self.at_least(Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Known => "Known",
            Role::Premium => "Premium",
            Role::Support => "Support",
            Role::Moderator => "Moderator",
            Role::Admin => "Admin",
            Role::Owner => "Owner",
        }
    }

    /// CSS class used for badge pills, e.g. `badge-owner`.
    pub fn css_class(&self) -> &'static str {
        match self {
            Role::Member => "badge-member",
            Role::Known => "badge-known",
            Role::Premium => "badge-premium",
            Role::Support => "badge-support",
            Role::Moderator => "badge-moderator",
            Role::Admin => "badge-admin",
            Role::Owner => "badge-owner",
        }
    }

    /// Accent colour used for usernames in chat.
    pub fn color(&self) -> &'static str {
        match self {
            Role::Owner => "#ff4444",
            Role::Admin => "#ff6b6b",
            Role::Moderator => "#10b981",
            Role::Premium => "#8b5cf6",
            Role::Known => "#6366f1",
            Role::Support | Role::Member => "#6b7280",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a badge string names no known role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_privilege_ladder() {
        for window in Role::ALL.windows(2) {
            assert!(window[0] < window[1], "{} should rank below {}", window[0], window[1]);
        }
    }

    #[test]
    fn test_at_least_is_total_over_all_pairs() {
        for (i, held) in Role::ALL.iter().enumerate() {
            for (j, required) in Role::ALL.iter().enumerate() {
                assert_eq!(held.at_least(*required), i >= j, "{held} vs {required}");
            }
        }
    }

    #[test]
    fn test_only_admin_and_owner_are_staff() {
        let staff: Vec<Role> = Role::ALL.into_iter().filter(|r| r.is_staff()).collect();
        assert_eq!(staff, vec![Role::Admin, Role::Owner]);
    }

    #[test]
    fn test_parses_badge_strings() {
        assert_eq!("Moderator".parse::<Role>().unwrap(), Role::Moderator);
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert!("Wizard".parse::<Role>().is_err());
    }

    #[test]
    fn test_serializes_as_badge_name() {
        assert_eq!(serde_json::to_string(&Role::Premium).unwrap(), "\"Premium\"");
        let role: Role = serde_json::from_str("\"Support\"").unwrap();
        assert_eq!(role, Role::Support);
    }
}
