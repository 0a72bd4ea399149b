//! Types shared by the Desync client: the domain model mirrored from the
//! REST backend, the role ladder, and the request protocol.
//!
//! Everything here is plain data. Payloads use camelCase on the wire and
//! default every field the backend is known to omit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod date;
pub mod protocol;
mod role;

pub use date::Timestamp;
pub use role::{Role, UnknownRole};

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

// =========================================================
// Identity
// =========================================================

/// The signed-in member as returned by the auth endpoints.
///
/// The backend also sends the password hash; it is never deserialised here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: u64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub badge: Role,
    #[serde(default)]
    pub join_date: Timestamp,
    #[serde(default)]
    pub last_seen: Timestamp,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub messages: u64,
    #[serde(default)]
    pub reaction_score: i64,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub banned: bool,
    #[serde(default)]
    pub ban_reason: Option<String>,
    #[serde(default)]
    pub banned_at: Option<Timestamp>,
    #[serde(default)]
    pub banned_by: Option<u64>,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
}

impl Identity {
    #[inline]
    pub fn role(&self) -> Role {
        self.badge
    }

    /// Ban reason for display.
    pub fn ban_reason_or_default(&self) -> &str {
        self.ban_reason
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_BAN_REASON)
    }
}

pub const DEFAULT_BAN_REASON: &str = "No reason provided";

// =========================================================
// Inventory
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Invite,
    Reward,
    Badge,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Invite => "invite",
            ItemKind::Reward => "reward",
            ItemKind::Badge => "badge",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub used: bool,
    #[serde(default)]
    pub used_at: Option<Timestamp>,
}

/// Item counts per kind, as shown on the inventory tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventorySummary {
    pub total: usize,
    pub invites: usize,
    pub rewards: usize,
    pub badges: usize,
}

impl InventorySummary {
    pub fn of(items: &[InventoryItem]) -> Self {
        items.iter().fold(
            Self {
                total: items.len(),
                ..Self::default()
            },
            |mut acc, item| {
                match item.kind {
                    ItemKind::Invite => acc.invites += 1,
                    ItemKind::Reward => acc.rewards += 1,
                    ItemKind::Badge => acc.badges += 1,
                }
                acc
            },
        )
    }
}

// =========================================================
// Forum
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// A thread as listed in the forum or fetched on its own. Listing responses
/// omit the body and author details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumThread {
    pub id: u64,
    pub category_id: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub author_uid: u64,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub author_badge: Option<Role>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub last_reply_at: Option<Timestamp>,
    #[serde(default)]
    pub last_reply_by: Option<u64>,
    #[serde(default)]
    pub replies: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: u64,
    pub thread_id: u64,
    pub content: String,
    pub author_uid: u64,
    #[serde(default)]
    pub author_username: String,
    #[serde(default)]
    pub author_badge: Role,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub edited: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// Reactions on one post: emoji → uids of the members who reacted.
pub type ReactionMap = BTreeMap<String, Vec<u64>>;

// =========================================================
// Messaging
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateMessage {
    pub id: u64,
    #[serde(default)]
    pub from_uid: u64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: u64,
    pub user_uid: u64,
    pub username: String,
    #[serde(default)]
    pub user_badge: Role,
    pub content: String,
    #[serde(default)]
    pub created_at: Timestamp,
}

// =========================================================
// Administration
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationCode {
    pub code: String,
    #[serde(default)]
    pub created_by: u64,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub expires_at: Timestamp,
    #[serde(default)]
    pub used: bool,
    #[serde(default)]
    pub used_by: Option<u64>,
    #[serde(default)]
    pub max_uses: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: u64,
    pub active: u64,
    pub banned: u64,
    pub new_this_week: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub threads: u64,
    pub posts: u64,
    pub new_threads_this_week: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub pending: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub users: UserStats,
    #[serde(default)]
    pub content: ContentStats,
    #[serde(default)]
    pub reports: ReportStats,
    #[serde(default)]
    pub banned_by_country: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTarget {
    Thread,
    Post,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: u64,
    #[serde(rename = "type")]
    pub target: ReportTarget,
    pub target_id: u64,
    pub reason: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reported_by: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    InviteWave,
    RewardDrop,
    Special,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEvent {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub executed_at: Option<Timestamp>,
}

// =========================================================
// Storefront
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoftwareKind {
    Movement,
    HvH,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Software {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SoftwareKind,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Crypto,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: u64,
    pub user_id: u64,
    pub software_id: u64,
    #[serde(default)]
    pub purchase_date: Timestamp,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub amount: f64,
    pub status: PurchaseStatus,
}

// =========================================================
// Game server status
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerPlayer {
    pub name: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerPlayers {
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub max: u32,
    #[serde(default)]
    pub list: Vec<ServerPlayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub name: String,
    #[serde(default)]
    pub map: String,
    #[serde(default)]
    pub players: ServerPlayers,
    #[serde(default)]
    pub ping: i64,
    #[serde(default)]
    pub status_rate: u8,
    #[serde(default)]
    pub online: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_password_and_defaults_optional_fields() {
        let json = r#"{
            "uid": 7,
            "email": "neo@gmail.com",
            "username": "neo",
            "password": "$2b$hash",
            "badge": "Moderator",
            "joinDate": "2024-01-01T00:00:00.000Z"
        }"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.uid, 7);
        assert_eq!(identity.role(), Role::Moderator);
        assert!(!identity.banned);
        assert!(identity.inventory.is_empty());
        assert_eq!(identity.ban_reason_or_default(), DEFAULT_BAN_REASON);
    }

    #[test]
    fn test_inventory_summary_counts_kinds() {
        let item = |id, kind| InventoryItem {
            id,
            name: format!("item-{id}"),
            kind,
            description: String::new(),
            expires_at: None,
            created_at: Timestamp::default(),
            used: false,
            used_at: None,
        };
        let items = vec![
            item(1, ItemKind::Invite),
            item(2, ItemKind::Invite),
            item(3, ItemKind::Badge),
        ];
        let summary = InventorySummary::of(&items);
        assert_eq!(
            summary,
            InventorySummary {
                total: 3,
                invites: 2,
                rewards: 0,
                badges: 1
            }
        );
    }

    #[test]
    fn test_thread_listing_entries_parse_without_body() {
        let json = r#"{"id":3,"categoryId":1,"title":"Configs","authorUid":2,
            "createdAt":"2024-02-02T10:00:00Z","replies":4,"views":90,"pinned":true}"#;
        let thread: ForumThread = serde_json::from_str(json).unwrap();
        assert!(thread.pinned);
        assert!(thread.content.is_empty());
        assert_eq!(thread.author_badge, None);
    }
}
