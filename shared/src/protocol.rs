//! REST protocol between the client and the Desync backend.
//!
//! Each request type knows its method, its path (relative to the API base)
//! and the shape of its response. Path parameters are `#[serde(skip)]` so
//! they never leak into the JSON body.

use crate::{
    AdminEvent, AdminStats, ChatMessage, ForumCategory, ForumPost, ForumThread, Identity,
    InvitationCode, InventoryItem, ItemKind, Notification, PaymentMethod, PrivateMessage,
    Purchase, ReactionMap, Report, ReportTarget, Role, ServerStatus, Software, Timestamp,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Path relative to the API base, including any query string.
    fn path(&self) -> String;

    /// Whether the request itself is sent as the JSON body.
    fn has_body(&self) -> bool {
        Self::METHOD != HttpMethod::Get
    }
}

// =========================================================
// Response envelopes
// =========================================================

/// `{ "success": bool, "message"?: string, ...data }`, the shape of nearly
/// every backend answer.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Envelope<T> {
    /// The payload when `success` is set, otherwise the backend's message.
    pub fn into_result(self) -> Result<T, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .message
                .unwrap_or_else(|| "Request was not successful".to_string()))
        }
    }
}

/// Answer of login, registration and token verification. Kept outside
/// [`Envelope`] because a rejected login may still carry the (banned) user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Identity>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of endpoints that only acknowledge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersPayload {
    #[serde(default)]
    pub users: Vec<Identity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub user: Option<Identity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagesPayload {
    #[serde(default)]
    pub messages: Vec<PrivateMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationsPayload {
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesPayload {
    #[serde(default)]
    pub categories: Vec<ForumCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadsPayload {
    #[serde(default)]
    pub threads: Vec<ForumThread>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadPayload {
    #[serde(default)]
    pub thread: Option<ForumThread>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsPayload {
    #[serde(default)]
    pub posts: Vec<ForumPost>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub post: Option<ForumPost>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReactionsPayload {
    #[serde(default)]
    pub reactions: ReactionMap,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodesPayload {
    #[serde(default)]
    pub codes: Vec<InvitationCode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsPayload {
    #[serde(default)]
    pub stats: Option<AdminStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportsPayload {
    #[serde(default)]
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsPayload {
    #[serde(default)]
    pub events: Vec<AdminEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoftwarePayload {
    #[serde(default)]
    pub software: Vec<Software>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchasesPayload {
    #[serde(default)]
    pub purchases: Vec<Purchase>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryPayload {
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerPayload {
    #[serde(default)]
    pub server: Option<ServerStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "auth/login".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub invitation_code: String,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "auth/register".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

impl ApiRequest for VerifyTokenRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "auth/verify-token".to_string()
    }
}

// =========================================================
// Users, messages, notifications
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Response = Envelope<UsersPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "users".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetUserRequest {
    #[serde(skip)]
    pub uid: u64,
}

impl ApiRequest for GetUserRequest {
    type Response = Envelope<UserPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("users/{}", self.uid)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip)]
    pub uid: u64,
    pub username: String,
    pub email: String,
    pub about_me: String,
}

impl ApiRequest for UpdateProfileRequest {
    type Response = Envelope<UserPayload>;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("users/{}/profile", self.uid)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    #[serde(skip)]
    pub to_uid: u64,
    pub subject: String,
    pub content: String,
}

impl ApiRequest for SendMessageRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("users/{}/messages", self.to_uid)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMessagesRequest;

impl ApiRequest for ListMessagesRequest {
    type Response = Envelope<MessagesPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "users/messages".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkMessageReadRequest {
    #[serde(skip)]
    pub message_id: u64,
}

impl ApiRequest for MarkMessageReadRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("users/messages/{}/read", self.message_id)
    }

    fn has_body(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListNotificationsRequest;

impl ApiRequest for ListNotificationsRequest {
    type Response = Envelope<NotificationsPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "users/notifications".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkNotificationReadRequest {
    #[serde(skip)]
    pub notification_id: u64,
}

impl ApiRequest for MarkNotificationReadRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("users/notifications/{}/read", self.notification_id)
    }

    fn has_body(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetInventoryRequest {
    #[serde(skip)]
    pub uid: u64,
}

impl ApiRequest for GetInventoryRequest {
    type Response = Envelope<InventoryPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("users/{}/inventory", self.uid)
    }
}

// =========================================================
// Forum
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListCategoriesRequest;

impl ApiRequest for ListCategoriesRequest {
    type Response = Envelope<CategoriesPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "forum/categories".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListThreadsRequest {
    #[serde(skip)]
    pub category_id: Option<u64>,
}

impl ApiRequest for ListThreadsRequest {
    type Response = Envelope<ThreadsPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        match self.category_id {
            Some(id) => format!("forum/threads?categoryId={id}"),
            None => "forum/threads".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetThreadRequest {
    #[serde(skip)]
    pub thread_id: u64,
}

impl ApiRequest for GetThreadRequest {
    type Response = Envelope<ThreadPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("forum/threads/{}", self.thread_id)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadRequest {
    pub category_id: u64,
    pub title: String,
    pub content: String,
}

impl ApiRequest for CreateThreadRequest {
    type Response = Envelope<ThreadPayload>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "forum/threads".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPostsRequest {
    #[serde(skip)]
    pub thread_id: u64,
}

impl ApiRequest for ListPostsRequest {
    type Response = Envelope<PostsPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("forum/threads/{}/posts", self.thread_id)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub thread_id: u64,
    pub content: String,
}

impl ApiRequest for CreatePostRequest {
    type Response = Envelope<PostPayload>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "forum/posts".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddReactionRequest {
    #[serde(skip)]
    pub post_id: u64,
    pub emoji: String,
}

impl ApiRequest for AddReactionRequest {
    type Response = Envelope<ReactionsPayload>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("forum/posts/{}/reactions", self.post_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListReactionsRequest {
    #[serde(skip)]
    pub post_id: u64,
}

impl ApiRequest for ListReactionsRequest {
    type Response = Envelope<ReactionsPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("forum/posts/{}/reactions", self.post_id)
    }
}

// =========================================================
// Administration
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListCodesRequest;

impl ApiRequest for ListCodesRequest {
    type Response = Envelope<CodesPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "admin/codes".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeRequest {
    pub expires_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
}

impl ApiRequest for GenerateCodeRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "admin/codes/generate".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteCodeRequest {
    #[serde(skip)]
    pub code: String,
}

impl ApiRequest for DeleteCodeRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("admin/codes/{}", encode_path_segment(&self.code))
    }

    fn has_body(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BanUserRequest {
    #[serde(skip)]
    pub uid: u64,
    pub reason: String,
    pub banned_by: u64,
}

impl ApiRequest for BanUserRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("admin/users/{}/ban", self.uid)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnbanUserRequest {
    #[serde(skip)]
    pub uid: u64,
}

impl ApiRequest for UnbanUserRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("admin/users/{}/unban", self.uid)
    }

    fn has_body(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeRankRequest {
    #[serde(skip)]
    pub uid: u64,
    pub badge: Role,
}

impl ApiRequest for ChangeRankRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("admin/users/{}/rank", self.uid)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    #[serde(rename = "type")]
    pub target: ReportTarget,
    pub target_id: u64,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApiRequest for CreateReportRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "admin/reports".to_string()
    }
}

/// Report listing; both filters travel in the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListReportsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub target: Option<ReportTarget>,
}

impl ApiRequest for ListReportsRequest {
    type Response = Envelope<ReportsPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("admin/reports?{query}"),
            _ => "admin/reports".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateReportRequest {
    #[serde(skip)]
    pub report_id: u64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl ApiRequest for UpdateReportRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("admin/reports/{}", self.report_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminStatsRequest;

impl ApiRequest for AdminStatsRequest {
    type Response = Envelope<StatsPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "admin/stats".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListEventsRequest;

impl ApiRequest for ListEventsRequest {
    type Response = Envelope<EventsPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "admin/events".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddInventoryItemRequest {
    #[serde(skip)]
    pub uid: u64,
    pub item_type: ItemKind,
    pub item_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
}

impl ApiRequest for AddInventoryItemRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("admin/users/{}/inventory", self.uid)
    }
}

// =========================================================
// Storefront, server status, chat
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListSoftwareRequest;

impl ApiRequest for ListSoftwareRequest {
    type Response = Envelope<SoftwarePayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "software".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub user_id: u64,
    pub software_id: u64,
    pub payment_method: PaymentMethod,
}

impl ApiRequest for CreatePurchaseRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "purchases".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPurchasesRequest {
    #[serde(skip)]
    pub user_id: u64,
}

impl ApiRequest for ListPurchasesRequest {
    type Response = Envelope<PurchasesPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("purchases/user/{}", self.user_id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerStatusRequest;

impl ApiRequest for ServerStatusRequest {
    type Response = Envelope<ServerPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "server-status".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListChatRequest;

impl ApiRequest for ListChatRequest {
    type Response = Envelope<ChatPayload>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "chat/messages".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostChatRequest {
    pub content: String,
}

impl ApiRequest for PostChatRequest {
    type Response = Envelope<Ack>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "chat/messages".to_string()
    }
}

// =========================================================
// Helpers
// =========================================================

/// Percent-encodes everything outside the RFC 3986 unreserved set.
pub fn encode_path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_parameters_stay_out_of_the_body() {
        let req = BanUserRequest {
            uid: 42,
            reason: "cheating".into(),
            banned_by: 1,
        };
        assert_eq!(req.path(), "admin/users/42/ban");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"reason": "cheating", "bannedBy": 1})
        );
    }

    #[test]
    fn test_body_rules_follow_method_and_overrides() {
        assert!(!ListUsersRequest.has_body());
        assert!(LoginRequest { email: String::new(), password: String::new() }.has_body());
        assert!(!UnbanUserRequest { uid: 1 }.has_body());
        assert!(!MarkNotificationReadRequest { notification_id: 1 }.has_body());
    }

    #[test]
    fn test_thread_listing_filters_by_category() {
        assert_eq!(ListThreadsRequest { category_id: None }.path(), "forum/threads");
        assert_eq!(
            ListThreadsRequest { category_id: Some(3) }.path(),
            "forum/threads?categoryId=3"
        );
    }

    #[test]
    fn test_report_listing_builds_query_string() {
        assert_eq!(ListReportsRequest::default().path(), "admin/reports");
        let req = ListReportsRequest {
            status: Some("pending review".into()),
            target: Some(ReportTarget::Post),
        };
        assert_eq!(req.path(), "admin/reports?status=pending+review&type=post");
    }

    #[test]
    fn test_invitation_codes_are_escaped_in_paths() {
        let req = DeleteCodeRequest {
            code: "WAVE/2025 #1".into(),
        };
        assert_eq!(req.path(), "admin/codes/WAVE%2F2025%20%231");
    }

    #[test]
    fn test_envelope_surfaces_backend_message_on_failure() {
        let ok: Envelope<UsersPayload> =
            serde_json::from_value(json!({"success": true, "users": []})).unwrap();
        assert!(ok.into_result().unwrap().users.is_empty());

        let rejected: Envelope<UsersPayload> =
            serde_json::from_value(json!({"success": false, "message": "Forbidden"})).unwrap();
        assert_eq!(rejected.into_result().unwrap_err(), "Forbidden");
    }

    #[test]
    fn test_register_request_uses_camel_case() {
        let req = RegisterRequest {
            email: "a@gmail.com".into(),
            username: "a".into(),
            password: "pw".into(),
            invitation_code: "ABC".into(),
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["invitationCode"], "ABC");
    }
}
