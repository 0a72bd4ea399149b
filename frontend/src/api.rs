//! Typed Desync API client.
//!
//! One method per backend endpoint. `success: false` envelopes are turned
//! into [`RequestError::Rejected`] so views only deal with `Result`s.

use crate::gateway::{Gateway, RequestError, TokenStore, Transport};
use desync_shared::protocol::*;
use desync_shared::{
    AdminEvent, AdminStats, ChatMessage, ForumCategory, ForumPost, ForumThread, Identity,
    InvitationCode, InventoryItem, ItemKind, Notification, PaymentMethod, PrivateMessage,
    Purchase, ReactionMap, Report, ReportTarget, Role, ServerStatus, Software, Timestamp,
};
use std::rc::Rc;

pub struct DesyncApi<T, S> {
    gateway: Rc<Gateway<T, S>>,
}

impl<T, S> Clone for DesyncApi<T, S> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
        }
    }
}

impl<T: Transport, S: TokenStore> DesyncApi<T, S> {
    pub fn new(gateway: Gateway<T, S>) -> Self {
        Self {
            gateway: Rc::new(gateway),
        }
    }

    pub fn gateway(&self) -> &Gateway<T, S> {
        &self.gateway
    }

    async fn fetch<R: ApiRequest<Response = Envelope<P>>, P>(
        &self,
        request: &R,
    ) -> Result<P, RequestError>
    where
        P: serde::de::DeserializeOwned,
    {
        self.gateway
            .send(request)
            .await?
            .into_result()
            .map_err(RequestError::Rejected)
    }

    // --- Auth ---

    /// Raw auth answers are returned unwrapped; the session store interprets them.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, RequestError> {
        self.gateway
            .send(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, RequestError> {
        self.gateway.send(request).await
    }

    pub async fn verify_token(&self, token: &str) -> Result<AuthResponse, RequestError> {
        self.gateway
            .send(&VerifyTokenRequest {
                token: token.to_string(),
            })
            .await
    }

    // --- Users ---

    pub async fn users(&self) -> Result<Vec<Identity>, RequestError> {
        Ok(self.fetch(&ListUsersRequest).await?.users)
    }

    pub async fn user(&self, uid: u64) -> Result<Option<Identity>, RequestError> {
        Ok(self.fetch(&GetUserRequest { uid }).await?.user)
    }

    pub async fn update_profile(
        &self,
        uid: u64,
        username: &str,
        email: &str,
        about_me: &str,
    ) -> Result<Option<Identity>, RequestError> {
        let request = UpdateProfileRequest {
            uid,
            username: username.to_string(),
            email: email.to_string(),
            about_me: about_me.to_string(),
        };
        Ok(self.fetch(&request).await?.user)
    }

    pub async fn send_message(
        &self,
        to_uid: u64,
        subject: &str,
        content: &str,
    ) -> Result<(), RequestError> {
        let request = SendMessageRequest {
            to_uid,
            subject: subject.to_string(),
            content: content.to_string(),
        };
        self.fetch(&request).await.map(|_| ())
    }

    pub async fn messages(&self) -> Result<Vec<PrivateMessage>, RequestError> {
        Ok(self.fetch(&ListMessagesRequest).await?.messages)
    }

    pub async fn mark_message_read(&self, message_id: u64) -> Result<(), RequestError> {
        self.fetch(&MarkMessageReadRequest { message_id })
            .await
            .map(|_| ())
    }

    pub async fn notifications(&self) -> Result<Vec<Notification>, RequestError> {
        Ok(self.fetch(&ListNotificationsRequest).await?.notifications)
    }

    pub async fn mark_notification_read(&self, notification_id: u64) -> Result<(), RequestError> {
        self.fetch(&MarkNotificationReadRequest { notification_id })
            .await
            .map(|_| ())
    }

    pub async fn inventory(&self, uid: u64) -> Result<Vec<InventoryItem>, RequestError> {
        Ok(self.fetch(&GetInventoryRequest { uid }).await?.inventory)
    }

    // --- Forum ---

    pub async fn categories(&self) -> Result<Vec<ForumCategory>, RequestError> {
        Ok(self.fetch(&ListCategoriesRequest).await?.categories)
    }

    pub async fn threads(&self, category_id: Option<u64>) -> Result<Vec<ForumThread>, RequestError> {
        Ok(self.fetch(&ListThreadsRequest { category_id }).await?.threads)
    }

    pub async fn thread(&self, thread_id: u64) -> Result<Option<ForumThread>, RequestError> {
        Ok(self.fetch(&GetThreadRequest { thread_id }).await?.thread)
    }

    pub async fn create_thread(
        &self,
        category_id: u64,
        title: &str,
        content: &str,
    ) -> Result<Option<ForumThread>, RequestError> {
        let request = CreateThreadRequest {
            category_id,
            title: title.to_string(),
            content: content.to_string(),
        };
        Ok(self.fetch(&request).await?.thread)
    }

    pub async fn posts(&self, thread_id: u64) -> Result<Vec<ForumPost>, RequestError> {
        Ok(self.fetch(&ListPostsRequest { thread_id }).await?.posts)
    }

    pub async fn create_post(
        &self,
        thread_id: u64,
        content: &str,
    ) -> Result<Option<ForumPost>, RequestError> {
        let request = CreatePostRequest {
            thread_id,
            content: content.to_string(),
        };
        Ok(self.fetch(&request).await?.post)
    }

    pub async fn add_reaction(&self, post_id: u64, emoji: &str) -> Result<ReactionMap, RequestError> {
        let request = AddReactionRequest {
            post_id,
            emoji: emoji.to_string(),
        };
        Ok(self.fetch(&request).await?.reactions)
    }

    pub async fn reactions(&self, post_id: u64) -> Result<ReactionMap, RequestError> {
        Ok(self.fetch(&ListReactionsRequest { post_id }).await?.reactions)
    }

    pub async fn create_report(
        &self,
        target: ReportTarget,
        target_id: u64,
        reason: &str,
        description: Option<&str>,
    ) -> Result<(), RequestError> {
        let request = CreateReportRequest {
            target,
            target_id,
            reason: reason.to_string(),
            description: description.map(str::to_string),
        };
        self.fetch(&request).await.map(|_| ())
    }

    // --- Administration ---

    pub async fn codes(&self) -> Result<Vec<InvitationCode>, RequestError> {
        Ok(self.fetch(&ListCodesRequest).await?.codes)
    }

    pub async fn generate_code(
        &self,
        expires_at: Timestamp,
        max_uses: Option<u32>,
        custom_code: Option<String>,
    ) -> Result<(), RequestError> {
        let request = GenerateCodeRequest {
            expires_at,
            max_uses,
            custom_code,
        };
        self.fetch(&request).await.map(|_| ())
    }

    pub async fn delete_code(&self, code: &str) -> Result<(), RequestError> {
        self.fetch(&DeleteCodeRequest {
            code: code.to_string(),
        })
        .await
        .map(|_| ())
    }

    pub async fn ban_user(&self, uid: u64, reason: &str, banned_by: u64) -> Result<(), RequestError> {
        let request = BanUserRequest {
            uid,
            reason: reason.to_string(),
            banned_by,
        };
        self.fetch(&request).await.map(|_| ())
    }

    pub async fn unban_user(&self, uid: u64) -> Result<(), RequestError> {
        self.fetch(&UnbanUserRequest { uid }).await.map(|_| ())
    }

    pub async fn change_rank(&self, uid: u64, badge: Role) -> Result<(), RequestError> {
        self.fetch(&ChangeRankRequest { uid, badge })
            .await
            .map(|_| ())
    }

    pub async fn reports(&self, filter: &ListReportsRequest) -> Result<Vec<Report>, RequestError> {
        Ok(self.fetch(filter).await?.reports)
    }

    pub async fn update_report(
        &self,
        report_id: u64,
        status: &str,
        action: Option<&str>,
    ) -> Result<(), RequestError> {
        let request = UpdateReportRequest {
            report_id,
            status: status.to_string(),
            action: action.map(str::to_string),
        };
        self.fetch(&request).await.map(|_| ())
    }

    pub async fn admin_stats(&self) -> Result<Option<AdminStats>, RequestError> {
        Ok(self.fetch(&AdminStatsRequest).await?.stats)
    }

    pub async fn events(&self) -> Result<Vec<AdminEvent>, RequestError> {
        Ok(self.fetch(&ListEventsRequest).await?.events)
    }

    pub async fn add_inventory_item(
        &self,
        uid: u64,
        kind: ItemKind,
        name: &str,
        description: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<(), RequestError> {
        let request = AddInventoryItemRequest {
            uid,
            item_type: kind,
            item_name: name.to_string(),
            description: description.to_string(),
            expires_at,
        };
        self.fetch(&request).await.map(|_| ())
    }

    // --- Storefront ---

    pub async fn software(&self) -> Result<Vec<Software>, RequestError> {
        Ok(self.fetch(&ListSoftwareRequest).await?.software)
    }

    pub async fn create_purchase(
        &self,
        user_id: u64,
        software_id: u64,
        payment_method: PaymentMethod,
    ) -> Result<(), RequestError> {
        let request = CreatePurchaseRequest {
            user_id,
            software_id,
            payment_method,
        };
        self.fetch(&request).await.map(|_| ())
    }

    pub async fn purchases(&self, user_id: u64) -> Result<Vec<Purchase>, RequestError> {
        Ok(self.fetch(&ListPurchasesRequest { user_id }).await?.purchases)
    }

    // --- Live data ---

    pub async fn server_status(&self) -> Result<Option<ServerStatus>, RequestError> {
        Ok(self.fetch(&ServerStatusRequest).await?.server)
    }

    pub async fn chat_messages(&self) -> Result<Vec<ChatMessage>, RequestError> {
        Ok(self.fetch(&ListChatRequest).await?.messages)
    }

    pub async fn post_chat_message(&self, content: &str) -> Result<(), RequestError> {
        self.fetch(&PostChatRequest {
            content: content.to_string(),
        })
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MemoryTokenStore, MockTransport};
    use desync_shared::protocol::HttpMethod;
    use serde_json::json;

    const BASE: &str = "http://api.test/api";

    fn api(transport: &MockTransport) -> DesyncApi<MockTransport, MemoryTokenStore> {
        DesyncApi::new(Gateway::new(
            BASE,
            transport.clone(),
            MemoryTokenStore::with_token("tok"),
        ))
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_becomes_rejection() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Get,
            &format!("{BASE}/admin/stats"),
            200,
            json!({"success": false, "message": "Admins only"}),
        );

        let err = api(&transport).admin_stats().await.unwrap_err();
        assert_eq!(err, RequestError::Rejected("Admins only".into()));
    }

    #[tokio::test]
    async fn test_reactions_are_read_from_envelope() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            &format!("{BASE}/forum/posts/9/reactions"),
            200,
            json!({"success": true, "reactions": {"🔥": [1, 2], "👍": [3]}}),
        );

        let reactions = api(&transport).add_reaction(9, "🔥").await.unwrap();
        assert_eq!(reactions["🔥"], vec![1, 2]);

        let sent = transport.requests.borrow();
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"emoji":"🔥"}"#));
    }

    #[tokio::test]
    async fn test_bodyless_commands_send_no_payload() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Post,
            &format!("{BASE}/admin/users/5/unban"),
            200,
            json!({"success": true}),
        );

        api(&transport).unban_user(5).await.unwrap();
        assert_eq!(transport.requests.borrow()[0].body, None);
    }

    #[tokio::test]
    async fn test_chat_round_trip_uses_gateway_base() {
        let transport = MockTransport::new();
        transport.respond(
            HttpMethod::Get,
            &format!("{BASE}/chat/messages"),
            200,
            json!({"success": true, "messages": [
                {"id": 1, "userUid": 2, "username": "kai", "userBadge": "Known", "content": "gg", "createdAt": "2025-01-01T10:00:00Z"}
            ]}),
        );

        let messages = api(&transport).chat_messages().await.unwrap();
        assert_eq!(messages[0].username, "kai");
        assert_eq!(messages[0].user_badge, Role::Known);
        assert_eq!(
            transport.requests.borrow()[0].header("Authorization"),
            Some("Bearer tok")
        );
    }
}
