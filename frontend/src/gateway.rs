//! HTTP gateway.
//!
//! Every backend call goes through [`Gateway`]: it joins the endpoint to the
//! API base, injects the bearer token, and turns non-2xx answers into a
//! [`RequestError`] carrying the backend's message. The concrete HTTP stack
//! and token storage sit behind [`Transport`] and [`TokenStore`] so the
//! gateway runs the same in the browser and in tests.

use desync_shared::protocol::{ApiRequest, HttpMethod};
use desync_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::rc::Rc;

// =========================================================
// Errors
// =========================================================

/// Failure below HTTP: the request never produced a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("failed to build request: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to read response: {0}")]
    Body(String),
}

/// Why a gateway call failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestError {
    /// No response arrived.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Non-2xx status; `message` is the best human-readable text found.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        /// The error body when it was JSON.
        body: Option<Value>,
    },
    /// 2xx answer with `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// 2xx answer whose JSON did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport(_))
    }

    /// Text suitable for inline display: transport failures collapse to a
    /// generic network message, everything else keeps the backend's words.
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

// =========================================================
// Seams
// =========================================================

/// Outbound request as handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: &Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[inline]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform an HTTP exchange.
///
/// `?Send` because browser futures are not `Send`.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Durable home of the bearer token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

// =========================================================
// Gateway
// =========================================================

pub struct Gateway<T, S> {
    base_url: String,
    transport: T,
    tokens: S,
}

impl<T: Transport, S: TokenStore> Gateway<T, S> {
    pub fn new(base_url: impl Into<String>, transport: T, tokens: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    /// Absolute URL for `endpoint`.
    pub fn url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }

    /// Performs one call and returns the JSON body as-is.
    ///
    /// The body is not validated; an empty 2xx body yields `Value::Null`.
    pub async fn call(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&Value>,
    ) -> Result<Value, RequestError> {
        let mut req = HttpRequest::new(&self.url(endpoint), method)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
        if let Some(token) = self.tokens.load() {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        }
        if let Some(body) = body {
            req = req.with_body(body);
        }

        let resp = self.transport.send(req).await.map_err(|e| {
            tracing::error!(endpoint, error = %e, "API call failed");
            RequestError::from(e)
        })?;

        if !resp.ok() {
            let (message, body) = extract_error_message(resp.status, &resp.body);
            tracing::warn!(endpoint, status = resp.status, %message, "API error");
            return Err(RequestError::Status {
                status: resp.status,
                message,
                body,
            });
        }

        if resp.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&resp.body).map_err(|e| RequestError::Decode(e.to_string()))
    }

    /// Typed call: path, method and body come from the request type.
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, RequestError> {
        let body = if request.has_body() {
            Some(serde_json::to_value(request).map_err(|e| RequestError::Decode(e.to_string()))?)
        } else {
            None
        };
        let value = self.call(&request.path(), R::METHOD, body.as_ref()).await?;
        serde_json::from_value(value).map_err(|e| RequestError::Decode(e.to_string()))
    }
}

/// Joins base and endpoint with exactly one slash between them and collapses
/// repeated slashes in the endpoint.
pub fn join_url(base: &str, endpoint: &str) -> String {
    let base = base.trim_end_matches('/');
    let mut path = String::with_capacity(endpoint.len());
    for ch in endpoint.trim_start_matches('/').chars() {
        if ch == '/' && path.ends_with('/') {
            continue;
        }
        path.push(ch);
    }
    format!("{base}/{path}")
}

/// Message for a failed response: the JSON `message` field if the body is
/// JSON, the raw text otherwise, `API Error: <status>` as a last resort.
pub fn extract_error_message(status: u16, body: &str) -> (String, Option<Value>) {
    let generic = format!("API Error: {status}");
    match serde_json::from_str::<Value>(body) {
        Ok(json) => {
            let message = json
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or(generic);
            (message, Some(json))
        }
        Err(_) if !body.trim().is_empty() => (body.to_string(), None),
        Err(_) => (generic, None),
    }
}

// =========================================================
// Test doubles
// =========================================================

/// In-memory token store; clones share the same slot.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.save(token);
        store
    }

    pub fn current(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

/// Scripted transport keyed by `METHOD url`; unknown routes answer 404 and
/// routes registered as failing produce a transport error.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Rc<RefCell<HashMap<String, Result<HttpResponse, TransportError>>>>,
    pub requests: Rc<RefCell<Vec<HttpRequest>>>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: HttpMethod, url: &str, status: u16, body: Value) {
        self.respond_raw(method, url, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses.borrow_mut().insert(
            format!("{} {}", method.as_str(), url),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn fail(&self, method: HttpMethod, url: &str) {
        self.responses.borrow_mut().insert(
            format!("{} {}", method.as_str(), url),
            Err(TransportError::Network("connection refused".into())),
        );
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let key = format!("{} {}", req.method.as_str(), req.url);
        self.requests.borrow_mut().push(req);
        self.responses
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| {
                Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desync_shared::protocol::ListUsersRequest;
    use serde_json::json;

    const BASE: &str = "http://api.test/api";

    fn gateway(
        transport: &MockTransport,
        tokens: &MemoryTokenStore,
    ) -> Gateway<MockTransport, MemoryTokenStore> {
        Gateway::new(BASE, transport.clone(), tokens.clone())
    }

    #[test]
    fn test_join_url_normalises_slashes() {
        assert_eq!(join_url(BASE, "users"), "http://api.test/api/users");
        assert_eq!(join_url("http://api.test/api/", "/users"), "http://api.test/api/users");
        assert_eq!(join_url(BASE, "forum//threads///7"), "http://api.test/api/forum/threads/7");
    }

    #[tokio::test]
    async fn test_attaches_bearer_token_and_json_headers() {
        let transport = MockTransport::new();
        let tokens = MemoryTokenStore::with_token("abc123");
        transport.respond(HttpMethod::Post, &format!("{BASE}/forum/posts"), 200, json!({"success": true}));

        let body = json!({"threadId": 1, "content": "hello there"});
        gateway(&transport, &tokens)
            .call("forum/posts", HttpMethod::Post, Some(&body))
            .await
            .unwrap();

        let requests = transport.requests.borrow();
        let sent = &requests[0];
        assert_eq!(sent.header("authorization"), Some("Bearer abc123"));
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.body.as_deref(), Some(body.to_string().as_str()));
    }

    #[tokio::test]
    async fn test_omits_authorization_without_token() {
        let transport = MockTransport::new();
        let tokens = MemoryTokenStore::default();
        transport.respond(HttpMethod::Get, &format!("{BASE}/software"), 200, json!({}));

        gateway(&transport, &tokens)
            .call("software", HttpMethod::Get, None)
            .await
            .unwrap();

        assert_eq!(transport.requests.borrow()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_conflict_carries_backend_message_verbatim() {
        let transport = MockTransport::new();
        let tokens = MemoryTokenStore::default();
        transport.respond(
            HttpMethod::Post,
            &format!("{BASE}/auth/register"),
            409,
            json!({"message": "Email or username already exists"}),
        );

        let err = gateway(&transport, &tokens)
            .call("auth/register", HttpMethod::Post, Some(&json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "Email or username already exists");
        assert_eq!(err.user_message(), "Email or username already exists");
    }

    #[tokio::test]
    async fn test_falls_back_to_raw_text_then_status() {
        let transport = MockTransport::new();
        let tokens = MemoryTokenStore::default();
        transport.respond_raw(HttpMethod::Get, &format!("{BASE}/a"), 502, "Bad Gateway");
        transport.respond_raw(HttpMethod::Get, &format!("{BASE}/b"), 500, "");
        transport.respond(HttpMethod::Get, &format!("{BASE}/c"), 400, json!({"error": "x"}));
        let gw = gateway(&transport, &tokens);

        let a = gw.call("a", HttpMethod::Get, None).await.unwrap_err();
        let b = gw.call("b", HttpMethod::Get, None).await.unwrap_err();
        let c = gw.call("c", HttpMethod::Get, None).await.unwrap_err();

        assert_eq!(a.to_string(), "Bad Gateway");
        assert_eq!(b.to_string(), "API Error: 500");
        assert_eq!(c.to_string(), "API Error: 400");
    }

    #[tokio::test]
    async fn test_transport_failures_surface_as_network_errors() {
        let transport = MockTransport::new();
        let tokens = MemoryTokenStore::default();
        transport.fail(HttpMethod::Get, &format!("{BASE}/users"));

        let err = gateway(&transport, &tokens)
            .call("users", HttpMethod::Get, None)
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_success_returns_json_unvalidated() {
        let transport = MockTransport::new();
        let tokens = MemoryTokenStore::default();
        transport.respond(HttpMethod::Get, &format!("{BASE}/odd"), 200, json!([1, "two"]));
        transport.respond_raw(HttpMethod::Delete, &format!("{BASE}/gone"), 204, "");
        let gw = gateway(&transport, &tokens);

        assert_eq!(gw.call("odd", HttpMethod::Get, None).await.unwrap(), json!([1, "two"]));
        assert_eq!(gw.call("gone", HttpMethod::Delete, None).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_typed_send_decodes_envelope() {
        let transport = MockTransport::new();
        let tokens = MemoryTokenStore::default();
        transport.respond(
            HttpMethod::Get,
            &format!("{BASE}/users"),
            200,
            json!({"success": true, "users": [{"uid": 1, "email": "a@gmail.com", "username": "a", "badge": "Owner"}]}),
        );

        let envelope = gateway(&transport, &tokens).send(&ListUsersRequest).await.unwrap();
        let users = envelope.into_result().unwrap().users;
        assert_eq!(users.len(), 1);
        assert_eq!(transport.requests.borrow()[0].body, None);
    }
}
