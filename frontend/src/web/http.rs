//! `fetch`-backed transport.
//!
//! Thin wrapper over `web_sys::fetch`; the gateway sees it only through the
//! [`Transport`] trait.

use crate::gateway::{HttpRequest, HttpResponse, Transport, TransportError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// Browser transport. Stateless; every call builds a fresh `Request`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    /// Builds a `web_sys::Request` from the gateway's request.
    ///
    /// # Errors
    /// `TransportError::Build` when headers or the request cannot be created.
    fn build(req: &HttpRequest) -> Result<Request, TransportError> {
        let headers = Headers::new()
            .map_err(|e| TransportError::Build(format!("cannot create headers: {e:?}")))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| TransportError::Build(format!("cannot set header {key}: {e:?}")))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| TransportError::Build(format!("{e:?}")))
    }

    /// Reads the whole body as text.
    ///
    /// # Errors
    /// `TransportError::Body` when the body stream fails or is not text.
    async fn read_text(response: &Response) -> Result<String, TransportError> {
        let promise = response
            .text()
            .map_err(|e| TransportError::Body(format!("{e:?}")))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|e| TransportError::Body(format!("{e:?}")))?;
        text.as_string()
            .ok_or_else(|| TransportError::Body("body is not text".to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    /// Sends `req` with `window.fetch`.
    ///
    /// # Returns
    /// The status and raw body for every answer the server gives, 2xx or not;
    /// status handling belongs to the gateway.
    ///
    /// # Errors
    /// `TransportError::Network` when fetch rejects (offline, CORS, no window).
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = Self::build(&req)?;
        let window =
            web_sys::window().ok_or_else(|| TransportError::Network("no window".to_string()))?;

        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| TransportError::Network(format!("{e:?}")))?;
        let response: Response = value
            .dyn_into()
            .map_err(|e| TransportError::Body(format!("not a Response: {e:?}")))?;

        Ok(HttpResponse {
            status: response.status(),
            body: Self::read_text(&response).await?,
        })
    }
}
