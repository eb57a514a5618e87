//! Authenticated fetch: the single path every API call takes.
//!
//! [`ApiClient::fetch`] attaches the stored bearer token, resolves the target
//! against the configured base address, sends the request once, and turns a
//! 401 into a cleared session plus a [`SessionEvent::Invalidated`] event.
//!
//! [`SessionEvent::Invalidated`]: crate::navigation::SessionEvent::Invalidated

pub mod auth;
pub mod format;
pub mod resources;

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::navigation::SessionEvents;
use crate::session::TokenStore;

/// Method, headers and optional body of one outbound call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the body and mark it as JSON
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> ClientResult<Self> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    login_path: String,
    request_logging: bool,
    store: Arc<dyn TokenStore>,
    events: SessionEvents,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>, events: SessionEvents) -> Self {
        Self::with_http_client(reqwest::Client::new(), config, store, events)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        config: &ClientConfig,
        store: Arc<dyn TokenStore>,
        events: SessionEvents,
    ) -> Self {
        Self {
            http,
            base_url: config.api.base_url.clone(),
            login_path: config.routes.login_path.clone(),
            request_logging: config.api.enable_request_logging,
            store,
            events,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Absolute `http`/`https` targets are used verbatim, anything else is
    /// appended to the base address.
    pub fn resolve_url(&self, target: &str) -> ClientResult<String> {
        if is_absolute_http(target) {
            return Ok(target.to_string());
        }

        let resolved = if target.is_empty() || target.starts_with('/') || target.starts_with('?') {
            format!("{}{}", self.base_url, target)
        } else {
            format!("{}/{}", self.base_url, target)
        };

        url::Url::parse(&resolved)
            .map_err(|e| ClientError::invalid_target(target, e.to_string()))?;
        Ok(resolved)
    }

    /// Headers actually sent: caller headers plus the bearer token when one is stored
    fn authorize(&self, mut headers: HeaderMap) -> ClientResult<HeaderMap> {
        if let Some(token) = self.store.get_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::validation("Stored token is not a valid header value"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    pub async fn fetch(&self, target: &str, options: RequestOptions) -> ClientResult<Response> {
        let url = self.resolve_url(target)?;
        let headers = self.authorize(options.headers)?;
        let method = options.method;

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        if self.request_logging {
            tracing::debug!("{} {}", method, url);
        }

        let response = request.send().await?;

        if self.request_logging {
            tracing::debug!("{} {} -> {}", method, url, response.status());
        }

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!("session invalidated by {} {}", method, url);
            self.store.clear_token();
            self.events.invalidate(&self.login_path);
            return Err(ClientError::SessionExpired);
        }

        Ok(response)
    }

    pub async fn get(&self, target: &str) -> ClientResult<Response> {
        self.fetch(target, RequestOptions::get()).await
    }

    pub async fn delete(&self, target: &str) -> ClientResult<Response> {
        self.fetch(target, RequestOptions::new(Method::DELETE)).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(&self, target: &str, body: &T) -> ClientResult<Response> {
        self.fetch(target, RequestOptions::new(Method::POST).json(body)?).await
    }

    pub async fn put_json<T: Serialize + ?Sized>(&self, target: &str, body: &T) -> ClientResult<Response> {
        self.fetch(target, RequestOptions::new(Method::PUT).json(body)?).await
    }

    pub async fn patch_json<T: Serialize + ?Sized>(&self, target: &str, body: &T) -> ClientResult<Response> {
        self.fetch(target, RequestOptions::new(Method::PATCH).json(body)?).await
    }
}

fn is_absolute_http(target: &str) -> bool {
    match url::Url::parse(target) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
