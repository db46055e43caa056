//! HTTP client implementing the authenticated-request lifecycle.
//!
//! Every call goes through [`ApiClient::request`]: an access token, when
//! present, is attached as a bearer credential; a 401 triggers one token
//! refresh and one transparent resend; every failure is normalized into an
//! [`AppError`] kind before it leaves this module.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::session::SessionStore;

/// One outbound call. `retried` caps the lifecycle at a single transparent
/// resend after a refresh, so an expired refresh token cannot loop.
struct RequestDescriptor {
    method: Method,
    path: String,
    body: Option<Value>,
    retried: bool,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    #[serde(rename = "refreshToken")]
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// Serialize a request payload once, so a retried request resends the exact
/// same JSON.
pub fn json_body<B: Serialize + ?Sized>(body: &B) -> AppResult<Value> {
    serde_json::to_value(body).map_err(|e| AppError::RequestSetup(e.to_string()))
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::RequestSetup(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> AppResult<T> {
        self.request(Method::POST, path, body).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> AppResult<T> {
        self.request(Method::PUT, path, body).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> AppResult<T> {
        self.request(Method::PATCH, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.request(Method::DELETE, path, None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> AppResult<T> {
        let mut descriptor = RequestDescriptor {
            method,
            path: path.to_string(),
            body,
            retried: false,
        };

        loop {
            let response = self.send(&descriptor).await?;
            let status = response.status();

            if status.is_success() {
                return Self::decode(response).await;
            }

            if status == StatusCode::UNAUTHORIZED && !descriptor.retried {
                debug!(
                    "401 on {} {}, attempting token refresh",
                    descriptor.method, descriptor.path
                );
                if self.refresh_access_token().await.is_some() {
                    // The new token is already persisted; the resend picks
                    // it up at attach time.
                    descriptor.retried = true;
                    continue;
                }
                // Refresh cleared the session; surface the original failure.
                return Err(Self::status_error(response).await);
            }

            if status == StatusCode::UNAUTHORIZED {
                // The retried request came back 401 as well. No second
                // refresh; the session is gone.
                self.session.clear();
            }

            return Err(Self::status_error(response).await);
        }
    }

    /// Build and send one request, attaching the bearer credential iff an
    /// access token is present at call time.
    async fn send(&self, descriptor: &RequestDescriptor) -> AppResult<reqwest::Response> {
        let mut request = self
            .http
            .request(descriptor.method.clone(), self.url(&descriptor.path));

        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(ref body) = descriptor.body {
            request = request.json(body);
        }

        request.send().await.map_err(normalize_transport_error)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// The exchange call is unauthenticated and never retried. Returns the
    /// new access token after persisting it, or `None` after clearing the
    /// session on any failure. The refresh token itself is not rotated.
    pub async fn refresh_access_token(&self) -> Option<String> {
        let refresh_token = match self.session.refresh_token() {
            Some(token) => token,
            None => {
                self.session.clear();
                return None;
            }
        };

        let result = self
            .http
            .post(self.url("/token/refresh"))
            .json(&RefreshRequest {
                refresh_token: &refresh_token,
            })
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("Token refresh rejected with status {}", response.status());
                self.session.clear();
                return None;
            }
            Err(e) => {
                warn!("Failed to refresh access token: {}", e);
                self.session.clear();
                return None;
            }
        };

        match response.json::<RefreshResponse>().await {
            Ok(body) => {
                self.session.save_tokens(&body.access_token, &refresh_token);
                Some(body.access_token)
            }
            Err(e) => {
                warn!("Malformed token refresh response: {}", e);
                self.session.clear();
                None
            }
        }
    }

    /// Strip the transport envelope: return only the decoded payload. An
    /// empty body (204) decodes as JSON `null`, which satisfies `()`.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let bytes = response.bytes().await.map_err(normalize_transport_error)?;
        let raw: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(raw)
            .map_err(|e| AppError::Unexpected(format!("failed to decode response body: {}", e)))
    }

    /// Normalize a non-2xx response, preferring the backend-provided
    /// message when the body carries one.
    async fn status_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let fallback = status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string();
        let message = match response.json::<Value>().await {
            Ok(body) => ["message", "error", "detail"]
                .iter()
                .find_map(|key| body.get(key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or(fallback),
            Err(_) => fallback,
        };
        AppError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

fn normalize_transport_error(err: reqwest::Error) -> AppError {
    if err.is_builder() {
        AppError::RequestSetup(err.to_string())
    } else {
        AppError::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;

    fn client(base_url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_ms: 5000,
        };
        let session = Arc::new(SessionStore::in_memory(&SessionConfig::default()));
        ApiClient::new(&config, session).unwrap()
    }

    #[test]
    fn url_joins_base_and_path() {
        let client = client("http://localhost:8000");
        assert_eq!(client.url("/api/authors"), "http://localhost:8000/api/authors");
        assert_eq!(client.url("api/authors"), "http://localhost:8000/api/authors");
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        let client = client("http://localhost:8000/");
        assert_eq!(client.url("/token/refresh"), "http://localhost:8000/token/refresh");
    }
}
