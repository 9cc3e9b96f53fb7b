//! HTTP client for the backend API. Attaches the bearer token from the injected
//! `TokenProvider` and, on a 401, refreshes the token once and retries once.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::token::{TokenPair, TokenProvider};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type Query = Vec<(String, String)>;

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenProvider>,
    // Serializes refreshes so concurrent 401s rotate the token once.
    refresh_lock: tokio::sync::Mutex<()>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("http client: {}", e)))?;
        Ok(Self {
            http,
            config,
            tokens,
            refresh_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &Arc<dyn TokenProvider> {
        &self.tokens
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, &[], None).await
    }

    pub async fn get_query<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T, ApiError> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, &[], Some(&body)).await
    }

    /// POST without a body, for action endpoints (`/toggle-paid`, `/read`).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::POST, path, &[], None).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, path, &[], Some(&body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send::<serde::de::IgnoredAny>(Method::DELETE, path, &[], None)
            .await
            .map(|_| ())
    }

    /// Unauthenticated POST (login). A 401 here means bad credentials, not an expired session.
    pub async fn post_public<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("[salon_core] POST {} (public)", url);
        let resp = self.http.post(&url).json(body).send().await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            let text = resp.text().await?;
            return Err(ApiError::Validation {
                status: 401,
                detail: extract_detail(&text).unwrap_or_else(|| "Invalid credentials".to_string()),
            });
        }
        decode(resp).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let sent_with = self.tokens.get()?;
        log::debug!("[salon_core] {} {}", method, url);
        let resp = self
            .dispatch(method.clone(), &url, query, body, sent_with.as_ref())
            .await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return decode(resp).await;
        }

        log::warn!("[salon_core] {} {} -> 401, refreshing token", method, url);
        if !self.refresh(sent_with.as_ref()).await? {
            self.tokens.clear()?;
            return Err(ApiError::Unauthorized);
        }
        let retried_with = self.tokens.get()?;
        let resp = self
            .dispatch(method.clone(), &url, query, body, retried_with.as_ref())
            .await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            log::warn!("[salon_core] {} {} -> 401 after refresh, clearing session", method, url);
            self.tokens.clear()?;
            return Err(ApiError::Unauthorized);
        }
        decode(resp).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
        tokens: Option<&TokenPair>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut req = self.http.request(method, url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(t) = tokens {
            req = req.bearer_auth(&t.access_token);
        }
        if let Some(b) = body {
            req = req.json(b);
        }
        req.send().await.map_err(|e| {
            log::warn!("[salon_core] request to {} failed: {}", url, e);
            ApiError::Network(e.to_string())
        })
    }

    /// Returns Ok(true) when a usable access token is in the store afterwards.
    async fn refresh(&self, stale: Option<&TokenPair>) -> Result<bool, ApiError> {
        let _guard = self.refresh_lock.lock().await;
        let current = self.tokens.get()?;
        let current = match current {
            Some(c) => c,
            None => return Ok(false),
        };
        if stale.map(|s| s.access_token != current.access_token).unwrap_or(false) {
            // Another request already rotated the token while we waited.
            return Ok(true);
        }
        let refresh_token = match current.refresh_token.clone() {
            Some(r) => r,
            None => return Ok(false),
        };
        let url = self.url("/auth/refresh");
        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            log::warn!("[salon_core] token refresh rejected: {}", resp.status());
            return Ok(false);
        }
        let fresh: RefreshResponse = resp.json().await?;
        let pair = TokenPair::new(
            fresh.access_token,
            fresh.refresh_token.or(Some(refresh_token)),
        );
        self.tokens.set(&pair)?;
        log::debug!("[salon_core] token refreshed");
        Ok(true)
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(status_error(status, &text));
    }
    let text = if text.trim().is_empty() { "null" } else { text.as_str() };
    serde_json::from_str(text).map_err(ApiError::from)
}

fn status_error(status: StatusCode, body: &str) -> ApiError {
    let detail = extract_detail(body);
    match status.as_u16() {
        401 => ApiError::Unauthorized,
        404 => ApiError::NotFound(detail.unwrap_or_else(|| "Resource not found".to_string())),
        code @ 400..=499 => ApiError::Validation {
            status: code,
            detail: detail.unwrap_or_else(|| format!("Request rejected ({})", code)),
        },
        code => ApiError::Server {
            status: code,
            message: detail.unwrap_or_else(|| body.chars().take(200).collect()),
        },
    }
}

/// Pull the human message out of an error body: `{"detail": "..."}`, the list form
/// `{"detail": [{"msg": "..."}]}` used for field validation, or `{"error": "..."}`.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    match json.get("detail").or_else(|| json.get("error"))? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}
