//! Login, logout and the current user.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginResponse, User};
use crate::token::TokenPair;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// POST /auth/login/json -> { access_token, refresh_token, token_type, user }
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp: LoginResponse = self.client.post_public("/auth/login/json", &body).await?;
        if !resp.token_type.eq_ignore_ascii_case("bearer") {
            return Err(ApiError::Decode(format!("unsupported token type {}", resp.token_type)));
        }
        self.client
            .tokens()
            .set(&TokenPair::new(resp.access_token, resp.refresh_token))?;
        log::info!("[salon_core] logged in user_id={}", resp.user.id);
        Ok(resp.user)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        log::info!("[salon_core] logout");
        self.client.tokens().clear()
    }

    pub fn is_logged_in(&self) -> bool {
        self.client.tokens().get().ok().flatten().is_some()
    }

    /// GET /auth/me
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get("/auth/me").await
    }
}
