use crate::client::ApiClient;
use crate::error::ApiError;
use crate::ids::GoalId;
use crate::models::{Goal, GoalPayload};
use std::sync::Arc;

#[derive(Clone)]
pub struct GoalService {
    client: Arc<ApiClient>,
}

impl GoalService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn check(payload: &GoalPayload) -> Result<(), ApiError> {
        if payload.period_end < payload.period_start {
            return Err(ApiError::InvalidInput(
                "Data final deve ser posterior à data inicial".to_string(),
            ));
        }
        if payload.target_value <= rust_decimal::Decimal::ZERO {
            return Err(ApiError::InvalidInput("Meta deve ser maior que zero".to_string()));
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Goal>, ApiError> {
        self.client.get("/goals").await
    }

    pub async fn create(&self, payload: &GoalPayload) -> Result<Goal, ApiError> {
        Self::check(payload)?;
        self.client.post("/goals", payload).await
    }

    pub async fn update(&self, id: GoalId, payload: &GoalPayload) -> Result<Goal, ApiError> {
        Self::check(payload)?;
        self.client.put(&format!("/goals/{}", id), payload).await
    }

    pub async fn delete(&self, id: GoalId) -> Result<(), ApiError> {
        self.client.delete(&format!("/goals/{}", id)).await
    }
}
