use crate::client::ApiClient;
use crate::error::ApiError;
use crate::ids::ClientId;
use crate::models::{CashbackBalance, CashbackEntry, CashbackSettings};
use std::sync::Arc;

/// Read side of cashback; accrual and redemption rules run on the server.
#[derive(Clone)]
pub struct CashbackService {
    client: Arc<ApiClient>,
}

impl CashbackService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn balance(&self, client_id: ClientId) -> Result<CashbackBalance, ApiError> {
        self.client
            .get(&format!("/cashback/clients/{}/balance", client_id))
            .await
    }

    pub async fn history(&self, client_id: ClientId) -> Result<Vec<CashbackEntry>, ApiError> {
        self.client
            .get(&format!("/cashback/clients/{}/history", client_id))
            .await
    }

    pub async fn settings(&self) -> Result<CashbackSettings, ApiError> {
        self.client.get("/cashback/settings").await
    }

    pub async fn update_settings(&self, settings: &CashbackSettings) -> Result<CashbackSettings, ApiError> {
        if settings.percentage < rust_decimal::Decimal::ZERO
            || settings.percentage > rust_decimal::Decimal::ONE_HUNDRED
        {
            return Err(ApiError::InvalidInput(
                "Percentual deve estar entre 0 e 100".to_string(),
            ));
        }
        self.client.put("/cashback/settings", settings).await
    }
}
