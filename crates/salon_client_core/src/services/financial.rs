//! `/financial` endpoints: transactions, totals, accounts and categories.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::ids::TransactionId;
use crate::models::{
    Account, Category, Transaction, TransactionPage, TransactionPayload, TransactionTotals,
};
use crate::transactions::{filter_params, list_params, Pagination, TransactionFilters};
use serde::Deserialize;
use std::sync::Arc;

/// The list endpoint answers with a bare array; newer deployments wrap it with a count.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Counted { items: Vec<Transaction>, total: u64 },
    Plain(Vec<Transaction>),
}

#[derive(Clone)]
pub struct FinancialService {
    client: Arc<ApiClient>,
}

impl FinancialService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// GET /financial/transactions?skip=&limit=&<filters>
    pub async fn list_transactions(
        &self,
        filters: &TransactionFilters,
        pagination: &Pagination,
    ) -> Result<TransactionPage, ApiError> {
        let query = list_params(filters, pagination);
        let resp: ListResponse = self
            .client
            .get_query("/financial/transactions", &query)
            .await?;
        Ok(match resp {
            ListResponse::Counted { items, total } => TransactionPage {
                items,
                total: Some(total),
            },
            ListResponse::Plain(items) => TransactionPage { items, total: None },
        })
    }

    /// GET /financial/transactions/totals?<filters> (same filter params as the list)
    pub async fn totals(&self, filters: &TransactionFilters) -> Result<TransactionTotals, ApiError> {
        let query = filter_params(filters);
        self.client
            .get_query("/financial/transactions/totals", &query)
            .await
    }

    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, ApiError> {
        self.client
            .get(&format!("/financial/transactions/{}", id))
            .await
    }

    pub async fn create_transaction(&self, payload: &TransactionPayload) -> Result<Transaction, ApiError> {
        if payload.value <= rust_decimal::Decimal::ZERO {
            return Err(ApiError::InvalidInput("Valor deve ser maior que zero".to_string()));
        }
        self.client.post("/financial/transactions", payload).await
    }

    pub async fn update_transaction(
        &self,
        id: TransactionId,
        payload: &TransactionPayload,
    ) -> Result<Transaction, ApiError> {
        if payload.value <= rust_decimal::Decimal::ZERO {
            return Err(ApiError::InvalidInput("Valor deve ser maior que zero".to_string()));
        }
        self.client
            .put(&format!("/financial/transactions/{}", id), payload)
            .await
    }

    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/financial/transactions/{}", id))
            .await
    }

    /// Flips `is_paid` server-side and returns the updated row.
    pub async fn toggle_paid(&self, id: TransactionId) -> Result<Transaction, ApiError> {
        self.client
            .post_empty(&format!("/financial/transactions/{}/toggle-paid", id))
            .await
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.client.get("/financial/accounts").await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client.get("/financial/categories").await
    }
}
