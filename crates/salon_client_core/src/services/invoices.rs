use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::ids::InvoiceId;
use crate::models::{Invoice, InvoiceStatus, IssueInvoiceRequest};
use crate::transactions::Pagination;
use std::sync::Arc;

#[derive(Clone)]
pub struct InvoiceService {
    client: Arc<ApiClient>,
}

impl InvoiceService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, pagination: &Pagination, status: Option<InvoiceStatus>) -> Result<Vec<Invoice>, ApiError> {
        let mut q: Query = vec![
            ("skip".to_string(), pagination.skip().to_string()),
            ("limit".to_string(), pagination.limit().to_string()),
        ];
        if let Some(s) = status {
            let s = serde_json::to_value(s)?;
            if let Some(s) = s.as_str() {
                q.push(("status".to_string(), s.to_string()));
            }
        }
        self.client.get_query("/invoices", &q).await
    }

    pub async fn get(&self, id: InvoiceId) -> Result<Invoice, ApiError> {
        self.client.get(&format!("/invoices/{}", id)).await
    }

    /// Issuance itself (tax document generation) happens server-side; this only requests it.
    pub async fn issue(&self, request: &IssueInvoiceRequest) -> Result<Invoice, ApiError> {
        self.client.post("/invoices/issue", request).await
    }

    pub async fn cancel(&self, id: InvoiceId, reason: &str) -> Result<Invoice, ApiError> {
        if reason.trim().len() < 15 {
            return Err(ApiError::InvalidInput(
                "Justificativa deve ter pelo menos 15 caracteres".to_string(),
            ));
        }
        let body = serde_json::json!({ "reason": reason.trim() });
        self.client
            .post(&format!("/invoices/{}/cancel", id), &body)
            .await
    }
}
