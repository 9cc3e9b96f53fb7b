use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::ids::{CommissionId, ProfessionalId};
use crate::models::Commission;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommissionService {
    client: Arc<ApiClient>,
}

impl CommissionService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Commission amounts are calculated server-side; this lists them for a period.
    pub async fn list(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        professional_id: Option<ProfessionalId>,
    ) -> Result<Vec<Commission>, ApiError> {
        let mut q: Query = vec![
            ("start_date".to_string(), start.to_string()),
            ("end_date".to_string(), end.to_string()),
        ];
        if let Some(p) = professional_id {
            q.push(("professional_id".to_string(), p.to_string()));
        }
        self.client.get_query("/commissions", &q).await
    }

    pub async fn mark_paid(&self, id: CommissionId) -> Result<Commission, ApiError> {
        self.client
            .post_empty(&format!("/commissions/{}/pay", id))
            .await
    }
}

/// Sum of commissions still owed to professionals.
pub fn pending_total(commissions: &[Commission]) -> Decimal {
    commissions
        .iter()
        .filter(|c| !c.is_paid)
        .map(|c| c.value)
        .sum()
}
