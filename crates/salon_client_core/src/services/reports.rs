use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::FinancialReport;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReportService {
    client: Arc<ApiClient>,
}

impl ReportService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn financial_summary(&self, start: NaiveDate, end: NaiveDate) -> Result<FinancialReport, ApiError> {
        if end < start {
            return Err(ApiError::InvalidInput(
                "Data final deve ser posterior à data inicial".to_string(),
            ));
        }
        let q = vec![
            ("start_date".to_string(), start.to_string()),
            ("end_date".to_string(), end.to_string()),
        ];
        self.client.get_query("/reports/financial", &q).await
    }
}
