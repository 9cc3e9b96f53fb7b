use crate::client::ApiClient;
use crate::error::ApiError;
use crate::ids::EvaluationId;
use crate::models::Evaluation;
use crate::transactions::Pagination;
use std::sync::Arc;

#[derive(Clone)]
pub struct EvaluationService {
    client: Arc<ApiClient>,
}

impl EvaluationService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, pagination: &Pagination) -> Result<Vec<Evaluation>, ApiError> {
        let q = vec![
            ("skip".to_string(), pagination.skip().to_string()),
            ("limit".to_string(), pagination.limit().to_string()),
        ];
        self.client.get_query("/evaluations", &q).await
    }

    pub async fn reply(&self, id: EvaluationId, reply: &str) -> Result<Evaluation, ApiError> {
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ApiError::InvalidInput("Resposta não pode ser vazia".to_string()));
        }
        self.client
            .post(&format!("/evaluations/{}/reply", id), &serde_json::json!({ "reply": reply }))
            .await
    }
}
