use crate::client::{ApiClient, Query};
use crate::error::ApiError;
use crate::ids::{AppointmentId, ProfessionalId};
use crate::models::{Appointment, AppointmentPayload};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub professional_id: Option<ProfessionalId>,
}

impl AppointmentQuery {
    pub fn for_day(day: NaiveDate) -> Self {
        Self {
            start_date: Some(day),
            end_date: Some(day),
            professional_id: None,
        }
    }

    fn params(&self) -> Query {
        let mut q = Query::new();
        if let Some(d) = self.start_date {
            q.push(("start_date".to_string(), d.to_string()));
        }
        if let Some(d) = self.end_date {
            q.push(("end_date".to_string(), d.to_string()));
        }
        if let Some(p) = self.professional_id {
            q.push(("professional_id".to_string(), p.to_string()));
        }
        q
    }
}

#[derive(Clone)]
pub struct AppointmentService {
    client: Arc<ApiClient>,
}

impl AppointmentService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, ApiError> {
        self.client.get_query("/appointments", &query.params()).await
    }

    pub async fn get(&self, id: AppointmentId) -> Result<Appointment, ApiError> {
        self.client.get(&format!("/appointments/{}", id)).await
    }

    pub async fn create(&self, payload: &AppointmentPayload) -> Result<Appointment, ApiError> {
        self.client.post("/appointments", payload).await
    }

    pub async fn update(&self, id: AppointmentId, payload: &AppointmentPayload) -> Result<Appointment, ApiError> {
        self.client.put(&format!("/appointments/{}", id), payload).await
    }

    pub async fn cancel(&self, id: AppointmentId, reason: Option<&str>) -> Result<Appointment, ApiError> {
        let body = serde_json::json!({ "reason": reason });
        self.client
            .post(&format!("/appointments/{}/cancel", id), &body)
            .await
    }

    pub async fn confirm(&self, id: AppointmentId) -> Result<Appointment, ApiError> {
        self.client
            .post_empty(&format!("/appointments/{}/confirm", id))
            .await
    }
}
