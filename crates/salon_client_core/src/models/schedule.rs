use crate::ids::{AppointmentId, ProfessionalId};
use crate::models::transaction::{ClientRef, EntityRef};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    /// Appointments in these states can no longer be cancelled or confirmed.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default)]
    pub professional: Option<EntityRef<ProfessionalId>>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(with = "crate::utils::date")]
    pub start_time: NaiveDateTime,
    #[serde(default, with = "crate::utils::date::option")]
    pub end_time: Option<NaiveDateTime>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AppointmentPayload {
    pub client_id: crate::ids::ClientId,
    pub professional_id: ProfessionalId,
    pub service_ids: Vec<i64>,
    #[serde(with = "crate::utils::date")]
    pub start_time: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
