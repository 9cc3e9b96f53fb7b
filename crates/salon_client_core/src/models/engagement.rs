//! Notifications, cashback and client evaluations.

use crate::ids::{CashbackEntryId, ClientId, EvaluationId, NotificationId};
use crate::models::transaction::ClientRef;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(with = "crate::utils::date")]
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    #[serde(default)]
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashbackBalance {
    pub client_id: ClientId,
    #[serde(default)]
    pub balance: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashbackKind {
    Earned,
    Redeemed,
    Expired,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CashbackEntry {
    pub id: CashbackEntryId,
    pub kind: CashbackKind,
    pub value: Decimal,
    #[serde(with = "crate::utils::date")]
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashbackSettings {
    pub enabled: bool,
    pub percentage: Decimal,
    pub expiration_days: Option<u32>,
}

impl Default for CashbackSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            percentage: Decimal::ZERO,
            expiration_days: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    #[serde(default)]
    pub client: Option<ClientRef>,
    /// 1 to 5 stars.
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(with = "crate::utils::date")]
    pub created_at: NaiveDateTime,
}
