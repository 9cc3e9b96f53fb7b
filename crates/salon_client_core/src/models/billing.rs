//! Invoices, commissions, goals and the financial report.

use crate::ids::{CommissionId, GoalId, InvoiceId, ProfessionalId, TransactionId};
use crate::models::transaction::{ClientRef, EntityRef};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Processing,
    Issued,
    Cancelled,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    #[serde(default)]
    pub number: Option<String>,
    pub status: InvoiceStatus,
    pub value: Decimal,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default, with = "crate::utils::date::option")]
    pub issued_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IssueInvoiceRequest {
    pub transaction_id: TransactionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Commission {
    pub id: CommissionId,
    #[serde(default)]
    pub professional: Option<EntityRef<ProfessionalId>>,
    pub value: Decimal,
    #[serde(default)]
    pub percentage: Option<Decimal>,
    #[serde(default)]
    pub is_paid: bool,
    pub reference_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub target_value: Decimal,
    #[serde(default)]
    pub current_value: Decimal,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(default)]
    pub professional_id: Option<ProfessionalId>,
}

impl Goal {
    /// Reached fraction in percent, capped at 100. Zero target counts as reached.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_value <= Decimal::ZERO {
            return Decimal::ONE_HUNDRED;
        }
        let pct = self.current_value * Decimal::ONE_HUNDRED / self.target_value;
        pct.min(Decimal::ONE_HUNDRED).round_dp(2)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GoalPayload {
    pub name: String,
    pub target_value: Decimal,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<ProfessionalId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialReport {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub by_category: Vec<CategoryTotal>,
}

impl FinancialReport {
    pub fn balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}
