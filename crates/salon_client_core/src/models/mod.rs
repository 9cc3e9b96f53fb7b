//! Wire models. Decimals arrive as strings or numbers and are held as `rust_decimal::Decimal`;
//! timestamps go through `crate::utils::date`.

pub mod billing;
pub mod engagement;
pub mod schedule;
pub mod settings;
pub mod transaction;

use crate::ids::{CompanyId, UserId};
use serde::{Deserialize, Serialize};

pub use billing::{
    CategoryTotal, Commission, FinancialReport, Goal, GoalPayload, Invoice, InvoiceStatus,
    IssueInvoiceRequest,
};
pub use engagement::{
    CashbackBalance, CashbackEntry, CashbackKind, CashbackSettings, Evaluation, Notification,
    UnreadCount,
};
pub use schedule::{Appointment, AppointmentPayload, AppointmentStatus};
pub use settings::{
    Address, AdminSettings, CompanyDetails, CompanySettings, FinancialSettings,
    NotificationSettings, ThemeSettings,
};
pub use transaction::{
    Account, Category, ClientRef, EntityRef, Origin, Transaction, TransactionPage,
    TransactionPayload, TransactionStatus, TransactionTotals, TransactionType,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Response of `POST /auth/login/json`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
