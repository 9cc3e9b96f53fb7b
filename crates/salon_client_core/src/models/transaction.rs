//! Financial transaction view-model as returned by `/financial/transactions`.

use crate::ids::{AccountId, CategoryId, ClientId, TransactionId};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// Server-side lifecycle state. Independent of `is_paid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Blocked,
    Planned,
    Liquidated,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Blocked => "blocked",
            TransactionStatus::Planned => "planned",
            TransactionStatus::Liquidated => "liquidated",
        }
    }
}

/// Where a transaction came from. Only used to label rows and build links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Command,
    Purchase,
    Manual,
    Subscription,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef<Id> {
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: ClientId,
    #[serde(default, alias = "name")]
    pub full_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub value: Decimal,
    #[serde(default)]
    pub net_value: Option<Decimal>,
    #[serde(default)]
    pub fee_percentage: Option<Decimal>,
    #[serde(default)]
    pub fee_value: Option<Decimal>,
    /// Due, availability, competency or payment date depending on the query's `date_type`.
    #[serde(with = "crate::utils::date")]
    pub date: NaiveDateTime,
    pub status: TransactionStatus,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub account: Option<EntityRef<AccountId>>,
    #[serde(default)]
    pub category: Option<EntityRef<CategoryId>>,
    #[serde(default)]
    pub client: Option<ClientRef>,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub origin_id: Option<i64>,
}

impl Transaction {
    pub fn net_value(&self) -> Decimal {
        self.net_value.unwrap_or(self.value)
    }

    /// Dashboard route of the command or purchase that generated this transaction.
    pub fn origin_link(&self) -> Option<String> {
        let id = self.origin_id?;
        match self.origin {
            Origin::Command => Some(format!("/commands/{}", id)),
            Origin::Purchase => Some(format!("/purchases/{}", id)),
            _ => None,
        }
    }
}

/// Aggregates for the filtered set, not just the current page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTotals {
    #[serde(default)]
    pub total_received: Decimal,
    #[serde(default)]
    pub total_to_receive: Decimal,
    #[serde(default)]
    pub total_paid: Decimal,
    #[serde(default)]
    pub total_to_pay: Decimal,
}

impl TransactionTotals {
    pub fn balance(&self) -> Decimal {
        self.total_received - self.total_paid
    }

    pub fn projected_balance(&self) -> Decimal {
        self.balance() + self.total_to_receive - self.total_to_pay
    }
}

/// Body for create and update.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionPayload {
    #[serde(rename = "type")]
    pub type_: TransactionType,
    pub value: Decimal,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub is_paid: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(default)]
    pub balance: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub type_: Option<TransactionType>,
}

/// One page of the transactions list. `total` is only present when the server reports a count.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    pub total: Option<u64>,
}
