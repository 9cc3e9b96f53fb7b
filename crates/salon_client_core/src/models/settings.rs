//! Company settings as one combined snapshot. Each field is one tab of the settings screen and
//! maps to its own update endpoint.

use crate::ids::AccountId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySettings {
    pub details: CompanyDetails,
    pub financial: FinancialSettings,
    pub notifications: NotificationSettings,
    pub theme: ThemeSettings,
    pub admin: AdminSettings,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDetails {
    pub name: String,
    pub trade_name: Option<String>,
    /// CPF for individual owners, CNPJ for companies. Digits only or masked.
    pub document: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Address,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub cep: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialSettings {
    pub default_account_id: Option<AccountId>,
    pub card_fee_percentage: Option<Decimal>,
    pub allow_negative_balance: bool,
    pub commission_on_net_value: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email_enabled: bool,
    pub whatsapp_enabled: bool,
    pub sms_enabled: bool,
    pub reminder_hours_before: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_enabled: true,
            whatsapp_enabled: false,
            sms_enabled: false,
            reminder_hours_before: 24,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub logo_url: Option<String>,
}

/// Only editable by the SaaS administrator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    pub plan: Option<String>,
    pub is_active: bool,
    pub max_professionals: Option<u32>,
    pub trial_ends_at: Option<NaiveDate>,
}
