//! Client core for the salon SaaS: HTTP adapter, per-resource services, transaction
//! status/filter/paging logic, settings aggregation and the screen controllers the web and
//! mobile front ends bind to.

pub mod auth;
pub mod bindings;
pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod log_bridge;
pub mod models;
pub mod pages;
pub mod services;
pub mod storage;
pub mod token;
pub mod transactions;
pub mod utils;
pub mod validation;

use std::sync::Arc;

pub use auth::AuthService;
pub use client::ApiClient;
pub use config::{ClientConfig, Platform};
pub use error::{Action, ApiError, ApiResult, Envelope};
pub use pages::{LoadState, Notice, SettingsPage, TransactionsPage};
pub use storage::SqliteTokenStore;
pub use token::{MemoryTokenStore, TokenPair, TokenProvider};

/// One shared `ApiClient` and a handle to every service built on it.
#[derive(Clone)]
pub struct SalonClient {
    client: Arc<ApiClient>,
    pub auth: AuthService,
    pub financial: services::FinancialService,
    pub settings: services::SettingsService,
    pub address: services::AddressService,
    pub appointments: services::AppointmentService,
    pub invoices: services::InvoiceService,
    pub notifications: services::NotificationService,
    pub goals: services::GoalService,
    pub cashback: services::CashbackService,
    pub evaluations: services::EvaluationService,
    pub commissions: services::CommissionService,
    pub reports: services::ReportService,
}

impl SalonClient {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let client = Arc::new(ApiClient::new(config, tokens)?);
        Ok(Self {
            auth: AuthService::new(client.clone()),
            financial: services::FinancialService::new(client.clone()),
            settings: services::SettingsService::new(client.clone()),
            address: services::AddressService::new(client.clone()),
            appointments: services::AppointmentService::new(client.clone()),
            invoices: services::InvoiceService::new(client.clone()),
            notifications: services::NotificationService::new(client.clone()),
            goals: services::GoalService::new(client.clone()),
            cashback: services::CashbackService::new(client.clone()),
            evaluations: services::EvaluationService::new(client.clone()),
            commissions: services::CommissionService::new(client.clone()),
            reports: services::ReportService::new(client.clone()),
            client,
        })
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn transactions_page(&self) -> TransactionsPage {
        TransactionsPage::new(self.financial.clone())
    }

    pub fn settings_page(&self) -> SettingsPage {
        SettingsPage::new(self.settings.clone(), self.address.clone())
    }
}
