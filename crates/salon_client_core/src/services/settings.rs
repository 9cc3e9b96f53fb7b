//! Company settings: one combined read, one update endpoint per tab.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AdminSettings, CompanyDetails, CompanySettings, FinancialSettings, NotificationSettings,
    ThemeSettings,
};
use serde::de::IgnoredAny;
use serde::Serialize;
use std::sync::Arc;

const SETTINGS_PATH: &str = "/company-settings";

#[derive(Clone)]
pub struct SettingsService {
    client: Arc<ApiClient>,
}

impl SettingsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// GET /company-settings -> { details, financial, notifications, theme, admin }
    pub async fn get_settings(&self) -> Result<CompanySettings, ApiError> {
        self.client.get(SETTINGS_PATH).await
    }

    async fn put_domain<B: Serialize>(&self, domain: &str, body: &B) -> Result<(), ApiError> {
        let path = format!("{}/{}", SETTINGS_PATH, domain);
        self.client.put::<IgnoredAny, _>(&path, body).await.map(|_| ())
    }

    pub async fn update_details(&self, details: &CompanyDetails) -> Result<(), ApiError> {
        self.put_domain("details", details).await
    }

    pub async fn update_financial(&self, financial: &FinancialSettings) -> Result<(), ApiError> {
        self.put_domain("financial", financial).await
    }

    pub async fn update_notifications(&self, notifications: &NotificationSettings) -> Result<(), ApiError> {
        self.put_domain("notifications", notifications).await
    }

    pub async fn update_theme(&self, theme: &ThemeSettings) -> Result<(), ApiError> {
        self.put_domain("theme", theme).await
    }

    /// SaaS-admin only; the backend rejects other roles with 403.
    pub async fn update_admin(&self, admin: &AdminSettings) -> Result<(), ApiError> {
        self.put_domain("admin", admin).await
    }
}
