//! Settings screen. The combined snapshot is the source of truth: after any tab is saved the
//! whole snapshot is fetched again.

use crate::error::{Action, ApiError};
use crate::models::{
    Address, AdminSettings, CompanyDetails, CompanySettings, FinancialSettings,
    NotificationSettings, ThemeSettings,
};
use crate::pages::notice::{LoadState, Notice};
use crate::services::{merge_address, AddressService, SettingsService};
use crate::validation::{normalize_cep, validate_document};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct SettingsPage {
    settings: SettingsService,
    address: AddressService,
    snapshot: Mutex<LoadState<CompanySettings>>,
}

/// Checks run before the details tab is sent. Empty document and CEP are allowed.
pub fn validate_details(details: &CompanyDetails) -> Result<CompanyDetails, ApiError> {
    let mut out = details.clone();
    if let Some(doc) = details.document.as_deref().filter(|d| !d.trim().is_empty()) {
        validate_document(doc)?;
    }
    if !details.address.cep.trim().is_empty() {
        out.address.cep = normalize_cep(&details.address.cep)?;
    }
    Ok(out)
}

impl SettingsPage {
    pub fn new(settings: SettingsService, address: AddressService) -> Self {
        Self {
            settings,
            address,
            snapshot: Mutex::new(LoadState::Idle),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoadState<CompanySettings>> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> LoadState<CompanySettings> {
        self.lock().clone()
    }

    /// Current snapshot, or defaults when nothing is loaded; used to seed the tab forms.
    pub fn snapshot(&self) -> CompanySettings {
        self.lock().loaded().cloned().unwrap_or_default()
    }

    pub async fn load(&self) -> Result<CompanySettings, ApiError> {
        *self.lock() = LoadState::Loading;
        let result = self.settings.get_settings().await;
        let mut st = self.lock();
        match &result {
            Ok(s) => *st = LoadState::Loaded(s.clone()),
            Err(e) => {
                log::warn!("[salon_core] settings load failed: {}", e);
                *st = LoadState::Failed {
                    message: e.user_message(Action::Load),
                };
            }
        }
        result
    }

    async fn save<F>(&self, tab: &str, update: F) -> Notice
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        if let Err(e) = update.await {
            log::warn!("[salon_core] saving {} settings failed: {}", tab, e);
            return Notice::error(&e, Action::Save);
        }
        // The refetch outcome lands in the load state; the save itself already succeeded.
        let _ = self.load().await;
        Notice::success("Configurações salvas")
    }

    pub async fn save_details(&self, details: &CompanyDetails) -> Notice {
        let details = match validate_details(details) {
            Ok(d) => d,
            Err(e) => return Notice::error(&e, Action::Save),
        };
        self.save("details", self.settings.update_details(&details)).await
    }

    pub async fn save_financial(&self, financial: &FinancialSettings) -> Notice {
        self.save("financial", self.settings.update_financial(financial)).await
    }

    pub async fn save_notifications(&self, notifications: &NotificationSettings) -> Notice {
        self.save("notifications", self.settings.update_notifications(notifications))
            .await
    }

    pub async fn save_theme(&self, theme: &ThemeSettings) -> Notice {
        self.save("theme", self.settings.update_theme(theme)).await
    }

    pub async fn save_admin(&self, admin: &AdminSettings) -> Notice {
        self.save("admin", self.settings.update_admin(admin)).await
    }

    /// Fill street, neighborhood, city and state from the CEP typed into `form`.
    pub async fn autofill_address(&self, form: &mut Address) -> Result<(), ApiError> {
        let found = self.address.lookup_cep(&form.cep).await?;
        merge_address(form, found);
        Ok(())
    }
}
