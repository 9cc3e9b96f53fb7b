//! Blocking, JSON-string surface for host UIs that cannot drive async Rust directly (the
//! mobile app's FFI layer, a WASM shim). Every call returns an [`Envelope`] serialized as JSON.

use crate::config::{ClientConfig, Platform};
use crate::error::{Action, ApiError, Envelope};
use crate::models::{CompanyDetails, User};
use crate::pages::{Notice, ReloadOutcome, SettingsPage, TransactionRow, TransactionsPage};
use crate::storage::SqliteTokenStore;
use crate::transactions::TransactionFilters;
use crate::SalonClient;
use once_cell::sync::{Lazy, OnceCell};
use serde::Serialize;
use std::path::Path;
use std::sync::{Arc, Mutex};

static RUNTIME: OnceCell<tokio::runtime::Runtime> = OnceCell::new();

struct Session {
    client: SalonClient,
    transactions: Arc<TransactionsPage>,
    settings: Arc<SettingsPage>,
}

static SESSION: Lazy<Mutex<Option<Session>>> = Lazy::new(|| Mutex::new(None));

fn runtime() -> Result<&'static tokio::runtime::Runtime, ApiError> {
    RUNTIME.get_or_try_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Config(format!("tokio runtime: {}", e)))
    })
}

fn with_session<T>(f: impl FnOnce(&Session) -> T) -> Result<T, ApiError> {
    let guard = SESSION
        .lock()
        .map_err(|e| ApiError::Storage(e.to_string()))?;
    guard
        .as_ref()
        .map(f)
        .ok_or_else(|| ApiError::Config("Client not initialized".to_string()))
}

fn to_json<T: Serialize>(envelope: Envelope<T>) -> String {
    serde_json::to_string(&envelope).unwrap_or_else(|e| {
        log::error!("[salon_core] failed to encode response: {}", e);
        r#"{"success":false,"error":"Internal error"}"#.to_string()
    })
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::InvalidInput(format!("Invalid payload: {}", e)))
}

#[derive(Serialize)]
pub struct TransactionsView {
    pub rows: Vec<TransactionRow>,
    pub totals: Option<crate::models::TransactionTotals>,
    pub page: u32,
    pub page_count: u32,
}

fn transactions_view(page: &TransactionsPage) -> TransactionsView {
    let p = page.pagination();
    TransactionsView {
        rows: page.visible(),
        totals: page.totals(),
        page: p.page(),
        page_count: p.page_count(),
    }
}

/// Call once at startup with the app data directory. `base_url` overrides the platform default
/// and the environment.
pub fn init(storage_path: String, base_url: Option<String>, platform: Platform) -> String {
    crate::log_bridge::install(log::LevelFilter::Debug);
    let result = (|| -> Result<(), ApiError> {
        let config = match base_url {
            Some(url) => ClientConfig::new(url),
            None => ClientConfig::from_env(platform).map_err(|e| ApiError::Config(e.to_string()))?,
        };
        let tokens = Arc::new(SqliteTokenStore::open(Path::new(&storage_path))?);
        let client = SalonClient::new(config, tokens)?;
        log::info!("[salon_core] initialized against {}", client.api().config().base_url);
        let session = Session {
            transactions: Arc::new(client.transactions_page()),
            settings: Arc::new(client.settings_page()),
            client,
        };
        *SESSION
            .lock()
            .map_err(|e| ApiError::Storage(e.to_string()))? = Some(session);
        Ok(())
    })();
    to_json(Envelope::from_result(result, Action::Load))
}

pub fn login(email: String, password: String) -> String {
    let result = (|| -> Result<User, ApiError> {
        let auth = with_session(|s| s.client.auth.clone())?;
        runtime()?.block_on(auth.login(&email, &password))
    })();
    to_json(Envelope::from_result(result, Action::Load))
}

pub fn logout() -> String {
    let result = with_session(|s| s.client.auth.clone()).and_then(|auth| auth.logout());
    to_json(Envelope::from_result(result, Action::Save))
}

pub fn is_logged_in() -> bool {
    with_session(|s| s.client.auth.is_logged_in()).unwrap_or(false)
}

pub fn load_transactions() -> String {
    let result = (|| -> Result<TransactionsView, ApiError> {
        let page = with_session(|s| s.transactions.clone())?;
        // A superseded reload means another call already owns the state; render what is there.
        let _outcome: ReloadOutcome = runtime()?.block_on(page.reload())?;
        Ok(transactions_view(&page))
    })();
    to_json(Envelope::from_result(result, Action::Load))
}

pub fn set_transaction_filters(filters_json: String) -> String {
    let result = (|| -> Result<TransactionsView, ApiError> {
        let filters: TransactionFilters = parse(&filters_json)?;
        let page = with_session(|s| s.transactions.clone())?;
        page.set_filters(filters);
        runtime()?.block_on(page.reload())?;
        Ok(transactions_view(&page))
    })();
    to_json(Envelope::from_result(result, Action::Load))
}

pub fn search_transactions(search: String) -> String {
    let result = with_session(|s| s.transactions.clone()).map(|page| {
        page.set_search(search);
        transactions_view(&page)
    });
    to_json(Envelope::from_result(result, Action::Load))
}

pub fn go_to_transactions_page(page_number: u32) -> String {
    let result = (|| -> Result<TransactionsView, ApiError> {
        let page = with_session(|s| s.transactions.clone())?;
        if page.go_to_page(page_number) {
            runtime()?.block_on(page.reload())?;
        }
        Ok(transactions_view(&page))
    })();
    to_json(Envelope::from_result(result, Action::Load))
}

pub fn get_settings() -> String {
    let result = (|| -> Result<crate::models::CompanySettings, ApiError> {
        let page = with_session(|s| s.settings.clone())?;
        runtime()?.block_on(page.load())
    })();
    to_json(Envelope::from_result(result, Action::Load))
}

pub fn save_company_details(details_json: String) -> String {
    let result = (|| -> Result<Notice, ApiError> {
        let details: CompanyDetails = parse(&details_json)?;
        let page = with_session(|s| s.settings.clone())?;
        Ok(runtime()?.block_on(page.save_details(&details)))
    })();
    to_json(Envelope::from_result(result, Action::Save))
}

pub fn lookup_cep(cep: String) -> String {
    let result = (|| -> Result<crate::models::Address, ApiError> {
        let address = with_session(|s| s.client.address.clone())?;
        runtime()?.block_on(address.lookup_cep(&cep))
    })();
    to_json(Envelope::from_result(result, Action::Load))
}

/// Drain buffered log lines so the host can print them.
pub fn drain_logs() -> Vec<String> {
    crate::log_bridge::drain_logs()
}
