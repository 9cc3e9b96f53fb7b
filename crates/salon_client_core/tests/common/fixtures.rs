//! Row builders and client construction shared by the integration tests.

use super::fake_backend::FakeBackend;
use chrono::{Duration, Local, NaiveDate};
use salon_client_core::{MemoryTokenStore, SalonClient, TokenPair};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_from_today(days: i64) -> String {
    format!("{}T09:00:00", today() + Duration::days(days))
}

/// A transaction row as the backend serializes it.
pub fn txn(id: i64, status: &str, is_paid: bool, days: i64) -> Value {
    json!({
        "id": id,
        "type": "income",
        "value": "100.00",
        "date": days_from_today(days),
        "status": status,
        "is_paid": is_paid,
        "description": format!("Lançamento {}", id),
        "client": {"id": 1, "full_name": "Maria Lima"},
        "origin": "command",
        "origin_id": id * 10
    })
}

pub fn txn_for_client(id: i64, client_id: i64) -> Value {
    let mut row = txn(id, "planned", false, 3);
    row["client"] = json!({"id": client_id, "full_name": format!("Cliente {}", client_id)});
    row
}

/// Client holding the backend's current tokens, as if already logged in.
pub fn logged_in_client(backend: &FakeBackend) -> (SalonClient, Arc<MemoryTokenStore>) {
    let (access, refresh) = backend.with_state(|s| (s.access_token.clone(), s.refresh_token.clone()));
    let tokens = Arc::new(MemoryTokenStore::with_tokens(TokenPair::new(access, Some(refresh))));
    let client = SalonClient::new(backend.config(), tokens.clone()).expect("client");
    (client, tokens)
}

pub fn anonymous_client(backend: &FakeBackend) -> (SalonClient, Arc<MemoryTokenStore>) {
    let tokens = Arc::new(MemoryTokenStore::new());
    let client = SalonClient::new(backend.config(), tokens.clone()).expect("client");
    (client, tokens)
}
