//! Token storage capability injected into the HTTP client. The web build keeps tokens in memory
//! or browser storage, the mobile build in the on-device store (`storage::SqliteTokenStore`).

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
        }
    }
}

/// Read before every request; written only by login, refresh and logout.
pub trait TokenProvider: Send + Sync {
    fn get(&self) -> Result<Option<TokenPair>, ApiError>;
    fn set(&self, tokens: &TokenPair) -> Result<(), ApiError>;
    fn clear(&self) -> Result<(), ApiError>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            inner: Mutex::new(Some(tokens)),
        }
    }
}

impl TokenProvider for MemoryTokenStore {
    fn get(&self) -> Result<Option<TokenPair>, ApiError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        Ok(guard.clone())
    }

    fn set(&self, tokens: &TokenPair) -> Result<(), ApiError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        *guard = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
