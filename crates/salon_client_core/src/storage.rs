//! SQLite storage for the mobile app: a key-value `config` table holding the session tokens and
//! small preferences (last selected company, API override).

use crate::error::ApiError;
use crate::token::{TokenPair, TokenProvider};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

const DB_FILE: &str = "salon.db";
const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";

pub struct SqliteTokenStore {
    conn: Mutex<Connection>,
}

impl SqliteTokenStore {
    /// Open (or create) `salon.db` inside the app documents directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ApiError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| ApiError::Storage(e.to_string()))?;
        let db_path = dir.join(DB_FILE);
        log::debug!("[salon_core] storage::open db={:?}", db_path);
        let conn = Connection::open(&db_path)?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self, ApiError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, ApiError> {
        conn.execute_batch("CREATE TABLE IF NOT EXISTS config (key TEXT PRIMARY KEY, value TEXT);")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_db<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        f(&conn).map_err(ApiError::from)
    }

    pub fn config_get(&self, key: &str) -> Result<Option<String>, ApiError> {
        self.with_db(|conn| {
            conn.query_row("SELECT value FROM config WHERE key = ?1", params![key], |row| row.get(0))
                .optional()
        })
    }

    pub fn config_set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        self.with_db(|conn| {
            conn.execute(
                "INSERT INTO config (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
            Ok(())
        })
    }

    pub fn config_remove(&self, key: &str) -> Result<(), ApiError> {
        self.with_db(|conn| {
            conn.execute("DELETE FROM config WHERE key = ?1", params![key])?;
            Ok(())
        })
    }
}

impl TokenProvider for SqliteTokenStore {
    fn get(&self) -> Result<Option<TokenPair>, ApiError> {
        let access = match self.config_get(ACCESS_TOKEN_KEY)? {
            Some(a) => a,
            None => return Ok(None),
        };
        let refresh = self.config_get(REFRESH_TOKEN_KEY)?;
        Ok(Some(TokenPair::new(access, refresh)))
    }

    fn set(&self, tokens: &TokenPair) -> Result<(), ApiError> {
        self.with_db(|conn| {
            let tx = conn.unchecked_transaction()?;
            tx.execute(
                "INSERT INTO config (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![ACCESS_TOKEN_KEY, tokens.access_token],
            )?;
            match &tokens.refresh_token {
                Some(r) => tx.execute(
                    "INSERT INTO config (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = ?2",
                    params![REFRESH_TOKEN_KEY, r],
                )?,
                None => tx.execute("DELETE FROM config WHERE key = ?1", params![REFRESH_TOKEN_KEY])?,
            };
            tx.commit()
        })
    }

    fn clear(&self) -> Result<(), ApiError> {
        self.config_remove(ACCESS_TOKEN_KEY)?;
        self.config_remove(REFRESH_TOKEN_KEY)
    }
}
