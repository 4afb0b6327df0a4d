//! Shared application state.
//!
//! One SQLite connection is opened at process start and shared across
//! handlers behind an async mutex, the same shared-state shape the rest of
//! the app gets through `web::Data`. Insertion is always a single statement,
//! so no transaction ever spans validation and the write.

use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::config::AppConfig;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS registrations (
    id             TEXT PRIMARY KEY,
    name           TEXT NOT NULL,
    phone          TEXT NOT NULL DEFAULT '',
    email          TEXT NOT NULL,
    has_joined_cg  INTEGER NOT NULL DEFAULT 0,
    connect_group  TEXT,
    food_item      TEXT NOT NULL DEFAULT '',
    drink_item     TEXT NOT NULL DEFAULT '',
    bringing_gift  INTEGER NOT NULL DEFAULT 1,
    transfer_proof TEXT NOT NULL,
    created_at     TEXT NOT NULL
);
";

/// Clonable state injected into the Actix application.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide SQLite connection, opened once in `main`.
    pub db: Arc<Mutex<Connection>>,
    pub config: Arc<AppConfig>,
    /// Reused client for calls to the file host.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(conn: Connection, config: AppConfig) -> AppState {
        AppState {
            db: Arc::new(Mutex::new(conn)),
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}

/// Opens (or creates) the registration database and ensures the schema.
pub fn open_database(path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

#[cfg(test)]
pub fn test_state() -> AppState {
    let conn = Connection::open_in_memory().expect("in-memory database");
    conn.execute_batch(SCHEMA).expect("schema");
    AppState::new(conn, AppConfig::default())
}
