//! Application configuration loaded from environment variables.

use std::fmt::Display;
use std::str::FromStr;

use crate::errors::{IndexerError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g. https://soroban-testnet.stellar.org)
    pub rpc_url: String,
    /// The deployed crowdfund contract address (Strkey format)
    pub contract_id: String,
    /// SQLite database URL
    pub database_url: String,
    /// Port for the REST API server
    pub api_port: u16,
    /// How often (in seconds) to poll the RPC for new events
    pub poll_interval_secs: u64,
    /// Maximum number of events to fetch per RPC request
    pub events_per_page: u32,
    /// Ledger to start from if no cursor is saved
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            rpc_url: required("RPC_URL")?,
            contract_id: required("CONTRACT_ID")?,
            // mode=rwc lets SQLite create the file on first run.
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:crowdfund_events.db?mode=rwc".to_string()),
            api_port: parsed("API_PORT", 3000)?,
            poll_interval_secs: parsed("POLL_INTERVAL_SECS", 10)?,
            events_per_page: parsed("EVENTS_PER_PAGE", 100)?,
            start_ledger: parsed("START_LEDGER", 0)?,
        })
    }
}

fn required(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| IndexerError::Config(format!("{key} environment variable is required")))
}

/// Parse an optional env var, falling back to `default` when unset.
/// An unparseable value is a configuration error, not a silent default.
fn parsed<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| IndexerError::Config(format!("Invalid {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
