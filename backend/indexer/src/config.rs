//! Environment-driven configuration.

use std::str::FromStr;

use crate::errors::{IndexerError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint.
    pub rpc_url: String,
    /// Launchpad contract address (strkey).
    pub contract_id: String,
    pub database_url: String,
    pub api_port: u16,
    pub poll_interval_secs: u64,
    /// Page size for `getEvents`.
    pub events_per_page: u32,
    /// First ledger to scan when no cursor is saved.
    pub start_ledger: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            rpc_url: get("RPC_URL")
                .unwrap_or_else(|| "https://soroban-testnet.stellar.org".to_string()),
            contract_id: get("CONTRACT_ID").ok_or_else(|| {
                IndexerError::Config("CONTRACT_ID environment variable is required".to_string())
            })?,
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:./launchpad_events.db".to_string()),
            api_port: parsed(&get, "API_PORT", 3001)?,
            poll_interval_secs: parsed(&get, "POLL_INTERVAL_SECS", 5)?,
            events_per_page: parsed(&get, "EVENTS_PER_PAGE", 100)?,
            start_ledger: parsed(&get, "START_LEDGER", 0)?,
        })
    }
}

fn parsed<T: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T> {
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| IndexerError::Config(format!("Invalid {key}: {raw:?}"))),
    }
}
