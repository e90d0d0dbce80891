//! Background poller: pulls launchpad events from RPC into SQLite.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::Config;
use crate::db;
use crate::errors::Result;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Where the next poll starts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    ledger: u32,
    cursor: Option<String>,
}

impl Position {
    async fn resume(pool: &SqlitePool, start_ledger: u32) -> Result<Self> {
        let saved = db::get_last_ledger(pool).await?;
        Ok(Position {
            ledger: if saved > 0 { saved as u32 } else { start_ledger },
            cursor: db::get_cursor_string(pool).await?,
        })
    }

    /// Continue from `latest` unless the RPC is behind our own position.
    fn advance(&self, latest: Option<u64>, cursor: Option<String>) -> Self {
        Position {
            ledger: latest
                .map(|l| (l as u32).max(self.ledger))
                .unwrap_or(self.ledger),
            cursor,
        }
    }
}

/// Run the poll loop forever. Errors are logged and the next tick retries.
pub async fn run(state: Arc<IndexerState>) {
    info!("Indexer starting, contract {}", state.config.contract_id);

    let mut position = match Position::resume(&state.pool, state.config.start_ledger).await {
        Ok(p) => p,
        Err(e) => {
            error!("Could not read cursor, starting from configured ledger: {e}");
            Position {
                ledger: state.config.start_ledger,
                cursor: None,
            }
        }
    };
    info!("Resuming from ledger {}", position.ledger);

    loop {
        match poll_once(&state, &position).await {
            Ok(next) => position = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }
        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

async fn poll_once(state: &IndexerState, position: &Position) -> Result<Position> {
    let config = &state.config;
    let page = rpc::fetch_events(
        &state.client,
        &config.rpc_url,
        &config.contract_id,
        position.ledger,
        position.cursor.as_deref(),
        config.events_per_page,
    )
    .await?;

    if !page.events.is_empty() {
        let decoded = rpc::decode_events(&page.events, &config.contract_id);
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            "Polled {} raw events, {} new records stored",
            page.events.len(),
            inserted
        );
    }

    let next = position.advance(page.latest_ledger, page.cursor);
    db::save_cursor(&state.pool, next.ledger as i64, next.cursor.as_deref()).await?;
    Ok(next)
}
