//! Long-running background task that polls the Soroban RPC and writes
//! decoded crowdfund events to the database.

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

/// Where the next poll picks up: the ledger to scan from, plus the opaque
/// pagination cursor when the previous page was not the last one.
struct Position {
    start_ledger: u32,
    page_cursor: Option<String>,
}

impl Position {
    /// Restore the position persisted by the previous run, or start at the
    /// configured backfill ledger on a fresh database.
    async fn restore(pool: &SqlitePool, config: &Config) -> Self {
        let next_ledger = db::get_next_ledger(pool).await.unwrap_or(0);
        Position {
            start_ledger: if next_ledger > 0 {
                next_ledger as u32
            } else {
                config.start_ledger
            },
            page_cursor: db::get_cursor_string(pool).await.unwrap_or(None),
        }
    }
}

/// Spawn the indexer loop as a background [`tokio`] task.
pub async fn run(state: Arc<IndexerState>) {
    info!("Indexer starting — contract: {}", state.config.contract_id);

    let mut position = Position::restore(&state.pool, &state.config).await;
    info!("Resuming from ledger {}", position.start_ledger);

    loop {
        if let Err(e) = poll_once(&state, &mut position).await {
            error!("Indexer poll error: {e}");
        }
        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

/// Fetch one page of events, store it, and advance `position`.
async fn poll_once(state: &IndexerState, position: &mut Position) -> Result<()> {
    let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
        &state.client,
        &state.config.rpc_url,
        &state.config.contract_id,
        position.start_ledger,
        position.page_cursor.as_deref(),
        state.config.events_per_page,
    )
    .await?;

    if !raw_events.is_empty() {
        let decoded = rpc::decode_events(&raw_events, &state.config.contract_id);
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} new records stored",
            raw_events.len(),
            inserted
        );
    }

    // While a pagination cursor is in flight the RPC ignores startLedger, so
    // the position stays put. Once the final page arrives, everything up to
    // latest_ledger has been returned and the next scan starts one past it;
    // any overlap is absorbed by the idempotent insert.
    if next_cursor.is_none() {
        if let Some(latest) = latest_ledger {
            position.start_ledger = (latest as u32)
                .saturating_add(1)
                .max(position.start_ledger);
        }
    }
    position.page_cursor = next_cursor;

    // Persist so restarts are deterministic.
    db::save_cursor(
        &state.pool,
        position.start_ledger as i64,
        position.page_cursor.as_deref(),
    )
    .await?;

    Ok(())
}
