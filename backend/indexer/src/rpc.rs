//! Soroban RPC client — polls `getEvents` and decodes crowdfund events.
//!
//! ## Resilience
//!
//! Transient failures (network errors, rate limits, retryable RPC error
//! codes) are retried with exponential back-off, doubling from
//! [`INITIAL_BACKOFF_SECS`] up to [`MAX_BACKOFF_SECS`]. Malformed-request
//! responses are surfaced immediately — retrying cannot fix those.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{CrowdfundEvent, EventKind};

const INITIAL_BACKOFF_SECS: u64 = 2;
const MAX_BACKOFF_SECS: u64 = 60;

/// Exponential back-off between retries, capped at [`MAX_BACKOFF_SECS`].
struct Backoff {
    delay: u64,
}

impl Backoff {
    fn new() -> Self {
        Backoff {
            delay: INITIAL_BACKOFF_SECS,
        }
    }

    async fn wait(&mut self) {
        tokio::time::sleep(Duration::from_secs(self.delay)).await;
        self.bump();
    }

    fn bump(&mut self) {
        self.delay = (self.delay * 2).min(MAX_BACKOFF_SECS);
    }
}

/// One failed fetch attempt: either worth retrying or a hard error.
enum FetchError {
    Retry(String),
    Fatal(IndexerError),
}

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

/// A single event as returned by `getEvents`, topics and data rendered
/// from XDR into JSON by the RPC.
#[derive(Debug, Deserialize, Clone)]
#[allow(dead_code)]
pub struct RawEvent {
    pub topic: Vec<String>,
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Fetching
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC, retrying transient failures.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive).
/// * `cursor`       — optional opaque pagination cursor from a previous response.
/// * `limit`        — maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let body = request_body(contract_id, start_ledger, cursor, limit);
    let mut backoff = Backoff::new();

    loop {
        match try_fetch(client, rpc_url, &body).await {
            Ok(result) => {
                debug!(
                    "Fetched {} events (latest_ledger={:?})",
                    result.events.len(),
                    result.latest_ledger
                );
                return Ok((result.events, result.cursor, result.latest_ledger));
            }
            Err(FetchError::Retry(reason)) => {
                warn!("{reason} (will retry in {}s)", backoff.delay);
                backoff.wait().await;
            }
            Err(FetchError::Fatal(e)) => return Err(e),
        }
    }
}

async fn try_fetch(
    client: &Client,
    rpc_url: &str,
    body: &Value,
) -> std::result::Result<EventsResult, FetchError> {
    let response = client
        .post(rpc_url)
        .json(body)
        .send()
        .await
        .map_err(|e| FetchError::Retry(format!("RPC request failed: {e}")))?;

    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(FetchError::Retry("Rate-limited by RPC".to_string()));
    }

    let parsed: RpcResponse = response
        .json()
        .await
        .map_err(|e| FetchError::Fatal(e.into()))?;

    if let Some(err) = parsed.error {
        // -32600 / -32601 mean the request itself is malformed.
        if err.code == -32600 || err.code == -32601 {
            return Err(FetchError::Fatal(IndexerError::EventParse(format!(
                "RPC hard error {}: {}",
                err.code, err.message
            ))));
        }
        return Err(FetchError::Retry(format!(
            "RPC soft error {}: {}",
            err.code, err.message
        )));
    }

    parsed.result.ok_or_else(|| {
        FetchError::Fatal(IndexerError::EventParse(
            "Empty result from getEvents".to_string(),
        ))
    })
}

fn request_body(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    // The RPC rejects requests carrying both a cursor and a startLedger.
    match cursor {
        Some(cur) => params["pagination"]["cursor"] = json!(cur),
        None => params["startLedger"] = json!(start_ledger),
    }

    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": params,
    })
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`CrowdfundEvent`] structs.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<CrowdfundEvent> {
    raw.iter()
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<CrowdfundEvent> {
    // Topics are (event symbol, campaign id) on every crowdfund event.
    let kind = EventKind::from_topic(&topic_symbol(raw.topic.first()?));
    let campaign_id = raw.topic.get(1).map(|t| topic_scalar(t));

    let (actor, amount) = decode_data(&raw.value, &kind);

    Some(CrowdfundEvent {
        event_type: kind.as_str().to_string(),
        campaign_id,
        actor,
        amount,
        ledger: raw.ledger.unwrap_or(0) as i64,
        timestamp: raw
            .ledger_closed_at
            .as_deref()
            .and_then(parse_close_time)
            .unwrap_or(0),
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull actor and amount out of the JSON rendering of the event data
/// struct, per event kind. Field lookups are tolerant: the RPC's XDR-to-JSON
/// rendering has varied across versions, so alternate keys are tried too.
fn decode_data(value: &Value, kind: &EventKind) -> (Option<String>, Option<String>) {
    match kind {
        EventKind::CampaignCreated => {
            let actor = extract_field(value, &["owner", "address"])
                .or_else(|| find_nested(value, "owner"));
            let amount = extract_field(value, &["goal"]);
            (actor, amount)
        }
        EventKind::ContributionReceived => {
            let actor = extract_field(value, &["contributor", "address"]);
            let amount = extract_field(value, &["amount"]);
            (actor, amount)
        }
        EventKind::RewardMinted => {
            let actor = extract_field(value, &["contributor", "address"]);
            let amount = extract_field(value, &["minted"]);
            (actor, amount)
        }
        EventKind::FundraiseCancelled => {
            let actor = extract_field(value, &["owner", "address"]);
            (actor, None)
        }
        EventKind::OwnerWithdrawal => {
            let actor = extract_field(value, &["owner", "address"]);
            let amount = extract_field(value, &["amount"]);
            (actor, amount)
        }
        EventKind::ContributionRefunded => {
            let actor = extract_field(value, &["contributor", "address"]);
            let amount = extract_field(value, &["amount"]);
            (actor, amount)
        }
        EventKind::Unknown => (None, None),
    }
}

/// Render a JSON scalar as a string; amounts arrive as strings or numbers
/// depending on magnitude.
fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First of `keys` present in `value` with a scalar, rendered as a string.
fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(key).and_then(scalar_to_string))
}

/// Depth-first search for a string field named `key` anywhere in `value`.
fn find_nested(value: &Value, key: &str) -> Option<String> {
    let map = value.as_object()?;
    if let Some(s) = map.get(key).and_then(Value::as_str) {
        return Some(s.to_string());
    }
    map.values().find_map(|v| find_nested(v, key))
}

/// Extract a Soroban Symbol from an XDR-decoded topic entry.
/// The RPC may return `{"type":"symbol","value":"created"}` or the bare string.
fn topic_symbol(raw: &str) -> String {
    topic_wrapped_value(raw).unwrap_or_else(|| raw.to_string())
}

/// Extract the campaign id from a topic entry that might be a JSON object
/// or a bare number/string.
fn topic_scalar(raw: &str) -> String {
    topic_wrapped_value(raw).unwrap_or_else(|| raw.to_string())
}

fn topic_wrapped_value(raw: &str) -> Option<String> {
    let v: Value = serde_json::from_str(raw).ok()?;
    scalar_to_string(v.get("value")?)
}

/// Parse an RFC 3339 close-time string into a Unix epoch (seconds).
fn parse_close_time(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
