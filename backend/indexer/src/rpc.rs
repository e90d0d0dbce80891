//! Soroban RPC client: polls `getEvents` and decodes launchpad pool events.
//!
//! Transient failures (network errors, HTTP 429, JSON-RPC soft errors) are
//! retried with exponential back-off capped at [`MAX_BACKOFF_SECS`]. Only
//! malformed-request errors are surfaced to the caller.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, LaunchpadEvent};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

/// JSON-RPC codes that will never succeed on retry.
const HARD_ERROR_CODES: [i64; 2] = [-32600, -32601];

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

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Topic list, one JSON-encoded ScVal per entry.
    pub topic: Vec<String>,
    /// Event data as decoded by the RPC.
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
}

/// One page of `getEvents`.
pub struct EventPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

struct Backoff {
    secs: u64,
}

impl Backoff {
    fn new() -> Self {
        Backoff {
            secs: INITIAL_BACKOFF_SECS,
        }
    }

    async fn wait(&mut self, reason: &str) {
        warn!("{reason} (will retry in {}s)", self.secs);
        tokio::time::sleep(Duration::from_secs(self.secs)).await;
        self.secs = (self.secs * 2).min(MAX_BACKOFF_SECS);
    }
}

/// Fetch a page of events for `contract_id`.
///
/// With a `cursor` the page continues a previous one; otherwise the scan
/// starts at `start_ledger` (inclusive).
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventPage> {
    let mut backoff = Backoff::new();
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": build_params(contract_id, start_ledger, cursor, limit),
    });

    loop {
        let resp = match client.post(rpc_url).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                backoff.wait(&format!("RPC request failed: {e}")).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            backoff.wait("Rate-limited by RPC").await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            if HARD_ERROR_CODES.contains(&err.code) {
                return Err(IndexerError::EventParse(format!(
                    "RPC hard error {}: {}",
                    err.code, err.message
                )));
            }
            backoff
                .wait(&format!("RPC soft error {} {}", err.code, err.message))
                .await;
            continue;
        }

        let result = body.result.ok_or_else(|| {
            IndexerError::EventParse("Empty result from getEvents".to_string())
        })?;

        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );

        return Ok(EventPage {
            events: result.events,
            cursor: result.cursor,
            latest_ledger: result.latest_ledger,
        });
    }
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
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

    match cursor {
        Some(cur) => params["pagination"]["cursor"] = json!(cur),
        None => params["startLedger"] = json!(start_ledger),
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode raw RPC events into [`LaunchpadEvent`]s. Events without a topic are dropped.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<LaunchpadEvent> {
    raw.iter()
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<LaunchpadEvent> {
    let kind = EventKind::from_topic(&scalar_string(raw.topic.first()?));

    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    // Pool events carry the pool id as the second topic; pause events have none.
    let pool_id = match kind {
        EventKind::ProtocolPaused | EventKind::ProtocolUnpaused => None,
        _ => raw.topic.get(1).map(|t| scalar_string(t)),
    };

    let data = decode_data(&raw.value, &kind);

    Some(LaunchpadEvent {
        event_type: kind.as_str().to_string(),
        pool_id,
        actor: data.actor,
        amount: data.amount,
        tokens: data.tokens,
        ledger: raw.ledger.unwrap_or(0) as i64,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

#[derive(Debug, Default, PartialEq)]
struct EventData {
    actor: Option<String>,
    amount: Option<String>,
    tokens: Option<String>,
}

/// Pull the interesting fields out of the event payload map.
fn decode_data(value: &Value, kind: &EventKind) -> EventData {
    match kind {
        EventKind::PoolCreated => EventData {
            actor: field(value, "owner"),
            amount: field(value, "goal"),
            tokens: None,
        },
        EventKind::Invested => EventData {
            actor: field(value, "contributor"),
            amount: field(value, "amount"),
            tokens: field(value, "tokens_due"),
        },
        EventKind::Withdrawn => EventData {
            actor: field(value, "owner"),
            amount: field(value, "amount"),
            tokens: None,
        },
        EventKind::Claimed => EventData {
            actor: field(value, "contributor"),
            amount: None,
            tokens: field(value, "amount"),
        },
        EventKind::ProtocolPaused | EventKind::ProtocolUnpaused => EventData {
            actor: as_scalar(value),
            ..Default::default()
        },
        EventKind::Unknown => EventData::default(),
    }
}

/// Look up `key` at the top level, then anywhere below it.
fn field(value: &Value, key: &str) -> Option<String> {
    if let Some(v) = value.get(key) {
        return as_scalar(v);
    }
    match value {
        Value::Object(map) => map.values().find_map(|v| field(v, key)),
        _ => None,
    }
}

/// Render a string, a number, or a `{"type":…, "value":…}` wrapper as a string.
fn as_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("value").and_then(as_scalar),
        _ => None,
    }
}

/// Topic entries arrive either as JSON-encoded ScVals or as bare strings.
fn scalar_string(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| as_scalar(&v))
        .unwrap_or_else(|| raw.to_string())
}

/// Parse an RFC 3339 timestamp into unix seconds.
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}
