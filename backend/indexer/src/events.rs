//! Canonical event types emitted by the launchpad contract.
//!
//! These mirror the topics published by `contracts/launchpad_protocol/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the launchpad contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A pool was created (`created` topic).
    PoolCreated,
    /// A contribution was accepted (`invested` topic).
    Invested,
    /// The owner withdrew the proceeds (`withdrawn` topic).
    Withdrawn,
    /// A contributor claimed their allocation (`claimed` topic).
    Claimed,
    /// Protocol was paused (`paused` topic).
    ProtocolPaused,
    /// Protocol was unpaused (`unpaused` topic).
    ProtocolUnpaused,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::PoolCreated,
            "invested" => Self::Invested,
            "withdrawn" => Self::Withdrawn,
            "claimed" => Self::Claimed,
            "paused" => Self::ProtocolPaused,
            "unpaused" => Self::ProtocolUnpaused,
            _ => Self::Unknown,
        }
    }

    /// Short identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PoolCreated => "pool_created",
            Self::Invested => "invested",
            Self::Withdrawn => "withdrawn",
            Self::Claimed => "claimed",
            Self::ProtocolPaused => "protocol_paused",
            Self::ProtocolUnpaused => "protocol_unpaused",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`], for rows read back from the database.
    pub fn from_column(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .unwrap_or(Self::Unknown)
    }

    const ALL: [EventKind; 6] = [
        Self::PoolCreated,
        Self::Invested,
        Self::Withdrawn,
        Self::Claimed,
        Self::ProtocolPaused,
        Self::ProtocolUnpaused,
    ];
}

/// A fully decoded launchpad event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchpadEvent {
    pub event_type: String,
    pub pool_id: Option<String>,
    pub actor: Option<String>,
    /// Native amount (goal for `pool_created`).
    pub amount: Option<String>,
    /// Asset units (`tokens_due` for `invested`).
    pub tokens: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub pool_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub tokens: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
