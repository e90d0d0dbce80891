//! Per-pool aggregates folded from the stored event stream.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::events::{EventKind, EventRecord};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSummary {
    pub pool_id: String,
    pub owner: Option<String>,
    /// Funding goal as announced on creation.
    pub goal: Option<String>,
    pub total_invested: i128,
    pub investors: usize,
    pub tokens_allocated: i128,
    pub tokens_claimed: i128,
    pub withdrawn: i128,
    pub goal_reached: bool,
    pub settled: bool,
    pub last_ledger: i64,
}

impl PoolSummary {
    /// Fold the events of a single pool. Amounts are summed as `i128`;
    /// unparseable values count as zero.
    pub fn from_events(pool_id: &str, events: &[EventRecord]) -> Self {
        let mut summary = PoolSummary {
            pool_id: pool_id.to_string(),
            ..Default::default()
        };
        let mut investors = BTreeSet::new();

        for ev in events.iter().filter(|e| e.pool_id.as_deref() == Some(pool_id)) {
            summary.last_ledger = summary.last_ledger.max(ev.ledger);
            match EventKind::from_column(&ev.event_type) {
                EventKind::PoolCreated => {
                    summary.owner = ev.actor.clone();
                    summary.goal = ev.amount.clone();
                }
                EventKind::Invested => {
                    summary.total_invested += parse(&ev.amount);
                    summary.tokens_allocated += parse(&ev.tokens);
                    if let Some(actor) = &ev.actor {
                        investors.insert(actor.clone());
                    }
                }
                EventKind::Withdrawn => {
                    summary.withdrawn += parse(&ev.amount);
                    summary.settled = true;
                }
                EventKind::Claimed => summary.tokens_claimed += parse(&ev.tokens),
                _ => {}
            }
        }

        summary.investors = investors.len();
        summary.goal_reached = summary
            .goal
            .as_deref()
            .and_then(|g| g.parse::<i128>().ok())
            .map(|goal| summary.total_invested >= goal)
            .unwrap_or(false);
        summary
    }
}

fn parse(value: &Option<String>) -> i128 {
    value.as_deref().and_then(|v| v.parse().ok()).unwrap_or(0)
}
