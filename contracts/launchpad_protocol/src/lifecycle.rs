//! # Lifecycle
//!
//! Pool status is a pure function of `(now, total_collected, goal, finalized)`.
//! Only the terminal `finalized` flag and the `active` funding flag are
//! persisted; everything else is derived here on each call.

use crate::types::{PoolConfig, PoolState, PoolStatus};
use crate::Error;

/// Derive the current status of a pool.
///
/// Reaching the goal closes the pool immediately, even before `close_time`.
pub fn pool_status(config: &PoolConfig, state: &PoolState, now: u64) -> PoolStatus {
    if state.finalized {
        PoolStatus::Finalized
    } else if !state.active || state.total_collected >= config.goal {
        PoolStatus::Funded
    } else if now >= config.close_time {
        PoolStatus::Expired
    } else if now < config.open_time {
        PoolStatus::Pending
    } else {
        PoolStatus::Open
    }
}

/// True iff `now` is within `[open_time, close_time)` and the goal is not met.
pub fn is_active(config: &PoolConfig, state: &PoolState, now: u64) -> bool {
    pool_status(config, state, now) == PoolStatus::Open
}

/// Gate for owner settlement: the pool must be closed and not yet finalized.
pub fn require_closed(status: PoolStatus) -> Result<(), Error> {
    match status {
        PoolStatus::Pending | PoolStatus::Open => Err(Error::NotYetClosed),
        PoolStatus::Finalized => Err(Error::AlreadyFinalized),
        PoolStatus::Funded | PoolStatus::Expired => Ok(()),
    }
}
