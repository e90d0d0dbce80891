//! # Types
//!
//! Shared data structures used across all modules of the launchpad protocol.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Pool` is internally stored as two separate ledger entries:
//!
//! - [`PoolConfig`]: written once at creation; never mutated.
//! - [`PoolState`]: written on every contribution, withdrawal and claim.
//!
//! The public API exposes the reconstructed [`Pool`] struct for convenience.
//!
//! ### Status is derived
//!
//! [`PoolStatus`] is never stored. It is computed by
//! [`crate::lifecycle::pool_status`] from the clock, the collected total and
//! the `finalized` flag:
//!
//! ```text
//! Pending ──► Open ──► Funded  ──► Finalized
//!               └────► Expired ──►┘
//! ```

use soroban_sdk::{contracttype, Address, String};

/// Per-call amount rule applied by the admission engine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContributionPolicy {
    /// Every contribution must equal exactly this amount.
    Fixed(i128),
    /// Every contribution must fall within `[min, max]`.
    Range(i128, i128),
}

impl ContributionPolicy {
    pub fn min(&self) -> i128 {
        match self {
            ContributionPolicy::Fixed(amount) => *amount,
            ContributionPolicy::Range(min, _) => *min,
        }
    }

    pub fn max(&self) -> i128 {
        match self {
            ContributionPolicy::Fixed(amount) => *amount,
            ContributionPolicy::Range(_, max) => *max,
        }
    }
}

/// What happens when a contributor who already holds a record contributes again.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RepeatPolicy {
    /// Accumulate into the existing record.
    Merge,
    /// Fail with `Error::DuplicateContribution`.
    Reject,
}

/// Lifecycle status of a pool, derived on every read.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolStatus {
    /// Before `open_time`.
    Pending,
    /// Accepting contributions.
    Open,
    /// Goal reached; closed, not yet finalized.
    Funded,
    /// `close_time` passed without reaching the goal; not yet finalized.
    Expired,
    /// Owner withdrawal executed; claims are open.
    Finalized,
}

/// Caller-supplied parameters for `create_pool`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParams {
    pub symbol: String,
    pub name: String,
    pub description: String,
    /// Token distributed to contributors.
    pub asset: Address,
    /// Asset units moved from the owner into custody at creation.
    pub initial_supply: i128,
    pub goal: i128,
    /// Asset units owed per native unit contributed.
    pub ratio: i128,
    pub open_time: u64,
    pub close_time: u64,
    pub policy: ContributionPolicy,
    pub repeat: RepeatPolicy,
}

/// Immutable pool configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub id: u64,
    pub owner: Address,
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub asset: Address,
    pub initial_supply: i128,
    pub goal: i128,
    pub ratio: i128,
    pub open_time: u64,
    pub close_time: u64,
    pub policy: ContributionPolicy,
    pub repeat: RepeatPolicy,
}

/// Mutable pool accounting.
///
/// Kept small so that frequent writes (contributions) are cheap.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    pub total_collected: i128,
    pub total_withdrawable: i128,
    pub total_investors: u32,
    /// Sum of `tokens_due` over every contribution record.
    pub tokens_allocated: i128,
    /// Cleared once `total_collected >= goal`.
    pub active: bool,
    pub finalized: bool,
}

impl PoolState {
    pub fn new() -> Self {
        PoolState {
            active: true,
            ..Default::default()
        }
    }
}

/// Full on-chain representation of a pool.
///
/// Used as the public API return type; reconstructed from the split
/// `PoolConfig` + `PoolState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Unique identifier (sequential from 1).
    pub id: u64,
    /// Creator; the only address allowed to withdraw.
    pub owner: Address,
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub asset: Address,
    pub initial_supply: i128,
    pub goal: i128,
    pub ratio: i128,
    pub open_time: u64,
    pub close_time: u64,
    pub policy: ContributionPolicy,
    pub repeat: RepeatPolicy,
    pub total_collected: i128,
    pub total_withdrawable: i128,
    pub total_investors: u32,
    pub tokens_allocated: i128,
    /// True while the pool accepts contributions; derived on read.
    pub active: bool,
    pub finalized: bool,
}

impl Pool {
    pub fn from_parts(config: PoolConfig, state: PoolState) -> Self {
        Pool {
            id: config.id,
            owner: config.owner,
            symbol: config.symbol,
            name: config.name,
            description: config.description,
            asset: config.asset,
            initial_supply: config.initial_supply,
            goal: config.goal,
            ratio: config.ratio,
            open_time: config.open_time,
            close_time: config.close_time,
            policy: config.policy,
            repeat: config.repeat,
            total_collected: state.total_collected,
            total_withdrawable: state.total_withdrawable,
            total_investors: state.total_investors,
            tokens_allocated: state.tokens_allocated,
            active: state.active,
            finalized: state.finalized,
        }
    }
}

/// One contributor's position in one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contribution {
    pub pool_id: u64,
    pub contributor: Address,
    /// Native units contributed.
    pub amount: i128,
    /// Asset units owed, fixed at contribution time.
    pub tokens_due: i128,
    pub tokens_claimed: i128,
}
