//! # Storage
//!
//! Typed helpers over the three Soroban storage tiers used by the launchpad.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type      | Description                         |
//! |---------------|-----------|-------------------------------------|
//! | `PoolCount`   | `u64`     | Last allocated pool id              |
//! | `Admin`       | `Address` | Protocol admin (pause / unpause)    |
//! | `NativeToken` | `Address` | Token contributions are paid in     |
//! | `Paused`      | `bool`    | Protocol pause flag                 |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                      | Type           | Description                 |
//! |--------------------------|----------------|-----------------------------|
//! | `PoolConfig(id)`         | `PoolConfig`   | Immutable pool configuration |
//! | `PoolState(id)`          | `PoolState`    | Mutable pool accounting      |
//! | `Contribution(id, addr)` | `Contribution` | Per-contributor position     |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! ## Temporary storage
//!
//! `Lock(id)` marks a pool whose operation is in flight. It never outlives the
//! invocation that set it.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Contribution, PoolConfig, PoolState};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Last allocated pool id (Instance).
    PoolCount,
    /// Protocol admin (Instance).
    Admin,
    /// Native contribution token (Instance).
    NativeToken,
    /// Pause flag (Instance).
    Paused,
    /// Immutable pool configuration keyed by id (Persistent).
    PoolConfig(u64),
    /// Mutable pool accounting keyed by id (Persistent).
    PoolState(u64),
    /// Contribution keyed by pool id and contributor (Persistent).
    Contribution(u64, Address),
    /// In-flight operation marker (Temporary).
    Lock(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Reads, increments and stores the pool counter.
/// Returns the id for the *new* pool (post-increment value), so ids start at 1.
pub fn next_pool_id(env: &Env) -> u64 {
    let next = pool_count(env) + 1;
    env.storage().instance().set(&DataKey::PoolCount, &next);
    next
}

/// Number of pools created so far.
pub fn pool_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PoolCount)
        .unwrap_or(0)
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn get_native_token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::NativeToken)
}

pub fn set_native_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::NativeToken, token);
    bump_instance(env);
}

pub fn is_paused(env: &Env) -> bool {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn load_pool_config(env: &Env, id: u64) -> Option<PoolConfig> {
    let key = DataKey::PoolConfig(id);
    let config: Option<PoolConfig> = env.storage().persistent().get(&key);
    if config.is_some() {
        bump_persistent(env, &key);
    }
    config
}

pub fn save_pool_config(env: &Env, config: &PoolConfig) {
    let key = DataKey::PoolConfig(config.id);
    env.storage().persistent().set(&key, config);
    bump_persistent(env, &key);
}

pub fn load_pool_state(env: &Env, id: u64) -> Option<PoolState> {
    let key = DataKey::PoolState(id);
    let state: Option<PoolState> = env.storage().persistent().get(&key);
    if state.is_some() {
        bump_persistent(env, &key);
    }
    state
}

/// Save only the mutable pool state (the hot path for contributions).
pub fn save_pool_state(env: &Env, id: u64, state: &PoolState) {
    let key = DataKey::PoolState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn load_contribution(env: &Env, id: u64, contributor: &Address) -> Option<Contribution> {
    let key = DataKey::Contribution(id, contributor.clone());
    let contribution: Option<Contribution> = env.storage().persistent().get(&key);
    if contribution.is_some() {
        bump_persistent(env, &key);
    }
    contribution
}

pub fn save_contribution(env: &Env, contribution: &Contribution) {
    let key = DataKey::Contribution(contribution.pool_id, contribution.contributor.clone());
    env.storage().persistent().set(&key, contribution);
    bump_persistent(env, &key);
}

// ── Temporary Storage Helpers ────────────────────────────────────────

pub fn is_locked(env: &Env, id: u64) -> bool {
    env.storage().temporary().has(&DataKey::Lock(id))
}

pub fn set_locked(env: &Env, id: u64, locked: bool) {
    let key = DataKey::Lock(id);
    if locked {
        env.storage().temporary().set(&key, &true);
    } else {
        env.storage().temporary().remove(&key);
    }
}
