//! # Events
//!
//! Every state-changing entry point publishes one event. Pool events use the
//! topic layout `(symbol, pool_id)` so that off-chain indexers can filter per
//! pool without decoding the payload.
//!
//! | Topic       | Payload        |
//! |-------------|----------------|
//! | `created`   | [`PoolCreated`] |
//! | `invested`  | [`Invested`]    |
//! | `withdrawn` | [`Withdrawn`]   |
//! | `claimed`   | [`Claimed`]     |
//! | `paused`    | admin `Address` |
//! | `unpaused`  | admin `Address` |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreated {
    pub pool_id: u64,
    pub owner: Address,
    pub goal: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invested {
    pub pool_id: u64,
    pub contributor: Address,
    pub amount: i128,
    pub tokens_due: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdrawn {
    pub pool_id: u64,
    pub owner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claimed {
    pub pool_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

/// A pool event as produced by the core, before it is handed to the host.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PoolEvent {
    Created(PoolCreated),
    Invested(Invested),
    Withdrawn(Withdrawn),
    Claimed(Claimed),
}

impl PoolEvent {
    pub fn pool_id(&self) -> u64 {
        match self {
            PoolEvent::Created(e) => e.pool_id,
            PoolEvent::Invested(e) => e.pool_id,
            PoolEvent::Withdrawn(e) => e.pool_id,
            PoolEvent::Claimed(e) => e.pool_id,
        }
    }
}

pub fn publish(env: &Env, event: PoolEvent) {
    let pool_id = event.pool_id();
    match event {
        PoolEvent::Created(data) => env
            .events()
            .publish((symbol_short!("created"), pool_id), data),
        PoolEvent::Invested(data) => env
            .events()
            .publish((symbol_short!("invested"), pool_id), data),
        PoolEvent::Withdrawn(data) => env
            .events()
            .publish((symbol_short!("withdrawn"), pool_id), data),
        PoolEvent::Claimed(data) => env
            .events()
            .publish((symbol_short!("claimed"), pool_id), data),
    }
}

pub fn publish_paused(env: &Env, admin: Address) {
    env.events().publish((symbol_short!("paused"),), admin);
}

pub fn publish_unpaused(env: &Env, admin: Address) {
    env.events().publish((symbol_short!("unpaused"),), admin);
}
