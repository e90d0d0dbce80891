//! # Pool Registry
//!
//! Owns pool creation and lookup. Ids are allocated by the host ledger,
//! strictly increasing from 1.

use soroban_sdk::Address;

use crate::events::{PoolCreated, PoolEvent};
use crate::ledger::Ledger;
use crate::lifecycle;
use crate::types::{Pool, PoolConfig, PoolParams, PoolState};
use crate::Error;

pub const MAX_NAME_LEN: u32 = 64;
pub const MAX_SYMBOL_LEN: u32 = 12;
pub const MAX_DESCRIPTION_LEN: u32 = 256;

/// Check creation parameters. Every violation maps to `InvalidConfig`.
pub fn validate_params(params: &PoolParams, now: u64) -> Result<(), Error> {
    let min = params.policy.min();
    let max = params.policy.max();

    let valid = params.goal > 0
        && params.open_time < params.close_time
        && params.close_time > now
        && min > 0
        && min <= max
        && params.ratio > 0
        && params.initial_supply > 0
        && params.name.len() > 0
        && params.name.len() <= MAX_NAME_LEN
        && params.symbol.len() > 0
        && params.symbol.len() <= MAX_SYMBOL_LEN
        && params.description.len() <= MAX_DESCRIPTION_LEN;

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidConfig)
    }
}

/// Register a new pool owned by `owner` and take its asset supply into custody.
pub fn create_pool<L: Ledger>(
    ledger: &mut L,
    owner: &Address,
    params: PoolParams,
) -> Result<u64, Error> {
    validate_params(&params, ledger.now())?;

    let id = ledger.next_pool_id();
    let config = PoolConfig {
        id,
        owner: owner.clone(),
        symbol: params.symbol,
        name: params.name,
        description: params.description,
        asset: params.asset,
        initial_supply: params.initial_supply,
        goal: params.goal,
        ratio: params.ratio,
        open_time: params.open_time,
        close_time: params.close_time,
        policy: params.policy,
        repeat: params.repeat,
    };

    ledger.save_config(&config);
    ledger.save_state(id, &PoolState::new());
    ledger.collect_asset(&config.asset, owner, config.initial_supply);

    ledger.publish(PoolEvent::Created(PoolCreated {
        pool_id: id,
        owner: owner.clone(),
        goal: config.goal,
    }));
    Ok(id)
}

/// Load both halves of a pool or fail with `NotFound`.
pub fn load<L: Ledger>(ledger: &L, pool_id: u64) -> Result<(PoolConfig, PoolState), Error> {
    let config = ledger.load_config(pool_id).ok_or(Error::NotFound)?;
    let state = ledger.load_state(pool_id).ok_or(Error::NotFound)?;
    Ok((config, state))
}

/// Public view of a pool. `active` is derived from the clock, so a pending
/// or expired pool reads as inactive even though its funding flag is set.
pub fn get_pool<L: Ledger>(ledger: &L, pool_id: u64) -> Result<Pool, Error> {
    let (config, state) = load(ledger, pool_id)?;
    let active = lifecycle::is_active(&config, &state, ledger.now());
    Ok(Pool {
        active,
        ..Pool::from_parts(config, state)
    })
}
