//! # Settlement
//!
//! Converts ledger entries into transfers exactly once:
//!
//! - `withdraw` pays the owner everything collected and finalizes the pool;
//! - `claim_tokens` pays a contributor the asset they are owed, once the
//!   pool is finalized.
//!
//! Both zero the owed quantity and persist it before the outbound transfer.

use soroban_sdk::Address;

use crate::events::{Claimed, PoolEvent, Withdrawn};
use crate::guard::with_pool_lock;
use crate::ledger::Ledger;
use crate::lifecycle::{pool_status, require_closed};
use crate::registry;
use crate::types::{Contribution, PoolConfig, PoolState, PoolStatus};
use crate::Error;

/// Amount the owner may withdraw right now.
pub fn compute_withdrawal(
    config: &PoolConfig,
    state: &PoolState,
    caller: &Address,
    now: u64,
) -> Result<i128, Error> {
    if *caller != config.owner {
        return Err(Error::Unauthorized);
    }
    require_closed(pool_status(config, state, now))?;
    if state.total_withdrawable <= 0 {
        return Err(Error::NothingToWithdraw);
    }
    Ok(state.total_withdrawable)
}

/// Settle a contributor's record: returns the asset units owed and the record
/// with its claim marked as paid.
pub fn compute_claim(
    status: PoolStatus,
    contribution: Option<Contribution>,
) -> Result<(i128, Contribution), Error> {
    if status != PoolStatus::Finalized {
        return Err(Error::NotFinalized);
    }
    let mut contribution = contribution.ok_or(Error::NoContribution)?;
    let owed = contribution.tokens_due - contribution.tokens_claimed;
    if owed <= 0 {
        return Err(Error::NothingToClaim);
    }
    contribution.tokens_claimed = contribution.tokens_due;
    Ok((owed, contribution))
}

/// Pay the owner every collected native unit and finalize the pool.
pub fn withdraw<L: Ledger>(ledger: &mut L, pool_id: u64, caller: &Address) -> Result<i128, Error> {
    let (config, _) = registry::load(ledger, pool_id)?;

    with_pool_lock(ledger, pool_id, |ledger| {
        let mut state = ledger.load_state(pool_id).ok_or(Error::NotFound)?;
        let amount = compute_withdrawal(&config, &state, caller, ledger.now())?;

        state.total_withdrawable = 0;
        state.finalized = true;
        ledger.save_state(pool_id, &state);
        ledger.pay_native(&config.owner, amount);

        ledger.publish(PoolEvent::Withdrawn(Withdrawn {
            pool_id,
            owner: config.owner.clone(),
            amount,
        }));
        Ok(amount)
    })
}

/// Pay `contributor` the asset they are still owed.
pub fn claim_tokens<L: Ledger>(
    ledger: &mut L,
    pool_id: u64,
    contributor: &Address,
) -> Result<i128, Error> {
    let (config, _) = registry::load(ledger, pool_id)?;

    with_pool_lock(ledger, pool_id, |ledger| {
        let state = ledger.load_state(pool_id).ok_or(Error::NotFound)?;
        let status = pool_status(&config, &state, ledger.now());
        let record = ledger.load_contribution(pool_id, contributor);
        let (owed, settled) = compute_claim(status, record)?;

        ledger.save_contribution(&settled);
        ledger.pay_asset(&config.asset, contributor, owed);

        ledger.publish(PoolEvent::Claimed(Claimed {
            pool_id,
            contributor: contributor.clone(),
            amount: owed,
        }));
        Ok(owed)
    })
}
