//! # Admission & Accounting
//!
//! Validates each contribution against the pool's window, funding flag and
//! amount policy, then records it in the aggregate and per-contributor
//! ledgers. The check-then-update sequence runs under the pool lock.

use soroban_sdk::Address;

use crate::events::{Invested, PoolEvent};
use crate::guard::with_pool_lock;
use crate::ledger::Ledger;
use crate::registry;
use crate::types::{Contribution, PoolConfig, PoolState, RepeatPolicy};
use crate::Error;

/// Asset units owed for `amount` native units at `ratio` (truncating).
pub fn tokens_for(amount: i128, ratio: i128) -> Result<i128, Error> {
    amount.checked_mul(ratio).ok_or(Error::ArithmeticOverflow)
}

/// Run the admission checks in order and return the tokens the contribution earns.
///
/// `existing` is the contributor's current record in this pool, if any.
pub fn validate_contribution(
    config: &PoolConfig,
    state: &PoolState,
    existing: Option<&Contribution>,
    now: u64,
    amount: i128,
) -> Result<i128, Error> {
    if now < config.open_time || now >= config.close_time {
        return Err(Error::WindowClosed);
    }
    if !state.active {
        return Err(Error::FundingComplete);
    }
    if amount < config.policy.min() {
        return Err(Error::BelowMinimum);
    }
    if amount > config.policy.max() {
        return Err(Error::ExceedsMaximum);
    }
    if existing.is_some() && config.repeat == RepeatPolicy::Reject {
        return Err(Error::DuplicateContribution);
    }

    let tokens_due = tokens_for(amount, config.ratio)?;
    let allocated = state
        .tokens_allocated
        .checked_add(tokens_due)
        .ok_or(Error::ArithmeticOverflow)?;
    if allocated > config.initial_supply {
        return Err(Error::InsufficientSupply);
    }
    Ok(tokens_due)
}

/// Apply an admitted contribution to the pool state and the contributor's record.
///
/// Returns the new state and record; nothing is persisted here.
pub fn apply_contribution(
    config: &PoolConfig,
    state: &PoolState,
    existing: Option<Contribution>,
    contributor: &Address,
    amount: i128,
    tokens_due: i128,
) -> Result<(PoolState, Contribution), Error> {
    let mut next = state.clone();
    next.total_collected = checked_add(next.total_collected, amount)?;
    next.total_withdrawable = checked_add(next.total_withdrawable, amount)?;
    next.tokens_allocated = checked_add(next.tokens_allocated, tokens_due)?;
    next.active = next.total_collected < config.goal;

    let record = match existing {
        Some(mut record) => {
            record.amount = checked_add(record.amount, amount)?;
            record.tokens_due = checked_add(record.tokens_due, tokens_due)?;
            record
        }
        None => {
            next.total_investors = next
                .total_investors
                .checked_add(1)
                .ok_or(Error::ArithmeticOverflow)?;
            Contribution {
                pool_id: config.id,
                contributor: contributor.clone(),
                amount,
                tokens_due,
                tokens_claimed: 0,
            }
        }
    };
    Ok((next, record))
}

fn checked_add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::ArithmeticOverflow)
}

/// Record a contribution of `amount` native units from `contributor`.
///
/// State is persisted before the native token is pulled into custody.
pub fn contribute<L: Ledger>(
    ledger: &mut L,
    pool_id: u64,
    contributor: &Address,
    amount: i128,
) -> Result<i128, Error> {
    let (config, _) = registry::load(ledger, pool_id)?;

    with_pool_lock(ledger, pool_id, |ledger| {
        let state = ledger.load_state(pool_id).ok_or(Error::NotFound)?;
        let existing = ledger.load_contribution(pool_id, contributor);

        let tokens_due =
            validate_contribution(&config, &state, existing.as_ref(), ledger.now(), amount)?;
        let (next, record) =
            apply_contribution(&config, &state, existing, contributor, amount, tokens_due)?;

        ledger.save_state(pool_id, &next);
        ledger.save_contribution(&record);
        ledger.collect_native(contributor, amount);

        ledger.publish(PoolEvent::Invested(Invested {
            pool_id,
            contributor: contributor.clone(),
            amount,
            tokens_due,
        }));
        Ok(tokens_due)
    })
}
