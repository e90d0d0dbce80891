//! # Launchpad Protocol Contract
//!
//! A funding-pool launchpad: a pool accepts bounded contributions of the
//! native token during a time window, closes when its goal is met or the
//! window elapses, lets its owner withdraw the proceeds once, and then lets
//! every contributor claim the pool asset at the pool's fixed ratio.
//!
//! | Phase      | Entry Point(s)                                      |
//! |------------|-----------------------------------------------------|
//! | Bootstrap  | [`LaunchpadProtocol::init`]                         |
//! | Admin      | `pause`, `unpause`                                  |
//! | Registry   | [`LaunchpadProtocol::create_pool`]                  |
//! | Funding    | [`LaunchpadProtocol::contribute`]                   |
//! | Settlement | [`LaunchpadProtocol::withdraw`], [`LaunchpadProtocol::claim_tokens`] |
//! | Queries    | `get_pool`, `get_contribution`, `pool_status`, `is_pool_active`, `pool_count` |
//!
//! ## Architecture
//!
//! The pool rules live in host-agnostic modules ([`registry`],
//! [`accounting`], [`lifecycle`], [`settlement`]) written against the
//! [`ledger::Ledger`] trait. This file only authenticates callers, applies
//! the protocol pause and hands a [`ledger::SorobanLedger`] to the core.

#![no_std]

#[cfg(test)]
extern crate std;

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env};

pub mod accounting;
pub mod events;
pub mod guard;
pub mod ledger;
pub mod lifecycle;
pub mod registry;
pub mod settlement;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_properties;

use ledger::SorobanLedger;
pub use types::{
    Contribution, ContributionPolicy, Pool, PoolConfig, PoolParams, PoolState, PoolStatus,
    RepeatPolicy,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidConfig         = 1,
    NotFound              = 2,
    WindowClosed          = 3,
    FundingComplete       = 4,
    BelowMinimum          = 5,
    ExceedsMaximum        = 6,
    NotYetClosed          = 7,
    AlreadyFinalized      = 8,
    Unauthorized          = 9,
    NothingToWithdraw     = 10,
    NotFinalized          = 11,
    NoContribution        = 12,
    NothingToClaim        = 13,
    DuplicateContribution = 14,
    InsufficientSupply    = 15,
    ArithmeticOverflow    = 16,
    PoolLocked            = 17,
    AlreadyInitialized    = 18,
    NotInitialized        = 19,
    ProtocolPaused        = 20,
}

#[contract]
pub struct LaunchpadProtocol;

fn host(env: &Env) -> Result<SorobanLedger, Error> {
    let native = storage::get_native_token(env).ok_or(Error::NotInitialized)?;
    Ok(SorobanLedger::new(env, native))
}

fn require_admin(env: &Env, admin: &Address) -> Result<(), Error> {
    admin.require_auth();
    let stored = storage::get_admin(env).ok_or(Error::NotInitialized)?;
    if stored != *admin {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

fn require_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::ProtocolPaused);
    }
    Ok(())
}

#[contractimpl]
impl LaunchpadProtocol {
    // ─────────────────────────────────────────────────────────
    // Bootstrap & admin
    // ─────────────────────────────────────────────────────────

    /// Set the protocol admin and the token contributions are paid in.
    ///
    /// Must be called exactly once after deployment.
    pub fn init(env: Env, admin: Address, native_token: Address) -> Result<(), Error> {
        admin.require_auth();
        if storage::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        storage::set_native_token(&env, &native_token);
        Ok(())
    }

    /// Stop pool creation and contributions. Settlement stays available.
    pub fn pause(env: Env, admin: Address) -> Result<(), Error> {
        require_admin(&env, &admin)?;
        storage::set_paused(&env, true);
        events::publish_paused(&env, admin);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), Error> {
        require_admin(&env, &admin)?;
        storage::set_paused(&env, false);
        events::publish_unpaused(&env, admin);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn native_token(env: Env) -> Result<Address, Error> {
        storage::get_native_token(&env).ok_or(Error::NotInitialized)
    }

    // ─────────────────────────────────────────────────────────
    // Pool operations
    // ─────────────────────────────────────────────────────────

    /// Register a new pool. `owner` must sign and holds `params.initial_supply`
    /// of `params.asset`, which moves into contract custody.
    pub fn create_pool(env: Env, owner: Address, params: PoolParams) -> Result<u64, Error> {
        owner.require_auth();
        require_not_paused(&env)?;
        registry::create_pool(&mut host(&env)?, &owner, params)
    }

    /// Contribute `amount` of the native token. Returns the asset units now owed.
    pub fn contribute(
        env: Env,
        pool_id: u64,
        contributor: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        contributor.require_auth();
        require_not_paused(&env)?;
        accounting::contribute(&mut host(&env)?, pool_id, &contributor, amount)
    }

    /// Owner withdrawal of everything collected; finalizes the pool.
    pub fn withdraw(env: Env, pool_id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        settlement::withdraw(&mut host(&env)?, pool_id, &caller)
    }

    /// Transfer the caller's outstanding asset allocation.
    pub fn claim_tokens(env: Env, pool_id: u64, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();
        settlement::claim_tokens(&mut host(&env)?, pool_id, &contributor)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_pool(env: Env, pool_id: u64) -> Result<Pool, Error> {
        registry::get_pool(&host(&env)?, pool_id)
    }

    pub fn get_contribution(
        env: Env,
        pool_id: u64,
        contributor: Address,
    ) -> Result<Contribution, Error> {
        storage::load_contribution(&env, pool_id, &contributor).ok_or(Error::NotFound)
    }

    pub fn pool_status(env: Env, pool_id: u64) -> Result<PoolStatus, Error> {
        let (config, state) = registry::load(&host(&env)?, pool_id)?;
        Ok(lifecycle::pool_status(&config, &state, env.ledger().timestamp()))
    }

    /// True while the pool accepts contributions.
    pub fn is_pool_active(env: Env, pool_id: u64) -> Result<bool, Error> {
        let (config, state) = registry::load(&host(&env)?, pool_id)?;
        Ok(lifecycle::is_active(&config, &state, env.ledger().timestamp()))
    }

    pub fn pool_count(env: Env) -> u64 {
        storage::pool_count(&env)
    }
}
