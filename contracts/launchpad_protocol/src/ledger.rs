//! # Ledger
//!
//! The seam between the pool core (`registry`, `accounting`, `lifecycle`,
//! `settlement`) and the host it runs on. The core never touches `Env`
//! directly; it reads and writes records, moves value and publishes events
//! only through [`Ledger`].
//!
//! [`SorobanLedger`] is the production host: records live in Soroban
//! storage (see [`crate::storage`]) and value moves through the token
//! interface, with the contract address as custodian.

use soroban_sdk::{token, Address, Env};

use crate::events::{self, PoolEvent};
use crate::storage;
use crate::types::{Contribution, PoolConfig, PoolState};

/// Storage, custody and clock primitives required by the pool core.
pub trait Ledger {
    /// Current host time (unix seconds).
    fn now(&self) -> u64;

    /// Allocate the next pool id. Ids start at 1 and are never reused.
    fn next_pool_id(&mut self) -> u64;
    fn pool_count(&self) -> u64;

    fn load_config(&self, pool_id: u64) -> Option<PoolConfig>;
    fn save_config(&mut self, config: &PoolConfig);
    fn load_state(&self, pool_id: u64) -> Option<PoolState>;
    fn save_state(&mut self, pool_id: u64, state: &PoolState);
    fn load_contribution(&self, pool_id: u64, contributor: &Address) -> Option<Contribution>;
    fn save_contribution(&mut self, contribution: &Contribution);

    fn is_locked(&self, pool_id: u64) -> bool;
    fn set_locked(&mut self, pool_id: u64, locked: bool);

    /// Move `amount` of the native token from `from` into custody.
    fn collect_native(&mut self, from: &Address, amount: i128);
    /// Move `amount` of the native token out of custody to `to`.
    fn pay_native(&mut self, to: &Address, amount: i128);
    /// Move `amount` of `asset` from `from` into custody.
    fn collect_asset(&mut self, asset: &Address, from: &Address, amount: i128);
    /// Move `amount` of `asset` out of custody to `to`.
    fn pay_asset(&mut self, asset: &Address, to: &Address, amount: i128);

    fn publish(&mut self, event: PoolEvent);
}

pub struct SorobanLedger {
    env: Env,
    native_token: Address,
}

impl SorobanLedger {
    pub fn new(env: &Env, native_token: Address) -> Self {
        SorobanLedger {
            env: env.clone(),
            native_token,
        }
    }

    fn transfer(&self, token: &Address, from: &Address, to: &Address, amount: i128) {
        token::Client::new(&self.env, token).transfer(from, to, &amount);
    }
}

impl Ledger for SorobanLedger {
    fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    fn next_pool_id(&mut self) -> u64 {
        storage::next_pool_id(&self.env)
    }

    fn pool_count(&self) -> u64 {
        storage::pool_count(&self.env)
    }

    fn load_config(&self, pool_id: u64) -> Option<PoolConfig> {
        storage::load_pool_config(&self.env, pool_id)
    }

    fn save_config(&mut self, config: &PoolConfig) {
        storage::save_pool_config(&self.env, config);
    }

    fn load_state(&self, pool_id: u64) -> Option<PoolState> {
        storage::load_pool_state(&self.env, pool_id)
    }

    fn save_state(&mut self, pool_id: u64, state: &PoolState) {
        storage::save_pool_state(&self.env, pool_id, state);
    }

    fn load_contribution(&self, pool_id: u64, contributor: &Address) -> Option<Contribution> {
        storage::load_contribution(&self.env, pool_id, contributor)
    }

    fn save_contribution(&mut self, contribution: &Contribution) {
        storage::save_contribution(&self.env, contribution);
    }

    fn is_locked(&self, pool_id: u64) -> bool {
        storage::is_locked(&self.env, pool_id)
    }

    fn set_locked(&mut self, pool_id: u64, locked: bool) {
        storage::set_locked(&self.env, pool_id, locked);
    }

    fn collect_native(&mut self, from: &Address, amount: i128) {
        let custody = self.env.current_contract_address();
        self.transfer(&self.native_token, from, &custody, amount);
    }

    fn pay_native(&mut self, to: &Address, amount: i128) {
        let custody = self.env.current_contract_address();
        self.transfer(&self.native_token, &custody, to, amount);
    }

    fn collect_asset(&mut self, asset: &Address, from: &Address, amount: i128) {
        let custody = self.env.current_contract_address();
        self.transfer(asset, from, &custody, amount);
    }

    fn pay_asset(&mut self, asset: &Address, to: &Address, amount: i128) {
        let custody = self.env.current_contract_address();
        self.transfer(asset, &custody, to, amount);
    }

    fn publish(&mut self, event: PoolEvent) {
        events::publish(&self.env, event);
    }
}
