//! Per-pool exclusive lock.
//!
//! Every state-changing pool operation runs inside [`with_pool_lock`]. The
//! lock is taken before the first effect and released on every return path
//! of the wrapped operation, so an outbound transfer that calls back into the
//! protocol finds the pool locked instead of half-updated.

use crate::ledger::Ledger;
use crate::Error;

pub fn with_pool_lock<L, T, F>(ledger: &mut L, pool_id: u64, op: F) -> Result<T, Error>
where
    L: Ledger,
    F: FnOnce(&mut L) -> Result<T, Error>,
{
    if ledger.is_locked(pool_id) {
        return Err(Error::PoolLocked);
    }
    ledger.set_locked(pool_id, true);
    let result = op(ledger);
    ledger.set_locked(pool_id, false);
    result
}
