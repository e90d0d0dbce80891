#![allow(dead_code)]

extern crate std;

use crate::types::{Contribution, Pool, PoolStatus};

/// INV-1: Collected and withdrawable totals are never negative.
pub fn assert_totals_non_negative(pool: &Pool) {
    assert!(
        pool.total_collected >= 0 && pool.total_withdrawable >= 0,
        "INV-1 violated: pool {} has negative totals ({}, {})",
        pool.id,
        pool.total_collected,
        pool.total_withdrawable
    );
}

/// INV-2: Pool goal must always be positive.
pub fn assert_goal_positive(pool: &Pool) {
    assert!(
        pool.goal > 0,
        "INV-2 violated: pool {} has non-positive goal ({})",
        pool.id,
        pool.goal
    );
}

/// INV-3: Withdrawable never exceeds collected.
pub fn assert_withdrawable_bounded(pool: &Pool) {
    assert!(
        pool.total_withdrawable <= pool.total_collected,
        "INV-3 violated: pool {} withdrawable {} > collected {}",
        pool.id,
        pool.total_withdrawable,
        pool.total_collected
    );
}

/// INV-4: A finalized pool has nothing left to withdraw; an unfinalized one
/// still holds everything it collected.
pub fn assert_finalized_drained(pool: &Pool) {
    if pool.finalized {
        assert_eq!(
            pool.total_withdrawable, 0,
            "INV-4 violated: finalized pool {} still withdrawable",
            pool.id
        );
    } else {
        assert_eq!(
            pool.total_withdrawable, pool.total_collected,
            "INV-4 violated: open pool {} lost funds before finalization",
            pool.id
        );
    }
}

/// INV-5: A pool never reads as active once the goal is reached or it is finalized.
pub fn assert_active_matches_goal(pool: &Pool) {
    assert!(
        !pool.active || (pool.total_collected < pool.goal && !pool.finalized),
        "INV-5 violated: pool {} active={} with collected {} / goal {}",
        pool.id,
        pool.active,
        pool.total_collected,
        pool.goal
    );
}

/// INV-6: Allocation never exceeds the supply held in custody.
pub fn assert_allocation_backed(pool: &Pool) {
    assert!(
        pool.tokens_allocated <= pool.initial_supply,
        "INV-6 violated: pool {} allocated {} of {}",
        pool.id,
        pool.tokens_allocated,
        pool.initial_supply
    );
}

/// INV-7: Ledger conservation: per-contributor records sum to the pool totals
/// and there is one record per counted investor.
pub fn assert_ledger_conserved<'a>(
    pool: &Pool,
    records: impl IntoIterator<Item = &'a Contribution>,
) {
    let mut amount = 0i128;
    let mut due = 0i128;
    let mut count = 0u32;
    for record in records {
        assert_eq!(record.pool_id, pool.id, "INV-7 violated: foreign record");
        amount += record.amount;
        due += record.tokens_due;
        count += 1;
    }
    assert_eq!(
        amount, pool.total_collected,
        "INV-7 violated: contributions sum {} != collected {}",
        amount, pool.total_collected
    );
    assert_eq!(
        due, pool.tokens_allocated,
        "INV-7 violated: tokens due sum {} != allocated {}",
        due, pool.tokens_allocated
    );
    assert_eq!(
        count, pool.total_investors,
        "INV-7 violated: {} records for {} investors",
        count, pool.total_investors
    );
}

/// INV-8: Claims never exceed entitlement.
pub fn assert_claim_bounded(record: &Contribution) {
    assert!(
        record.tokens_claimed >= 0 && record.tokens_claimed <= record.tokens_due,
        "INV-8 violated: claimed {} of {}",
        record.tokens_claimed,
        record.tokens_due
    );
}

/// INV-9: Collected total never decreases.
pub fn assert_collected_monotonic(before: i128, after: i128) {
    assert!(
        after >= before,
        "INV-9 violated: total_collected decreased from {} to {}",
        before,
        after
    );
}

/// INV-10: Status transition validity. Only forward transitions are allowed:
///   Pending -> Open | Expired
///   Open    -> Funded | Expired
///   Funded | Expired -> Finalized
///   Finalized -> (none)
pub fn assert_valid_status_transition(from: PoolStatus, to: PoolStatus) {
    if from == to {
        return;
    }
    let valid = matches!(
        (from, to),
        (PoolStatus::Pending, PoolStatus::Open)
            | (PoolStatus::Pending, PoolStatus::Expired)
            | (PoolStatus::Open, PoolStatus::Funded)
            | (PoolStatus::Open, PoolStatus::Expired)
            | (PoolStatus::Funded, PoolStatus::Finalized)
            | (PoolStatus::Expired, PoolStatus::Finalized)
    );

    assert!(
        valid,
        "INV-10 violated: invalid status transition from {:?} to {:?}",
        from, to
    );
}

/// INV-11: Immutable fields do not change after creation.
pub fn assert_pool_immutable_fields(original: &Pool, current: &Pool) {
    assert_eq!(original.id, current.id, "INV-11 violated: pool id changed");
    assert_eq!(original.owner, current.owner, "INV-11 violated: owner changed");
    assert_eq!(original.goal, current.goal, "INV-11 violated: goal changed");
    assert_eq!(original.ratio, current.ratio, "INV-11 violated: ratio changed");
    assert_eq!(
        original.open_time, current.open_time,
        "INV-11 violated: open_time changed"
    );
    assert_eq!(
        original.close_time, current.close_time,
        "INV-11 violated: close_time changed"
    );
    assert_eq!(original.policy, current.policy, "INV-11 violated: policy changed");
}

/// Run all stateless pool invariants.
pub fn assert_all_pool_invariants(pool: &Pool) {
    assert_totals_non_negative(pool);
    assert_goal_positive(pool);
    assert_withdrawable_bounded(pool);
    assert_finalized_drained(pool);
    assert_active_matches_goal(pool);
    assert_allocation_backed(pool);
}
