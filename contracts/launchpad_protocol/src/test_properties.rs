//! Property tests: random interleavings of clock advances, contributions,
//! withdrawals and claims against one pool must preserve conservation and
//! settle each quantity exactly once.

extern crate std;

use std::vec::Vec;

use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::accounting::contribute;
use crate::invariants::*;
use crate::ledger::Ledger;
use crate::lifecycle::pool_status;
use crate::registry::{create_pool, get_pool, load};
use crate::settlement::{claim_tokens, withdraw};
use crate::testutils::{sample_params, MemoryLedger};
use crate::types::{ContributionPolicy, PoolStatus};
use crate::Error;

const OPEN: u64 = 100;
const CLOSE: u64 = 1_100;
const GOAL: i128 = 500;
const INVESTORS: usize = 4;

#[derive(Clone, Debug)]
enum Op {
    Advance(u64),
    Contribute(usize, i128),
    Withdraw { as_owner: bool },
    Claim(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u64..300).prop_map(Op::Advance),
        (0..INVESTORS, 1i128..150).prop_map(|(who, amount)| Op::Contribute(who, amount)),
        any::<bool>().prop_map(|as_owner| Op::Withdraw { as_owner }),
        (0..INVESTORS).prop_map(Op::Claim),
    ]
}

fn check_pool(ledger: &MemoryLedger, pool_id: u64) {
    let pool = get_pool(ledger, pool_id).unwrap();
    assert_all_pool_invariants(&pool);
    assert_ledger_conserved(&pool, ledger.contributions(pool_id));
    for record in ledger.contributions(pool_id) {
        assert_claim_bounded(record);
    }
    assert_eq!(ledger.native_custody, pool.total_withdrawable);
}

fn status_of(ledger: &MemoryLedger, pool_id: u64) -> PoolStatus {
    let (config, state) = load(ledger, pool_id).unwrap();
    pool_status(&config, &state, ledger.now())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_random_interleavings_preserve_invariants(
        ops in prop::collection::vec(op_strategy(), 1..60)
    ) {
        let env = Env::default();
        let mut ledger = MemoryLedger::new();
        let owner = Address::generate(&env);
        let investors: Vec<Address> = (0..INVESTORS).map(|_| Address::generate(&env)).collect();

        let mut params = sample_params(&env, OPEN, CLOSE, GOAL);
        params.policy = ContributionPolicy::Range(10, 100);
        let pool_id = create_pool(&mut ledger, &owner, params).unwrap();
        let original = get_pool(&ledger, pool_id).unwrap();

        let mut withdrawals = 0u32;
        let mut status = status_of(&ledger, pool_id);

        for op in ops {
            let collected_before = ledger.load_state(pool_id).unwrap().total_collected;

            match op {
                Op::Advance(secs) => ledger.time += secs,
                Op::Contribute(who, amount) => {
                    let goal_met = collected_before >= GOAL;
                    let in_window = ledger.now() >= OPEN && ledger.now() < CLOSE;
                    let result = contribute(&mut ledger, pool_id, &investors[who], amount);
                    if !in_window {
                        prop_assert_eq!(result, Err(Error::WindowClosed));
                    } else if goal_met {
                        prop_assert_eq!(result, Err(Error::FundingComplete));
                    } else if amount < 10 {
                        prop_assert_eq!(result, Err(Error::BelowMinimum));
                    } else if amount > 100 {
                        prop_assert_eq!(result, Err(Error::ExceedsMaximum));
                    } else {
                        prop_assert_eq!(result, Ok(amount * 1_000));
                    }
                }
                Op::Withdraw { as_owner } => {
                    let caller = if as_owner { owner.clone() } else { investors[0].clone() };
                    let paid_before = ledger.native_paid(&owner);
                    match withdraw(&mut ledger, pool_id, &caller) {
                        Ok(amount) => {
                            withdrawals += 1;
                            prop_assert!(as_owner);
                            prop_assert_eq!(amount, collected_before);
                            prop_assert_eq!(ledger.native_paid(&owner), paid_before + amount);
                        }
                        Err(_) => prop_assert_eq!(ledger.native_paid(&owner), paid_before),
                    }
                }
                Op::Claim(who) => {
                    let investor = &investors[who];
                    let paid_before = ledger.asset_paid(investor);
                    match claim_tokens(&mut ledger, pool_id, investor) {
                        Ok(amount) => {
                            prop_assert_eq!(ledger.asset_paid(investor), paid_before + amount);
                            prop_assert_eq!(
                                claim_tokens(&mut ledger, pool_id, investor),
                                Err(Error::NothingToClaim)
                            );
                        }
                        Err(_) => prop_assert_eq!(ledger.asset_paid(investor), paid_before),
                    }
                }
            }

            let collected_after = ledger.load_state(pool_id).unwrap().total_collected;
            assert_collected_monotonic(collected_before, collected_after);
            check_pool(&ledger, pool_id);

            let next = status_of(&ledger, pool_id);
            assert_valid_status_transition(status, next);
            status = next;

            assert_pool_immutable_fields(&original, &get_pool(&ledger, pool_id).unwrap());
        }

        prop_assert!(withdrawals <= 1);
        for investor in &investors {
            if let Some(record) = ledger.load_contribution(pool_id, investor) {
                prop_assert_eq!(ledger.asset_paid(investor), record.tokens_claimed);
            }
        }
    }
}
