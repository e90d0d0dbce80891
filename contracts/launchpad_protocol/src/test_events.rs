extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{Claimed, Invested, PoolCreated, Withdrawn};
use crate::{
    ContributionPolicy, LaunchpadProtocol, LaunchpadProtocolClient, PoolParams, RepeatPolicy,
};

const T0: u64 = 1_700_000_000;
const SUPPLY: i128 = 1_000_000_000;

fn setup() -> (
    Env,
    LaunchpadProtocolClient<'static>,
    Address,
    token::StellarAssetClient<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(T0);
    let contract_id = env.register(LaunchpadProtocol, ());
    let client = LaunchpadProtocolClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let native = env.register_stellar_asset_contract_v2(Address::generate(&env));
    client.init(&admin, &native.address());
    let native_sac = token::StellarAssetClient::new(&env, &native.address());
    (env, client, admin, native_sac)
}

fn create_pool(env: &Env, client: &LaunchpadProtocolClient, owner: &Address) -> u64 {
    let asset = env.register_stellar_asset_contract_v2(Address::generate(env));
    token::StellarAssetClient::new(env, &asset.address()).mint(owner, &SUPPLY);
    client.create_pool(
        owner,
        &PoolParams {
            symbol: String::from_str(env, "TST"),
            name: String::from_str(env, "Test Token"),
            description: String::from_str(env, "Test Description"),
            asset: asset.address(),
            initial_supply: SUPPLY,
            goal: 5_000,
            ratio: 100,
            open_time: T0,
            close_time: T0 + 1_000,
            policy: ContributionPolicy::Range(100, 1_000),
            repeat: RepeatPolicy::Merge,
        },
    )
}

#[test]
fn test_pool_created_event() {
    let (env, client, _, _) = setup();
    let owner = Address::generate(&env);
    let pool_id = create_pool(&env, &client, &owner);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        pool_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PoolCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        PoolCreated {
            pool_id,
            owner,
            goal: 5_000,
        }
    );
}

#[test]
fn test_invested_event() {
    let (env, client, _, native_sac) = setup();
    let owner = Address::generate(&env);
    let pool_id = create_pool(&env, &client, &owner);
    let contributor = Address::generate(&env);
    native_sac.mint(&contributor, &1_000);

    client.contribute(&pool_id, &contributor, &500);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("invested").into_val(&env),
        pool_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Invested = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Invested {
            pool_id,
            contributor,
            amount: 500,
            tokens_due: 50_000,
        }
    );
}

#[test]
fn test_withdrawn_and_claimed_events() {
    let (env, client, _, native_sac) = setup();
    let owner = Address::generate(&env);
    let pool_id = create_pool(&env, &client, &owner);
    let contributor = Address::generate(&env);
    native_sac.mint(&contributor, &1_000);
    client.contribute(&pool_id, &contributor, &1_000);
    env.ledger().set_timestamp(T0 + 1_000);

    client.withdraw(&pool_id, &owner);
    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("withdrawn").into_val(&env),
        pool_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: Withdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Withdrawn {
            pool_id,
            owner: owner.clone(),
            amount: 1_000,
        }
    );

    client.claim_tokens(&pool_id, &contributor);
    let last_event = env.events().all().last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("claimed").into_val(&env),
        pool_id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: Claimed = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Claimed {
            pool_id,
            contributor,
            amount: 100_000,
        }
    );
}

#[test]
fn test_pause_events() {
    let (env, client, admin, _) = setup();

    client.pause(&admin);
    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    assert_eq!(
        last_event.1,
        vec![&env, symbol_short!("paused").into_val(&env)]
    );
    let who: Address = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(who, admin);

    client.unpause(&admin);
    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![&env, symbol_short!("unpaused").into_val(&env)]
    );
}
