extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::{
    CampaignCreated, ContributionReceived, ContributionRefunded, FundraiseCancelled,
    OwnerWithdrawal, RewardMinted,
};
use crate::{Crowdfund, CrowdfundClient, CAMPAIGN_DURATION, REWARD_UNIT};

const UNIT: i128 = REWARD_UNIT;
const HALF_UNIT: i128 = REWARD_UNIT / 2;
const GOAL: i128 = 200 * UNIT;

fn setup() -> (Env, CrowdfundClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(Crowdfund, ());
    let client = CrowdfundClient::new(&env, &contract_id);
    (env, client)
}

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

fn setup_campaign(
    env: &Env,
    client: &CrowdfundClient,
) -> (token::Client<'static>, Address, Address, u64) {
    let token_admin = Address::generate(env);
    let token = create_token(env, &token_admin);
    let owner = Address::generate(env);
    let contributor = Address::generate(env);
    let token_sac = token::StellarAssetClient::new(env, &token.address);
    token_sac.mint(&contributor, &(1_000 * UNIT));
    let id = client.create_instance(&owner, &token.address, &GOAL);
    (token, owner, contributor, id)
}

#[test]
fn test_campaign_created_event() {
    let (env, client) = setup();
    let token_admin = Address::generate(&env);
    let token = create_token(&env, &token_admin);
    let owner = Address::generate(&env);

    let id = client.create_instance(&owner, &token.address, &GOAL);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), campaign_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: CampaignCreated struct
    let event_data: CampaignCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignCreated {
            campaign_id: id,
            owner: owner.clone(),
            token: token.address.clone(),
            goal: GOAL,
            deadline: env.ledger().timestamp() + CAMPAIGN_DURATION,
        }
    );
}

#[test]
fn test_contribution_received_event() {
    let (env, client) = setup();
    let (_token, _owner, contributor, id) = setup_campaign(&env, &client);

    // A sub-unit amount mints no reward, so the contribution event is the
    // last one published by the call.
    client.contribute(&id, &contributor, &HALF_UNIT);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("contrib"), campaign_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("contrib").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: ContributionReceived struct
    let event_data: ContributionReceived = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributionReceived {
            campaign_id: id,
            contributor: contributor.clone(),
            amount: HALF_UNIT,
            total_contributed: HALF_UNIT,
        }
    );
}

#[test]
fn test_reward_minted_event() {
    let (env, client) = setup();
    let (_token, _owner, contributor, id) = setup_campaign(&env, &client);

    // 2.5 whole units mint two reward points; the reward event follows the
    // contribution event.
    client.contribute(&id, &contributor, &(2 * UNIT + HALF_UNIT));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("reward"), campaign_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("reward").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: RewardMinted struct
    let event_data: RewardMinted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RewardMinted {
            campaign_id: id,
            contributor: contributor.clone(),
            minted: 2,
            balance: 2,
        }
    );
}

#[test]
fn test_fundraise_cancelled_event() {
    let (env, client) = setup();
    let (_token, owner, _contributor, id) = setup_campaign(&env, &client);

    client.cancel_fundraise(&id, &owner);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("cancelled"), campaign_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("cancelled").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: FundraiseCancelled struct
    let event_data: FundraiseCancelled = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundraiseCancelled {
            campaign_id: id,
            owner: owner.clone(),
        }
    );
}

#[test]
fn test_owner_withdrawal_event() {
    let (env, client) = setup();
    let (_token, owner, contributor, id) = setup_campaign(&env, &client);

    client.contribute(&id, &contributor, &GOAL);
    client.owner_withdraw(&id, &owner, &(150 * UNIT));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("withdraw"), campaign_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("withdraw").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: OwnerWithdrawal struct
    let event_data: OwnerWithdrawal = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        OwnerWithdrawal {
            campaign_id: id,
            owner: owner.clone(),
            amount: 150 * UNIT,
            total_withdrawn: 150 * UNIT,
        }
    );
}

#[test]
fn test_contribution_refunded_event() {
    let (env, client) = setup();
    let (_token, _owner, contributor, id) = setup_campaign(&env, &client);

    client.contribute(&id, &contributor, &(50 * UNIT));
    env.ledger().with_mut(|li| {
        li.timestamp += 35 * 86_400;
    });
    client.contributor_withdraw(&id, &contributor);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("refund"), campaign_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("refund").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: ContributionRefunded struct
    let event_data: ContributionRefunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ContributionRefunded {
            campaign_id: id,
            contributor: contributor.clone(),
            amount: 50 * UNIT,
        }
    );
}
