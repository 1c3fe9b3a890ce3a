extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::invariants::{assert_reward_formula, assert_rewards_monotonic};
use crate::{Crowdfund, CrowdfundClient, REWARD_UNIT};

const UNIT: i128 = REWARD_UNIT;
const HALF_UNIT: i128 = REWARD_UNIT / 2;

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

fn mint(env: &Env, token: &token::Client, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, &token.address).mint(to, &amount);
}

/// Campaign with a goal high enough that reward tests never hit headroom.
fn setup_campaign(
    env: &Env,
    client: &CrowdfundClient,
) -> (token::Client<'static>, Address, Address, u64) {
    let token_admin = Address::generate(env);
    let token = create_token(env, &token_admin);
    let owner = Address::generate(env);
    let contributor = Address::generate(env);
    mint(env, &token, &contributor, 10_000 * UNIT);
    let id = client.create_instance(&owner, &token.address, &(1_000 * UNIT));
    (token, owner, contributor, id)
}

#[test]
fn whole_unit_contribution_mints_one_per_unit() {
    let (env, client) = setup();
    let (_token, _owner, contributor, id) = setup_campaign(&env, &client);

    client.contribute(&id, &contributor, &(100 * UNIT));

    assert_eq!(client.balance_of(&id, &contributor), 100);
    assert_reward_formula(100 * UNIT, client.balance_of(&id, &contributor));
}

#[test]
fn fractional_contribution_floors() {
    let (env, client) = setup();
    let (_token, _owner, contributor, id) = setup_campaign(&env, &client);

    client.contribute(&id, &contributor, &(4 * UNIT + HALF_UNIT));

    assert_eq!(client.balance_of(&id, &contributor), 4);
}

#[test]
fn sub_unit_contribution_mints_nothing() {
    let (env, client) = setup();
    let (_token, _owner, contributor, id) = setup_campaign(&env, &client);

    client.contribute(&id, &contributor, &HALF_UNIT);

    assert_eq!(client.balance_of(&id, &contributor), 0);
    assert_eq!(client.get_contribution(&id, &contributor), HALF_UNIT);
}

#[test]
fn rewards_follow_the_cumulative_total() {
    let (env, client) = setup();
    let (_token, _owner, contributor, id) = setup_campaign(&env, &client);

    // 1.5 units: floor(1.5) = 1.
    client.contribute(&id, &contributor, &(UNIT + HALF_UNIT));
    assert_eq!(client.balance_of(&id, &contributor), 1);

    // Another 1.5 units: floor(3.0) = 3, so the fractions combine.
    client.contribute(&id, &contributor, &(UNIT + HALF_UNIT));
    assert_eq!(client.balance_of(&id, &contributor), 3);

    assert_reward_formula(3 * UNIT, client.balance_of(&id, &contributor));
}

#[test]
fn rewards_never_decrease_across_contributions() {
    let (env, client) = setup();
    let (_token, _owner, contributor, id) = setup_campaign(&env, &client);

    let amounts = [HALF_UNIT, UNIT, HALF_UNIT, 3 * UNIT, 1];
    let mut previous = client.balance_of(&id, &contributor);
    let mut cumulative: i128 = 0;

    for amount in amounts {
        client.contribute(&id, &contributor, &amount);
        cumulative += amount;

        let balance = client.balance_of(&id, &contributor);
        assert_rewards_monotonic(previous, balance);
        assert_reward_formula(cumulative, balance);
        previous = balance;
    }
}

#[test]
fn rewards_are_scoped_per_campaign() {
    let (env, client) = setup();
    let (token, _owner, contributor, first) = setup_campaign(&env, &client);
    let other_owner = Address::generate(&env);
    let second = client.create_instance(&other_owner, &token.address, &(1_000 * UNIT));

    client.contribute(&first, &contributor, &(5 * UNIT));
    client.contribute(&second, &contributor, &(2 * UNIT));

    assert_eq!(client.balance_of(&first, &contributor), 5);
    assert_eq!(client.balance_of(&second, &contributor), 2);
}

#[test]
fn rewards_are_scoped_per_contributor() {
    let (env, client) = setup();
    let (token, _owner, alice, id) = setup_campaign(&env, &client);
    let bob = Address::generate(&env);
    mint(&env, &token, &bob, 100 * UNIT);

    client.contribute(&id, &alice, &(5 * UNIT));
    client.contribute(&id, &bob, &(2 * UNIT + HALF_UNIT));

    assert_eq!(client.balance_of(&id, &alice), 5);
    assert_eq!(client.balance_of(&id, &bob), 2);
}

#[test]
fn rewards_survive_a_refund() {
    let (env, client) = setup();
    let (_token, owner, contributor, id) = setup_campaign(&env, &client);

    client.contribute(&id, &contributor, &(50 * UNIT));
    assert_eq!(client.balance_of(&id, &contributor), 50);

    client.cancel_fundraise(&id, &owner);
    client.contributor_withdraw(&id, &contributor);

    // The token contribution comes back but the rewards stay earned.
    assert_eq!(client.get_contribution(&id, &contributor), 0);
    assert_eq!(client.balance_of(&id, &contributor), 50);
}

#[test]
fn rewards_survive_a_failed_campaign_refund() {
    let (env, client) = setup();
    let (_token, _owner, contributor, id) = setup_campaign(&env, &client);

    client.contribute(&id, &contributor, &(30 * UNIT));
    env.ledger().with_mut(|li| {
        li.timestamp += 35 * 86_400;
    });
    client.contributor_withdraw(&id, &contributor);

    assert_eq!(client.balance_of(&id, &contributor), 30);
}
