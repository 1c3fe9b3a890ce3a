//! # Reward Issuer
//!
//! One reward unit per whole token cumulatively contributed, derived by
//! integer division. After each accepted contribution the issuer compares
//! the newly derived count against what was already issued and mints the
//! difference, so balances only ever grow — a contributor reaching 1.5
//! whole tokens holds 1 reward unit, reaching 3.0 holds 3.
//!
//! Refunds do not claw reward units back: issuance records contribution
//! history, not a claim on custody. A refunded contributor keeps every
//! unit earned.

use soroban_sdk::{Address, Env};

use crate::storage::{bump_persistent, DataKey};

/// One whole unit of the contribution currency (7-decimal token).
pub const REWARD_UNIT: i128 = 10_000_000;

/// Reward units issued to `contributor` for this campaign; 0 if none.
pub fn balance_of(env: &Env, campaign_id: u64, contributor: &Address) -> i128 {
    let key = DataKey::RewardBalance(campaign_id, contributor.clone());
    match env.storage().persistent().get(&key) {
        Some(balance) => {
            bump_persistent(env, &key);
            balance
        }
        None => 0,
    }
}

/// Derive the reward count from the contributor's new cumulative
/// contribution and mint the units not yet issued.
///
/// Returns `(minted, balance)` — the newly minted units and the resulting
/// balance. `cumulative` only grows between calls, so `minted` is never
/// negative; when the contribution stays below the next whole unit nothing
/// is written.
pub fn issue_for_contribution(
    env: &Env,
    campaign_id: u64,
    contributor: &Address,
    cumulative: i128,
) -> (i128, i128) {
    let earned = cumulative / REWARD_UNIT;
    let issued = balance_of(env, campaign_id, contributor);
    let minted = earned - issued;

    if minted > 0 {
        let key = DataKey::RewardBalance(campaign_id, contributor.clone());
        env.storage().persistent().set(&key, &earned);
        bump_persistent(env, &key);
    }

    (minted, earned)
}
