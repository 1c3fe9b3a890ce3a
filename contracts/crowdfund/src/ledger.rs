//! # Contribution Ledger
//!
//! Per-contributor cumulative entries plus the campaign-level aggregates in
//! [`CampaignState`]. Every unit that enters custody is accounted for here
//! exactly once: it either leaves again through `clear_contribution` (refund)
//! or is claimed against `total_withdrawn` (owner withdrawal), never both —
//! refunds require a cancelled or failed campaign, and the owner can only
//! withdraw from a funded one.
//!
//! Amount validation (positivity, goal headroom, withdrawal bounds) is the
//! entry points' job in `lib.rs`; these helpers assume validated inputs and
//! only move numbers. Aggregates are mutated in place and written back by
//! the caller in a single `save_campaign_state`, keeping one small state
//! write per transaction.

use soroban_sdk::{Address, Env};

use crate::storage::{bump_persistent, DataKey};
use crate::types::CampaignState;

/// Cumulative amount `contributor` has put into the campaign; 0 if the
/// address never contributed or was refunded.
pub fn get_contribution(env: &Env, campaign_id: u64, contributor: &Address) -> i128 {
    let key = DataKey::Contribution(campaign_id, contributor.clone());
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Add `amount` to the contributor's entry and to the campaign total.
/// Returns the contributor's new cumulative amount.
pub fn record_contribution(
    env: &Env,
    campaign_id: u64,
    contributor: &Address,
    amount: i128,
    state: &mut CampaignState,
) -> i128 {
    let key = DataKey::Contribution(campaign_id, contributor.clone());
    let cumulative = get_contribution(env, campaign_id, contributor) + amount;
    env.storage().persistent().set(&key, &cumulative);
    bump_persistent(env, &key);

    state.total_contributed += amount;
    cumulative
}

/// Add `amount` to the owner's cumulative withdrawals.
pub fn record_withdrawal(state: &mut CampaignState, amount: i128) {
    state.total_withdrawn += amount;
}

/// Zero the contributor's entry and return the amount it held.
///
/// The entry is overwritten with 0, not removed: the zero remembers that
/// the address was refunded. Campaign aggregates are untouched —
/// `total_contributed` keeps counting every contribution ever accepted.
pub fn clear_contribution(env: &Env, campaign_id: u64, contributor: &Address) -> i128 {
    let key = DataKey::Contribution(campaign_id, contributor.clone());
    let amount: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().set(&key, &0i128);
    bump_persistent(env, &key);
    amount
}
