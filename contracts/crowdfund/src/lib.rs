//! # Crowdfund Contract
//!
//! Time-boxed crowdfunding campaigns hosted as records in a single Soroban
//! contract. Contributors fund a campaign toward a fixed goal inside a
//! 30-day window; a funded campaign pays its owner on demand, a cancelled
//! or failed one refunds its contributors, and every whole token
//! contributed earns the contributor one reward unit.
//!
//! | Phase      | Entry Point(s)                                            |
//! |------------|-----------------------------------------------------------|
//! | Creation   | [`Crowdfund::create_instance`]                            |
//! | Funding    | [`Crowdfund::contribute`]                                 |
//! | Owner ops  | [`Crowdfund::cancel_fundraise`], [`Crowdfund::owner_withdraw`] |
//! | Refunds    | [`Crowdfund::contributor_withdraw`]                       |
//! | Registry   | `get_created_by_index`, `instances_of`, `instance_count`  |
//! | Queries    | `get_campaign`, `get_contribution`, `balance_of`, `cancelled`, `time_limit_over`, `goal_met`, `failed` |
//!
//! ## Architecture
//!
//! Precondition checks live here, in their documented order — the first
//! failing check names the rejection. Accounting is delegated to [`ledger`]
//! and [`rewards`], storage access to [`storage`], event payloads to
//! [`events`]. Token custody moves as the last step of every mutating entry
//! point; the host rolls the whole invocation back if the transfer fails.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, Vec,
};

mod events;
mod ledger;
mod rewards;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_rewards;

use storage::{
    campaign_count, creator_index, get_and_increment_campaign_id, load_campaign,
    load_campaign_config, load_campaign_state, push_creator_index, require_campaign,
    save_campaign, save_campaign_state,
};
pub use rewards::REWARD_UNIT;
pub use types::{Campaign, CampaignStatus, CAMPAIGN_DURATION};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotOwner         = 1,
    Cancelled        = 2,
    Expired          = 3,
    GoalMet          = 4,
    GoalNotMet       = 5,
    OverWithdrawal   = 6,
    RefundNotAllowed = 7,
    NoContribution   = 8,
    InvalidAmount    = 9,
    CampaignNotFound = 10,
}

#[contract]
pub struct Crowdfund;

#[contractimpl]
impl Crowdfund {
    // ─────────────────────────────────────────────────────────
    // Creation & registry
    // ─────────────────────────────────────────────────────────

    /// Create a campaign funded in `token` toward `goal`, owned by `creator`.
    ///
    /// The window opens at the current ledger timestamp and closes
    /// [`CAMPAIGN_DURATION`] seconds later. Anyone may create a campaign.
    /// Returns the campaign ID; IDs are assigned sequentially from 0, so
    /// they double as the global creation order.
    pub fn create_instance(env: Env, creator: Address, token: Address, goal: i128) -> u64 {
        creator.require_auth();

        if goal <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let id = get_and_increment_campaign_id(&env);
        let created_at = env.ledger().timestamp();

        let config = types::CampaignConfig {
            id,
            owner: creator.clone(),
            token,
            goal,
            created_at,
            deadline: created_at + CAMPAIGN_DURATION,
        };
        let state = types::CampaignState {
            total_contributed: 0,
            total_withdrawn: 0,
            cancelled: false,
        };

        save_campaign(&env, &config, &state);
        push_creator_index(&env, &creator, id);

        events::emit_created(&env, &config);
        id
    }

    /// Campaign ID of the `index`-th created campaign.
    ///
    /// IDs are sequential, so this reduces to a bounds check against the
    /// counter; it fails with `CampaignNotFound` past the end.
    pub fn get_created_by_index(env: Env, index: u64) -> u64 {
        if index >= campaign_count(&env) {
            panic_with_error!(&env, Error::CampaignNotFound);
        }
        index
    }

    /// IDs of the campaigns created by `creator`, in creation order.
    pub fn instances_of(env: Env, creator: Address) -> Vec<u64> {
        creator_index(&env, &creator)
    }

    /// Number of campaigns created so far.
    pub fn instance_count(env: Env) -> u64 {
        campaign_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` of the campaign token.
    ///
    /// Rejections, in order: `Cancelled`, `Expired`, `GoalMet` (the goal was
    /// already reached), `InvalidAmount` (non-positive, or larger than the
    /// remaining headroom — a contribution that would push the total past
    /// the goal is rejected outright, never truncated).
    ///
    /// On success the contribution is recorded, newly earned reward units
    /// are minted, and the tokens move into contract custody.
    pub fn contribute(env: Env, campaign_id: u64, contributor: Address, amount: i128) {
        contributor.require_auth();

        let config = load_campaign_config(&env, campaign_id);
        let mut state = load_campaign_state(&env, campaign_id);

        if state.cancelled {
            panic_with_error!(&env, Error::Cancelled);
        }
        if config.time_limit_over(env.ledger().timestamp()) {
            panic_with_error!(&env, Error::Expired);
        }
        if state.goal_met(config.goal) {
            panic_with_error!(&env, Error::GoalMet);
        }
        if amount <= 0 || amount > config.goal - state.total_contributed {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let cumulative =
            ledger::record_contribution(&env, campaign_id, &contributor, amount, &mut state);
        save_campaign_state(&env, campaign_id, &state);

        let (minted, balance) =
            rewards::issue_for_contribution(&env, campaign_id, &contributor, cumulative);

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&contributor, &env.current_contract_address(), &amount);

        events::emit_contribution(&env, campaign_id, &contributor, amount, state.total_contributed);
        if minted > 0 {
            events::emit_reward(&env, campaign_id, &contributor, minted, balance);
        }
    }

    // ─────────────────────────────────────────────────────────
    // Owner operations
    // ─────────────────────────────────────────────────────────

    /// Cancel the fundraise, opening refunds for every contributor.
    ///
    /// Rejections, in order: `NotOwner`, `GoalMet` (a funded campaign
    /// belongs to its owner's withdrawals, not to refunds), `Expired`.
    /// Cancelling twice passes the same checks and re-asserts the flag.
    pub fn cancel_fundraise(env: Env, campaign_id: u64, caller: Address) {
        caller.require_auth();

        let config = load_campaign_config(&env, campaign_id);
        let mut state = load_campaign_state(&env, campaign_id);

        if caller != config.owner {
            panic_with_error!(&env, Error::NotOwner);
        }
        if state.goal_met(config.goal) {
            panic_with_error!(&env, Error::GoalMet);
        }
        if config.time_limit_over(env.ledger().timestamp()) {
            panic_with_error!(&env, Error::Expired);
        }

        state.cancelled = true;
        save_campaign_state(&env, campaign_id, &state);

        events::emit_cancelled(&env, campaign_id, &config.owner);
    }

    /// Withdraw `amount` from a funded campaign to the owner.
    ///
    /// Rejections, in order: `NotOwner`, `Cancelled`, `Expired`,
    /// `GoalNotMet`, `InvalidAmount` (non-positive), `OverWithdrawal`
    /// (cumulative withdrawals may never exceed the contributed total).
    ///
    /// Installments are allowed: the goal check reads `total_contributed`,
    /// which withdrawals do not reduce. The `Expired` check precedes
    /// `GoalNotMet`, so once the deadline passes withdrawal is refused even
    /// when the goal was met in time — custody stays locked thereafter.
    pub fn owner_withdraw(env: Env, campaign_id: u64, caller: Address, amount: i128) {
        caller.require_auth();

        let config = load_campaign_config(&env, campaign_id);
        let mut state = load_campaign_state(&env, campaign_id);

        if caller != config.owner {
            panic_with_error!(&env, Error::NotOwner);
        }
        if state.cancelled {
            panic_with_error!(&env, Error::Cancelled);
        }
        if config.time_limit_over(env.ledger().timestamp()) {
            panic_with_error!(&env, Error::Expired);
        }
        if !state.goal_met(config.goal) {
            panic_with_error!(&env, Error::GoalNotMet);
        }
        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }
        if amount > state.total_contributed - state.total_withdrawn {
            panic_with_error!(&env, Error::OverWithdrawal);
        }

        ledger::record_withdrawal(&mut state, amount);
        save_campaign_state(&env, campaign_id, &state);

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&env.current_contract_address(), &config.owner, &amount);

        events::emit_withdrawal(&env, campaign_id, &config.owner, amount, state.total_withdrawn);
    }

    // ─────────────────────────────────────────────────────────
    // Refunds
    // ─────────────────────────────────────────────────────────

    /// Refund the caller's entire recorded contribution.
    ///
    /// Refunds open once the campaign is cancelled, or once the deadline
    /// passes with the goal unmet; otherwise the call fails with
    /// `RefundNotAllowed`. A caller with nothing recorded fails with
    /// `NoContribution`.
    ///
    /// The contribution entry is zeroed, not removed, and reward units
    /// already issued stay with the contributor.
    pub fn contributor_withdraw(env: Env, campaign_id: u64, contributor: Address) {
        contributor.require_auth();

        let config = load_campaign_config(&env, campaign_id);
        let state = load_campaign_state(&env, campaign_id);

        let refundable = state.cancelled
            || (config.time_limit_over(env.ledger().timestamp()) && !state.goal_met(config.goal));
        if !refundable {
            panic_with_error!(&env, Error::RefundNotAllowed);
        }
        if ledger::get_contribution(&env, campaign_id, &contributor) == 0 {
            panic_with_error!(&env, Error::NoContribution);
        }

        let amount = ledger::clear_contribution(&env, campaign_id, &contributor);

        let token_client = token::Client::new(&env, &config.token);
        token_client.transfer(&env.current_contract_address(), &contributor, &amount);

        events::emit_refund(&env, campaign_id, &contributor, amount);
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Full campaign record with its derived status.
    pub fn get_campaign(env: Env, campaign_id: u64) -> Campaign {
        load_campaign(&env, campaign_id)
    }

    /// Cumulative amount `contributor` has contributed; 0 after refund.
    pub fn get_contribution(env: Env, campaign_id: u64, contributor: Address) -> i128 {
        require_campaign(&env, campaign_id);
        ledger::get_contribution(&env, campaign_id, &contributor)
    }

    /// Reward units issued to `contributor` for this campaign.
    pub fn balance_of(env: Env, campaign_id: u64, contributor: Address) -> i128 {
        require_campaign(&env, campaign_id);
        rewards::balance_of(&env, campaign_id, &contributor)
    }

    /// True once the owner has cancelled the fundraise.
    pub fn cancelled(env: Env, campaign_id: u64) -> bool {
        load_campaign_state(&env, campaign_id).cancelled
    }

    /// True iff the campaign window has closed.
    pub fn time_limit_over(env: Env, campaign_id: u64) -> bool {
        let config = load_campaign_config(&env, campaign_id);
        config.time_limit_over(env.ledger().timestamp())
    }

    /// True iff the contributed total has reached the goal.
    pub fn goal_met(env: Env, campaign_id: u64) -> bool {
        let config = load_campaign_config(&env, campaign_id);
        let state = load_campaign_state(&env, campaign_id);
        state.goal_met(config.goal)
    }

    /// True iff the window closed with the goal unmet.
    pub fn failed(env: Env, campaign_id: u64) -> bool {
        let config = load_campaign_config(&env, campaign_id);
        let state = load_campaign_state(&env, campaign_id);
        config.time_limit_over(env.ledger().timestamp()) && !state.goal_met(config.goal)
    }
}
