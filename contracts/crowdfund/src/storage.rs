//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the
//! crowdfund contract:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type  | Description                        |
//! |-----------------|-------|------------------------------------|
//! | `CampaignCount` | `u64` | Auto-increment campaign ID counter |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                       | Type             | Description                      |
//! |---------------------------|------------------|----------------------------------|
//! | `Config(id)`              | `CampaignConfig` | Immutable campaign parameters    |
//! | `State(id)`               | `CampaignState`  | Mutable campaign aggregates      |
//! | `Contribution(id, addr)`  | `i128`           | Cumulative contribution by addr  |
//! | `RewardBalance(id, addr)` | `i128`           | Reward units issued to addr      |
//! | `CreatorIndex(addr)`      | `Vec<u64>`       | Campaign IDs created by addr     |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Campaign records are never deleted; a finished campaign stays readable as
//! a historical ledger. Contribution entries are zeroed on refund rather than
//! removed for the same reason: `Contribution(id, addr)` holding 0 and the
//! key being absent both read back as 0, but the zeroed entry remembers that
//! the address was refunded rather than never present.

use soroban_sdk::{contracttype, panic_with_error, vec, Address, Env, Vec};

use crate::types::{derive_status, Campaign, CampaignConfig, CampaignState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// The instance-tier `CampaignCount` lives as long as the contract.
/// Persistent-tier keys hold per-campaign data with independent TTLs;
/// per-contributor entries are keyed by `(campaign id, address)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Global auto-increment counter for campaign IDs (Instance).
    CampaignCount,
    /// Immutable campaign parameters keyed by ID (Persistent).
    Config(u64),
    /// Mutable campaign aggregates keyed by ID (Persistent).
    State(u64),
    /// Cumulative contribution keyed by campaign ID and contributor (Persistent).
    Contribution(u64, Address),
    /// Reward units issued keyed by campaign ID and contributor (Persistent).
    RewardBalance(u64, Address),
    /// IDs of the campaigns created by an address (Persistent).
    CreatorIndex(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Atomically reads, increments, and stores the campaign counter.
/// Returns the ID to use for the *current* campaign (pre-increment value).
pub fn get_and_increment_campaign_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::CampaignCount, &(current + 1));
    current
}

/// Number of campaigns created so far.
pub fn campaign_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
pub(crate) fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Panic with `CampaignNotFound` unless a campaign with this ID exists.
pub fn require_campaign(env: &Env, id: u64) {
    if !env.storage().persistent().has(&DataKey::Config(id)) {
        panic_with_error!(env, Error::CampaignNotFound);
    }
}

/// Save both the immutable config and the initial mutable state for a new
/// campaign.
pub fn save_campaign(env: &Env, config: &CampaignConfig, state: &CampaignState) {
    let config_key = DataKey::Config(config.id);
    let state_key = DataKey::State(config.id);

    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Campaign` by combining config and state, deriving the
/// status from the current ledger timestamp.
pub fn load_campaign(env: &Env, id: u64) -> Campaign {
    let config = load_campaign_config(env, id);
    let state = load_campaign_state(env, id);
    let status = derive_status(&config, &state, env.ledger().timestamp());
    Campaign {
        id: config.id,
        owner: config.owner,
        token: config.token,
        goal: config.goal,
        created_at: config.created_at,
        deadline: config.deadline,
        total_contributed: state.total_contributed,
        total_withdrawn: state.total_withdrawn,
        cancelled: state.cancelled,
        status,
    }
}

/// Load only the immutable campaign parameters.
pub fn load_campaign_config(env: &Env, id: u64) -> CampaignConfig {
    let key = DataKey::Config(id);
    let config: CampaignConfig = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::CampaignNotFound));
    bump_persistent(env, &key);
    config
}

/// Load only the mutable campaign aggregates.
pub fn load_campaign_state(env: &Env, id: u64) -> CampaignState {
    let key = DataKey::State(id);
    let state: CampaignState = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::CampaignNotFound));
    bump_persistent(env, &key);
    state
}

/// Save only the mutable campaign aggregates (the per-contribution write).
pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::State(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

// ── Creator Index ────────────────────────────────────────────────────

/// Append a campaign ID to its creator's index.
pub fn push_creator_index(env: &Env, creator: &Address, id: u64) {
    let key = DataKey::CreatorIndex(creator.clone());
    let mut ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| vec![env]);
    ids.push_back(id);
    env.storage().persistent().set(&key, &ids);
    bump_persistent(env, &key);
}

/// IDs of the campaigns created by `creator`, in creation order.
pub fn creator_index(env: &Env, creator: &Address) -> Vec<u64> {
    let key = DataKey::CreatorIndex(creator.clone());
    match env.storage().persistent().get(&key) {
        Some(ids) => {
            bump_persistent(env, &key);
            ids
        }
        None => vec![env],
    }
}
