//! # Types
//!
//! Shared data structures used across all modules of the crowdfund contract.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A campaign is internally stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once at creation; never mutated.
//! - [`CampaignState`] — written on every contribution, withdrawal and
//!   cancellation.
//!
//! The public API exposes the reconstructed [`Campaign`] struct for convenience.
//!
//! ### Status is derived, never stored
//!
//! [`CampaignStatus`] is computed from `(cancelled, total_contributed, goal,
//! now)` whenever a record is read:
//!
//! ```text
//! Open ──contribution fills the goal────► GoalMet
//! Open ──deadline passes, total < goal──► Failed
//! Open ──owner cancels───────────────────► Cancelled
//! ```
//!
//! `GoalMet`, `Failed` and `Cancelled` are terminal with respect to new
//! contributions. The ledger figures fully determine the status, so storing
//! it would only create a second copy that could drift.

use soroban_sdk::{contracttype, Address};

/// Campaign window length: 30 days in seconds, identical for every campaign.
pub const CAMPAIGN_DURATION: u64 = 30 * 86_400;

/// Lifecycle status of a campaign, derived at read time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Accepting contributions.
    Open,
    /// Goal reached; the owner may withdraw until the deadline.
    GoalMet,
    /// Deadline passed below the goal; contributors may refund.
    Failed,
    /// Owner cancelled the fundraise; contributors may refund.
    Cancelled,
}

/// Immutable campaign parameters, written once at creation.
///
/// Stored separately from mutable state so the frequent writes (every
/// contribution) only touch the small [`CampaignState`] entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    pub owner: Address,
    pub token: Address,
    pub goal: i128,
    pub created_at: u64,
    pub deadline: u64,
}

/// Mutable campaign aggregates, updated on contributions, owner withdrawals
/// and cancellation.
///
/// `total_contributed` is never decremented: owner withdrawals accumulate in
/// `total_withdrawn` and refunds zero per-contributor entries instead, so the
/// goal check stays true across installment withdrawals.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    pub total_contributed: i128,
    pub total_withdrawn: i128,
    pub cancelled: bool,
}

/// Full representation of a campaign.
///
/// Used as the public API return type; reconstructed internally from the
/// split `CampaignConfig` + `CampaignState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Unique identifier (auto-incremented; doubles as creation order).
    pub id: u64,
    /// Address that created the campaign and may withdraw once funded.
    pub owner: Address,
    /// Token contract used as the contribution currency.
    pub token: Address,
    /// Target contribution amount in token base units.
    pub goal: i128,
    /// Ledger timestamp at creation.
    pub created_at: u64,
    /// `created_at + CAMPAIGN_DURATION`.
    pub deadline: u64,
    /// Sum of all accepted contributions; capped at `goal`, never reduced.
    pub total_contributed: i128,
    /// Cumulative amount the owner has withdrawn.
    pub total_withdrawn: i128,
    /// True once the owner has cancelled the fundraise.
    pub cancelled: bool,
    /// Lifecycle status derived at load time.
    pub status: CampaignStatus,
}

impl CampaignConfig {
    /// True iff the campaign window has closed at `now`.
    pub fn time_limit_over(&self, now: u64) -> bool {
        now >= self.deadline
    }
}

impl CampaignState {
    /// True iff the contributed total has reached `goal`.
    pub fn goal_met(&self, goal: i128) -> bool {
        self.total_contributed >= goal
    }
}

/// Derive the lifecycle status from the split entries and the current time.
///
/// `Cancelled` wins over everything (cancellation requires the goal unmet
/// and the window open, so the other arms are unreachable once it is set);
/// `GoalMet` persists past the deadline, which is why it is checked before
/// the expiry arm.
pub fn derive_status(config: &CampaignConfig, state: &CampaignState, now: u64) -> CampaignStatus {
    if state.cancelled {
        CampaignStatus::Cancelled
    } else if state.goal_met(config.goal) {
        CampaignStatus::GoalMet
    } else if config.time_limit_over(now) {
        CampaignStatus::Failed
    } else {
        CampaignStatus::Open
    }
}
