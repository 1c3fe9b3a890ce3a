//! Canonical event types emitted by the crowdfund contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/crowdfund/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the crowdfund contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new campaign was opened (`created` topic).
    CampaignCreated,
    /// A contribution was recorded (`contrib` topic).
    ContributionReceived,
    /// Reward points were minted for a contributor (`reward` topic).
    RewardMinted,
    /// The owner cancelled the fundraise (`cancelled` topic).
    FundraiseCancelled,
    /// The owner collected funds from a met goal (`withdraw` topic).
    OwnerWithdrawal,
    /// A contributor was refunded (`refund` topic).
    ContributionRefunded,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::CampaignCreated,
            "contrib" => Self::ContributionReceived,
            "reward" => Self::RewardMinted,
            "cancelled" => Self::FundraiseCancelled,
            "withdraw" => Self::OwnerWithdrawal,
            "refund" => Self::ContributionRefunded,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignCreated => "campaign_created",
            Self::ContributionReceived => "contribution_received",
            Self::RewardMinted => "reward_minted",
            Self::FundraiseCancelled => "fundraise_cancelled",
            Self::OwnerWithdrawal => "owner_withdrawal",
            Self::ContributionRefunded => "contribution_refunded",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded crowdfund event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdfundEvent {
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
