//! # Events
//!
//! Every mutating entry point publishes one event with a
//! `(short symbol, campaign id)` topic pair and a typed data struct, so
//! off-chain consumers can filter by kind and campaign without decoding
//! payloads.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::CampaignConfig;

/// Published when a campaign is created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub owner: Address,
    pub token: Address,
    pub goal: i128,
    pub deadline: u64,
}

/// Published when a contribution is accepted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionReceived {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
    pub total_contributed: i128,
}

/// Published when a contribution earns new reward units.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardMinted {
    pub campaign_id: u64,
    pub contributor: Address,
    pub minted: i128,
    pub balance: i128,
}

/// Published when the owner cancels the fundraise.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundraiseCancelled {
    pub campaign_id: u64,
    pub owner: Address,
}

/// Published when the owner withdraws from a funded campaign.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerWithdrawal {
    pub campaign_id: u64,
    pub owner: Address,
    pub amount: i128,
    pub total_withdrawn: i128,
}

/// Published when a contributor reclaims their contribution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRefunded {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

pub fn emit_created(env: &Env, config: &CampaignConfig) {
    env.events().publish(
        (symbol_short!("created"), config.id),
        CampaignCreated {
            campaign_id: config.id,
            owner: config.owner.clone(),
            token: config.token.clone(),
            goal: config.goal,
            deadline: config.deadline,
        },
    );
}

pub fn emit_contribution(
    env: &Env,
    campaign_id: u64,
    contributor: &Address,
    amount: i128,
    total_contributed: i128,
) {
    env.events().publish(
        (symbol_short!("contrib"), campaign_id),
        ContributionReceived {
            campaign_id,
            contributor: contributor.clone(),
            amount,
            total_contributed,
        },
    );
}

pub fn emit_reward(env: &Env, campaign_id: u64, contributor: &Address, minted: i128, balance: i128) {
    env.events().publish(
        (symbol_short!("reward"), campaign_id),
        RewardMinted {
            campaign_id,
            contributor: contributor.clone(),
            minted,
            balance,
        },
    );
}

pub fn emit_cancelled(env: &Env, campaign_id: u64, owner: &Address) {
    env.events().publish(
        (symbol_short!("cancelled"), campaign_id),
        FundraiseCancelled {
            campaign_id,
            owner: owner.clone(),
        },
    );
}

pub fn emit_withdrawal(
    env: &Env,
    campaign_id: u64,
    owner: &Address,
    amount: i128,
    total_withdrawn: i128,
) {
    env.events().publish(
        (symbol_short!("withdraw"), campaign_id),
        OwnerWithdrawal {
            campaign_id,
            owner: owner.clone(),
            amount,
            total_withdrawn,
        },
    );
}

pub fn emit_refund(env: &Env, campaign_id: u64, contributor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("refund"), campaign_id),
        ContributionRefunded {
            campaign_id,
            contributor: contributor.clone(),
            amount,
        },
    );
}
