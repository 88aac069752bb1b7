//! Storage keys and helpers for the Governor contract

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::error::GovernorError;
use crate::types::{GovernorConfig, Proposal, ProposalVotes, VoteReceipt};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Token,
    Timelock,
    Config,
    Proposal(BytesN<32>),
    Votes(BytesN<32>),
    Receipt(BytesN<32>, Address),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_token(env: &Env) -> Result<Address, GovernorError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(GovernorError::NotInitialized)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
}

pub fn get_timelock(env: &Env) -> Result<Address, GovernorError> {
    env.storage()
        .instance()
        .get(&DataKey::Timelock)
        .ok_or(GovernorError::NotInitialized)
}

pub fn set_timelock(env: &Env, timelock: &Address) {
    env.storage().instance().set(&DataKey::Timelock, timelock);
}

pub fn get_config(env: &Env) -> Result<GovernorConfig, GovernorError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(GovernorError::NotInitialized)
}

pub fn set_config(env: &Env, config: &GovernorConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

// ============================================================================
// Proposal Helpers
// ============================================================================

pub fn has_proposal(env: &Env, id: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Proposal(id.clone()))
}

pub fn get_proposal(env: &Env, id: &BytesN<32>) -> Result<Proposal, GovernorError> {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(id.clone()))
        .ok_or(GovernorError::ProposalNotFound)
}

pub fn set_proposal(env: &Env, proposal: &Proposal) {
    env.storage()
        .persistent()
        .set(&DataKey::Proposal(proposal.id.clone()), proposal);
}

pub fn get_votes(env: &Env, id: &BytesN<32>) -> ProposalVotes {
    env.storage()
        .persistent()
        .get(&DataKey::Votes(id.clone()))
        .unwrap_or_default()
}

pub fn set_votes(env: &Env, id: &BytesN<32>, votes: &ProposalVotes) {
    env.storage()
        .persistent()
        .set(&DataKey::Votes(id.clone()), votes);
}

pub fn get_receipt(env: &Env, id: &BytesN<32>, voter: &Address) -> Option<VoteReceipt> {
    env.storage()
        .persistent()
        .get(&DataKey::Receipt(id.clone(), voter.clone()))
}

pub fn set_receipt(env: &Env, id: &BytesN<32>, voter: &Address, receipt: &VoteReceipt) {
    env.storage()
        .persistent()
        .set(&DataKey::Receipt(id.clone(), voter.clone()), receipt);
}
