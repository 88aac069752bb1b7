//! Storage keys and helpers for the Wrapped Votes contract

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::error::WrappedVotesError;
use crate::types::{Checkpoint, TokenMetadata, Trace};

/// Storage keys for the wrapper contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Address of the locked asset (instance storage)
    Underlying,
    /// Token metadata (instance storage)
    Metadata,
    /// Current owner, absent once renounced (instance storage)
    Owner,
    /// Wrapped balance of an account (persistent storage)
    Balance(Address),
    /// Allowance granted by an owner to a spender (persistent storage)
    Allowance(Address, Address),
    /// Current delegate of an account (persistent storage)
    Delegate(Address),
    /// Number of checkpoints recorded for a trace (persistent storage)
    CheckpointCount(Trace),
    /// Checkpoint at a position of a trace (persistent storage)
    Checkpoint(Trace, u32),
    /// Next permit nonce of an owner (persistent storage)
    Nonce(Address),
    /// ed25519 key that signs permits for an owner (persistent storage)
    PermitKey(Address),
}

// ============================================================================
// Initialization & Metadata
// ============================================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Underlying)
}

pub fn get_underlying(env: &Env) -> Result<Address, WrappedVotesError> {
    env.storage()
        .instance()
        .get(&DataKey::Underlying)
        .ok_or(WrappedVotesError::NotInitialized)
}

pub fn set_underlying(env: &Env, underlying: &Address) {
    env.storage().instance().set(&DataKey::Underlying, underlying);
}

pub fn get_metadata(env: &Env) -> Result<TokenMetadata, WrappedVotesError> {
    env.storage()
        .instance()
        .get(&DataKey::Metadata)
        .ok_or(WrappedVotesError::NotInitialized)
}

pub fn set_metadata(env: &Env, metadata: &TokenMetadata) {
    env.storage().instance().set(&DataKey::Metadata, metadata);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Option<Address>) {
    match owner {
        Some(owner) => env.storage().instance().set(&DataKey::Owner, owner),
        None => env.storage().instance().remove(&DataKey::Owner),
    }
}

// ============================================================================
// Balances & Allowances
// ============================================================================

pub fn get_balance(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(account.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, account: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(account.clone()), &amount);
}

pub fn get_allowance(env: &Env, owner: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Allowance(owner.clone(), spender.clone()))
        .unwrap_or(0)
}

pub fn set_allowance(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Allowance(owner.clone(), spender.clone()), &amount);
}

// ============================================================================
// Delegation
// ============================================================================

pub fn get_delegate(env: &Env, account: &Address) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Delegate(account.clone()))
}

pub fn set_delegate(env: &Env, account: &Address, delegatee: &Option<Address>) {
    let key = DataKey::Delegate(account.clone());
    match delegatee {
        Some(delegatee) => env.storage().persistent().set(&key, delegatee),
        None => env.storage().persistent().remove(&key),
    }
}

// ============================================================================
// Checkpoint Helpers
// ============================================================================

pub fn get_checkpoint_count(env: &Env, trace: &Trace) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::CheckpointCount(trace.clone()))
        .unwrap_or(0)
}

pub fn set_checkpoint_count(env: &Env, trace: &Trace, count: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::CheckpointCount(trace.clone()), &count);
}

pub fn get_checkpoint(env: &Env, trace: &Trace, index: u32) -> Option<Checkpoint> {
    env.storage()
        .persistent()
        .get(&DataKey::Checkpoint(trace.clone(), index))
}

pub fn set_checkpoint(env: &Env, trace: &Trace, index: u32, checkpoint: &Checkpoint) {
    env.storage()
        .persistent()
        .set(&DataKey::Checkpoint(trace.clone(), index), checkpoint);
}

// ============================================================================
// Permit Helpers
// ============================================================================

pub fn get_nonce(env: &Env, owner: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::Nonce(owner.clone()))
        .unwrap_or(0)
}

pub fn set_nonce(env: &Env, owner: &Address, nonce: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::Nonce(owner.clone()), &nonce);
}

pub fn get_permit_key(env: &Env, owner: &Address) -> Option<BytesN<32>> {
    env.storage()
        .persistent()
        .get(&DataKey::PermitKey(owner.clone()))
}

pub fn set_permit_key(env: &Env, owner: &Address, key: &BytesN<32>) {
    env.storage()
        .persistent()
        .set(&DataKey::PermitKey(owner.clone()), key);
}
