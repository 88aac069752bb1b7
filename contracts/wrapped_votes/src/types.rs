//! Data types for the Wrapped Votes contract

use soroban_sdk::{contracttype, Address, BytesN, String};

/// Value of a tracked quantity from `ledger` until the next checkpoint
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    pub ledger: u32,
    pub votes: i128,
}

/// History that checkpoints are recorded against
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Trace {
    /// Global wrapped supply
    Supply,
    /// Voting power delegated to an account
    Account(Address),
}

/// Token metadata fixed at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    /// Mirrors the underlying asset
    pub decimals: u32,
}

/// Domain the permit signatures are bound to
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermitDomain {
    pub name: String,
    pub version: String,
    pub network_id: BytesN<32>,
    pub verifying_contract: Address,
}

/// Signed approval message
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermitMessage {
    pub owner: Address,
    pub spender: Address,
    pub value: i128,
    pub nonce: u64,
    pub deadline: u64,
}
