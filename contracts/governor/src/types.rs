//! Data types for the Governor contract

use soroban_sdk::{contracttype, Address, BytesN, Symbol, Val, Vec};

/// Denominator of the quorum fraction
pub const QUORUM_DENOMINATOR: u32 = 100;

/// Governance parameters
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernorConfig {
    /// Ledgers between proposal creation and the voting snapshot
    pub voting_delay: u32,
    /// Ledgers the vote stays open after the snapshot
    pub voting_period: u32,
    /// Votes required to create a proposal
    pub proposal_threshold: i128,
    /// Quorum as a percentage of the snapshot total supply
    pub quorum_numerator: u32,
    /// Ledgers a succeeded proposal may wait before being queued
    pub queue_window: u32,
    /// Seconds a queued proposal stays executable after its eta
    pub grace_period: u64,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            voting_delay: 1,
            voting_period: 50_400,
            proposal_threshold: 0,
            quorum_numerator: 1,
            queue_window: 50_400,
            grace_period: 14 * 24 * 60 * 60,
        }
    }
}

/// A single contract invocation, encoded the same way the timelock expects
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Call {
    pub target: Address,
    pub function: Symbol,
    pub args: Vec<Val>,
}

/// Stored proposal record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: BytesN<32>,
    pub proposer: Address,
    pub calls: Vec<Call>,
    pub description_hash: BytesN<32>,
    /// Ledger at which voting power is read
    pub snapshot: u32,
    /// Last ledger on which votes are accepted
    pub deadline: u32,
    /// Timestamp from which the queued batch can execute
    pub eta: Option<u64>,
    /// Timelock operation created by `queue`
    pub timelock_id: Option<BytesN<32>>,
    pub executed: bool,
    pub canceled: bool,
}

/// Running vote totals of a proposal
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProposalVotes {
    pub against_votes: i128,
    pub for_votes: i128,
    pub abstain_votes: i128,
}

/// Record of a single voter's ballot
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteReceipt {
    pub support: VoteType,
    pub weight: i128,
}

/// Proposal lifecycle
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProposalState {
    Pending = 0,
    Active = 1,
    Canceled = 2,
    Defeated = 3,
    Succeeded = 4,
    Queued = 5,
    Expired = 6,
    Executed = 7,
}

/// Ballot options
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VoteType {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl VoteType {
    pub fn from_u32(support: u32) -> Option<Self> {
        match support {
            0 => Some(VoteType::Against),
            1 => Some(VoteType::For),
            2 => Some(VoteType::Abstain),
            _ => None,
        }
    }
}
