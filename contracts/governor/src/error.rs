//! Error types for the Governor contract

use soroban_sdk::contracterror;

/// Governor contract errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GovernorError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Caller is not allowed to perform this action
    Unauthorized = 3,
    /// No proposal exists under this id
    ProposalNotFound = 4,
    /// An identical proposal already exists
    DuplicateProposal = 5,
    /// Proposer's voting power is below the proposal threshold
    BelowThreshold = 6,
    /// Proposal contains no calls
    EmptyProposal = 7,
    /// Proposal is not open for voting
    NotActive = 8,
    /// Voter has already voted on this proposal
    AlreadyVoted = 9,
    /// Support value is not Against, For or Abstain
    InvalidVoteType = 10,
    /// Proposal has not succeeded
    NotSucceeded = 11,
    /// Proposal is not queued
    NotQueued = 12,
    /// Timelock delay has not elapsed yet
    NotReady = 13,
    /// Proposal can no longer be canceled
    NotCancelable = 14,
    /// Timelock execution of the batch failed
    ExecutionFailed = 15,
    /// Quorum numerator exceeds 100
    InvalidQuorumNumerator = 16,
    /// Voting period must be non-zero
    InvalidVotingPeriod = 17,
    /// Checked arithmetic failed
    ArithmeticOverflow = 18,
    /// Requested ledger is not yet final
    FutureLookup = 19,
}
