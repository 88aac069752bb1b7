//! Error types for the Wrapped Votes contract

use soroban_sdk::contracterror;

/// Wrapper token errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum WrappedVotesError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Caller is not the owner
    Unauthorized = 3,
    /// Amount is negative
    InvalidAmount = 4,
    /// Account does not hold enough wrapped balance
    InsufficientBalance = 5,
    /// Spender allowance is lower than the requested amount
    InsufficientAllowance = 6,
    /// Underlying asset refused to move the funds
    TransferFailed = 7,
    /// Historical lookup at the current or a future ledger
    FutureLookup = 8,
    /// Permit deadline has passed
    ExpiredDeadline = 9,
    /// Permit signature cannot be attributed to the owner
    InvalidSignature = 10,
    /// Underlying asset cannot be the wrapper itself
    InvalidUnderlying = 11,
    /// Checked arithmetic failed
    ArithmeticOverflow = 12,
    /// Checkpoint index is past the end of the history
    CheckpointNotFound = 13,
}
