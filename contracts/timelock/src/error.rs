//! Error types for the Timelock contract

use soroban_sdk::contracterror;

/// Timelock contract errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TimelockError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Caller does not hold the required role
    Unauthorized = 3,
    /// Requested delay is below the configured minimum
    DelayTooShort = 4,
    /// Operation is already scheduled
    AlreadyScheduled = 5,
    /// Operation is not scheduled
    NotScheduled = 6,
    /// Operation delay has not elapsed yet
    NotReady = 7,
    /// Declared predecessor has not been executed
    PredecessorNotExecuted = 8,
    /// Operation has already been executed
    AlreadyExecuted = 9,
    /// One of the calls in the batch failed
    CallReverted = 10,
    /// Batch contains no calls
    EmptyBatch = 11,
    /// Call targets this contract with an unsupported function or arguments
    UnsupportedSelfCall = 12,
    /// Checked arithmetic failed
    ArithmeticOverflow = 13,
}
