//! Data types for the Timelock contract

use soroban_sdk::{contracttype, Address, BytesN, Symbol, Val, Vec};

/// Roles recognised by the timelock
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Grants and revokes every role; held by the timelock itself
    Admin,
    /// Schedules operations
    Proposer,
    /// Executes ready operations
    Executor,
    /// Cancels pending operations
    Canceller,
}

/// A single contract invocation inside an operation
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Call {
    /// Contract to invoke
    pub target: Address,
    /// Function name on the target
    pub function: Symbol,
    /// Arguments passed as-is to the target
    pub args: Vec<Val>,
}

/// Lifecycle of an operation as seen by callers
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum OperationState {
    /// Never scheduled, or cancelled
    Unset = 0,
    /// Scheduled and still inside its delay
    Waiting = 1,
    /// Delay elapsed, executable
    Ready = 2,
    /// Executed
    Done = 3,
}

/// A scheduled batch of calls
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Operation {
    /// Ledger timestamp when the batch was scheduled
    pub scheduled_at: u64,
    /// Earliest timestamp at which the batch can be executed
    pub ready_at: u64,
    /// Operation that must be executed first, if any
    pub predecessor: Option<BytesN<32>>,
    /// Set once the batch has run
    pub executed: bool,
}
