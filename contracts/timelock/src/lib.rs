#![no_std]

//! # Timelock Controller
//!
//! A Soroban contract that holds a mandatory delay between scheduling a batch
//! of contract calls and executing it.
//!
//! ## Features
//! - Role-gated scheduling, execution and cancellation
//! - Operations identified by the hash of their calls, predecessor and salt
//! - Explicit sequencing through predecessor operations
//! - All-or-nothing batch execution
//! - Self-administration: role changes and delay updates go through the
//!   same delayed path as every other operation
//!
//! ## Security
//! - No operation executes before its ready time, and never twice
//! - The timelock is the admin of every role, so no single key can bypass
//!   the delay once a bootstrap admin has renounced
//! - Calls targeting the timelock are dispatched internally because Soroban
//!   does not allow a contract to re-enter itself

use soroban_sdk::{
    contract, contractimpl, xdr::ToXdr, Address, BytesN, Env, Symbol, TryFromVal, Val, Vec,
};

mod error;
mod events;
mod storage;
mod types;

pub use error::TimelockError;
pub use types::{Call, Operation, OperationState, Role};

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct Timelock;

#[contractimpl]
impl Timelock {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Initialize the timelock
    ///
    /// # Arguments
    /// * `min_delay` - Minimum delay in seconds for every operation
    /// * `proposers` - Accounts granted Proposer and Canceller
    /// * `executors` - Accounts granted Executor
    /// * `admin` - Optional bootstrap admin, expected to renounce after setup
    ///
    /// # Errors
    /// * `AlreadyInitialized` - Contract has already been initialized
    pub fn initialize(
        env: Env,
        min_delay: u64,
        proposers: Vec<Address>,
        executors: Vec<Address>,
        admin: Option<Address>,
    ) -> Result<(), TimelockError> {
        if storage::is_initialized(&env) {
            return Err(TimelockError::AlreadyInitialized);
        }

        let this = env.current_contract_address();
        Self::grant(&env, Role::Admin, &this, &this);

        if let Some(admin) = admin {
            admin.require_auth();
            Self::grant(&env, Role::Admin, &admin, &this);
        }

        for proposer in proposers.iter() {
            Self::grant(&env, Role::Proposer, &proposer, &this);
            Self::grant(&env, Role::Canceller, &proposer, &this);
        }
        for executor in executors.iter() {
            Self::grant(&env, Role::Executor, &executor, &this);
        }

        storage::set_min_delay(&env, min_delay);
        events::emit_initialized(&env, min_delay);
        Ok(())
    }

    // ========================================================================
    // Role Management
    // ========================================================================

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        storage::has_role(&env, role, &account)
    }

    /// Every role is administered by `Admin`
    pub fn get_role_admin(_env: Env, _role: Role) -> Role {
        Role::Admin
    }

    /// Grant `role` to `account`
    ///
    /// # Errors
    /// * `NotInitialized` - Contract not initialized
    /// * `Unauthorized` - `caller` does not hold Admin
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), TimelockError> {
        Self::require_role(&env, Role::Admin, &caller)?;
        Self::grant(&env, role, &account, &caller);
        Ok(())
    }

    /// Revoke `role` from `account`
    ///
    /// # Errors
    /// * `NotInitialized` - Contract not initialized
    /// * `Unauthorized` - `caller` does not hold Admin
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), TimelockError> {
        Self::require_role(&env, Role::Admin, &caller)?;
        Self::revoke(&env, role, &account, &caller);
        Ok(())
    }

    /// Give up a role held by `account`
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), TimelockError> {
        storage::get_min_delay(&env)?;
        account.require_auth();
        Self::revoke(&env, role, &account, &account);
        Ok(())
    }

    // ========================================================================
    // Operation Lifecycle
    // ========================================================================

    pub fn get_min_delay(env: Env) -> Result<u64, TimelockError> {
        storage::get_min_delay(&env)
    }

    /// Identifier of a batch: hash of its calls, predecessor and salt
    pub fn hash_operation(
        env: Env,
        calls: Vec<Call>,
        predecessor: Option<BytesN<32>>,
        salt: BytesN<32>,
    ) -> BytesN<32> {
        let payload = (calls, predecessor, salt).to_xdr(&env);
        env.crypto().sha256(&payload).to_bytes()
    }

    /// Schedule a batch that becomes executable after `delay` seconds
    ///
    /// # Errors
    /// * `Unauthorized` - `caller` does not hold Proposer
    /// * `EmptyBatch` - `calls` is empty
    /// * `DelayTooShort` - `delay` is below the minimum delay
    /// * `AlreadyScheduled` - Same batch is already waiting
    /// * `AlreadyExecuted` - Same batch has already run
    pub fn schedule(
        env: Env,
        caller: Address,
        calls: Vec<Call>,
        predecessor: Option<BytesN<32>>,
        salt: BytesN<32>,
        delay: u64,
    ) -> Result<BytesN<32>, TimelockError> {
        Self::require_role(&env, Role::Proposer, &caller)?;

        if calls.is_empty() {
            return Err(TimelockError::EmptyBatch);
        }
        if delay < storage::get_min_delay(&env)? {
            return Err(TimelockError::DelayTooShort);
        }

        let id = Self::hash_operation(
            env.clone(),
            calls.clone(),
            predecessor.clone(),
            salt,
        );
        if let Some(existing) = storage::get_operation(&env, &id) {
            if existing.executed {
                return Err(TimelockError::AlreadyExecuted);
            }
            return Err(TimelockError::AlreadyScheduled);
        }

        let now = env.ledger().timestamp();
        let ready_at = now
            .checked_add(delay)
            .ok_or(TimelockError::ArithmeticOverflow)?;

        let operation = Operation {
            scheduled_at: now,
            ready_at,
            predecessor: predecessor.clone(),
            executed: false,
        };
        storage::set_operation(&env, &id, &operation);

        events::emit_call_scheduled(&env, &id, &calls, &predecessor, ready_at);
        Ok(id)
    }

    /// Execute a ready batch
    ///
    /// Calls run in order. Any failing call aborts the whole batch and no
    /// effect of the earlier calls survives.
    ///
    /// # Errors
    /// * `Unauthorized` - `caller` does not hold Executor
    /// * `NotScheduled` - Batch was never scheduled or was cancelled
    /// * `AlreadyExecuted` - Batch has already run
    /// * `NotReady` - Delay has not elapsed
    /// * `PredecessorNotExecuted` - Declared predecessor has not run
    /// * `CallReverted` - A call in the batch failed
    pub fn execute(
        env: Env,
        caller: Address,
        calls: Vec<Call>,
        predecessor: Option<BytesN<32>>,
        salt: BytesN<32>,
    ) -> Result<(), TimelockError> {
        Self::require_role(&env, Role::Executor, &caller)?;

        let id = Self::hash_operation(
            env.clone(),
            calls.clone(),
            predecessor.clone(),
            salt,
        );
        let mut operation =
            storage::get_operation(&env, &id).ok_or(TimelockError::NotScheduled)?;

        if operation.executed {
            return Err(TimelockError::AlreadyExecuted);
        }
        if env.ledger().timestamp() < operation.ready_at {
            return Err(TimelockError::NotReady);
        }
        if let Some(predecessor) = &predecessor {
            if !Self::is_operation_done(env.clone(), predecessor.clone()) {
                return Err(TimelockError::PredecessorNotExecuted);
            }
        }

        // Mark as executed BEFORE external calls
        operation.executed = true;
        storage::set_operation(&env, &id, &operation);

        for call in calls.iter() {
            Self::dispatch(&env, &call)?;
        }

        events::emit_call_executed(&env, &id, &caller);
        Ok(())
    }

    /// Cancel a batch that has not run yet, returning it to Unset
    ///
    /// # Errors
    /// * `Unauthorized` - `caller` does not hold Canceller
    /// * `NotScheduled` - Nothing is scheduled under `id`
    /// * `AlreadyExecuted` - Batch has already run
    pub fn cancel(env: Env, caller: Address, id: BytesN<32>) -> Result<(), TimelockError> {
        Self::require_role(&env, Role::Canceller, &caller)?;

        let operation = storage::get_operation(&env, &id).ok_or(TimelockError::NotScheduled)?;
        if operation.executed {
            return Err(TimelockError::AlreadyExecuted);
        }

        storage::remove_operation(&env, &id);
        events::emit_cancelled(&env, &id);
        Ok(())
    }

    // ========================================================================
    // Query Functions
    // ========================================================================

    pub fn get_operation(env: Env, id: BytesN<32>) -> Option<Operation> {
        storage::get_operation(&env, &id)
    }

    pub fn get_operation_state(env: Env, id: BytesN<32>) -> OperationState {
        match storage::get_operation(&env, &id) {
            None => OperationState::Unset,
            Some(operation) if operation.executed => OperationState::Done,
            Some(operation) if env.ledger().timestamp() >= operation.ready_at => {
                OperationState::Ready
            }
            Some(_) => OperationState::Waiting,
        }
    }

    /// Ready time of an operation, zero when unset
    pub fn get_timestamp(env: Env, id: BytesN<32>) -> u64 {
        storage::get_operation(&env, &id)
            .map(|operation| operation.ready_at)
            .unwrap_or(0)
    }

    pub fn is_operation(env: Env, id: BytesN<32>) -> bool {
        Self::get_operation_state(env, id) != OperationState::Unset
    }

    /// Scheduled and not yet executed
    pub fn is_operation_pending(env: Env, id: BytesN<32>) -> bool {
        matches!(
            Self::get_operation_state(env, id),
            OperationState::Waiting | OperationState::Ready
        )
    }

    pub fn is_operation_ready(env: Env, id: BytesN<32>) -> bool {
        Self::get_operation_state(env, id) == OperationState::Ready
    }

    pub fn is_operation_done(env: Env, id: BytesN<32>) -> bool {
        Self::get_operation_state(env, id) == OperationState::Done
    }
}

// ============================================================================
// Internal Helpers
// ============================================================================

impl Timelock {
    fn require_role(env: &Env, role: Role, caller: &Address) -> Result<(), TimelockError> {
        storage::get_min_delay(env)?;
        caller.require_auth();
        if !storage::has_role(env, role, caller) {
            return Err(TimelockError::Unauthorized);
        }
        Ok(())
    }

    fn grant(env: &Env, role: Role, account: &Address, sender: &Address) {
        if storage::has_role(env, role, account) {
            return;
        }
        storage::set_role(env, role, account);
        events::emit_role_granted(env, role, account, sender);
    }

    fn revoke(env: &Env, role: Role, account: &Address, sender: &Address) {
        if !storage::has_role(env, role, account) {
            return;
        }
        storage::remove_role(env, role, account);
        events::emit_role_revoked(env, role, account, sender);
    }

    fn dispatch(env: &Env, call: &Call) -> Result<(), TimelockError> {
        if call.target == env.current_contract_address() {
            return Self::dispatch_self(env, call);
        }

        match env.try_invoke_contract::<Val, TimelockError>(
            &call.target,
            &call.function,
            call.args.clone(),
        ) {
            Ok(Ok(_)) => Ok(()),
            _ => Err(TimelockError::CallReverted),
        }
    }

    /// Administrative calls the timelock makes on itself
    fn dispatch_self(env: &Env, call: &Call) -> Result<(), TimelockError> {
        let this = env.current_contract_address();

        if call.function == Symbol::new(env, "grant_role") && call.args.len() == 2 {
            let role: Role = Self::arg(env, &call.args, 0)?;
            let account: Address = Self::arg(env, &call.args, 1)?;
            Self::grant(env, role, &account, &this);
        } else if call.function == Symbol::new(env, "revoke_role") && call.args.len() == 2 {
            let role: Role = Self::arg(env, &call.args, 0)?;
            let account: Address = Self::arg(env, &call.args, 1)?;
            Self::revoke(env, role, &account, &this);
        } else if call.function == Symbol::new(env, "update_delay") && call.args.len() == 1 {
            let new_delay: u64 = Self::arg(env, &call.args, 0)?;
            let old_delay = storage::get_min_delay(env)?;
            storage::set_min_delay(env, new_delay);
            events::emit_min_delay_changed(env, old_delay, new_delay);
        } else {
            return Err(TimelockError::UnsupportedSelfCall);
        }

        Ok(())
    }

    fn arg<T: TryFromVal<Env, Val>>(
        env: &Env,
        args: &Vec<Val>,
        index: u32,
    ) -> Result<T, TimelockError> {
        let raw = args.get(index).ok_or(TimelockError::UnsupportedSelfCall)?;
        T::try_from_val(env, &raw).map_err(|_| TimelockError::UnsupportedSelfCall)
    }
}

mod test;
