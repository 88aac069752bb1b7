//! Storage keys and helpers for the Timelock contract

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::error::TimelockError;
use crate::types::{Operation, Role};

/// Storage keys for the timelock contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Minimum scheduling delay in seconds (instance storage)
    MinDelay,
    /// Role membership flag (persistent storage)
    RoleMember(Role, Address),
    /// Scheduled or executed operation (persistent storage)
    Operation(BytesN<32>),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::MinDelay)
}

pub fn get_min_delay(env: &Env) -> Result<u64, TimelockError> {
    env.storage()
        .instance()
        .get(&DataKey::MinDelay)
        .ok_or(TimelockError::NotInitialized)
}

pub fn set_min_delay(env: &Env, delay: u64) {
    env.storage().instance().set(&DataKey::MinDelay, &delay);
}

// ============================================================================
// Role Helpers
// ============================================================================

pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get::<DataKey, bool>(&DataKey::RoleMember(role, account.clone()))
        .unwrap_or(false)
}

pub fn set_role(env: &Env, role: Role, account: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::RoleMember(role, account.clone()), &true);
}

pub fn remove_role(env: &Env, role: Role, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::RoleMember(role, account.clone()));
}

// ============================================================================
// Operation Helpers
// ============================================================================

pub fn get_operation(env: &Env, id: &BytesN<32>) -> Option<Operation> {
    env.storage()
        .persistent()
        .get(&DataKey::Operation(id.clone()))
}

pub fn set_operation(env: &Env, id: &BytesN<32>, operation: &Operation) {
    env.storage()
        .persistent()
        .set(&DataKey::Operation(id.clone()), operation);
}

pub fn remove_operation(env: &Env, id: &BytesN<32>) {
    env.storage()
        .persistent()
        .remove(&DataKey::Operation(id.clone()));
}
