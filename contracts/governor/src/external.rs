//! Cross-contract calls into the votes token and the timelock

use soroban_sdk::{Address, BytesN, Env, IntoVal, Symbol, Val, Vec};

use crate::error::GovernorError;
use crate::types::Call;

// ============================================================================
// Votes Token
// ============================================================================

pub fn get_votes(env: &Env, token: &Address, account: &Address) -> i128 {
    env.invoke_contract(
        token,
        &Symbol::new(env, "get_votes"),
        (account.clone(),).into_val(env),
    )
}

pub fn get_past_votes(env: &Env, token: &Address, account: &Address, ledger: u32) -> i128 {
    env.invoke_contract(
        token,
        &Symbol::new(env, "get_past_votes"),
        (account.clone(), ledger).into_val(env),
    )
}

pub fn get_past_total_supply(env: &Env, token: &Address, ledger: u32) -> i128 {
    env.invoke_contract(
        token,
        &Symbol::new(env, "get_past_total_supply"),
        (ledger,).into_val(env),
    )
}

// ============================================================================
// Timelock
// ============================================================================

pub fn get_min_delay(env: &Env, timelock: &Address) -> u64 {
    env.invoke_contract(
        timelock,
        &Symbol::new(env, "get_min_delay"),
        Vec::<Val>::new(env),
    )
}

pub fn schedule(
    env: &Env,
    timelock: &Address,
    calls: &Vec<Call>,
    salt: &BytesN<32>,
    delay: u64,
) -> BytesN<32> {
    let predecessor: Option<BytesN<32>> = None;
    env.invoke_contract(
        timelock,
        &Symbol::new(env, "schedule"),
        (
            env.current_contract_address(),
            calls.clone(),
            predecessor,
            salt.clone(),
            delay,
        )
            .into_val(env),
    )
}

/// Runs the batch through the timelock; any failure inside it is reported
/// as `ExecutionFailed` and every write it made is discarded
pub fn execute(
    env: &Env,
    timelock: &Address,
    calls: &Vec<Call>,
    salt: &BytesN<32>,
) -> Result<(), GovernorError> {
    let predecessor: Option<BytesN<32>> = None;
    let result = env.try_invoke_contract::<Val, GovernorError>(
        timelock,
        &Symbol::new(env, "execute"),
        (
            env.current_contract_address(),
            calls.clone(),
            predecessor,
            salt.clone(),
        )
            .into_val(env),
    );

    match result {
        Ok(Ok(_)) => Ok(()),
        _ => Err(GovernorError::ExecutionFailed),
    }
}

pub fn cancel(env: &Env, timelock: &Address, id: &BytesN<32>) {
    let _result: () = env.invoke_contract(
        timelock,
        &Symbol::new(env, "cancel"),
        (env.current_contract_address(), id.clone()).into_val(env),
    );
}

pub fn is_operation_pending(env: &Env, timelock: &Address, id: &BytesN<32>) -> bool {
    env.invoke_contract(
        timelock,
        &Symbol::new(env, "is_operation_pending"),
        (id.clone(),).into_val(env),
    )
}

pub fn is_operation_ready(env: &Env, timelock: &Address, id: &BytesN<32>) -> bool {
    env.invoke_contract(
        timelock,
        &Symbol::new(env, "is_operation_ready"),
        (id.clone(),).into_val(env),
    )
}

pub fn is_operation_done(env: &Env, timelock: &Address, id: &BytesN<32>) -> bool {
    env.invoke_contract(
        timelock,
        &Symbol::new(env, "is_operation_done"),
        (id.clone(),).into_val(env),
    )
}
