use soroban_sdk::{contractevent, Address, BytesN, Env, Vec};

use crate::types::{Call, Role};

#[contractevent(topics = ["Timelock", "INIT"])]
struct Initialized {
    min_delay: u64,
}

#[contractevent(topics = ["Timelock", "SCHEDULED"])]
struct CallScheduled {
    id: BytesN<32>,
    calls: Vec<Call>,
    predecessor: Option<BytesN<32>>,
    ready_at: u64,
}

#[contractevent(topics = ["Timelock", "EXECUTED"])]
struct CallExecuted {
    id: BytesN<32>,
    executor: Address,
}

#[contractevent(topics = ["Timelock", "CANCELLED"])]
struct Cancelled {
    id: BytesN<32>,
}

#[contractevent(topics = ["Timelock", "DELAY_CHANGED"])]
struct MinDelayChanged {
    old_delay: u64,
    new_delay: u64,
}

#[contractevent(topics = ["Timelock", "ROLE_GRANTED"])]
struct RoleGranted {
    role: Role,
    account: Address,
    sender: Address,
}

#[contractevent(topics = ["Timelock", "ROLE_REVOKED"])]
struct RoleRevoked {
    role: Role,
    account: Address,
    sender: Address,
}

pub fn emit_initialized(env: &Env, min_delay: u64) {
    Initialized { min_delay }.publish(env);
}

pub fn emit_call_scheduled(
    env: &Env,
    id: &BytesN<32>,
    calls: &Vec<Call>,
    predecessor: &Option<BytesN<32>>,
    ready_at: u64,
) {
    CallScheduled {
        id: id.clone(),
        calls: calls.clone(),
        predecessor: predecessor.clone(),
        ready_at,
    }
    .publish(env);
}

pub fn emit_call_executed(env: &Env, id: &BytesN<32>, executor: &Address) {
    CallExecuted {
        id: id.clone(),
        executor: executor.clone(),
    }
    .publish(env);
}

pub fn emit_cancelled(env: &Env, id: &BytesN<32>) {
    Cancelled { id: id.clone() }.publish(env);
}

pub fn emit_min_delay_changed(env: &Env, old_delay: u64, new_delay: u64) {
    MinDelayChanged {
        old_delay,
        new_delay,
    }
    .publish(env);
}

pub fn emit_role_granted(env: &Env, role: Role, account: &Address, sender: &Address) {
    RoleGranted {
        role,
        account: account.clone(),
        sender: sender.clone(),
    }
    .publish(env);
}

pub fn emit_role_revoked(env: &Env, role: Role, account: &Address, sender: &Address) {
    RoleRevoked {
        role,
        account: account.clone(),
        sender: sender.clone(),
    }
    .publish(env);
}
