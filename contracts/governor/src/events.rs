use soroban_sdk::{contractevent, Address, BytesN, Env, String, Vec};

use crate::types::Call;

#[contractevent(topics = ["Governor", "INIT"])]
struct Initialized {
    token: Address,
    timelock: Address,
}

#[contractevent(topics = ["Governor", "CREATED"])]
struct ProposalCreated {
    id: BytesN<32>,
    proposer: Address,
    calls: Vec<Call>,
    description: String,
    snapshot: u32,
    deadline: u32,
}

#[contractevent(topics = ["Governor", "VOTE"])]
struct VoteCast {
    voter: Address,
    id: BytesN<32>,
    support: u32,
    weight: i128,
    reason: String,
}

#[contractevent(topics = ["Governor", "QUEUED"])]
struct ProposalQueued {
    id: BytesN<32>,
    timelock_id: BytesN<32>,
    eta: u64,
}

#[contractevent(topics = ["Governor", "EXECUTED"])]
struct ProposalExecuted {
    id: BytesN<32>,
}

#[contractevent(topics = ["Governor", "CANCELED"])]
struct ProposalCanceled {
    id: BytesN<32>,
}

#[contractevent(topics = ["Governor", "VOTING_DELAY"])]
struct VotingDelaySet {
    old_value: u32,
    new_value: u32,
}

#[contractevent(topics = ["Governor", "VOTING_PERIOD"])]
struct VotingPeriodSet {
    old_value: u32,
    new_value: u32,
}

#[contractevent(topics = ["Governor", "THRESHOLD"])]
struct ProposalThresholdSet {
    old_value: i128,
    new_value: i128,
}

#[contractevent(topics = ["Governor", "QUORUM"])]
struct QuorumNumeratorUpdated {
    old_value: u32,
    new_value: u32,
}

pub fn emit_initialized(env: &Env, token: &Address, timelock: &Address) {
    Initialized {
        token: token.clone(),
        timelock: timelock.clone(),
    }
    .publish(env);
}

pub fn emit_proposal_created(
    env: &Env,
    id: &BytesN<32>,
    proposer: &Address,
    calls: &Vec<Call>,
    description: &String,
    snapshot: u32,
    deadline: u32,
) {
    ProposalCreated {
        id: id.clone(),
        proposer: proposer.clone(),
        calls: calls.clone(),
        description: description.clone(),
        snapshot,
        deadline,
    }
    .publish(env);
}

pub fn emit_vote_cast(
    env: &Env,
    voter: &Address,
    id: &BytesN<32>,
    support: u32,
    weight: i128,
    reason: &String,
) {
    VoteCast {
        voter: voter.clone(),
        id: id.clone(),
        support,
        weight,
        reason: reason.clone(),
    }
    .publish(env);
}

pub fn emit_proposal_queued(env: &Env, id: &BytesN<32>, timelock_id: &BytesN<32>, eta: u64) {
    ProposalQueued {
        id: id.clone(),
        timelock_id: timelock_id.clone(),
        eta,
    }
    .publish(env);
}

pub fn emit_proposal_executed(env: &Env, id: &BytesN<32>) {
    ProposalExecuted { id: id.clone() }.publish(env);
}

pub fn emit_proposal_canceled(env: &Env, id: &BytesN<32>) {
    ProposalCanceled { id: id.clone() }.publish(env);
}

pub fn emit_voting_delay_set(env: &Env, old_value: u32, new_value: u32) {
    VotingDelaySet {
        old_value,
        new_value,
    }
    .publish(env);
}

pub fn emit_voting_period_set(env: &Env, old_value: u32, new_value: u32) {
    VotingPeriodSet {
        old_value,
        new_value,
    }
    .publish(env);
}

pub fn emit_proposal_threshold_set(env: &Env, old_value: i128, new_value: i128) {
    ProposalThresholdSet {
        old_value,
        new_value,
    }
    .publish(env);
}

pub fn emit_quorum_numerator_updated(env: &Env, old_value: u32, new_value: u32) {
    QuorumNumeratorUpdated {
        old_value,
        new_value,
    }
    .publish(env);
}
