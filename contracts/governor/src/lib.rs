#![no_std]

//! # Governor
//!
//! Proposal lifecycle for a DAO whose voting power comes from a
//! checkpointed votes token and whose decisions execute through a timelock.
//!
//! ## Features
//! - Proposals identified by the hash of their calls and description
//! - Snapshot-based voting with Against/For/Abstain ballots
//! - Quorum as a percentage of the total supply at the snapshot ledger
//! - Queueing and execution through the timelock
//! - Governance parameters adjustable only by the timelock
//!
//! ## Lifecycle
//! ```text
//! Pending -> Active -> Defeated
//!                   -> Succeeded -> Queued -> Executed
//! Succeeded, Queued -> Expired (window elapsed)
//! Pending, Active   -> Canceled (proposer)
//! ```
//!
//! The state is derived on every read from the current ledger, the tallies
//! and the timelock operation, never stored directly.

use soroban_sdk::{contract, contractimpl, xdr::ToXdr, Address, BytesN, Env, String, Vec};

mod error;
mod events;
mod external;
mod storage;
mod types;

pub use error::GovernorError;
pub use types::{
    Call, GovernorConfig, Proposal, ProposalState, ProposalVotes, VoteReceipt, VoteType,
    QUORUM_DENOMINATOR,
};

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct Governor;

#[contractimpl]
impl Governor {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Initialize the governor
    ///
    /// # Arguments
    /// * `token` - Votes token providing historical voting power
    /// * `timelock` - Timelock that executes accepted proposals
    /// * `config` - Voting delay, period, threshold, quorum and expiry windows
    ///
    /// # Errors
    /// * `AlreadyInitialized` - Contract has already been initialized
    /// * `InvalidVotingPeriod` - Voting period is zero
    /// * `InvalidQuorumNumerator` - Quorum numerator exceeds 100
    pub fn initialize(
        env: Env,
        token: Address,
        timelock: Address,
        config: GovernorConfig,
    ) -> Result<(), GovernorError> {
        if storage::is_initialized(&env) {
            return Err(GovernorError::AlreadyInitialized);
        }
        Self::validate_config(&config)?;

        storage::set_token(&env, &token);
        storage::set_timelock(&env, &timelock);
        storage::set_config(&env, &config);

        events::emit_initialized(&env, &token, &timelock);
        Ok(())
    }

    // ========================================================================
    // Proposal Lifecycle
    // ========================================================================

    /// Create a proposal
    ///
    /// Voting opens after `voting_delay` ledgers and lasts `voting_period`
    /// ledgers. The proposer's power is read at the previous ledger.
    ///
    /// # Errors
    /// * `EmptyProposal` - `calls` is empty
    /// * `BelowThreshold` - Proposer holds fewer votes than the threshold
    /// * `DuplicateProposal` - Same calls and description were proposed before
    pub fn propose(
        env: Env,
        proposer: Address,
        calls: Vec<Call>,
        description: String,
    ) -> Result<BytesN<32>, GovernorError> {
        let config = storage::get_config(&env)?;
        proposer.require_auth();

        if calls.is_empty() {
            return Err(GovernorError::EmptyProposal);
        }

        let current = env.ledger().sequence();
        if config.proposal_threshold > 0 {
            // No ledger precedes genesis, so no power can be proven there.
            if current == 0 {
                return Err(GovernorError::BelowThreshold);
            }
            let token = storage::get_token(&env)?;
            let votes = external::get_past_votes(&env, &token, &proposer, current - 1);
            if votes < config.proposal_threshold {
                return Err(GovernorError::BelowThreshold);
            }
        }

        let description_hash = env
            .crypto()
            .sha256(&description.clone().to_xdr(&env))
            .to_bytes();
        let id = Self::hash_proposal(env.clone(), calls.clone(), description_hash.clone());
        if storage::has_proposal(&env, &id) {
            return Err(GovernorError::DuplicateProposal);
        }

        let snapshot = current
            .checked_add(config.voting_delay)
            .ok_or(GovernorError::ArithmeticOverflow)?;
        let deadline = snapshot
            .checked_add(config.voting_period)
            .ok_or(GovernorError::ArithmeticOverflow)?;

        let proposal = Proposal {
            id: id.clone(),
            proposer: proposer.clone(),
            calls: calls.clone(),
            description_hash,
            snapshot,
            deadline,
            eta: None,
            timelock_id: None,
            executed: false,
            canceled: false,
        };
        storage::set_proposal(&env, &proposal);
        storage::set_votes(&env, &id, &ProposalVotes::default());

        events::emit_proposal_created(
            &env,
            &id,
            &proposer,
            &calls,
            &description,
            snapshot,
            deadline,
        );
        Ok(id)
    }

    /// Cast a vote; returns the weight recorded
    ///
    /// # Arguments
    /// * `support` - 0 = Against, 1 = For, 2 = Abstain
    ///
    /// # Errors
    /// * `InvalidVoteType` - `support` is out of range
    /// * `NotActive` - Voting is not open
    /// * `AlreadyVoted` - `voter` already voted on this proposal
    pub fn cast_vote(
        env: Env,
        voter: Address,
        proposal_id: BytesN<32>,
        support: u32,
    ) -> Result<i128, GovernorError> {
        let reason = String::from_str(&env, "");
        Self::count_vote(&env, &voter, &proposal_id, support, &reason)
    }

    /// Same as `cast_vote`, with a reason attached to the emitted event
    pub fn cast_vote_with_reason(
        env: Env,
        voter: Address,
        proposal_id: BytesN<32>,
        support: u32,
        reason: String,
    ) -> Result<i128, GovernorError> {
        Self::count_vote(&env, &voter, &proposal_id, support, &reason)
    }

    /// Schedule a succeeded proposal on the timelock
    ///
    /// The description hash is used as the timelock salt, so the timelock
    /// operation id can be recomputed from the proposal alone.
    ///
    /// # Errors
    /// * `NotSucceeded` - Proposal is not in the Succeeded state
    pub fn queue(env: Env, proposal_id: BytesN<32>) -> Result<u64, GovernorError> {
        if Self::state(env.clone(), proposal_id.clone())? != ProposalState::Succeeded {
            return Err(GovernorError::NotSucceeded);
        }

        let timelock = storage::get_timelock(&env)?;
        let mut proposal = storage::get_proposal(&env, &proposal_id)?;

        let delay = external::get_min_delay(&env, &timelock);
        let timelock_id = external::schedule(
            &env,
            &timelock,
            &proposal.calls,
            &proposal.description_hash,
            delay,
        );
        let eta = env
            .ledger()
            .timestamp()
            .checked_add(delay)
            .ok_or(GovernorError::ArithmeticOverflow)?;

        proposal.eta = Some(eta);
        proposal.timelock_id = Some(timelock_id.clone());
        storage::set_proposal(&env, &proposal);

        events::emit_proposal_queued(&env, &proposal_id, &timelock_id, eta);
        Ok(eta)
    }

    /// Execute a queued proposal through the timelock
    ///
    /// The batch runs all-or-nothing. On failure the proposal stays Queued
    /// and execution can be retried.
    ///
    /// # Errors
    /// * `NotQueued` - Proposal is not in the Queued state
    /// * `NotReady` - Timelock delay has not elapsed
    /// * `ExecutionFailed` - A call in the batch failed
    pub fn execute(env: Env, proposal_id: BytesN<32>) -> Result<(), GovernorError> {
        if Self::state(env.clone(), proposal_id.clone())? != ProposalState::Queued {
            return Err(GovernorError::NotQueued);
        }

        let timelock = storage::get_timelock(&env)?;
        let mut proposal = storage::get_proposal(&env, &proposal_id)?;
        let timelock_id = proposal
            .timelock_id
            .clone()
            .ok_or(GovernorError::NotQueued)?;

        if !external::is_operation_ready(&env, &timelock, &timelock_id) {
            return Err(GovernorError::NotReady);
        }

        external::execute(&env, &timelock, &proposal.calls, &proposal.description_hash)?;

        proposal.executed = true;
        storage::set_proposal(&env, &proposal);

        events::emit_proposal_executed(&env, &proposal_id);
        Ok(())
    }

    /// Cancel a proposal
    ///
    /// The proposer may cancel while the proposal is Pending or Active. Once
    /// Succeeded or Queued, cancellation is only possible if the proposer's
    /// current votes have dropped below the proposal threshold. A pending
    /// timelock operation is cancelled along with the proposal.
    ///
    /// # Errors
    /// * `NotCancelable` - Proposal is in a state that cannot be canceled
    pub fn cancel(env: Env, proposal_id: BytesN<32>) -> Result<(), GovernorError> {
        let state = Self::state(env.clone(), proposal_id.clone())?;
        let mut proposal = storage::get_proposal(&env, &proposal_id)?;
        proposal.proposer.require_auth();

        match state {
            ProposalState::Pending | ProposalState::Active => {}
            ProposalState::Succeeded | ProposalState::Queued => {
                let config = storage::get_config(&env)?;
                let token = storage::get_token(&env)?;
                let votes = external::get_votes(&env, &token, &proposal.proposer);
                if votes >= config.proposal_threshold {
                    return Err(GovernorError::NotCancelable);
                }
            }
            _ => return Err(GovernorError::NotCancelable),
        }

        if let Some(timelock_id) = &proposal.timelock_id {
            let timelock = storage::get_timelock(&env)?;
            if external::is_operation_pending(&env, &timelock, timelock_id) {
                external::cancel(&env, &timelock, timelock_id);
            }
        }

        proposal.canceled = true;
        storage::set_proposal(&env, &proposal);

        events::emit_proposal_canceled(&env, &proposal_id);
        Ok(())
    }

    // ========================================================================
    // Query Functions
    // ========================================================================

    /// Current lifecycle state of a proposal
    pub fn state(env: Env, proposal_id: BytesN<32>) -> Result<ProposalState, GovernorError> {
        let proposal = storage::get_proposal(&env, &proposal_id)?;

        if proposal.executed {
            return Ok(ProposalState::Executed);
        }
        if proposal.canceled {
            return Ok(ProposalState::Canceled);
        }

        let current = env.ledger().sequence();
        if current <= proposal.snapshot {
            return Ok(ProposalState::Pending);
        }
        if current <= proposal.deadline {
            return Ok(ProposalState::Active);
        }

        let config = storage::get_config(&env)?;

        if let Some(timelock_id) = &proposal.timelock_id {
            let timelock = storage::get_timelock(&env)?;
            if external::is_operation_done(&env, &timelock, timelock_id) {
                return Ok(ProposalState::Executed);
            }
            if !external::is_operation_pending(&env, &timelock, timelock_id) {
                return Ok(ProposalState::Canceled);
            }
            let eta = proposal.eta.unwrap_or(0);
            if env.ledger().timestamp() > eta.saturating_add(config.grace_period) {
                return Ok(ProposalState::Expired);
            }
            return Ok(ProposalState::Queued);
        }

        if !Self::vote_succeeded(&env, &proposal)? {
            return Ok(ProposalState::Defeated);
        }
        if current > proposal.deadline.saturating_add(config.queue_window) {
            return Ok(ProposalState::Expired);
        }
        Ok(ProposalState::Succeeded)
    }

    pub fn get_proposal(env: Env, proposal_id: BytesN<32>) -> Result<Proposal, GovernorError> {
        storage::get_proposal(&env, &proposal_id)
    }

    pub fn proposal_votes(
        env: Env,
        proposal_id: BytesN<32>,
    ) -> Result<ProposalVotes, GovernorError> {
        storage::get_proposal(&env, &proposal_id)?;
        Ok(storage::get_votes(&env, &proposal_id))
    }

    pub fn proposal_snapshot(env: Env, proposal_id: BytesN<32>) -> Result<u32, GovernorError> {
        Ok(storage::get_proposal(&env, &proposal_id)?.snapshot)
    }

    pub fn proposal_deadline(env: Env, proposal_id: BytesN<32>) -> Result<u32, GovernorError> {
        Ok(storage::get_proposal(&env, &proposal_id)?.deadline)
    }

    pub fn proposal_proposer(
        env: Env,
        proposal_id: BytesN<32>,
    ) -> Result<Address, GovernorError> {
        Ok(storage::get_proposal(&env, &proposal_id)?.proposer)
    }

    /// Timestamp from which a queued proposal can execute, zero if not queued
    pub fn proposal_eta(env: Env, proposal_id: BytesN<32>) -> Result<u64, GovernorError> {
        Ok(storage::get_proposal(&env, &proposal_id)?.eta.unwrap_or(0))
    }

    /// Proposal id: hash of the calls and the description hash
    pub fn hash_proposal(env: Env, calls: Vec<Call>, description_hash: BytesN<32>) -> BytesN<32> {
        let payload = (calls, description_hash).to_xdr(&env);
        env.crypto().sha256(&payload).to_bytes()
    }

    pub fn get_receipt(env: Env, proposal_id: BytesN<32>, voter: Address) -> Option<VoteReceipt> {
        storage::get_receipt(&env, &proposal_id, &voter)
    }

    pub fn has_voted(env: Env, proposal_id: BytesN<32>, voter: Address) -> bool {
        storage::get_receipt(&env, &proposal_id, &voter).is_some()
    }

    /// Votes required at `ledger`: a percentage of the total supply then
    pub fn quorum(env: Env, ledger: u32) -> Result<i128, GovernorError> {
        Self::require_past(&env, ledger)?;
        let config = storage::get_config(&env)?;
        let token = storage::get_token(&env)?;
        let supply = external::get_past_total_supply(&env, &token, ledger);

        supply
            .checked_mul(config.quorum_numerator as i128)
            .map(|scaled| scaled / QUORUM_DENOMINATOR as i128)
            .ok_or(GovernorError::ArithmeticOverflow)
    }

    /// Voting power of `account` at a past ledger
    pub fn get_votes(env: Env, account: Address, ledger: u32) -> Result<i128, GovernorError> {
        Self::require_past(&env, ledger)?;
        let token = storage::get_token(&env)?;
        Ok(external::get_past_votes(&env, &token, &account, ledger))
    }

    pub fn config(env: Env) -> Result<GovernorConfig, GovernorError> {
        storage::get_config(&env)
    }

    pub fn token(env: Env) -> Result<Address, GovernorError> {
        storage::get_token(&env)
    }

    pub fn timelock(env: Env) -> Result<Address, GovernorError> {
        storage::get_timelock(&env)
    }

    // ========================================================================
    // Governance Settings (timelock only)
    // ========================================================================

    pub fn set_voting_delay(env: Env, new_value: u32) -> Result<(), GovernorError> {
        let mut config = Self::require_timelock(&env)?;
        let old_value = config.voting_delay;
        config.voting_delay = new_value;
        storage::set_config(&env, &config);

        events::emit_voting_delay_set(&env, old_value, new_value);
        Ok(())
    }

    /// # Errors
    /// * `InvalidVotingPeriod` - `new_value` is zero
    pub fn set_voting_period(env: Env, new_value: u32) -> Result<(), GovernorError> {
        let mut config = Self::require_timelock(&env)?;
        if new_value == 0 {
            return Err(GovernorError::InvalidVotingPeriod);
        }
        let old_value = config.voting_period;
        config.voting_period = new_value;
        storage::set_config(&env, &config);

        events::emit_voting_period_set(&env, old_value, new_value);
        Ok(())
    }

    pub fn set_proposal_threshold(env: Env, new_value: i128) -> Result<(), GovernorError> {
        let mut config = Self::require_timelock(&env)?;
        let old_value = config.proposal_threshold;
        config.proposal_threshold = new_value;
        storage::set_config(&env, &config);

        events::emit_proposal_threshold_set(&env, old_value, new_value);
        Ok(())
    }

    /// # Errors
    /// * `InvalidQuorumNumerator` - `new_value` exceeds 100
    pub fn update_quorum_numerator(env: Env, new_value: u32) -> Result<(), GovernorError> {
        let mut config = Self::require_timelock(&env)?;
        if new_value > QUORUM_DENOMINATOR {
            return Err(GovernorError::InvalidQuorumNumerator);
        }
        let old_value = config.quorum_numerator;
        config.quorum_numerator = new_value;
        storage::set_config(&env, &config);

        events::emit_quorum_numerator_updated(&env, old_value, new_value);
        Ok(())
    }
}

// ============================================================================
// Internal Helpers
// ============================================================================

impl Governor {
    fn validate_config(config: &GovernorConfig) -> Result<(), GovernorError> {
        if config.voting_period == 0 {
            return Err(GovernorError::InvalidVotingPeriod);
        }
        if config.quorum_numerator > QUORUM_DENOMINATOR {
            return Err(GovernorError::InvalidQuorumNumerator);
        }
        Ok(())
    }

    /// Requires the timelock's authorization and returns the current config
    fn require_past(env: &Env, ledger: u32) -> Result<(), GovernorError> {
        if ledger >= env.ledger().sequence() {
            return Err(GovernorError::FutureLookup);
        }
        Ok(())
    }

    fn require_timelock(env: &Env) -> Result<GovernorConfig, GovernorError> {
        let config = storage::get_config(env)?;
        storage::get_timelock(env)?.require_auth();
        Ok(config)
    }

    fn count_vote(
        env: &Env,
        voter: &Address,
        proposal_id: &BytesN<32>,
        support: u32,
        reason: &String,
    ) -> Result<i128, GovernorError> {
        voter.require_auth();
        let vote_type = VoteType::from_u32(support).ok_or(GovernorError::InvalidVoteType)?;

        if Self::state(env.clone(), proposal_id.clone())? != ProposalState::Active {
            return Err(GovernorError::NotActive);
        }
        if storage::get_receipt(env, proposal_id, voter).is_some() {
            return Err(GovernorError::AlreadyVoted);
        }

        let proposal = storage::get_proposal(env, proposal_id)?;
        let token = storage::get_token(env)?;
        let weight = external::get_past_votes(env, &token, voter, proposal.snapshot);

        let mut votes = storage::get_votes(env, proposal_id);
        let bucket = match vote_type {
            VoteType::Against => &mut votes.against_votes,
            VoteType::For => &mut votes.for_votes,
            VoteType::Abstain => &mut votes.abstain_votes,
        };
        *bucket = bucket
            .checked_add(weight)
            .ok_or(GovernorError::ArithmeticOverflow)?;
        storage::set_votes(env, proposal_id, &votes);

        storage::set_receipt(
            env,
            proposal_id,
            voter,
            &VoteReceipt {
                support: vote_type,
                weight,
            },
        );

        events::emit_vote_cast(env, voter, proposal_id, support, weight, reason);
        Ok(weight)
    }

    /// Strict majority of For over Against, and For + Abstain reaching quorum
    fn vote_succeeded(env: &Env, proposal: &Proposal) -> Result<bool, GovernorError> {
        let votes = storage::get_votes(env, &proposal.id);
        if votes.for_votes <= votes.against_votes {
            return Ok(false);
        }

        let quorum = Self::quorum(env.clone(), proposal.snapshot)?;
        let participation = votes
            .for_votes
            .checked_add(votes.abstain_votes)
            .ok_or(GovernorError::ArithmeticOverflow)?;
        Ok(participation >= quorum)
    }
}
