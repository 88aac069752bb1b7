#![no_std]

//! # Wrapped Votes
//!
//! A Soroban token that locks an underlying asset 1:1 and carries historical
//! voting power for on-chain governance.
//!
//! ## Features
//! - Wrap/unwrap against any contract implementing the token interface
//! - Standard balance, allowance and transfer semantics
//! - Delegation: voting power follows the delegate, not the holder
//! - Per-delegate and total-supply checkpoints with historical lookup
//! - Signature-based approvals bound to this contract and network
//! - Owner-gated code upgrades (ownership is handed to the timelock)
//!
//! ## Invariants
//! - `total_supply == sum(balances) == underlying balance held by the wrapper`
//! - `get_votes(d) == sum(balance(a))` over every `a` delegating to `d`
//! - Checkpoint histories are strictly increasing by ledger; same-ledger
//!   writes coalesce into the last entry

use ed25519_dalek::{Signature, VerifyingKey};
use soroban_sdk::{
    contract, contractimpl, token, xdr::ToXdr, Address, Bytes, BytesN, Env, String,
};

mod checkpoints;
mod error;
mod events;
mod storage;
mod types;

pub use error::WrappedVotesError;
pub use types::{Checkpoint, PermitDomain, PermitMessage, TokenMetadata, Trace};

/// Version string bound into the permit domain
pub const PERMIT_VERSION: &str = "1";

/// Allowance that is never decremented by `transfer_from`
pub const UNLIMITED_ALLOWANCE: i128 = i128::MAX;

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct WrappedVotes;

#[contractimpl]
impl WrappedVotes {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Initialize the wrapper over an underlying asset
    ///
    /// # Arguments
    /// * `owner` - Address allowed to upgrade the contract
    /// * `underlying` - Token contract whose units get locked
    /// * `name` - Display name of the wrapped token
    /// * `symbol` - Ticker of the wrapped token
    ///
    /// # Errors
    /// * `AlreadyInitialized` - Contract has already been initialized
    /// * `InvalidUnderlying` - `underlying` is this contract
    pub fn initialize(
        env: Env,
        owner: Address,
        underlying: Address,
        name: String,
        symbol: String,
    ) -> Result<(), WrappedVotesError> {
        if storage::is_initialized(&env) {
            return Err(WrappedVotesError::AlreadyInitialized);
        }
        if underlying == env.current_contract_address() {
            return Err(WrappedVotesError::InvalidUnderlying);
        }

        owner.require_auth();

        let decimals = token::TokenClient::new(&env, &underlying).decimals();
        storage::set_metadata(
            &env,
            &TokenMetadata {
                name,
                symbol,
                decimals,
            },
        );
        storage::set_underlying(&env, &underlying);
        storage::set_owner(&env, &Some(owner.clone()));

        events::emit_initialized(&env, &owner, &underlying);
        Ok(())
    }

    // ========================================================================
    // Wrapping
    // ========================================================================

    /// Lock `amount` of the underlying asset and credit `recipient`
    ///
    /// The wrapper pulls the funds with `transfer_from`, so `from` must have
    /// approved this contract on the underlying asset beforehand.
    ///
    /// # Errors
    /// * `InvalidAmount` - Amount is negative
    /// * `TransferFailed` - Underlying allowance or balance is insufficient
    pub fn wrap(
        env: Env,
        from: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), WrappedVotesError> {
        from.require_auth();
        Self::check_amount(amount)?;
        let underlying = storage::get_underlying(&env)?;

        if amount > 0 {
            let this = env.current_contract_address();
            let client = token::TokenClient::new(&env, &underlying);
            match client.try_transfer_from(&this, &from, &this, &amount) {
                Ok(Ok(())) => {}
                _ => return Err(WrappedVotesError::TransferFailed),
            }

            Self::update(&env, None, Some(&recipient), amount)?;
        }

        events::emit_wrapped(&env, &from, &recipient, amount);
        Ok(())
    }

    /// Burn `amount` of `from`'s wrapped balance and release the underlying
    /// asset to `recipient`
    ///
    /// # Errors
    /// * `InvalidAmount` - Amount is negative
    /// * `InsufficientBalance` - `from` holds less than `amount`
    /// * `TransferFailed` - Underlying asset refused the payout
    pub fn unwrap(
        env: Env,
        from: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), WrappedVotesError> {
        from.require_auth();
        Self::check_amount(amount)?;
        let underlying = storage::get_underlying(&env)?;

        if amount > 0 {
            // Burn before paying out
            Self::update(&env, Some(&from), None, amount)?;

            let this = env.current_contract_address();
            let client = token::TokenClient::new(&env, &underlying);
            match client.try_transfer(&this, &recipient, &amount) {
                Ok(Ok(())) => {}
                _ => return Err(WrappedVotesError::TransferFailed),
            }
        }

        events::emit_unwrapped(&env, &from, &recipient, amount);
        Ok(())
    }

    // ========================================================================
    // Token Interface
    // ========================================================================

    /// Set the allowance of `spender` over `owner`'s balance
    pub fn approve(
        env: Env,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), WrappedVotesError> {
        owner.require_auth();
        Self::check_amount(amount)?;
        storage::get_underlying(&env)?;

        storage::set_allowance(&env, &owner, &spender, amount);
        events::emit_approval(&env, &owner, &spender, amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to`
    ///
    /// # Errors
    /// * `InvalidAmount` - Amount is negative
    /// * `InsufficientBalance` - `from` holds less than `amount`
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), WrappedVotesError> {
        from.require_auth();
        Self::check_amount(amount)?;
        storage::get_underlying(&env)?;

        Self::update(&env, Some(&from), Some(&to), amount)
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`
    ///
    /// # Errors
    /// * `InvalidAmount` - Amount is negative
    /// * `InsufficientAllowance` - `spender` is not allowed to move `amount`
    /// * `InsufficientBalance` - `from` holds less than `amount`
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), WrappedVotesError> {
        spender.require_auth();
        Self::check_amount(amount)?;
        storage::get_underlying(&env)?;

        let allowance = storage::get_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(WrappedVotesError::InsufficientAllowance);
        }
        if allowance != UNLIMITED_ALLOWANCE {
            storage::set_allowance(&env, &from, &spender, allowance - amount);
        }

        Self::update(&env, Some(&from), Some(&to), amount)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::get_balance(&env, &id)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        storage::get_allowance(&env, &owner, &spender)
    }

    pub fn total_supply(env: Env) -> i128 {
        checkpoints::latest(&env, &Trace::Supply)
    }

    pub fn name(env: Env) -> Result<String, WrappedVotesError> {
        Ok(storage::get_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, WrappedVotesError> {
        Ok(storage::get_metadata(&env)?.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, WrappedVotesError> {
        Ok(storage::get_metadata(&env)?.decimals)
    }

    pub fn underlying(env: Env) -> Result<Address, WrappedVotesError> {
        storage::get_underlying(&env)
    }

    // ========================================================================
    // Delegation & Voting Power
    // ========================================================================

    /// Point `delegator`'s voting power at `delegatee`
    ///
    /// The whole current balance moves from the previous delegate to the new
    /// one in a single step. `None` withdraws the power entirely.
    pub fn delegate(
        env: Env,
        delegator: Address,
        delegatee: Option<Address>,
    ) -> Result<(), WrappedVotesError> {
        delegator.require_auth();
        storage::get_underlying(&env)?;

        let previous = storage::get_delegate(&env, &delegator);
        storage::set_delegate(&env, &delegator, &delegatee);
        events::emit_delegate_changed(&env, &delegator, previous.clone(), delegatee.clone());

        let balance = storage::get_balance(&env, &delegator);
        Self::move_voting_power(&env, previous.as_ref(), delegatee.as_ref(), balance)
    }

    pub fn delegates(env: Env, account: Address) -> Option<Address> {
        storage::get_delegate(&env, &account)
    }

    /// Current voting power delegated to `account`
    pub fn get_votes(env: Env, account: Address) -> i128 {
        checkpoints::latest(&env, &Trace::Account(account))
    }

    /// Voting power delegated to `account` at the end of `ledger`
    ///
    /// # Errors
    /// * `FutureLookup` - `ledger` is the current ledger or later
    pub fn get_past_votes(
        env: Env,
        account: Address,
        ledger: u32,
    ) -> Result<i128, WrappedVotesError> {
        Self::check_past(&env, ledger)?;
        Ok(checkpoints::upper_lookup(&env, &Trace::Account(account), ledger))
    }

    /// Wrapped supply at the end of `ledger`
    ///
    /// # Errors
    /// * `FutureLookup` - `ledger` is the current ledger or later
    pub fn get_past_total_supply(env: Env, ledger: u32) -> Result<i128, WrappedVotesError> {
        Self::check_past(&env, ledger)?;
        Ok(checkpoints::upper_lookup(&env, &Trace::Supply, ledger))
    }

    pub fn num_checkpoints(env: Env, account: Address) -> u32 {
        storage::get_checkpoint_count(&env, &Trace::Account(account))
    }

    pub fn checkpoint(
        env: Env,
        account: Address,
        index: u32,
    ) -> Result<Checkpoint, WrappedVotesError> {
        storage::get_checkpoint(&env, &Trace::Account(account), index)
            .ok_or(WrappedVotesError::CheckpointNotFound)
    }

    /// Ledger sequence used as the clock for all checkpoints
    pub fn clock(env: Env) -> u32 {
        env.ledger().sequence()
    }

    // ========================================================================
    // Signature-Based Approval
    // ========================================================================

    /// Register the ed25519 key that signs permits for `owner`
    pub fn set_permit_key(
        env: Env,
        owner: Address,
        public_key: BytesN<32>,
    ) -> Result<(), WrappedVotesError> {
        owner.require_auth();
        storage::get_underlying(&env)?;

        storage::set_permit_key(&env, &owner, &public_key);
        events::emit_permit_key_set(&env, &owner, &public_key);
        Ok(())
    }

    pub fn permit_key(env: Env, owner: Address) -> Option<BytesN<32>> {
        storage::get_permit_key(&env, &owner)
    }

    pub fn nonces(env: Env, owner: Address) -> u64 {
        storage::get_nonce(&env, &owner)
    }

    /// Hash of the domain every permit signature is bound to
    pub fn domain_separator(env: Env) -> Result<BytesN<32>, WrappedVotesError> {
        let metadata = storage::get_metadata(&env)?;
        let domain = PermitDomain {
            name: metadata.name,
            version: String::from_str(&env, PERMIT_VERSION),
            network_id: env.ledger().network_id(),
            verifying_contract: env.current_contract_address(),
        };
        Ok(env.crypto().sha256(&domain.to_xdr(&env)).to_bytes())
    }

    /// Digest an owner signs to approve `spender` for `value`
    pub fn permit_digest(
        env: Env,
        owner: Address,
        spender: Address,
        value: i128,
        nonce: u64,
        deadline: u64,
    ) -> Result<BytesN<32>, WrappedVotesError> {
        let domain = Self::domain_separator(env.clone())?;
        let message = PermitMessage {
            owner,
            spender,
            value,
            nonce,
            deadline,
        };

        let mut payload = Bytes::from_array(&env, &domain.to_array());
        payload.append(&message.to_xdr(&env));
        Ok(env.crypto().sha256(&payload).to_bytes())
    }

    /// Approve `spender` using a signature made off-chain by `owner`'s key
    ///
    /// Consumes the owner's current nonce.
    ///
    /// # Errors
    /// * `InvalidAmount` - Value is negative
    /// * `ExpiredDeadline` - Ledger time is past `deadline`
    /// * `InvalidSignature` - `owner` has no registered permit key, or the
    ///   signature does not verify against it
    pub fn permit(
        env: Env,
        owner: Address,
        spender: Address,
        value: i128,
        deadline: u64,
        signature: BytesN<64>,
    ) -> Result<(), WrappedVotesError> {
        Self::check_amount(value)?;
        if env.ledger().timestamp() > deadline {
            return Err(WrappedVotesError::ExpiredDeadline);
        }

        let public_key =
            storage::get_permit_key(&env, &owner).ok_or(WrappedVotesError::InvalidSignature)?;
        let nonce = storage::get_nonce(&env, &owner);
        let digest = Self::permit_digest(
            env.clone(),
            owner.clone(),
            spender.clone(),
            value,
            nonce,
            deadline,
        )?;

        Self::verify_signature(&public_key, &digest, &signature)?;

        let next = nonce
            .checked_add(1)
            .ok_or(WrappedVotesError::ArithmeticOverflow)?;
        storage::set_nonce(&env, &owner, next);
        storage::set_allowance(&env, &owner, &spender, value);

        events::emit_approval(&env, &owner, &spender, value);
        Ok(())
    }

    // ========================================================================
    // Ownership
    // ========================================================================

    pub fn owner(env: Env) -> Option<Address> {
        storage::get_owner(&env)
    }

    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), WrappedVotesError> {
        let previous = Self::require_owner(&env)?;
        storage::set_owner(&env, &Some(new_owner.clone()));
        events::emit_ownership_transferred(&env, Some(previous), Some(new_owner));
        Ok(())
    }

    /// Drop the owner for good; upgrades become impossible afterwards
    pub fn renounce_ownership(env: Env) -> Result<(), WrappedVotesError> {
        let previous = Self::require_owner(&env)?;
        storage::set_owner(&env, &None);
        events::emit_ownership_transferred(&env, Some(previous), None);
        Ok(())
    }

    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), WrappedVotesError> {
        Self::require_owner(&env)?;
        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }
}

// ============================================================================
// Internal Helpers
// ============================================================================

impl WrappedVotes {
    fn check_amount(amount: i128) -> Result<(), WrappedVotesError> {
        if amount < 0 {
            return Err(WrappedVotesError::InvalidAmount);
        }
        Ok(())
    }

    fn check_past(env: &Env, ledger: u32) -> Result<(), WrappedVotesError> {
        if ledger >= env.ledger().sequence() {
            return Err(WrappedVotesError::FutureLookup);
        }
        Ok(())
    }

    fn verify_signature(
        public_key: &BytesN<32>,
        digest: &BytesN<32>,
        signature: &BytesN<64>,
    ) -> Result<(), WrappedVotesError> {
        let key = VerifyingKey::from_bytes(&public_key.to_array())
            .map_err(|_| WrappedVotesError::InvalidSignature)?;
        let signature = Signature::from_bytes(&signature.to_array());
        key.verify_strict(&digest.to_array(), &signature)
            .map_err(|_| WrappedVotesError::InvalidSignature)
    }

    fn require_owner(env: &Env) -> Result<Address, WrappedVotesError> {
        let owner = storage::get_owner(env).ok_or(WrappedVotesError::Unauthorized)?;
        owner.require_auth();
        Ok(owner)
    }

    /// Move balance between accounts; `None` on either side mints or burns
    /// against the total supply. Voting power follows the delegates of both
    /// sides.
    fn update(
        env: &Env,
        from: Option<&Address>,
        to: Option<&Address>,
        amount: i128,
    ) -> Result<(), WrappedVotesError> {
        match from {
            Some(from) => {
                let balance = storage::get_balance(env, from);
                if balance < amount {
                    return Err(WrappedVotesError::InsufficientBalance);
                }
                storage::set_balance(env, from, balance - amount);
            }
            None => {
                checkpoints::push_delta(env, &Trace::Supply, amount)?;
            }
        }

        match to {
            Some(to) => {
                let balance = storage::get_balance(env, to)
                    .checked_add(amount)
                    .ok_or(WrappedVotesError::ArithmeticOverflow)?;
                storage::set_balance(env, to, balance);
            }
            None => {
                checkpoints::push_delta(env, &Trace::Supply, -amount)?;
            }
        }

        let from_delegate = from.and_then(|account| storage::get_delegate(env, account));
        let to_delegate = to.and_then(|account| storage::get_delegate(env, account));
        Self::move_voting_power(env, from_delegate.as_ref(), to_delegate.as_ref(), amount)?;

        events::emit_transfer(env, from.cloned(), to.cloned(), amount);
        Ok(())
    }

    fn move_voting_power(
        env: &Env,
        src: Option<&Address>,
        dst: Option<&Address>,
        amount: i128,
    ) -> Result<(), WrappedVotesError> {
        if src == dst || amount == 0 {
            return Ok(());
        }

        if let Some(src) = src {
            let (previous, new) =
                checkpoints::push_delta(env, &Trace::Account(src.clone()), -amount)?;
            events::emit_delegate_votes_changed(env, src, previous, new);
        }
        if let Some(dst) = dst {
            let (previous, new) =
                checkpoints::push_delta(env, &Trace::Account(dst.clone()), amount)?;
            events::emit_delegate_votes_changed(env, dst, previous, new);
        }
        Ok(())
    }
}
