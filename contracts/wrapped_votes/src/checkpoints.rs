//! Append-only checkpoint histories with point-in-time lookup.
//!
//! Each [`Trace`] is stored as a count plus one entry per position so the
//! latest value is a single read and historical lookups are a binary search
//! over storage. Entries are ordered by ledger; writes within the ledger of
//! the last entry overwrite it in place.

use soroban_sdk::Env;

use crate::error::WrappedVotesError;
use crate::storage;
use crate::types::{Checkpoint, Trace};

/// Latest recorded value of a trace, or zero if it was never written
pub fn latest(env: &Env, trace: &Trace) -> i128 {
    let count = storage::get_checkpoint_count(env, trace);
    if count == 0 {
        return 0;
    }
    storage::get_checkpoint(env, trace, count - 1)
        .map(|checkpoint| checkpoint.votes)
        .unwrap_or(0)
}

/// Value of a trace as of the end of `ledger`
pub fn upper_lookup(env: &Env, trace: &Trace, ledger: u32) -> i128 {
    let count = storage::get_checkpoint_count(env, trace);
    if count == 0 {
        return 0;
    }

    // Recent snapshots are the common case
    if let Some(last) = storage::get_checkpoint(env, trace, count - 1) {
        if last.ledger <= ledger {
            return last.votes;
        }
    }

    // First position whose ledger is past the query
    let mut low = 0u32;
    let mut high = count - 1;
    while low < high {
        let mid = low + (high - low) / 2;
        match storage::get_checkpoint(env, trace, mid) {
            Some(checkpoint) if checkpoint.ledger > ledger => high = mid,
            _ => low = mid + 1,
        }
    }

    if high == 0 {
        return 0;
    }
    storage::get_checkpoint(env, trace, high - 1)
        .map(|checkpoint| checkpoint.votes)
        .unwrap_or(0)
}

/// Apply `delta` to the latest value of a trace at the current ledger.
///
/// Returns the previous and new values.
pub fn push_delta(
    env: &Env,
    trace: &Trace,
    delta: i128,
) -> Result<(i128, i128), WrappedVotesError> {
    let ledger = env.ledger().sequence();
    let count = storage::get_checkpoint_count(env, trace);
    let last = if count == 0 {
        None
    } else {
        storage::get_checkpoint(env, trace, count - 1)
    };

    let previous = last.as_ref().map(|c| c.votes).unwrap_or(0);
    let updated = previous
        .checked_add(delta)
        .ok_or(WrappedVotesError::ArithmeticOverflow)?;
    if updated < 0 {
        return Err(WrappedVotesError::ArithmeticOverflow);
    }

    let checkpoint = Checkpoint {
        ledger,
        votes: updated,
    };
    match last {
        Some(last) if last.ledger == ledger => {
            storage::set_checkpoint(env, trace, count - 1, &checkpoint);
        }
        _ => {
            storage::set_checkpoint(env, trace, count, &checkpoint);
            storage::set_checkpoint_count(env, trace, count + 1);
        }
    }

    Ok((previous, updated))
}
