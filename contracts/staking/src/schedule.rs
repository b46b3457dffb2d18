//! Append-only interest-rate schedule.
//!
//! Entries occupy indices `start_idx..next_idx`. Each entry's rate applies
//! from its `since_block` until the next entry's `since_block`; the newest
//! entry stays open-ended. `since_block` never decreases with the index.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const RATE_START: Symbol = symbol_short!("RATE_STR");
const RATE_NEXT: Symbol = symbol_short!("RATE_NXT");
const RATE_ENTRY: Symbol = symbol_short!("RATE");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// One schedule entry. Immutable once appended.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateEntry {
    pub index: u64,
    /// Per-block rate in canonical units (10^18 == 100 % per block).
    pub rate_per_block: i128,
    pub since_block: u64,
}

fn entry_key(index: u64) -> (Symbol, u64) {
    (RATE_ENTRY, index)
}

/// Starts an empty schedule at index 0.
pub fn init(env: &Env) {
    env.storage().instance().set(&RATE_START, &0u64);
    env.storage().instance().set(&RATE_NEXT, &0u64);
}

/// Returns `(start_idx, next_idx)`.
pub fn bounds(env: &Env) -> (u64, u64) {
    let start: u64 = env.storage().instance().get(&RATE_START).unwrap_or(0);
    let next: u64 = env.storage().instance().get(&RATE_NEXT).unwrap_or(0);
    (start, next)
}

pub fn next_index(env: &Env) -> u64 {
    env.storage().instance().get(&RATE_NEXT).unwrap_or(0)
}

/// Looks up the entry at `index`.
///
/// # Errors
/// `IndexOutOfRange` unless `start_idx <= index < next_idx`.
pub fn rate_at(env: &Env, index: u64) -> Result<RateEntry, ContractError> {
    let (start, next) = bounds(env);
    if index < start || index >= next {
        return Err(ContractError::IndexOutOfRange);
    }
    let key = entry_key(index);
    let entry: RateEntry = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::IndexOutOfRange)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(entry)
}

/// The most recently appended entry, if any.
pub fn latest(env: &Env) -> Option<RateEntry> {
    let (start, next) = bounds(env);
    if next == start {
        return None;
    }
    rate_at(env, next - 1).ok()
}

/// Index of the entry in force at `block`: the newest entry with
/// `since_block <= block`, or `start_idx` when every entry lies in the future
/// (or the schedule is empty).
///
/// Anchoring a position here lets the accrual walk pick up the rate already
/// in force as well as every later entry.
pub fn index_in_force(env: &Env, block: u64) -> Result<u64, ContractError> {
    let (start, next) = bounds(env);
    let mut index = next;
    while index > start {
        if rate_at(env, index - 1)?.since_block <= block {
            return Ok(index - 1);
        }
        index -= 1;
    }
    Ok(start)
}

/// Appends a rate effective from `effective_block` and returns the stored
/// entry. Authorization is the caller's responsibility.
///
/// # Errors
/// - `InvalidInput` for a negative rate.
/// - `InvalidScheduleOrder` if `effective_block` precedes the latest entry.
pub fn append(
    env: &Env,
    rate_per_block: i128,
    effective_block: u64,
) -> Result<RateEntry, ContractError> {
    if rate_per_block < 0 {
        return Err(ContractError::InvalidInput);
    }
    if let Some(last) = latest(env) {
        if effective_block < last.since_block {
            return Err(ContractError::InvalidScheduleOrder);
        }
    }

    let index = next_index(env);
    let entry = RateEntry {
        index,
        rate_per_block,
        since_block: effective_block,
    };
    let key = entry_key(index);
    env.storage().persistent().set(&key, &entry);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let next = index.checked_add(1).ok_or(ContractError::ArithmeticOverflow)?;
    env.storage().instance().set(&RATE_NEXT, &next);

    Ok(entry)
}

/// Entries `from..next_idx` in index order: the segment list an accrual
/// anchored at rate index `from` has to walk.
///
/// # Errors
/// `IndexOutOfRange` if `from` lies outside `start_idx..=next_idx`.
pub fn entries_from(env: &Env, from: u64) -> Result<Vec<RateEntry>, ContractError> {
    let (start, next) = bounds(env);
    if from < start || from > next {
        return Err(ContractError::IndexOutOfRange);
    }
    let mut entries = Vec::new(env);
    for index in from..next {
        entries.push_back(rate_at(env, index)?);
    }
    Ok(entries)
}
