//! Compound-interest accrual over the rate schedule.
//!
//! [`compound`] is pure: given a position and the schedule entries from its
//! anchor index onwards it returns the position's compound interest at
//! `until_block`, bit-for-bit reproducibly. [`accrue`] loads those entries
//! from storage and delegates.

use common::fixed_point;
use soroban_sdk::Env;

use crate::{ledger::StakePosition, schedule, schedule::RateEntry, ContractError};

/// Compound interest carried by `position` at `until_block`.
///
/// `entries` must be the schedule entries `position.since_rate_index..next_idx`
/// in index order. Each entry contributes the blocks between
/// `max(position.since_block, entry.since_block)` and the next entry's
/// `since_block` (or `until_block` for the newest entry, and never past
/// `until_block`); empty segments are skipped. Over a segment of `n` blocks the
/// composite `principal + compound_interest` is multiplied by
/// `(1 + rate)^n`, each multiply floored at 10^18 scale.
///
/// # Errors
/// - `InvalidInput` if an entry carries a negative rate.
/// - `ArithmeticOverflow` if the composite no longer fits in `i128`.
pub fn compound<I>(
    position: &StakePosition,
    entries: I,
    until_block: u64,
) -> Result<i128, ContractError>
where
    I: IntoIterator<Item = RateEntry>,
{
    let principal = position.asset.principal;
    if principal == 0 {
        return Ok(0);
    }

    let mut composite = position
        .asset
        .composite()
        .ok_or(ContractError::ArithmeticOverflow)?;

    let mut entries = entries.into_iter().peekable();
    while let Some(entry) = entries.next() {
        if entry.rate_per_block < 0 {
            return Err(ContractError::InvalidInput);
        }

        let seg_start = position.since_block.max(entry.since_block);
        let seg_end = match entries.peek() {
            Some(next) => until_block.min(next.since_block),
            None => until_block,
        };
        if seg_end <= seg_start {
            continue;
        }

        let multiplier = fixed_point::growth_factor(entry.rate_per_block)
            .and_then(|factor| fixed_point::pow_floor(factor, seg_end - seg_start))
            .ok_or(ContractError::ArithmeticOverflow)?;
        composite = fixed_point::mul_floor(composite, multiplier)
            .ok_or(ContractError::ArithmeticOverflow)?;
    }

    composite
        .checked_sub(principal)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// [`compound`] against the stored schedule.
///
/// Zero-principal positions short-circuit without touching the schedule.
pub fn accrue(env: &Env, position: &StakePosition, until_block: u64) -> Result<i128, ContractError> {
    if position.asset.principal == 0 {
        return Ok(0);
    }
    let entries = schedule::entries_from(env, position.since_rate_index)?;
    compound(position, entries, until_block)
}
