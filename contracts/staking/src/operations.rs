//! State transitions of the ledger.
//!
//! Every operation validates, then moves tokens, then writes. The entry points
//! in `lib.rs` handle authentication and supply `current_block`; nothing here
//! reads the ledger sequence itself, which keeps the transitions replayable
//! at any block height.

use common::access_control::{self, Role};
use soroban_sdk::{log, token, Address, Env};

use crate::{
    accrual, events,
    ledger::{self, Asset, LockedTranche, StakePosition},
    pause, schedule, ContractError,
};

/// Roles allowed to append to the interest-rate schedule.
pub const RATE_SETTERS: [Role; 2] = [Role::DefaultAdmin, Role::Delegate];

fn require_positive(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Pulls `amount` of the configured token from `from` into the contract.
fn pull_tokens(env: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
    let config = ledger::config(env)?;
    let client = token::Client::new(env, &config.token);
    match client.try_transfer(from, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Credits `amount` to the staker's liquidity after pulling it in.
///
/// Returns the staker's updated liquidity record.
pub fn deposit(
    env: &Env,
    staker: &Address,
    amount: i128,
    current_block: u64,
) -> Result<Asset, ContractError> {
    require_positive(amount)?;
    pause::require_not_paused(env, current_block)?;

    let mut liquidity = ledger::liquidity(env, staker);
    liquidity.principal = liquidity
        .principal
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let mut aggregates = ledger::aggregates(env);
    aggregates.accrued_global_liquidity.principal = aggregates
        .accrued_global_liquidity
        .principal
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    aggregates.accrued_global_principal = aggregates
        .accrued_global_principal
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    pull_tokens(env, staker, amount)?;

    ledger::set_liquidity(env, staker, &liquidity);
    ledger::set_aggregates(env, &aggregates);

    events::publish_liquidity_deposited(env, staker.clone(), amount);

    Ok(liquidity)
}

/// Moves `amount` of liquidity into the staker's position.
///
/// The existing position is compounded up to `current_block` first and the
/// result folded into its interest. The position then restarts accruing from
/// `current_block` with the enlarged principal, anchored at the rate in force.
pub fn bind_stake(
    env: &Env,
    staker: &Address,
    amount: i128,
    current_block: u64,
) -> Result<StakePosition, ContractError> {
    require_positive(amount)?;
    pause::require_not_paused(env, current_block)?;

    let mut liquidity = ledger::liquidity(env, staker);
    if liquidity.principal < amount {
        return Err(ContractError::InsufficientLiquidity);
    }

    let mut position = ledger::stake(env, staker);
    let realised = accrual::accrue(env, &position, current_block)?;

    position.asset.compound_interest = realised;
    position.asset.principal = position
        .asset
        .principal
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    position.since_block = current_block;
    position.since_rate_index = schedule::index_in_force(env, current_block)?;

    liquidity.principal -= amount;

    let mut aggregates = ledger::aggregates(env);
    aggregates.accrued_global_liquidity.principal = aggregates
        .accrued_global_liquidity
        .principal
        .checked_sub(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    ledger::set_liquidity(env, staker, &liquidity);
    ledger::set_stake(env, staker, &position);
    ledger::set_aggregates(env, &aggregates);

    log!(env, "bind {} at block {}, realised {}", amount, current_block, realised);
    events::publish_bind_stake(env, staker.clone(), amount, realised);

    Ok(position)
}

/// Releases the whole stake into the locked-funds queue.
///
/// Only sub-position `0` (the whole stake) exists. The tranche becomes
/// liquid `lock_period_in_blocks` after `current_block`.
pub fn unbind_stake(
    env: &Env,
    staker: &Address,
    index: u64,
    current_block: u64,
) -> Result<LockedTranche, ContractError> {
    if index != 0 {
        return Err(ContractError::IndexOutOfRange);
    }

    let position = ledger::stake(env, staker);
    if position.asset.principal == 0 {
        return Err(ContractError::StakeNotFound);
    }

    let config = ledger::config(env)?;
    let interest = accrual::accrue(env, &position, current_block)?;
    let liquid_since_block = current_block
        .checked_add(config.lock_period_in_blocks)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let tranche = LockedTranche {
        principal: position.asset.principal,
        compound_interest: interest,
        liquid_since_block,
    };

    let mut aggregates = ledger::aggregates(env);
    aggregates.accrued_global_locked = aggregates
        .accrued_global_locked
        .checked_add(&Asset {
            principal: tranche.principal,
            compound_interest: tranche.compound_interest,
        })
        .ok_or(ContractError::ArithmeticOverflow)?;

    ledger::push_locked_tranche(env, staker, &tranche);
    ledger::set_stake(
        env,
        staker,
        &StakePosition::reset(current_block, schedule::next_index(env)),
    );
    ledger::set_aggregates(env, &aggregates);

    log!(env, "unbind at block {}, interest {}", current_block, interest);
    events::publish_unbind_stake(
        env,
        staker.clone(),
        liquid_since_block,
        tranche.principal,
        tranche.compound_interest,
    );

    Ok(tranche)
}

/// Appends a rate to the schedule and returns its index.
///
/// Requires `DefaultAdmin` or `Delegate`.
pub fn add_interest_rate(
    env: &Env,
    caller: &Address,
    rate_per_block: i128,
    effective_block: u64,
) -> Result<u64, ContractError> {
    if !access_control::has_any_role(env, caller, &RATE_SETTERS) {
        return Err(ContractError::Unauthorized);
    }

    let entry = schedule::append(env, rate_per_block, effective_block)?;

    events::publish_new_interest_rate(env, entry.index, entry.rate_per_block);

    Ok(entry.index)
}

/// Adds `amount` to the rewards pool. Open to any caller.
///
/// Returns the new pool balance.
pub fn top_up_rewards_pool(
    env: &Env,
    caller: &Address,
    amount: i128,
) -> Result<i128, ContractError> {
    require_positive(amount)?;

    let mut aggregates = ledger::aggregates(env);
    aggregates.rewards_pool_balance = aggregates
        .rewards_pool_balance
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    pull_tokens(env, caller, amount)?;

    ledger::set_aggregates(env, &aggregates);

    log!(env, "rewards pool topped up by {} to {}", amount, aggregates.rewards_pool_balance);
    events::publish_rewards_pool_top_up(env, amount);

    Ok(aggregates.rewards_pool_balance)
}

/// Compound interest the user's stake would carry at `until_block`.
pub fn projected_interest(
    env: &Env,
    user: &Address,
    until_block: u64,
) -> Result<i128, ContractError> {
    accrual::accrue(env, &ledger::stake(env, user), until_block)
}

/// Token balance the ledger does not account for: the contract's holding
/// minus every deposit and the rewards pool.
pub fn excess_funds(env: &Env) -> Result<i128, ContractError> {
    let config = ledger::config(env)?;
    let held = token::Client::new(env, &config.token).balance(&env.current_contract_address());
    let aggregates = ledger::aggregates(env);
    aggregates
        .accrued_global_principal
        .checked_add(aggregates.rewards_pool_balance)
        .and_then(|accounted| held.checked_sub(accounted))
        .ok_or(ContractError::ArithmeticOverflow)
}
