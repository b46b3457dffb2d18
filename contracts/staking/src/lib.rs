#![no_std]

pub mod accrual;
pub mod events;
pub mod ledger;
pub mod operations;
pub mod pause;
pub mod schedule;

use common::access_control::{self, Role};
use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};

use ledger::{Asset, Config, GlobalAggregates, LockedAssets, LockedTranche, StakePosition};
use schedule::RateEntry;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientLiquidity = 5,
    IndexOutOfRange = 6,
    InvalidScheduleOrder = 7,
    Paused = 8,
    TransferFailed = 9,
    StakeNotFound = 10,
    ArithmeticOverflow = 11,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `admin`                 – receives `DefaultAdmin`.
    /// * `token`                 – SAC address of the staked token.
    /// * `lock_period_in_blocks` – blocks an unbound tranche stays locked.
    /// * `paused_since_block`    – pause boundary; `u64::MAX` never pauses.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        lock_period_in_blocks: u64,
        paused_since_block: u64,
    ) -> Result<(), ContractError> {
        if ledger::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        ledger::set_config(
            &env,
            &Config {
                token: token.clone(),
                lock_period_in_blocks,
                paused_since_block,
            },
        );
        ledger::set_aggregates(&env, &GlobalAggregates::default());
        schedule::init(&env);

        access_control::grant_role(&env, Role::DefaultAdmin, &admin);

        log!(&env, "Staking ledger initialized by admin: {}", admin);
        events::publish_initialized(
            &env,
            admin,
            token,
            lock_period_in_blocks,
            paused_since_block,
        );

        Ok(())
    }

    // ── Ledger operations ───────────────────────────────────────────────────

    /// Deposit `amount` tokens as liquidity. Pausable.
    pub fn deposit(env: Env, staker: Address, amount: i128) -> Result<Asset, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        operations::deposit(&env, &staker, amount, Self::current_block(&env))
    }

    /// Bind `amount` of liquidity into the caller's stake. Pausable.
    pub fn bind_stake(
        env: Env,
        staker: Address,
        amount: i128,
    ) -> Result<StakePosition, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        operations::bind_stake(&env, &staker, amount, Self::current_block(&env))
    }

    /// Move the caller's stake into the locked-funds queue. `index` must be 0.
    pub fn unbind_stake(
        env: Env,
        staker: Address,
        index: u64,
    ) -> Result<LockedTranche, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        operations::unbind_stake(&env, &staker, index, Self::current_block(&env))
    }

    /// Append a per-block rate effective from `effective_block`.
    ///
    /// Requires `DefaultAdmin` or `Delegate`.
    pub fn add_interest_rate(
        env: Env,
        caller: Address,
        rate_per_block: i128,
        effective_block: u64,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        operations::add_interest_rate(&env, &caller, rate_per_block, effective_block)
    }

    pub fn top_up_rewards_pool(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        operations::top_up_rewards_pool(&env, &caller, amount)
    }

    // ── Access control ──────────────────────────────────────────────────────

    /// Grant `role` to `account`. The caller must administer `role`.
    ///
    /// Granting a role the account already holds changes nothing.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, role.admin_role())?;

        if access_control::grant_role(&env, role, &account) {
            events::publish_role_granted(&env, role, account, caller);
        }
        Ok(())
    }

    /// Revoke `role` from `account`. The caller must administer `role`.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, role.admin_role())?;

        if access_control::revoke_role(&env, role, &account) {
            events::publish_role_revoked(&env, role, account, caller);
        }
        Ok(())
    }

    /// Drop a role the caller holds.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        if access_control::revoke_role(&env, role, &account) {
            events::publish_role_revoked(&env, role, account.clone(), account);
        }
        Ok(())
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        access_control::has_role(&env, role, &account)
    }

    pub fn get_role_members(env: Env, role: Role) -> Vec<Address> {
        access_control::members(&env, role)
    }

    // ── Pause gate ──────────────────────────────────────────────────────────

    /// Move the pause boundary. Requires `DefaultAdmin`.
    pub fn set_paused_since_block(
        env: Env,
        caller: Address,
        block: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        pause::set_paused_since_block(&env, &caller, block)
    }

    pub fn get_paused_since_block(env: Env) -> Result<u64, ContractError> {
        pause::paused_since_block(&env)
    }

    /// Whether pausable operations are rejected at the current ledger sequence.
    pub fn is_paused(env: Env) -> Result<bool, ContractError> {
        Ok(pause::is_active(
            pause::paused_since_block(&env)?,
            Self::current_block(&env),
        ))
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn get_stake_for_user(env: Env, user: Address) -> StakePosition {
        ledger::stake(&env, &user)
    }

    pub fn get_liquidity_for_user(env: Env, user: Address) -> Asset {
        ledger::liquidity(&env, &user)
    }

    /// The user's locked tranches as parallel sequences, oldest first.
    pub fn get_locked_assets_for_user(env: Env, user: Address) -> LockedAssets {
        ledger::locked_assets(&env, &user)
    }

    /// Sum of principal and interest over every locked tranche of `user`.
    pub fn get_locked_aggregate_for_user(env: Env, user: Address) -> Result<Asset, ContractError> {
        ledger::locked_aggregate(&env, &user)
    }

    pub fn get_number_of_locked_funds(env: Env, user: Address) -> u32 {
        ledger::locked_funds(&env, &user).len()
    }

    pub fn get_global_aggregates(env: Env) -> GlobalAggregates {
        ledger::aggregates(&env)
    }

    pub fn get_rewards_pool_balance(env: Env) -> i128 {
        ledger::aggregates(&env).rewards_pool_balance
    }

    pub fn get_interest_rate(env: Env, index: u64) -> Result<RateEntry, ContractError> {
        schedule::rate_at(&env, index)
    }

    /// Returns `(start_idx, next_idx)` of the rate schedule.
    pub fn get_interest_rates_bounds(env: Env) -> (u64, u64) {
        schedule::bounds(&env)
    }

    /// Interest the user's current stake would carry at `until_block`,
    /// given the rates scheduled so far.
    pub fn get_projected_interest(
        env: Env,
        user: Address,
        until_block: u64,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        operations::projected_interest(&env, &user, until_block)
    }

    /// Tokens held by the contract beyond deposits and the rewards pool.
    pub fn get_excess_funds(env: Env) -> Result<i128, ContractError> {
        operations::excess_funds(&env)
    }

    pub fn get_config(env: Env) -> Result<Config, ContractError> {
        ledger::config(&env)
    }

    pub fn get_lock_period(env: Env) -> Result<u64, ContractError> {
        Ok(ledger::config(&env)?.lock_period_in_blocks)
    }

    pub fn is_initialized(env: Env) -> bool {
        ledger::is_initialized(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !ledger::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` does not hold `role`.
    fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), ContractError> {
        if !access_control::has_role(env, role, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn current_block(env: &Env) -> u64 {
        u64::from(env.ledger().sequence())
    }
}

#[cfg(test)]
mod test_access_control;
