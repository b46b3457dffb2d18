#![allow(deprecated)] // events().publish migration tracked separately

use common::Role;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub lock_period_in_blocks: u64,
    pub paused_since_block: u64,
}

/// Fired when a user deposits liquidity.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquidityDepositedEvent {
    pub staker: Address,
    pub amount: i128,
}

/// Fired when liquidity is bound into stake. `compound_interest` is the
/// interest realised on the prior position at bind time.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindStakeEvent {
    pub staker: Address,
    pub principal: i128,
    pub compound_interest: i128,
}

/// Fired when a stake moves into the locked-funds queue.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnbindStakeEvent {
    pub staker: Address,
    pub liquid_since_block: u64,
    pub principal: i128,
    pub compound_interest: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewInterestRateEvent {
    pub index: u64,
    pub rate: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsPoolTokenTopUpEvent {
    pub amount: i128,
}

/// Fired when a role is granted or revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PausedSinceBlockSetEvent {
    pub block: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    lock_period_in_blocks: u64,
    paused_since_block: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            lock_period_in_blocks,
            paused_since_block,
        },
    );
}

pub fn publish_liquidity_deposited(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), staker.clone()),
        LiquidityDepositedEvent { staker, amount },
    );
}

pub fn publish_bind_stake(env: &Env, staker: Address, principal: i128, compound_interest: i128) {
    env.events().publish(
        (symbol_short!("BIND"), staker.clone()),
        BindStakeEvent {
            staker,
            principal,
            compound_interest,
        },
    );
}

pub fn publish_unbind_stake(
    env: &Env,
    staker: Address,
    liquid_since_block: u64,
    principal: i128,
    compound_interest: i128,
) {
    env.events().publish(
        (symbol_short!("UNBIND"), staker.clone()),
        UnbindStakeEvent {
            staker,
            liquid_since_block,
            principal,
            compound_interest,
        },
    );
}

pub fn publish_new_interest_rate(env: &Env, index: u64, rate: i128) {
    env.events().publish(
        (symbol_short!("NEW_RATE"),),
        NewInterestRateEvent { index, rate },
    );
}

pub fn publish_rewards_pool_top_up(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_TOPUP"),),
        RewardsPoolTokenTopUpEvent { amount },
    );
}

pub fn publish_role_granted(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRNT"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
        },
    );
}

pub fn publish_role_revoked(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_RVK"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
        },
    );
}

pub fn publish_paused_since_block_set(env: &Env, caller: Address, block: u64) {
    env.events().publish(
        (symbol_short!("PAUSE_SET"), caller),
        PausedSinceBlockSetEvent { block },
    );
}
