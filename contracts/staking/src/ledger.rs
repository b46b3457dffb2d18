//! Ledger records and their storage.
//!
//! Instance storage holds the contract-wide `Config` and `GlobalAggregates`;
//! per-user records (liquidity, stake, locked-funds queue) live in persistent
//! storage under `(prefix, user)` tuple keys.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ContractError;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const AGGREGATES: Symbol = symbol_short!("AGGR");

const USER_LIQUIDITY: Symbol = symbol_short!("LIQ");
const USER_STAKE: Symbol = symbol_short!("STK");
const USER_LOCKED: Symbol = symbol_short!("LOCKED");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Records ──────────────────────────────────────────────────────────────────

/// A principal / realised-interest pair, both in canonical units.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Asset {
    pub principal: i128,
    pub compound_interest: i128,
}

impl Asset {
    pub fn composite(&self) -> Option<i128> {
        self.principal.checked_add(self.compound_interest)
    }

    /// Component-wise checked sum.
    pub fn checked_add(&self, other: &Asset) -> Option<Asset> {
        Some(Asset {
            principal: self.principal.checked_add(other.principal)?,
            compound_interest: self
                .compound_interest
                .checked_add(other.compound_interest)?,
        })
    }
}

/// Bound, actively accruing funds of one user.
///
/// `since_block` and `since_rate_index` anchor the next accrual: interest is
/// compounded over rate entries `since_rate_index..next_idx` starting no
/// earlier than `since_block`.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakePosition {
    pub asset: Asset,
    pub since_block: u64,
    pub since_rate_index: u64,
}

impl StakePosition {
    /// An empty position anchored at `block` / `rate_index`.
    pub fn reset(block: u64, rate_index: u64) -> Self {
        StakePosition {
            asset: Asset::default(),
            since_block: block,
            since_rate_index: rate_index,
        }
    }
}

/// Unbound principal plus its realised interest, withdrawable from
/// `liquid_since_block` on.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockedTranche {
    pub principal: i128,
    pub compound_interest: i128,
    pub liquid_since_block: u64,
}

/// A user's locked-funds queue flattened into parallel sequences, oldest
/// tranche first.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockedAssets {
    pub principal: Vec<i128>,
    pub compound_interest: Vec<i128>,
    pub liquid_since_block: Vec<u64>,
}

/// Contract-wide pool totals.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlobalAggregates {
    /// Sum of every deposit ever made. Never decreases.
    pub accrued_global_principal: i128,
    pub accrued_global_liquidity: Asset,
    pub accrued_global_locked: Asset,
    pub rewards_pool_balance: i128,
}

/// Deploy-time configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token contract holding deposits and the rewards pool.
    pub token: Address,
    pub lock_period_in_blocks: u64,
    /// Pausable operations fail once the current block reaches this value.
    pub paused_since_block: u64,
}

// ── Config / aggregates (instance storage) ───────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn config(env: &Env) -> Result<Config, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn aggregates(env: &Env) -> GlobalAggregates {
    env.storage()
        .instance()
        .get(&AGGREGATES)
        .unwrap_or_default()
}

pub fn set_aggregates(env: &Env, aggregates: &GlobalAggregates) {
    env.storage().instance().set(&AGGREGATES, aggregates);
}

// ── Per-user records (persistent storage) ────────────────────────────────────

fn user_key(prefix: Symbol, user: &Address) -> (Symbol, Address) {
    (prefix, user.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn liquidity(env: &Env, user: &Address) -> Asset {
    env.storage()
        .persistent()
        .get(&user_key(USER_LIQUIDITY, user))
        .unwrap_or_default()
}

pub fn set_liquidity(env: &Env, user: &Address, asset: &Asset) {
    let key = user_key(USER_LIQUIDITY, user);
    env.storage().persistent().set(&key, asset);
    extend_ttl(env, &key);
}

pub fn stake(env: &Env, user: &Address) -> StakePosition {
    env.storage()
        .persistent()
        .get(&user_key(USER_STAKE, user))
        .unwrap_or_default()
}

pub fn set_stake(env: &Env, user: &Address, position: &StakePosition) {
    let key = user_key(USER_STAKE, user);
    env.storage().persistent().set(&key, position);
    extend_ttl(env, &key);
}

pub fn locked_funds(env: &Env, user: &Address) -> Vec<LockedTranche> {
    env.storage()
        .persistent()
        .get(&user_key(USER_LOCKED, user))
        .unwrap_or(Vec::new(env))
}

/// Appends `tranche` to the back (newest end) of the user's queue.
pub fn push_locked_tranche(env: &Env, user: &Address, tranche: &LockedTranche) {
    let key = user_key(USER_LOCKED, user);
    let mut queue = locked_funds(env, user);
    queue.push_back(tranche.clone());
    env.storage().persistent().set(&key, &queue);
    extend_ttl(env, &key);
}

// ── Derived views ────────────────────────────────────────────────────────────

pub fn locked_assets(env: &Env, user: &Address) -> LockedAssets {
    let mut assets = LockedAssets {
        principal: Vec::new(env),
        compound_interest: Vec::new(env),
        liquid_since_block: Vec::new(env),
    };
    for tranche in locked_funds(env, user).iter() {
        assets.principal.push_back(tranche.principal);
        assets.compound_interest.push_back(tranche.compound_interest);
        assets.liquid_since_block.push_back(tranche.liquid_since_block);
    }
    assets
}

pub fn locked_aggregate(env: &Env, user: &Address) -> Result<Asset, ContractError> {
    let mut total = Asset::default();
    for tranche in locked_funds(env, user).iter() {
        total = total
            .checked_add(&Asset {
                principal: tranche.principal,
                compound_interest: tranche.compound_interest,
            })
            .ok_or(ContractError::ArithmeticOverflow)?;
    }
    Ok(total)
}
