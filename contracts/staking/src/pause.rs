use common::access_control::{self, Role};
use soroban_sdk::{Address, Env};

use crate::{events, ledger, ContractError};

/// Boundary value that keeps the gate open forever.
pub const NEVER: u64 = u64::MAX;

/// The gate is closed from `paused_since_block` onwards.
pub fn is_active(paused_since_block: u64, current_block: u64) -> bool {
    current_block >= paused_since_block
}

pub fn paused_since_block(env: &Env) -> Result<u64, ContractError> {
    Ok(ledger::config(env)?.paused_since_block)
}

/// Fails with `Paused` once `current_block` has reached the pause boundary.
pub fn require_not_paused(env: &Env, current_block: u64) -> Result<(), ContractError> {
    if is_active(paused_since_block(env)?, current_block) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Moves the pause boundary. Requires `DefaultAdmin`; pass [`NEVER`] to
/// lift a pause.
pub fn set_paused_since_block(
    env: &Env,
    caller: &Address,
    block: u64,
) -> Result<(), ContractError> {
    if !access_control::has_role(env, Role::DefaultAdmin, caller) {
        return Err(ContractError::Unauthorized);
    }

    let mut config = ledger::config(env)?;
    config.paused_since_block = block;
    ledger::set_config(env, &config);

    events::publish_paused_since_block_set(env, caller.clone(), block);

    Ok(())
}
