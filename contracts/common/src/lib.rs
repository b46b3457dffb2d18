//! Shared building blocks for the staking ledger contracts.
//!
//! This crate provides:
//! - [`access_control`]: role membership table (`DefaultAdmin`, `Delegate`)
//!   with grant / revoke bookkeeping and member tracking.
//! - [`fixed_point`]: exact 10^18-scaled floor multiplication and integer
//!   powers used by the compound-interest engine.

#![no_std]

#[cfg(test)]
extern crate std;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod access_control;
pub mod fixed_point;

pub use access_control::Role;
pub use fixed_point::SCALE;
