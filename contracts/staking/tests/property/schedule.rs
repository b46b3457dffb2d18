#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the interest-rate schedule.
//!
//! Invariants tested:
//! - Appended indices are 0, 1, 2, … and the bounds track them
//! - Stored entries read back exactly as appended
//! - `since_block` is weakly increasing with the index
//! - Any effective block before the latest entry is rejected

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};
use staking::{ContractError, StakingContract, StakingContractClient};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token.address(), &0, &u64::MAX);

    (env, client, admin)
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Appending with non-decreasing effective blocks always succeeds and
    /// every entry reads back unchanged.
    #[test]
    fn prop_appends_are_indexed_in_order(
        steps in prop::collection::vec((0i128..1_000_000_000_000_000_000, 0u64..50), 1..12),
    ) {
        let (_env, client, admin) = setup();

        let mut effective_block = 0u64;
        let mut appended = Vec::new();
        for (expected_index, (rate, gap)) in steps.iter().enumerate() {
            effective_block += gap;
            let index = client.add_interest_rate(&admin, rate, &effective_block);
            prop_assert_eq!(index, expected_index as u64);
            appended.push((*rate, effective_block));
        }

        prop_assert_eq!(client.get_interest_rates_bounds(), (0, appended.len() as u64));

        let mut previous_block = 0u64;
        for (index, (rate, since_block)) in appended.iter().enumerate() {
            let entry = client.get_interest_rate(&(index as u64));
            prop_assert_eq!(entry.index, index as u64);
            prop_assert_eq!(entry.rate_per_block, *rate);
            prop_assert_eq!(entry.since_block, *since_block);
            prop_assert!(entry.since_block >= previous_block);
            previous_block = entry.since_block;
        }
    }

    /// An append dated before the latest entry fails and leaves the schedule alone.
    #[test]
    fn prop_out_of_order_append_is_rejected(
        latest in 1u64..10_000,
        back in 1u64..10_000,
    ) {
        let (_env, client, admin) = setup();
        client.add_interest_rate(&admin, &1, &latest);

        let earlier = latest.saturating_sub(back);
        let result = client.try_add_interest_rate(&admin, &1, &earlier);
        match result {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::InvalidScheduleOrder),
            _ => prop_assert!(false, "Expected InvalidScheduleOrder error"),
        }
        prop_assert_eq!(client.get_interest_rates_bounds(), (0, 1));
    }
}
