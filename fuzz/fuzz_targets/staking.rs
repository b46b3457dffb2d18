#![no_main]

use arbitrary::Arbitrary;
use common::SCALE;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};
use staking::{StakingContract, StakingContractClient};

const FUNDING: i128 = 1_000_000 * SCALE;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { units: u16 },
    Bind { units: u16 },
    Unbind { index: u8 },
    AddRate { basis_points: u16, delay: u8 },
    TopUp { units: u16 },
    Advance { blocks: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token.address(), &10, &u64::MAX);

    let minter = StellarAssetClient::new(&env, &token.address());
    let mut users = vec![admin.clone()];
    for _ in 0..3 {
        users.push(Address::generate(&env));
    }
    for user in &users {
        minter.mint(user, &FUNDING);
    }

    let mut deposited = 0i128;
    let mut block = 1u32;

    // Errors are expected (insufficient funds, bad indices, overflow); panics
    // and broken aggregates are not.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { units } => {
                let amount = i128::from(units) * SCALE;
                if client.try_deposit(caller, &amount).is_ok() {
                    deposited += amount;
                }
            }
            FuzzAction::Bind { units } => {
                let _ = client.try_bind_stake(caller, &(i128::from(units) * SCALE));
            }
            FuzzAction::Unbind { index } => {
                let _ = client.try_unbind_stake(caller, &u64::from(index));
            }
            FuzzAction::AddRate { basis_points, delay } => {
                let rate = i128::from(basis_points) * SCALE / 10_000;
                let effective = u64::from(block) + u64::from(delay);
                let _ = client.try_add_interest_rate(&admin, &rate, &effective);
            }
            FuzzAction::TopUp { units } => {
                let _ = client.try_top_up_rewards_pool(caller, &(i128::from(units) * SCALE));
            }
            FuzzAction::Advance { blocks } => {
                block = block.saturating_add(u32::from(blocks));
                env.ledger().set_sequence_number(block);
            }
        }

        let aggregates = client.get_global_aggregates();
        assert_eq!(aggregates.accrued_global_principal, deposited);

        let mut liquidity = 0i128;
        let mut locked_principal = 0i128;
        let mut locked_interest = 0i128;
        for user in &users {
            liquidity += client.get_liquidity_for_user(user).principal;
            let locked = client.get_locked_aggregate_for_user(user);
            locked_principal += locked.principal;
            locked_interest += locked.compound_interest;
        }
        assert_eq!(aggregates.accrued_global_liquidity.principal, liquidity);
        assert_eq!(aggregates.accrued_global_locked.principal, locked_principal);
        assert_eq!(aggregates.accrued_global_locked.compound_interest, locked_interest);
    }
});
