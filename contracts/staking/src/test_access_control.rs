extern crate std;

use common::{Role, SCALE};
use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{ContractError, StakingContract, StakingContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token.address(), &10, &u64::MAX);

    (env, client, admin)
}

// ── Bootstrap ────────────────────────────────────────────────────────────────

#[test]
fn test_initializer_holds_default_admin() {
    let (_env, client, admin) = setup();
    assert!(client.has_role(&Role::DefaultAdmin, &admin));
    assert!(!client.has_role(&Role::Delegate, &admin));

    let admins = client.get_role_members(&Role::DefaultAdmin);
    assert_eq!(admins.len(), 1);
    assert_eq!(admins.get(0), Some(admin));
}

// ── DefaultAdmin administers every role ──────────────────────────────────────

#[test]
fn test_admin_grants_delegate() {
    let (env, client, admin) = setup();
    let target = Address::generate(&env);

    client.grant_role(&admin, &Role::Delegate, &target);
    assert!(client.has_role(&Role::Delegate, &target));
    assert_eq!(client.get_role_members(&Role::Delegate).len(), 1);
}

#[test]
fn test_admin_grants_another_admin() {
    let (env, client, admin) = setup();
    let target = Address::generate(&env);

    client.grant_role(&admin, &Role::DefaultAdmin, &target);
    assert!(client.has_role(&Role::DefaultAdmin, &target));

    // The new admin can administer roles too.
    let delegate = Address::generate(&env);
    client.grant_role(&target, &Role::Delegate, &delegate);
    assert!(client.has_role(&Role::Delegate, &delegate));
}

#[test]
fn test_duplicate_grant_is_noop() {
    let (env, client, admin) = setup();
    let target = Address::generate(&env);

    client.grant_role(&admin, &Role::Delegate, &target);
    client.grant_role(&admin, &Role::Delegate, &target);
    assert_eq!(client.get_role_members(&Role::Delegate).len(), 1);
}

#[test]
fn test_admin_revokes_delegate() {
    let (env, client, admin) = setup();
    let target = Address::generate(&env);

    client.grant_role(&admin, &Role::Delegate, &target);
    client.revoke_role(&admin, &Role::Delegate, &target);
    assert!(!client.has_role(&Role::Delegate, &target));
    assert_eq!(client.get_role_members(&Role::Delegate).len(), 0);

    // Revoking again changes nothing.
    client.revoke_role(&admin, &Role::Delegate, &target);
    assert!(!client.has_role(&Role::Delegate, &target));
}

// ── Delegates and strangers cannot manage roles ──────────────────────────────

#[test]
fn test_delegate_cannot_grant() {
    let (env, client, admin) = setup();
    let delegate = Address::generate(&env);
    let target = Address::generate(&env);
    client.grant_role(&admin, &Role::Delegate, &delegate);

    let result = client.try_grant_role(&delegate, &Role::Delegate, &target);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert!(!client.has_role(&Role::Delegate, &target));
}

#[test]
fn test_stranger_cannot_revoke_admin() {
    let (env, client, admin) = setup();
    let stranger = Address::generate(&env);

    let result = client.try_revoke_role(&stranger, &Role::DefaultAdmin, &admin);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert!(client.has_role(&Role::DefaultAdmin, &admin));
}

// ── Renounce ─────────────────────────────────────────────────────────────────

#[test]
fn test_renounced_delegate_loses_rate_access() {
    let (env, client, admin) = setup();
    let delegate = Address::generate(&env);
    client.grant_role(&admin, &Role::Delegate, &delegate);
    client.add_interest_rate(&delegate, &SCALE, &100);

    client.renounce_role(&delegate, &Role::Delegate);
    assert!(!client.has_role(&Role::Delegate, &delegate));

    let result = client.try_add_interest_rate(&delegate, &SCALE, &101);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
}

#[test]
fn test_admin_renouncing_loses_admin_powers() {
    let (env, client, admin) = setup();
    client.renounce_role(&admin, &Role::DefaultAdmin);
    assert!(!client.has_role(&Role::DefaultAdmin, &admin));

    let target = Address::generate(&env);
    let result = client.try_grant_role(&admin, &Role::Delegate, &target);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);

    let result = client.try_set_paused_since_block(&admin, &0);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
}

// ── Delegates cannot pause ───────────────────────────────────────────────────

#[test]
fn test_delegate_cannot_move_pause_boundary() {
    let (env, client, admin) = setup();
    let delegate = Address::generate(&env);
    client.grant_role(&admin, &Role::Delegate, &delegate);

    let result = client.try_set_paused_since_block(&delegate, &0);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert!(!client.is_paused());
}
