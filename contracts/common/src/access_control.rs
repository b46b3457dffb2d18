use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const ROLE_MEMBERS: Symbol = symbol_short!("ROLE_MBR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Roles recognised by the staking ledger.
///
/// - `DefaultAdmin` – Administers every role (including itself), moves the
///                    pause boundary and may append interest rates.
/// - `Delegate`     – May append interest rates; cannot manage roles.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    DefaultAdmin = 0,
    Delegate = 1,
}

impl Role {
    /// The role whose holders may grant and revoke `self`.
    pub fn admin_role(&self) -> Role {
        match self {
            Role::DefaultAdmin | Role::Delegate => Role::DefaultAdmin,
        }
    }
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn members_key(role: Role) -> (Symbol, Role) {
    (ROLE_MEMBERS, role)
}

fn extend_ttl(env: &Env, key: &(Symbol, Role, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns true if `account` currently holds `role`.
pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let held = env.storage().persistent().has(&key);
    if held {
        extend_ttl(env, &key);
    }
    held
}

/// Returns true if `account` holds at least one of `roles`.
pub fn has_any_role(env: &Env, account: &Address, roles: &[Role]) -> bool {
    roles.iter().any(|role| has_role(env, *role, account))
}

/// Records `account` as a holder of `role`.
///
/// Callers must verify authorization beforehand.
/// Returns `false` when the account already held the role.
pub fn grant_role(env: &Env, role: Role, account: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    extend_ttl(env, &key);
    track_member(env, role, account);
    true
}

/// Removes `account` from `role`.
///
/// Callers must verify authorization beforehand.
/// Returns `false` when the account did not hold the role.
pub fn revoke_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = role_key(role, account);
    if !env.storage().persistent().has(&key) {
        return false;
    }
    env.storage().persistent().remove(&key);
    untrack_member(env, role, account);
    true
}

/// Returns true if `caller` may grant or revoke `role`.
pub fn can_administer(env: &Env, caller: &Address, role: Role) -> bool {
    has_role(env, role.admin_role(), caller)
}

// ── Member Tracking ──────────────────────────────────────────────────────────

/// Returns every address currently holding `role`, in grant order.
pub fn members(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&members_key(role))
        .unwrap_or(Vec::new(env))
}

fn track_member(env: &Env, role: Role, account: &Address) {
    let mut list = members(env, role);
    if !list.contains(account) {
        list.push_back(account.clone());
        env.storage().persistent().set(&members_key(role), &list);
    }
}

fn untrack_member(env: &Env, role: Role, account: &Address) {
    let list = members(env, role);
    let mut kept = Vec::new(env);
    for member in list.iter() {
        if member != *account {
            kept.push_back(member);
        }
    }
    env.storage().persistent().set(&members_key(role), &kept);
}
