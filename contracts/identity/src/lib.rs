#![no_std]


use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Authorization (3) ---
    NotAuthorized = 3,

    // --- Registration (4–6) ---
    AlreadyRegistered = 4,
    UserNotFound = 5,
    UserInactive = 6,
}

/// Subject role as established by the external identity provider.
/// Credentials never reach this contract; `require_auth` is the
/// bearer-token boundary and this registry only records the role.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum Role {
    None = 0,
    Patient = 1,
    Doctor = 2,
    Admin = 3,
}

#[derive(Clone)]
#[contracttype]
pub struct UserProfile {
    pub role: Role,
    pub active: bool,
    pub registered_at: u64,
}

#[contracttype]
pub enum DataKey {
    Initialized,
    Admin,
    User(Address),
}

#[contract]
pub struct IdentityContract;

#[contractimpl]
impl IdentityContract {
    /// Initialise the registry. Must be called exactly once.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);

        let profile = UserProfile {
            role: Role::Admin,
            active: true,
            registered_at: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::User(admin.clone()), &profile);

        env.events()
            .publish((symbol_short!("USER_REG"),), (admin, Role::Admin as u32));
        Ok(())
    }

    /// Self-register the caller as a patient.
    pub fn register_patient(env: Env, user: Address) -> Result<(), Error> {
        Self::register(env, user, Role::Patient)
    }

    /// Self-register the caller as a doctor.
    pub fn register_doctor(env: Env, user: Address) -> Result<(), Error> {
        Self::register(env, user, Role::Doctor)
    }

    /// Admin-only: deactivate a user. Deactivated users read as `Role::None`.
    pub fn deactivate_user(env: Env, caller: Address, user: Address) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut profile = Self::load_user(&env, &user)?;
        profile.active = false;
        env.storage()
            .persistent()
            .set(&DataKey::User(user.clone()), &profile);

        env.events().publish((symbol_short!("USER_OFF"),), user);
        Ok(())
    }

    /// Admin-only: reactivate a previously deactivated user.
    pub fn reactivate_user(env: Env, caller: Address, user: Address) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut profile = Self::load_user(&env, &user)?;
        profile.active = true;
        env.storage()
            .persistent()
            .set(&DataKey::User(user.clone()), &profile);

        env.events().publish((symbol_short!("USER_ON"),), user);
        Ok(())
    }

    /// Role of `user`, or `Role::None` for unknown / deactivated users.
    pub fn get_role(env: Env, user: Address) -> Role {
        match env
            .storage()
            .persistent()
            .get::<DataKey, UserProfile>(&DataKey::User(user))
        {
            Some(profile) if profile.active => profile.role,
            _ => Role::None,
        }
    }

    // Boolean role queries, stable across the contract boundary.

    pub fn is_patient(env: Env, user: Address) -> bool {
        Self::get_role(env, user) == Role::Patient
    }

    pub fn is_doctor(env: Env, user: Address) -> bool {
        Self::get_role(env, user) == Role::Doctor
    }

    /// Registered and active, any role.
    pub fn is_registered(env: Env, user: Address) -> bool {
        Self::get_role(env, user) != Role::None
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn register(env: Env, user: Address, role: Role) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        user.require_auth();

        if env.storage().persistent().has(&DataKey::User(user.clone())) {
            return Err(Error::AlreadyRegistered);
        }
        let profile = UserProfile {
            role,
            active: true,
            registered_at: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::User(user.clone()), &profile);

        env.events()
            .publish((symbol_short!("USER_REG"),), (user, role as u32));
        Ok(())
    }

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        if admin != *caller {
            return Err(Error::NotAuthorized);
        }
        Ok(())
    }

    fn load_user(env: &Env, user: &Address) -> Result<UserProfile, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::User(user.clone()))
            .ok_or(Error::UserNotFound)
    }
}
