#![no_std]


mod errors;
mod events;
mod types;

pub use errors::Error;
pub use types::{
    scope_covers, AccessLevel, AccessRequest, RecordScope, RecordType, RequestStatus,
    RECORD_TYPE_COUNT,
};

use soroban_sdk::{
    contract, contractimpl, contracttype, vec, Address, Env, IntoVal, String, Symbol, Vec,
};

// ==================== Storage Keys ====================

#[contracttype]
pub enum DataKey {
    // Singleton / lifecycle — instance storage
    Initialized,
    Admin,
    Config,

    // Request rows — persistent
    ReqCount,                 // u64 — monotonic ID counter
    Request(u64),             // AccessRequest
    DoctorRequests(Address),  // Vec<u64> — insertion order
    PatientRequests(Address), // Vec<u64> — insertion order
    ApprovedIds,              // Vec<u64> — sweep index of Approved requests
}

/// Peer contract addresses, set by the admin after deployment.
#[derive(Clone)]
#[contracttype]
pub struct GrantsConfig {
    pub identity: Address,
    pub notification_hub: Address,
}

// ==================== Constants ====================

const SECS_PER_DAY: u64 = 86_400;

const MIN_REASON_LEN: u32 = 10;
const MAX_REASON_LEN: u32 = 500;
const MIN_EXPIRY_DAYS: u32 = 1;
const MAX_EXPIRY_DAYS: u32 = 365;

// NotificationType repr values understood by notification_hub.
const NOTIF_ACCESS_REQUEST: u32 = 0;
const NOTIF_ACCESS_RESPONSE: u32 = 1;
const NOTIF_ACCESS_REVOKED: u32 = 2;

// ==================== Contract ====================

#[contract]
pub struct AccessGrantsContract;

#[contractimpl]
impl AccessGrantsContract {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Initialise the contract. Must be called exactly once.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        Ok(())
    }

    /// Wire up the peer contracts. Admin only.
    pub fn set_contracts(
        env: Env,
        caller: Address,
        identity: Address,
        notification_hub: Address,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        env.storage().instance().set(
            &DataKey::Config,
            &GrantsConfig {
                identity,
                notification_hub,
            },
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // State machine: create → respond → revoke / sweep
    // ------------------------------------------------------------------

    /// A doctor proposes time-bounded access to a patient's records.
    /// Multiple concurrent requests per (doctor, patient) pair are allowed
    /// by design; authorization takes the union of approved grants.
    pub fn create_request(
        env: Env,
        doctor: Address,
        patient: Address,
        reason: String,
        access_level: AccessLevel,
        scope: RecordScope,
        expiry_days: u32,
    ) -> Result<u64, Error> {
        Self::require_initialized(&env)?;
        doctor.require_auth();

        let config = Self::load_config(&env)?;
        if !Self::query_role(&env, &config.identity, "is_doctor", &doctor) {
            return Err(Error::DoctorRoleRequired);
        }
        if !Self::query_role(&env, &config.identity, "is_patient", &patient) {
            return Err(Error::PatientRoleRequired);
        }

        if reason.len() < MIN_REASON_LEN {
            return Err(Error::ReasonTooShort);
        }
        if reason.len() > MAX_REASON_LEN {
            return Err(Error::ReasonTooLong);
        }
        if !(MIN_EXPIRY_DAYS..=MAX_EXPIRY_DAYS).contains(&expiry_days) {
            return Err(Error::InvalidExpiryDays);
        }
        let scope = Self::normalize_scope(&env, scope)?;

        let request_id = Self::next_request_id(&env);
        let request = AccessRequest {
            id: request_id,
            doctor: doctor.clone(),
            patient: patient.clone(),
            reason,
            access_level,
            scope,
            expiry_days,
            status: RequestStatus::Pending,
            requested_at: env.ledger().timestamp(),
            responded_at: None,
            expires_at: None,
        };
        env.storage()
            .persistent()
            .set(&DataKey::Request(request_id), &request);
        Self::index_request(&env, &DataKey::DoctorRequests(doctor.clone()), request_id);
        Self::index_request(&env, &DataKey::PatientRequests(patient.clone()), request_id);

        events::emit_request_created(
            &env,
            request_id,
            doctor,
            patient.clone(),
            access_level as u32,
            expiry_days,
        );
        Self::notify(
            &env,
            &config,
            request_id,
            &patient,
            NOTIF_ACCESS_REQUEST,
            "New access request",
            "A doctor requested access to your records.",
        );
        Ok(request_id)
    }

    /// The patient approves or denies a pending request.
    ///
    /// The status check and the write happen in one transaction, so of two
    /// racing responders exactly one succeeds; the other observes a
    /// non-Pending status and gets `InvalidStatus`.
    pub fn respond(
        env: Env,
        request_id: u64,
        patient: Address,
        approved: bool,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        patient.require_auth();

        let config = Self::load_config(&env)?;
        let mut request = Self::load_request(&env, request_id)?;
        if request.patient != patient {
            return Err(Error::NotAuthorized);
        }
        if request.status != RequestStatus::Pending {
            return Err(Error::InvalidStatus);
        }

        let now = env.ledger().timestamp();
        request.responded_at = Some(now);
        if approved {
            request.status = RequestStatus::Approved;
            request.expires_at = Some(now + u64::from(request.expiry_days) * SECS_PER_DAY);

            let mut approved_ids = Self::read_approved_ids(&env);
            approved_ids.push_back(request_id);
            env.storage()
                .persistent()
                .set(&DataKey::ApprovedIds, &approved_ids);
        } else {
            request.status = RequestStatus::Denied;
        }
        env.storage()
            .persistent()
            .set(&DataKey::Request(request_id), &request);

        events::emit_request_responded(&env, request_id, patient, approved, request.expires_at);
        let (title, body) = if approved {
            (
                "Access request approved",
                "The patient approved your access request.",
            )
        } else {
            (
                "Access request denied",
                "The patient denied your access request.",
            )
        };
        Self::notify(
            &env,
            &config,
            request_id,
            &request.doctor,
            NOTIF_ACCESS_RESPONSE,
            title,
            body,
        );
        Ok(())
    }

    /// The patient revokes an approved, still-active grant.
    pub fn revoke(env: Env, request_id: u64, patient: Address) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        patient.require_auth();

        let config = Self::load_config(&env)?;
        let mut request = Self::load_request(&env, request_id)?;
        if request.patient != patient {
            return Err(Error::NotAuthorized);
        }
        if request.status != RequestStatus::Approved {
            return Err(Error::InvalidStatus);
        }

        let now = env.ledger().timestamp();
        if let Some(expires_at) = request.expires_at {
            if expires_at <= now {
                // Already lapsed, just not swept yet. There is nothing left
                // to revoke; the sweep records the expiry.
                return Err(Error::InvalidStatus);
            }
        }

        request.status = RequestStatus::Revoked;
        env.storage()
            .persistent()
            .set(&DataKey::Request(request_id), &request);
        Self::drop_approved_id(&env, request_id);

        events::emit_request_revoked(&env, request_id, patient);
        Self::notify(
            &env,
            &config,
            request_id,
            &request.doctor,
            NOTIF_ACCESS_REVOKED,
            "Access revoked",
            "The patient revoked your access to their records.",
        );
        Ok(())
    }

    /// Transition every Approved request whose expiry has passed to
    /// Expired. Idempotent, callable by anyone, and deliberately silent —
    /// routine expiry produces no notification, unlike revocation.
    /// Returns the number of requests transitioned.
    pub fn sweep_expired(env: Env) -> Result<u32, Error> {
        Self::require_initialized(&env)?;

        let now = env.ledger().timestamp();
        let approved_ids = Self::read_approved_ids(&env);
        let mut still_active: Vec<u64> = Vec::new(&env);
        let mut expired_count: u32 = 0;

        for request_id in approved_ids.iter() {
            let request: AccessRequest = match env
                .storage()
                .persistent()
                .get(&DataKey::Request(request_id))
            {
                Some(r) => r,
                None => continue,
            };
            match request.expires_at {
                Some(expires_at) if expires_at <= now => {
                    let mut expired = request;
                    expired.status = RequestStatus::Expired;
                    env.storage()
                        .persistent()
                        .set(&DataKey::Request(request_id), &expired);
                    expired_count += 1;
                }
                _ => still_active.push_back(request_id),
            }
        }
        env.storage()
            .persistent()
            .set(&DataKey::ApprovedIds, &still_active);

        events::emit_sweep(&env, expired_count);
        Ok(expired_count)
    }

    // ------------------------------------------------------------------
    // Authorization queries (consumed by record_vault)
    // ------------------------------------------------------------------

    /// True if `requester` may read `owner`'s records of `record_type`
    /// (repr value): either the owner themselves, or the holder of an
    /// approved, unexpired grant whose scope covers the type. Expiry is
    /// checked lazily against the clock; no storage is written.
    pub fn can_read(env: Env, requester: Address, owner: Address, record_type: u32) -> bool {
        Self::holds_grant(&env, &requester, &owner, record_type, false)
    }

    /// `can_read` plus `AccessLevel::ReadWrite` on the qualifying grant.
    pub fn can_write(env: Env, requester: Address, owner: Address, record_type: u32) -> bool {
        Self::holds_grant(&env, &requester, &owner, record_type, true)
    }

    // ------------------------------------------------------------------
    // Read surfaces
    // ------------------------------------------------------------------

    pub fn get_request(env: Env, request_id: u64) -> Result<AccessRequest, Error> {
        Self::load_request(&env, request_id)
    }

    /// All requests ever addressed to `patient`, newest first. Terminal
    /// requests are retained as the audit trail.
    pub fn list_incoming(env: Env, patient: Address) -> Vec<AccessRequest> {
        Self::collect_requests(&env, &DataKey::PatientRequests(patient))
    }

    /// All requests ever created by `doctor`, newest first.
    pub fn list_outgoing(env: Env, doctor: Address) -> Vec<AccessRequest> {
        Self::collect_requests(&env, &DataKey::DoctorRequests(doctor))
    }

    /// The currently active grants against `patient`: Approved and
    /// unexpired, newest first.
    pub fn list_collaborators(env: Env, patient: Address) -> Vec<AccessRequest> {
        let now = env.ledger().timestamp();
        let all = Self::collect_requests(&env, &DataKey::PatientRequests(patient));
        let mut active: Vec<AccessRequest> = Vec::new(&env);
        for request in all.iter() {
            if request.status == RequestStatus::Approved
                && matches!(request.expires_at, Some(expires_at) if now < expires_at)
            {
                active.push_back(request);
            }
        }
        active
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

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

    fn load_config(env: &Env) -> Result<GrantsConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::ContractsNotSet)
    }

    fn query_role(env: &Env, identity: &Address, func: &str, user: &Address) -> bool {
        env.invoke_contract::<bool>(
            identity,
            &Symbol::new(env, func),
            vec![env, user.into_val(env)],
        )
    }

    /// Dedupe a Specific scope and collapse it to All when it names every
    /// concrete record type.
    fn normalize_scope(env: &Env, scope: RecordScope) -> Result<RecordScope, Error> {
        match scope {
            RecordScope::All => Ok(RecordScope::All),
            RecordScope::Specific(types) => {
                if types.is_empty() {
                    return Err(Error::EmptyScope);
                }
                let mut deduped: Vec<RecordType> = Vec::new(env);
                for record_type in types.iter() {
                    if !deduped.contains(record_type) {
                        deduped.push_back(record_type);
                    }
                }
                if deduped.len() == RECORD_TYPE_COUNT {
                    Ok(RecordScope::All)
                } else {
                    Ok(RecordScope::Specific(deduped))
                }
            }
        }
    }

    fn next_request_id(env: &Env) -> u64 {
        let current: u64 = env
            .storage()
            .persistent()
            .get(&DataKey::ReqCount)
            .unwrap_or(0);
        let next = current + 1;
        env.storage().persistent().set(&DataKey::ReqCount, &next);
        next
    }

    fn index_request(env: &Env, key: &DataKey, request_id: u64) {
        let mut ids: Vec<u64> = env.storage().persistent().get(key).unwrap_or(Vec::new(env));
        ids.push_back(request_id);
        env.storage().persistent().set(key, &ids);
    }

    fn read_approved_ids(env: &Env) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::ApprovedIds)
            .unwrap_or(Vec::new(env))
    }

    fn drop_approved_id(env: &Env, request_id: u64) {
        let ids = Self::read_approved_ids(env);
        let mut kept: Vec<u64> = Vec::new(env);
        for id in ids.iter() {
            if id != request_id {
                kept.push_back(id);
            }
        }
        env.storage().persistent().set(&DataKey::ApprovedIds, &kept);
    }

    fn load_request(env: &Env, request_id: u64) -> Result<AccessRequest, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Request(request_id))
            .ok_or(Error::RequestNotFound)
    }

    fn collect_requests(env: &Env, key: &DataKey) -> Vec<AccessRequest> {
        let ids: Vec<u64> = env.storage().persistent().get(key).unwrap_or(Vec::new(env));
        let mut out: Vec<AccessRequest> = Vec::new(env);
        let mut idx = ids.len();
        while idx > 0 {
            idx -= 1;
            if let Some(request_id) = ids.get(idx) {
                if let Some(request) = env
                    .storage()
                    .persistent()
                    .get::<DataKey, AccessRequest>(&DataKey::Request(request_id))
                {
                    out.push_back(request);
                }
            }
        }
        out
    }

    fn holds_grant(
        env: &Env,
        requester: &Address,
        owner: &Address,
        record_type: u32,
        need_write: bool,
    ) -> bool {
        if requester == owner {
            return true;
        }
        let record_type = match RecordType::from_u32(record_type) {
            Some(rt) => rt,
            None => return false,
        };

        let now = env.ledger().timestamp();
        let ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&DataKey::PatientRequests(owner.clone()))
            .unwrap_or(Vec::new(env));

        for request_id in ids.iter() {
            let request: AccessRequest = match env
                .storage()
                .persistent()
                .get(&DataKey::Request(request_id))
            {
                Some(r) => r,
                None => continue,
            };
            if request.doctor != *requester || request.status != RequestStatus::Approved {
                continue;
            }
            match request.expires_at {
                Some(expires_at) if now < expires_at => {}
                _ => continue,
            }
            if need_write && request.access_level != AccessLevel::ReadWrite {
                continue;
            }
            if scope_covers(&request.scope, record_type) {
                return true;
            }
        }
        false
    }

    /// Fire-and-forget notification emission. A failure is logged to the
    /// event stream and never fails the mutation that triggered it.
    fn notify(
        env: &Env,
        config: &GrantsConfig,
        request_id: u64,
        recipient: &Address,
        notif_type: u32,
        title: &str,
        body: &str,
    ) {
        let result = env.try_invoke_contract::<u64, soroban_sdk::Error>(
            &config.notification_hub,
            &Symbol::new(env, "emit_notification"),
            vec![
                env,
                env.current_contract_address().into_val(env),
                recipient.into_val(env),
                notif_type.into_val(env),
                String::from_str(env, title).into_val(env),
                String::from_str(env, body).into_val(env),
                Some(request_id).into_val(env),
            ],
        );
        if !matches!(result, Ok(Ok(_))) {
            events::emit_notify_failed(env, request_id, recipient.clone());
        }
    }
}
