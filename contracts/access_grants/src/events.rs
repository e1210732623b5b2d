use soroban_sdk::{contracttype, symbol_short, Address, Env};

// Typed payloads published under the ("GRANT", …) topic pair.

#[derive(Clone)]
#[contracttype]
pub struct RequestCreatedEvent {
    pub request_id: u64,
    pub doctor: Address,
    pub patient: Address,
    /// AccessLevel repr value.
    pub access_level: u32,
    pub expiry_days: u32,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct RequestRespondedEvent {
    pub request_id: u64,
    pub patient: Address,
    pub approved: bool,
    pub expires_at: Option<u64>,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct RequestRevokedEvent {
    pub request_id: u64,
    pub patient: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct SweepEvent {
    pub expired_count: u32,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct NotifyFailedEvent {
    pub request_id: u64,
    pub recipient: Address,
    pub timestamp: u64,
}

pub fn emit_request_created(
    env: &Env,
    request_id: u64,
    doctor: Address,
    patient: Address,
    access_level: u32,
    expiry_days: u32,
) {
    env.events().publish(
        ("GRANT", symbol_short!("REQ_NEW")),
        RequestCreatedEvent {
            request_id,
            doctor,
            patient,
            access_level,
            expiry_days,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_request_responded(
    env: &Env,
    request_id: u64,
    patient: Address,
    approved: bool,
    expires_at: Option<u64>,
) {
    env.events().publish(
        ("GRANT", symbol_short!("REQ_RESP")),
        RequestRespondedEvent {
            request_id,
            patient,
            approved,
            expires_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_request_revoked(env: &Env, request_id: u64, patient: Address) {
    env.events().publish(
        ("GRANT", symbol_short!("REQ_RVK")),
        RequestRevokedEvent {
            request_id,
            patient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_sweep(env: &Env, expired_count: u32) {
    env.events().publish(
        ("GRANT", symbol_short!("REQ_SWP")),
        SweepEvent {
            expired_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

/// Notification delivery is best-effort; a failed emit is logged here and
/// never propagated into the mutation that triggered it.
pub fn emit_notify_failed(env: &Env, request_id: u64, recipient: Address) {
    env.events().publish(
        ("GRANT", symbol_short!("NTF_FAIL")),
        NotifyFailedEvent {
            request_id,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}
