use soroban_sdk::{contracttype, symbol_short, Address, Env};

// Typed payloads published under the ("VAULT", …) topic pair.

#[derive(Clone)]
#[contracttype]
pub struct RecordCreatedEvent {
    pub record_id: u64,
    pub owner: Address,
    /// RecordType repr value.
    pub record_type: u32,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct VersionCommittedEvent {
    pub record_id: u64,
    pub version_id: u64,
    pub version_number: u32,
    pub committed_by: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct RecordDeletedEvent {
    pub record_id: u64,
    pub owner: Address,
    pub version_count: u32,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct DownloadResolvedEvent {
    pub record_id: u64,
    pub version_id: u64,
    pub requester: Address,
    pub expires_at: u64,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct NotifyFailedEvent {
    pub record_id: u64,
    pub recipient: Address,
    pub timestamp: u64,
}

pub fn emit_record_created(env: &Env, record_id: u64, owner: Address, record_type: u32) {
    env.events().publish(
        ("VAULT", symbol_short!("REC_NEW")),
        RecordCreatedEvent {
            record_id,
            owner,
            record_type,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_version_committed(
    env: &Env,
    record_id: u64,
    version_id: u64,
    version_number: u32,
    committed_by: Address,
) {
    env.events().publish(
        ("VAULT", symbol_short!("REC_CMT")),
        VersionCommittedEvent {
            record_id,
            version_id,
            version_number,
            committed_by,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_record_deleted(env: &Env, record_id: u64, owner: Address, version_count: u32) {
    env.events().publish(
        ("VAULT", symbol_short!("REC_DEL")),
        RecordDeletedEvent {
            record_id,
            owner,
            version_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_download_resolved(
    env: &Env,
    record_id: u64,
    version_id: u64,
    requester: Address,
    expires_at: u64,
) {
    env.events().publish(
        ("VAULT", symbol_short!("REC_DLD")),
        DownloadResolvedEvent {
            record_id,
            version_id,
            requester,
            expires_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

/// Notification delivery is best-effort; failures are logged here, never
/// propagated into the committing mutation.
pub fn emit_notify_failed(env: &Env, record_id: u64, recipient: Address) {
    env.events().publish(
        ("VAULT", symbol_short!("NTF_FAIL")),
        NotifyFailedEvent {
            record_id,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}
