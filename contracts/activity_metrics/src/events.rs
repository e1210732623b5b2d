use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

// Typed payloads published under the ("METRICS", …) topic pair.

#[derive(Clone)]
#[contracttype]
pub struct EndorsementCreatedEvent {
    pub endorsement_id: u64,
    pub doctor: Address,
    pub endorser: Address,
    pub skill: String,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct NotifyFailedEvent {
    pub endorsement_id: u64,
    pub recipient: Address,
    pub timestamp: u64,
}

pub fn emit_endorsement_created(
    env: &Env,
    endorsement_id: u64,
    doctor: Address,
    endorser: Address,
    skill: String,
) {
    env.events().publish(
        ("METRICS", symbol_short!("END_NEW")),
        EndorsementCreatedEvent {
            endorsement_id,
            doctor,
            endorser,
            skill,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_notify_failed(env: &Env, endorsement_id: u64, recipient: Address) {
    env.events().publish(
        ("METRICS", symbol_short!("NTF_FAIL")),
        NotifyFailedEvent {
            endorsement_id,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}
