use soroban_sdk::{contracttype, symbol_short, Address, Env};

// Typed payloads published to the Soroban event log. Indexers subscribe
// via the topic pattern ("NTFHUB", symbol_short!(...)).

#[derive(Clone)]
#[contracttype]
pub struct NotifCreatedEvent {
    pub notif_id: u64,
    pub recipient: Address,
    pub sender: Address,
    /// NotificationType repr value.
    pub notif_type: u32,
    pub reference_id: Option<u64>,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct NotifReadEvent {
    pub notif_id: u64,
    pub recipient: Address,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct NotifReadAllEvent {
    pub recipient: Address,
    pub newly_read: u32,
    pub timestamp: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct SenderAuthEvent {
    pub sender: Address,
    pub admin: Address,
    /// true = authorized, false = revoked.
    pub authorized: bool,
    pub timestamp: u64,
}

pub fn emit_notification_created(
    env: &Env,
    notif_id: u64,
    recipient: Address,
    sender: Address,
    notif_type: u32,
    reference_id: Option<u64>,
) {
    env.events().publish(
        ("NTFHUB", symbol_short!("NTF_NEW")),
        NotifCreatedEvent {
            notif_id,
            recipient,
            sender,
            notif_type,
            reference_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_notification_read(env: &Env, notif_id: u64, recipient: Address) {
    env.events().publish(
        ("NTFHUB", symbol_short!("NTF_READ")),
        NotifReadEvent {
            notif_id,
            recipient,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_all_read(env: &Env, recipient: Address, newly_read: u32) {
    env.events().publish(
        ("NTFHUB", symbol_short!("NTF_RDALL")),
        NotifReadAllEvent {
            recipient,
            newly_read,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_sender_auth(env: &Env, sender: Address, admin: Address, authorized: bool) {
    env.events().publish(
        ("NTFHUB", symbol_short!("SND_AUTH")),
        SenderAuthEvent {
            sender,
            admin,
            authorized,
            timestamp: env.ledger().timestamp(),
        },
    );
}
