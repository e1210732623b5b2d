use soroban_sdk::{contracttype, Address, String};

/// Domain event category a notification reports.
///
/// `repr(u32)` values are stable across the contract boundary; peer
/// contracts pass the repr value rather than the enum itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum NotificationType {
    /// A doctor requested access to a patient's records.
    AccessRequest = 0,
    /// A patient approved or denied a pending request.
    AccessRequestResponse = 1,
    /// A patient revoked an approved grant.
    AccessRevoked = 2,
    /// A doctor received a peer endorsement.
    Endorsement = 3,
    /// A record gained a new version from someone other than its owner.
    RecordUpdated = 4,
}

impl NotificationType {
    pub fn from_u32(value: u32) -> Option<NotificationType> {
        match value {
            0 => Some(NotificationType::AccessRequest),
            1 => Some(NotificationType::AccessRequestResponse),
            2 => Some(NotificationType::AccessRevoked),
            3 => Some(NotificationType::Endorsement),
            4 => Some(NotificationType::RecordUpdated),
            _ => None,
        }
    }
}

/// A single notification row. Created exactly once per triggering event
/// per recipient; the only mutation ever applied is flipping `is_read`.
#[derive(Clone)]
#[contracttype]
pub struct Notification {
    pub id: u64,
    pub recipient: Address,
    /// The contract (or admin) that emitted it.
    pub sender: Address,
    pub notif_type: NotificationType,
    /// Short summary, max 100 bytes.
    pub title: String,
    /// Full message body, max 500 bytes.
    pub body: String,
    /// Optional linked entity ID (record id, access-request id, …).
    pub reference_id: Option<u64>,
    pub is_read: bool,
    pub read_at: Option<u64>,
    pub created_at: u64,
}
