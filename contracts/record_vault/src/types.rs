use soroban_sdk::{contracttype, Address, String, Vec};

/// Document category of a medical record. Repr values match the
/// `access_grants` declaration; the repr is what crosses the boundary.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum RecordType {
    Prescription = 0,
    LabReport = 1,
    Xray = 2,
    DischargeSummary = 3,
    Vaccination = 4,
    Imaging = 5,
    Other = 6,
}

/// Committer role snapshot, mirroring the identity registry's repr values.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum Role {
    None = 0,
    Patient = 1,
    Doctor = 2,
    Admin = 3,
}

impl Role {
    pub fn from_u32(value: u32) -> Role {
        match value {
            1 => Role::Patient,
            2 => Role::Doctor,
            3 => Role::Admin,
            _ => Role::None,
        }
    }
}

/// A logical document owned by exactly one patient. Mutated only by
/// appending versions; deletion tombstones the record and its whole chain.
#[derive(Clone)]
#[contracttype]
pub struct Record {
    pub id: u64,
    pub owner: Address,
    pub record_type: RecordType,
    /// Display title, max 120 bytes.
    pub title: String,
    pub tags: Vec<String>,
    /// Equals the number of versions committed so far.
    pub current_version_number: u32,
    /// Always the most recent version's id.
    pub current_version_id: u64,
    pub created_at: u64,
    pub updated_at: u64,
    pub is_deleted: bool,
}

/// One immutable commit on a record's history. Never edited or deleted
/// individually; versions die with their record's tombstone.
#[derive(Clone)]
#[contracttype]
pub struct Version {
    pub id: u64,
    pub record_id: u64,
    /// 1-based, strictly increasing, no gaps.
    pub version_number: u32,
    /// Opaque blob locator, max 200 bytes. Never interpreted here.
    pub file_ref: String,
    pub file_name: String,
    pub file_size: u64,
    /// Commit message, max 280 bytes.
    pub commit_message: String,
    pub committed_by: Address,
    pub committed_by_role: Role,
    pub created_at: u64,
}

/// Receipt returned by `commit_version`.
#[derive(Clone)]
#[contracttype]
pub struct CommitReceipt {
    pub record_id: u64,
    pub version_id: u64,
    pub version_number: u32,
}

/// Time-limited blob locator handed to a download client. The blob store
/// is expected to honour `expires_at`.
#[derive(Clone)]
#[contracttype]
pub struct DownloadTicket {
    pub file_ref: String,
    pub version_id: u64,
    pub issued_at: u64,
    pub expires_at: u64,
}

/// Peer contract addresses and policy knobs, set by the admin.
#[derive(Clone)]
#[contracttype]
pub struct VaultConfig {
    pub identity: Address,
    pub access_grants: Address,
    pub notification_hub: Address,
    /// Upload size ceiling in bytes.
    pub max_file_size: u64,
    /// Download ticket lifetime in seconds.
    pub download_ttl_secs: u64,
}
