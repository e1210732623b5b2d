use soroban_sdk::{contracttype, Address, String, Vec};

/// Document category of a medical record.
///
/// Redeclared with the same `repr(u32)` values in `record_vault`; the repr
/// value is what crosses the contract boundary.
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

/// Number of concrete `RecordType` variants.
pub const RECORD_TYPE_COUNT: u32 = 7;

impl RecordType {
    pub fn from_u32(value: u32) -> Option<RecordType> {
        match value {
            0 => Some(RecordType::Prescription),
            1 => Some(RecordType::LabReport),
            2 => Some(RecordType::Xray),
            3 => Some(RecordType::DischargeSummary),
            4 => Some(RecordType::Vaccination),
            5 => Some(RecordType::Imaging),
            6 => Some(RecordType::Other),
            _ => None,
        }
    }
}

/// How much a grant lets the doctor do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum AccessLevel {
    Read = 0,
    ReadWrite = 1,
}

/// Which record types a request applies to.
///
/// `Specific` is normalized at create time: deduplicated and collapsed to
/// `All` when it names every concrete type. Coverage checks live only in
/// `scope_covers`.
#[derive(Clone, PartialEq, Eq, Debug)]
#[contracttype]
pub enum RecordScope {
    All,
    Specific(Vec<RecordType>),
}

/// True if `scope` applies to records of `record_type`.
pub fn scope_covers(scope: &RecordScope, record_type: RecordType) -> bool {
    match scope {
        RecordScope::All => true,
        RecordScope::Specific(types) => types.contains(record_type),
    }
}

/// Lifecycle state of an access request.
///
/// Pending → Approved | Denied; Approved → Revoked | Expired.
/// Denied, Revoked and Expired are terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
#[repr(u32)]
pub enum RequestStatus {
    Pending = 0,
    Approved = 1,
    Denied = 2,
    Revoked = 3,
    Expired = 4,
}

/// A time-bounded grant proposal from a doctor to a patient. Never
/// deleted — terminal rows stay behind as the audit trail.
#[derive(Clone)]
#[contracttype]
pub struct AccessRequest {
    pub id: u64,
    pub doctor: Address,
    pub patient: Address,
    /// Clinical justification, 10..=500 bytes.
    pub reason: String,
    pub access_level: AccessLevel,
    pub scope: RecordScope,
    /// Calendar days of access once approved, 1..=365.
    pub expiry_days: u32,
    pub status: RequestStatus,
    pub requested_at: u64,
    pub responded_at: Option<u64>,
    /// Set iff the request is or was Approved:
    /// `responded_at + expiry_days * 86_400`.
    pub expires_at: Option<u64>,
}
