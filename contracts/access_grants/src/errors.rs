use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–3) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,
    ContractsNotSet = 3,

    // --- Authorization (4–6) ---
    NotAuthorized = 4,
    DoctorRoleRequired = 5,
    PatientRoleRequired = 6,

    // --- Input validation (7–11) ---
    ReasonTooShort = 7,
    ReasonTooLong = 8,
    InvalidExpiryDays = 9,
    EmptyScope = 10,
    InvalidRecordType = 11,

    // --- Not found (12) ---
    RequestNotFound = 12,

    // --- State transitions (13) ---
    /// The request left the expected state before this call — a genuine
    /// race (e.g. two tabs responding to the same request). Callers should
    /// refresh and re-read the request.
    InvalidStatus = 13,
}
