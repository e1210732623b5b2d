use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–3) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,
    ContractsNotSet = 3,

    // --- Authorization (4) ---
    NotAuthorized = 4,

    // --- Input validation (5–14) ---
    EmptyTitle = 5,
    TitleTooLong = 6,
    EmptyCommitMessage = 7,
    CommitMessageTooLong = 8,
    EmptyFileRef = 9,
    FileRefTooLong = 10,
    EmptyFileName = 11,
    EmptyTag = 12,
    EmptyFile = 13,
    /// Upload exceeds the configured size policy. Rejected before any
    /// state is written.
    FileTooLarge = 14,

    // --- Not found (15–16) ---
    RecordNotFound = 15,
    VersionNotFound = 16,

    // --- Append mismatches (17) ---
    /// `record_id` was given but the supplied owner or record type
    /// disagrees with the stored record.
    ScopeMismatch = 17,
}
