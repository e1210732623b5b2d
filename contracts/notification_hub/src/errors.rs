use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Authorization (3–4) ---
    NotAuthorized = 3,
    SenderNotAuthorized = 4,

    // --- Capacity limits (5) ---
    MaxSendersReached = 5,

    // --- Input validation (6–9) ---
    EmptyTitle = 6,
    TitleTooLong = 7,
    EmptyBody = 8,
    BodyTooLong = 9,

    // --- Not found (10–11) ---
    NotificationNotFound = 10,
    SenderNotFound = 11,

    // --- Input validation, continued (12) ---
    InvalidNotifType = 12,
}
