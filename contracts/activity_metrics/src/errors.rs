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

    // --- Endorsement rules (5–7) ---
    EndorserNotRegistered = 5,
    NotADoctor = 6,
    SelfEndorsement = 7,

    // --- Input validation (8–10) ---
    EmptySkill = 8,
    SkillTooLong = 9,
    NoteTooLong = 10,
}
