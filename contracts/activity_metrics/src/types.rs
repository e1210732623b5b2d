use soroban_sdk::{contracttype, Address, String, Vec};

/// A skill endorsement left for a doctor by another registered user.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Endorsement {
    pub id: u64,
    pub doctor: Address,
    pub endorser: Address,
    /// Skill label, 1..=60 bytes.
    pub skill: String,
    /// Free-form note, up to 280 bytes. May be empty.
    pub note: String,
    pub created_at: u64,
}

/// One day of a contribution graph. `day` is the UTC epoch-day bucket,
/// `timestamp / 86_400`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayCount {
    pub day: u64,
    pub count: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActivitySummary {
    /// Qualifying actions inside the requested window.
    pub total_contributions: u32,
    /// Consecutive days with activity ending today, or ending yesterday
    /// when today is still empty.
    pub current_streak: u32,
}

/// Profile statistics, recomputed from grant and commit history on every
/// read. Nothing here is stored.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DoctorStats {
    /// Requests that were ever approved, including since revoked or
    /// expired ones.
    pub total_cases_handled: u32,
    /// Currently approved and unexpired grants.
    pub active_cases: u32,
    /// Mean time from request to response, whole hours.
    pub average_response_time_hours: u32,
    /// Composite score bounded to 0..=100.
    pub record_accuracy_score: u32,
    pub total_record_commits: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetricsConfig {
    pub identity: Address,
    pub record_vault: Address,
    pub access_grants: Address,
    pub notification_hub: Address,
}

// ---------------------------------------------------------------------
// Wire mirrors of the access-grants rows this contract reads. Field and
// variant names must stay in sync with the access_grants contract types;
// unit-variant enums cross the boundary as their u32 repr values.
// ---------------------------------------------------------------------

pub const STATUS_APPROVED: u32 = 1;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordScope {
    All,
    Specific(Vec<u32>),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequest {
    pub id: u64,
    pub doctor: Address,
    pub patient: Address,
    pub reason: String,
    pub access_level: u32,
    pub scope: RecordScope,
    pub expiry_days: u32,
    pub status: u32,
    pub requested_at: u64,
    pub responded_at: Option<u64>,
    pub expires_at: Option<u64>,
}
