#![no_std]


mod errors;
mod events;
mod types;

pub use errors::Error;
pub use types::{
    AccessRequest, ActivitySummary, DayCount, DoctorStats, Endorsement, MetricsConfig,
    RecordScope, STATUS_APPROVED,
};

use soroban_sdk::{
    contract, contractimpl, contracttype, vec, Address, Env, IntoVal, String, Symbol, Vec,
};

// ==================== Storage Keys ====================

#[contracttype]
pub enum DataKey {
    // Singleton / lifecycle — instance storage
    Initialized,
    Admin,
    Config,

    // Endorsement rows — persistent
    EndorseCount,                 // u64 — monotonic ID counter
    Endorsement(u64),             // Endorsement
    DoctorEndorsements(Address),  // Vec<u64> — received, insertion order
    GivenEndorsements(Address),   // Vec<u64> — given, insertion order
}

// ==================== Constants ====================

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;

const MAX_SKILL_LEN: u32 = 60;
const MAX_NOTE_LEN: u32 = 280;

const DAYS_PER_WEEK: u32 = 7;
const MAX_WEEKS: u32 = 52;
const MAX_WINDOW_DAYS: usize = (MAX_WEEKS * DAYS_PER_WEEK) as usize;

// NotificationType repr value, notification-hub side.
const NOTIF_ENDORSEMENT: u32 = 3;

// ==================== Contract ====================

#[contract]
pub struct ActivityMetricsContract;

#[contractimpl]
impl ActivityMetricsContract {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Initialise the contract. Must be called exactly once.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        Ok(())
    }

    /// Wire up the peer contracts. Admin only.
    pub fn set_contracts(
        env: Env,
        caller: Address,
        identity: Address,
        record_vault: Address,
        access_grants: Address,
        notification_hub: Address,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        env.storage().instance().set(
            &DataKey::Config,
            &MetricsConfig {
                identity,
                record_vault,
                access_grants,
                notification_hub,
            },
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Endorsements
    // ------------------------------------------------------------------

    /// Endorse a doctor for a skill. Any registered active user other than
    /// the doctor themself may endorse; the doctor is notified.
    pub fn endorse(
        env: Env,
        endorser: Address,
        doctor: Address,
        skill: String,
        note: String,
    ) -> Result<u64, Error> {
        Self::require_initialized(&env)?;
        endorser.require_auth();
        let config = Self::load_config(&env)?;

        if endorser == doctor {
            return Err(Error::SelfEndorsement);
        }
        if skill.is_empty() {
            return Err(Error::EmptySkill);
        }
        if skill.len() > MAX_SKILL_LEN {
            return Err(Error::SkillTooLong);
        }
        if note.len() > MAX_NOTE_LEN {
            return Err(Error::NoteTooLong);
        }
        if !Self::query_identity(&env, &config.identity, "is_registered", &endorser) {
            return Err(Error::EndorserNotRegistered);
        }
        if !Self::query_identity(&env, &config.identity, "is_doctor", &doctor) {
            return Err(Error::NotADoctor);
        }

        let id = Self::next_id(&env);
        let endorsement = Endorsement {
            id,
            doctor: doctor.clone(),
            endorser: endorser.clone(),
            skill: skill.clone(),
            note,
            created_at: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::Endorsement(id), &endorsement);
        Self::push_id(&env, &DataKey::DoctorEndorsements(doctor.clone()), id);
        Self::push_id(&env, &DataKey::GivenEndorsements(endorser.clone()), id);

        events::emit_endorsement_created(&env, id, doctor.clone(), endorser, skill);
        Self::notify(
            &env,
            &config,
            id,
            &doctor,
            "New endorsement",
            "A colleague endorsed one of your skills",
        );
        Ok(id)
    }

    /// Endorsements received by `doctor`, newest first.
    pub fn list_endorsements(env: Env, doctor: Address) -> Vec<Endorsement> {
        let ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&DataKey::DoctorEndorsements(doctor))
            .unwrap_or_else(|| Vec::new(&env));
        let mut out = Vec::new(&env);
        let mut idx = ids.len();
        while idx > 0 {
            idx -= 1;
            if let Some(id) = ids.get(idx) {
                if let Some(endorsement) = env
                    .storage()
                    .persistent()
                    .get::<DataKey, Endorsement>(&DataKey::Endorsement(id))
                {
                    out.push_back(endorsement);
                }
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Derived activity
    // ------------------------------------------------------------------

    /// Daily contribution counts for `doctor` over the trailing `weeks`
    /// (clamped to 1..=52). Exactly `weeks * 7` entries, chronological,
    /// ending at today's UTC bucket; days without activity carry a zero.
    pub fn contribution_graph(
        env: Env,
        doctor: Address,
        weeks: u32,
    ) -> Result<Vec<DayCount>, Error> {
        Self::require_initialized(&env)?;
        let config = Self::load_config(&env)?;
        let (counts, start_day, days) = Self::bucket_window(&env, &config, &doctor, weeks);

        let mut out = Vec::new(&env);
        for i in 0..days {
            out.push_back(DayCount {
                day: start_day + i as u64,
                count: counts[i],
            });
        }
        Ok(out)
    }

    /// Window totals plus the doctor's current daily streak. The streak is
    /// the run of consecutive active days ending today, or ending yesterday
    /// when today has no activity yet.
    pub fn summary(env: Env, doctor: Address, weeks: u32) -> Result<ActivitySummary, Error> {
        Self::require_initialized(&env)?;
        let config = Self::load_config(&env)?;
        let (counts, _, days) = Self::bucket_window(&env, &config, &doctor, weeks);

        let mut total: u32 = 0;
        for count in counts.iter().take(days) {
            total = total.saturating_add(*count);
        }

        let mut idx = days - 1;
        if counts[idx] == 0 {
            if idx == 0 {
                return Ok(ActivitySummary {
                    total_contributions: total,
                    current_streak: 0,
                });
            }
            idx -= 1;
        }
        let mut streak: u32 = 0;
        loop {
            if counts[idx] == 0 {
                break;
            }
            streak += 1;
            if idx == 0 {
                break;
            }
            idx -= 1;
        }
        Ok(ActivitySummary {
            total_contributions: total,
            current_streak: streak,
        })
    }

    /// Profile statistics, recomputed from grant and commit history on
    /// every read.
    pub fn doctor_stats(env: Env, doctor: Address) -> Result<DoctorStats, Error> {
        Self::require_initialized(&env)?;
        let config = Self::load_config(&env)?;
        let now = env.ledger().timestamp();

        let requests: Vec<AccessRequest> = env.invoke_contract(
            &config.access_grants,
            &Symbol::new(&env, "list_outgoing"),
            vec![&env, doctor.into_val(&env)],
        );

        let mut total_cases: u32 = 0;
        let mut active_cases: u32 = 0;
        let mut response_secs: u64 = 0;
        let mut responded: u64 = 0;
        for request in requests.iter() {
            // expires_at is set iff the request is or was approved.
            if request.expires_at.is_some() {
                total_cases += 1;
            }
            if request.status == STATUS_APPROVED
                && request.expires_at.map_or(false, |e| now < e)
            {
                active_cases += 1;
            }
            if let Some(responded_at) = request.responded_at {
                response_secs += responded_at.saturating_sub(request.requested_at);
                responded += 1;
            }
        }
        let average_response_time_hours = if responded == 0 {
            0
        } else {
            (response_secs / responded / SECS_PER_HOUR) as u32
        };

        let commits = Self::query_commit_times(&env, &config, &doctor).len();
        let endorsements: u32 = env
            .storage()
            .persistent()
            .get::<DataKey, Vec<u64>>(&DataKey::DoctorEndorsements(doctor))
            .map_or(0, |ids| ids.len());

        let record_accuracy_score = 50u32
            .saturating_add(endorsements.saturating_mul(5))
            .saturating_add(commits)
            .min(100);

        Ok(DoctorStats {
            total_cases_handled: total_cases,
            active_cases,
            average_response_time_hours,
            record_accuracy_score,
            total_record_commits: commits,
        })
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    /// Bucket the doctor's qualifying actions into per-day counts over the
    /// trailing window. Qualifying actions are record commits made as a
    /// doctor plus endorsements given.
    fn bucket_window(
        env: &Env,
        config: &MetricsConfig,
        doctor: &Address,
        weeks: u32,
    ) -> ([u32; MAX_WINDOW_DAYS], u64, usize) {
        let weeks = weeks.clamp(1, MAX_WEEKS);
        let days = (weeks * DAYS_PER_WEEK) as usize;
        let today = env.ledger().timestamp() / SECS_PER_DAY;
        let start_day = today.saturating_sub(days as u64 - 1);

        let mut counts = [0u32; MAX_WINDOW_DAYS];
        let mut tally = |timestamp: u64| {
            let day = timestamp / SECS_PER_DAY;
            if day >= start_day && day <= today {
                let slot = (day - start_day) as usize;
                counts[slot] = counts[slot].saturating_add(1);
            }
        };

        for timestamp in Self::query_commit_times(env, config, doctor).iter() {
            tally(timestamp);
        }
        let given: Vec<u64> = env
            .storage()
            .persistent()
            .get(&DataKey::GivenEndorsements(doctor.clone()))
            .unwrap_or_else(|| Vec::new(env));
        for id in given.iter() {
            if let Some(endorsement) = env
                .storage()
                .persistent()
                .get::<DataKey, Endorsement>(&DataKey::Endorsement(id))
            {
                tally(endorsement.created_at);
            }
        }
        (counts, start_day, days)
    }

    fn query_commit_times(env: &Env, config: &MetricsConfig, doctor: &Address) -> Vec<u64> {
        env.invoke_contract(
            &config.record_vault,
            &Symbol::new(env, "get_commit_times"),
            vec![env, doctor.into_val(env)],
        )
    }

    fn query_identity(env: &Env, identity: &Address, func: &str, user: &Address) -> bool {
        env.invoke_contract::<bool>(
            identity,
            &Symbol::new(env, func),
            vec![env, user.into_val(env)],
        )
    }

    fn next_id(env: &Env) -> u64 {
        let id = env
            .storage()
            .persistent()
            .get::<DataKey, u64>(&DataKey::EndorseCount)
            .unwrap_or(0)
            + 1;
        env.storage().persistent().set(&DataKey::EndorseCount, &id);
        id
    }

    fn push_id(env: &Env, key: &DataKey, id: u64) {
        let mut ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(key)
            .unwrap_or_else(|| Vec::new(env));
        ids.push_back(id);
        env.storage().persistent().set(key, &ids);
    }

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        if admin != *caller {
            return Err(Error::NotAuthorized);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<MetricsConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::ContractsNotSet)
    }

    /// Fire-and-forget notification. A hub failure is recorded as an event
    /// and never propagated.
    fn notify(
        env: &Env,
        config: &MetricsConfig,
        endorsement_id: u64,
        recipient: &Address,
        title: &str,
        body: &str,
    ) {
        let result = env.try_invoke_contract::<u64, soroban_sdk::Error>(
            &config.notification_hub,
            &Symbol::new(env, "emit_notification"),
            vec![
                env,
                env.current_contract_address().into_val(env),
                recipient.into_val(env),
                NOTIF_ENDORSEMENT.into_val(env),
                String::from_str(env, title).into_val(env),
                String::from_str(env, body).into_val(env),
                Some(endorsement_id).into_val(env),
            ],
        );
        if !matches!(result, Ok(Ok(_))) {
            events::emit_notify_failed(env, endorsement_id, recipient.clone());
        }
    }
}
