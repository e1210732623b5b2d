#![no_std]


mod errors;
mod events;
mod types;
mod validation;

pub use errors::Error;
pub use types::{CommitReceipt, DownloadTicket, Record, RecordType, Role, VaultConfig, Version};

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

    // Record and version rows — persistent
    RecordCount,           // u64 — monotonic ID counter
    VersionCount,          // u64 — monotonic ID counter
    Record(u64),           // Record
    Version(u64),          // Version
    RecordVersions(u64),   // Vec<u64> — version ids, ascending
    OwnerRecords(Address), // Vec<u64> — record ids, insertion order
    OwnerCommits(Address), // Vec<u64> — version ids across the owner's records
    DoctorCommits(Address), // Vec<u64> — commit timestamps (activity history)
}

// ==================== Constants ====================

/// Reference upload policy: 20 MiB.
const DEFAULT_MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;
/// Download tickets are honoured for five minutes.
const DEFAULT_DOWNLOAD_TTL_SECS: u64 = 300;

// NotificationType repr value understood by notification_hub.
const NOTIF_RECORD_UPDATED: u32 = 4;

// ==================== Contract ====================

#[contract]
pub struct RecordVaultContract;

#[contractimpl]
impl RecordVaultContract {
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

    /// Wire up the peer contracts; size/TTL policy starts at the defaults.
    /// Admin only.
    pub fn set_contracts(
        env: Env,
        caller: Address,
        identity: Address,
        access_grants: Address,
        notification_hub: Address,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let (max_file_size, download_ttl_secs) = match Self::read_config(&env) {
            Some(config) => (config.max_file_size, config.download_ttl_secs),
            None => (DEFAULT_MAX_FILE_SIZE, DEFAULT_DOWNLOAD_TTL_SECS),
        };
        env.storage().instance().set(
            &DataKey::Config,
            &VaultConfig {
                identity,
                access_grants,
                notification_hub,
                max_file_size,
                download_ttl_secs,
            },
        );
        Ok(())
    }

    /// Adjust the upload size ceiling and download ticket lifetime.
    /// Admin only.
    pub fn set_limits(
        env: Env,
        caller: Address,
        max_file_size: u64,
        download_ttl_secs: u64,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut config = Self::load_config(&env)?;
        config.max_file_size = max_file_size;
        config.download_ttl_secs = download_ttl_secs;
        env.storage().instance().set(&DataKey::Config, &config);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Commits
    // ------------------------------------------------------------------

    /// Append one immutable version. `record_id = None` creates the record
    /// (version 1); `Some(id)` appends to an existing chain.
    ///
    /// The committer must be the owner or hold an active read-write grant
    /// covering this record's type. Intentionally non-idempotent: every
    /// call is a new commit.
    #[allow(clippy::too_many_arguments)]
    pub fn commit_version(
        env: Env,
        committer: Address,
        record_id: Option<u64>,
        owner: Address,
        record_type: RecordType,
        title: String,
        tags: Vec<String>,
        commit_message: String,
        file_ref: String,
        file_name: String,
        file_size: u64,
    ) -> Result<CommitReceipt, Error> {
        Self::require_initialized(&env)?;
        committer.require_auth();
        let config = Self::load_config(&env)?;

        validation::validate_commit_message(&commit_message)?;
        validation::validate_file_ref(&file_ref)?;
        validation::validate_file_name(&file_name)?;
        validation::validate_file_size(file_size, config.max_file_size)?;

        // Resolve the record before writing anything.
        let mut record = match record_id {
            None => {
                validation::validate_title(&title)?;
                validation::validate_tags(&tags)?;
                None
            }
            Some(id) => {
                let existing = Self::load_live_record(&env, id)?;
                if existing.owner != owner || existing.record_type != record_type {
                    return Err(Error::ScopeMismatch);
                }
                Some(existing)
            }
        };

        if committer != owner
            && !Self::query_can_write(&env, &config, &committer, &owner, record_type)
        {
            return Err(Error::NotAuthorized);
        }

        let now = env.ledger().timestamp();
        let committer_role = Self::query_role(&env, &config, &committer);

        let record = match record.take() {
            Some(mut existing) => {
                existing.current_version_number += 1;
                existing.updated_at = now;
                existing
            }
            None => {
                let new_id = Self::next_id(&env, &DataKey::RecordCount);
                let new_record = Record {
                    id: new_id,
                    owner: owner.clone(),
                    record_type,
                    title: title.clone(),
                    tags: tags.clone(),
                    current_version_number: 1,
                    current_version_id: 0, // patched below
                    created_at: now,
                    updated_at: now,
                    is_deleted: false,
                };
                Self::push_id(&env, &DataKey::OwnerRecords(owner.clone()), new_id);
                events::emit_record_created(&env, new_id, owner.clone(), record_type as u32);
                new_record
            }
        };

        let version_id = Self::next_id(&env, &DataKey::VersionCount);
        let version = Version {
            id: version_id,
            record_id: record.id,
            version_number: record.current_version_number,
            file_ref,
            file_name,
            file_size,
            commit_message,
            committed_by: committer.clone(),
            committed_by_role: committer_role,
            created_at: now,
        };
        env.storage()
            .persistent()
            .set(&DataKey::Version(version_id), &version);
        Self::push_id(&env, &DataKey::RecordVersions(record.id), version_id);
        Self::push_id(&env, &DataKey::OwnerCommits(owner.clone()), version_id);
        if committer_role == Role::Doctor {
            Self::push_id(&env, &DataKey::DoctorCommits(committer.clone()), now);
        }

        let mut record = record;
        record.current_version_id = version_id;
        env.storage()
            .persistent()
            .set(&DataKey::Record(record.id), &record);

        events::emit_version_committed(
            &env,
            record.id,
            version_id,
            record.current_version_number,
            committer.clone(),
        );
        if committer != owner {
            Self::notify_owner(&env, &config, record.id, &owner);
        }
        Ok(CommitReceipt {
            record_id: record.id,
            version_id,
            version_number: record.current_version_number,
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn get_record(env: Env, record_id: u64, requester: Address) -> Result<Record, Error> {
        Self::require_initialized(&env)?;
        requester.require_auth();
        let config = Self::load_config(&env)?;

        let record = Self::load_live_record(&env, record_id)?;
        Self::require_read(&env, &config, &requester, &record)?;
        Ok(record)
    }

    /// `owner` sees all of their records; another caller sees the subset
    /// of live records whose type they hold a read grant for.
    pub fn list_records(env: Env, owner: Address, requester: Address) -> Result<Vec<Record>, Error> {
        Self::require_initialized(&env)?;
        requester.require_auth();
        let config = Self::load_config(&env)?;

        let ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&DataKey::OwnerRecords(owner.clone()))
            .unwrap_or(Vec::new(&env));

        // One authorization query per record type, not per record.
        let mut type_readable: [Option<bool>; 7] = [None; 7];
        let mut out: Vec<Record> = Vec::new(&env);
        for record_id in ids.iter() {
            let record: Record = match env.storage().persistent().get(&DataKey::Record(record_id)) {
                Some(r) => r,
                None => continue,
            };
            if record.is_deleted {
                continue;
            }
            if requester != owner {
                let slot = record.record_type as usize;
                let readable = match type_readable[slot] {
                    Some(cached) => cached,
                    None => {
                        let fresh = Self::query_can_read(
                            &env,
                            &config,
                            &requester,
                            &owner,
                            record.record_type,
                        );
                        type_readable[slot] = Some(fresh);
                        fresh
                    }
                };
                if !readable {
                    continue;
                }
            }
            out.push_back(record);
        }
        Ok(out)
    }

    /// The record's full version chain, ascending 1..N.
    pub fn list_versions(
        env: Env,
        record_id: u64,
        requester: Address,
    ) -> Result<Vec<Version>, Error> {
        Self::require_initialized(&env)?;
        requester.require_auth();
        let config = Self::load_config(&env)?;

        let record = Self::load_live_record(&env, record_id)?;
        Self::require_read(&env, &config, &requester, &record)?;

        let version_ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&DataKey::RecordVersions(record_id))
            .unwrap_or(Vec::new(&env));
        let mut out: Vec<Version> = Vec::new(&env);
        for version_id in version_ids.iter() {
            if let Some(version) = env
                .storage()
                .persistent()
                .get::<DataKey, Version>(&DataKey::Version(version_id))
            {
                out.push_back(version);
            }
        }
        Ok(out)
    }

    /// Every commit across `owner`'s live records, newest first. Non-owner
    /// callers see only commits on record types they may read.
    pub fn list_owner_commits(
        env: Env,
        owner: Address,
        requester: Address,
    ) -> Result<Vec<Version>, Error> {
        Self::require_initialized(&env)?;
        requester.require_auth();
        let config = Self::load_config(&env)?;

        let commit_ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&DataKey::OwnerCommits(owner.clone()))
            .unwrap_or(Vec::new(&env));

        let mut type_readable: [Option<bool>; 7] = [None; 7];
        let mut out: Vec<Version> = Vec::new(&env);
        let mut idx = commit_ids.len();
        while idx > 0 {
            idx -= 1;
            let version_id = match commit_ids.get(idx) {
                Some(id) => id,
                None => break,
            };
            let version: Version = match env
                .storage()
                .persistent()
                .get(&DataKey::Version(version_id))
            {
                Some(v) => v,
                None => continue,
            };
            let record: Record = match env
                .storage()
                .persistent()
                .get(&DataKey::Record(version.record_id))
            {
                Some(r) => r,
                None => continue,
            };
            if record.is_deleted {
                continue;
            }
            if requester != owner {
                let slot = record.record_type as usize;
                let readable = match type_readable[slot] {
                    Some(cached) => cached,
                    None => {
                        let fresh = Self::query_can_read(
                            &env,
                            &config,
                            &requester,
                            &owner,
                            record.record_type,
                        );
                        type_readable[slot] = Some(fresh);
                        fresh
                    }
                };
                if !readable {
                    continue;
                }
            }
            out.push_back(version);
        }
        Ok(out)
    }

    /// Resolve a time-limited blob locator for one version, under the same
    /// read authorization as `list_versions`.
    pub fn resolve_download(
        env: Env,
        record_id: u64,
        version_id: u64,
        requester: Address,
    ) -> Result<DownloadTicket, Error> {
        Self::require_initialized(&env)?;
        requester.require_auth();
        let config = Self::load_config(&env)?;

        let record = Self::load_live_record(&env, record_id)?;
        Self::require_read(&env, &config, &requester, &record)?;

        let version: Version = env
            .storage()
            .persistent()
            .get(&DataKey::Version(version_id))
            .ok_or(Error::VersionNotFound)?;
        if version.record_id != record_id {
            return Err(Error::VersionNotFound);
        }

        let now = env.ledger().timestamp();
        let expires_at = now + config.download_ttl_secs;
        events::emit_download_resolved(&env, record_id, version_id, requester, expires_at);
        Ok(DownloadTicket {
            file_ref: version.file_ref,
            version_id,
            issued_at: now,
            expires_at,
        })
    }

    /// Commit timestamps of a doctor's versions, oldest first. Consumed by
    /// the activity aggregator as raw event history.
    pub fn get_commit_times(env: Env, doctor: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::DoctorCommits(doctor))
            .unwrap_or(Vec::new(&env))
    }

    // ------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------

    /// Tombstone a record and its whole version chain. Owner only; there
    /// is no partial deletion. A tombstoned record reads as not found.
    pub fn delete_record(env: Env, record_id: u64, requester: Address) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        requester.require_auth();

        let mut record = Self::load_live_record(&env, record_id)?;
        if record.owner != requester {
            return Err(Error::NotAuthorized);
        }
        record.is_deleted = true;
        env.storage()
            .persistent()
            .set(&DataKey::Record(record_id), &record);

        events::emit_record_deleted(
            &env,
            record_id,
            record.owner,
            record.current_version_number,
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

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

    fn read_config(env: &Env) -> Option<VaultConfig> {
        env.storage().instance().get(&DataKey::Config)
    }

    fn load_config(env: &Env) -> Result<VaultConfig, Error> {
        Self::read_config(env).ok_or(Error::ContractsNotSet)
    }

    fn next_id(env: &Env, key: &DataKey) -> u64 {
        let current: u64 = env.storage().persistent().get(key).unwrap_or(0);
        let next = current + 1;
        env.storage().persistent().set(key, &next);
        next
    }

    fn push_id(env: &Env, key: &DataKey, value: u64) {
        let mut ids: Vec<u64> = env.storage().persistent().get(key).unwrap_or(Vec::new(env));
        ids.push_back(value);
        env.storage().persistent().set(key, &ids);
    }

    /// Live = exists and not tombstoned. Tombstones read as not found.
    fn load_live_record(env: &Env, record_id: u64) -> Result<Record, Error> {
        let record: Record = env
            .storage()
            .persistent()
            .get(&DataKey::Record(record_id))
            .ok_or(Error::RecordNotFound)?;
        if record.is_deleted {
            return Err(Error::RecordNotFound);
        }
        Ok(record)
    }

    fn require_read(
        env: &Env,
        config: &VaultConfig,
        requester: &Address,
        record: &Record,
    ) -> Result<(), Error> {
        if *requester == record.owner {
            return Ok(());
        }
        if Self::query_can_read(env, config, requester, &record.owner, record.record_type) {
            return Ok(());
        }
        Err(Error::NotAuthorized)
    }

    fn query_can_read(
        env: &Env,
        config: &VaultConfig,
        requester: &Address,
        owner: &Address,
        record_type: RecordType,
    ) -> bool {
        Self::query_grant(env, config, "can_read", requester, owner, record_type)
    }

    fn query_can_write(
        env: &Env,
        config: &VaultConfig,
        requester: &Address,
        owner: &Address,
        record_type: RecordType,
    ) -> bool {
        Self::query_grant(env, config, "can_write", requester, owner, record_type)
    }

    fn query_grant(
        env: &Env,
        config: &VaultConfig,
        func: &str,
        requester: &Address,
        owner: &Address,
        record_type: RecordType,
    ) -> bool {
        env.invoke_contract::<bool>(
            &config.access_grants,
            &Symbol::new(env, func),
            vec![
                env,
                requester.into_val(env),
                owner.into_val(env),
                (record_type as u32).into_val(env),
            ],
        )
    }

    fn query_role(env: &Env, config: &VaultConfig, user: &Address) -> Role {
        let repr = env.invoke_contract::<u32>(
            &config.identity,
            &Symbol::new(env, "get_role"),
            vec![env, user.into_val(env)],
        );
        Role::from_u32(repr)
    }

    /// Fire-and-forget owner notification on a non-owner commit.
    fn notify_owner(env: &Env, config: &VaultConfig, record_id: u64, owner: &Address) {
        let result = env.try_invoke_contract::<u64, soroban_sdk::Error>(
            &config.notification_hub,
            &Symbol::new(env, "emit_notification"),
            vec![
                env,
                env.current_contract_address().into_val(env),
                owner.into_val(env),
                NOTIF_RECORD_UPDATED.into_val(env),
                String::from_str(env, "Record updated").into_val(env),
                String::from_str(env, "A collaborating doctor committed a new version to your record.")
                    .into_val(env),
                Some(record_id).into_val(env),
            ],
        );
        if !matches!(result, Ok(Ok(_))) {
            events::emit_notify_failed(env, record_id, owner.clone());
        }
    }
}
