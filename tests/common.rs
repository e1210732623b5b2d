//! Shared harness: one `Env` with all five contracts registered, wired
//! through `set_contracts`, and a doctor/patient pair on the registry.

use soroban_sdk::{testutils::Address as _, testutils::Ledger, Address, Env, String, Vec};

use access_grants::{AccessGrantsContract, AccessGrantsContractClient, AccessLevel, RecordScope};
use activity_metrics::{ActivityMetricsContract, ActivityMetricsContractClient};
use identity::{IdentityContract, IdentityContractClient};
use notification_hub::{NotificationHubContract, NotificationHubContractClient};
use record_vault::{CommitReceipt, RecordType, RecordVaultContract, RecordVaultContractClient};

pub const DAY: u64 = 86_400;
// Midnight UTC, so hour offsets inside a test stay in one day bucket.
pub const BASE_TS: u64 = 19_700 * DAY;

pub struct World<'a> {
    pub identity: IdentityContractClient<'a>,
    pub grants: AccessGrantsContractClient<'a>,
    pub vault: RecordVaultContractClient<'a>,
    pub hub: NotificationHubContractClient<'a>,
    pub metrics: ActivityMetricsContractClient<'a>,
    pub admin: Address,
    pub doctor: Address,
    pub patient: Address,
}

pub fn setup(env: &Env) -> World<'_> {
    env.mock_all_auths();
    env.ledger().with_mut(|l| l.timestamp = BASE_TS);

    let identity_id = Address::generate(env);
    env.register_contract(&identity_id, IdentityContract);
    let identity = IdentityContractClient::new(env, &identity_id);

    let hub_id = Address::generate(env);
    env.register_contract(&hub_id, NotificationHubContract);
    let hub = NotificationHubContractClient::new(env, &hub_id);

    let grants_id = Address::generate(env);
    env.register_contract(&grants_id, AccessGrantsContract);
    let grants = AccessGrantsContractClient::new(env, &grants_id);

    let vault_id = Address::generate(env);
    env.register_contract(&vault_id, RecordVaultContract);
    let vault = RecordVaultContractClient::new(env, &vault_id);

    let metrics_id = Address::generate(env);
    env.register_contract(&metrics_id, ActivityMetricsContract);
    let metrics = ActivityMetricsContractClient::new(env, &metrics_id);

    let admin = Address::generate(env);
    identity.initialize(&admin);
    hub.initialize(&admin);
    grants.initialize(&admin);
    vault.initialize(&admin);
    metrics.initialize(&admin);

    grants.set_contracts(&admin, &identity_id, &hub_id);
    vault.set_contracts(&admin, &identity_id, &grants_id, &hub_id);
    metrics.set_contracts(&admin, &identity_id, &vault_id, &grants_id, &hub_id);
    hub.add_authorized_sender(&admin, &grants_id);
    hub.add_authorized_sender(&admin, &vault_id);
    hub.add_authorized_sender(&admin, &metrics_id);

    let doctor = Address::generate(env);
    let patient = Address::generate(env);
    identity.register_doctor(&doctor);
    identity.register_patient(&patient);

    World {
        identity,
        grants,
        vault,
        hub,
        metrics,
        admin,
        doctor,
        patient,
    }
}

pub fn s(env: &Env, text: &str) -> String {
    String::from_str(env, text)
}

/// Doctor requests access to the patient's records.
pub fn request_access(
    world: &World,
    env: &Env,
    level: AccessLevel,
    scope: RecordScope,
    expiry_days: u32,
) -> u64 {
    world.grants.create_request(
        &world.doctor,
        &world.patient,
        &s(env, "Ongoing treatment follow-up"),
        &level,
        &scope,
        &expiry_days,
    )
}

/// Commit a version to one of the patient's records, creating the record
/// when `record_id` is `None`.
pub fn commit(
    world: &World,
    env: &Env,
    committer: &Address,
    record_id: Option<u64>,
    record_type: RecordType,
    message: &str,
) -> CommitReceipt {
    world.vault.commit_version(
        committer,
        &record_id,
        &world.patient,
        &record_type,
        &s(env, "Care record"),
        &Vec::new(env),
        &s(env, message),
        &s(env, "blob://payload"),
        &s(env, "document.pdf"),
        &1_024,
    )
}
