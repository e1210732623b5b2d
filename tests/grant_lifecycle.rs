//! Grant lifecycle across the wired deployment: request, response, use of
//! the grant against the vault, revocation, expiry.

use soroban_sdk::{testutils::Ledger, vec, Env};

use crate::common::{self, commit, request_access, s, DAY};
use access_grants::{AccessLevel, Error as GrantError, RecordScope, RecordType, RequestStatus};
use record_vault::{Error as VaultError, RecordType as VaultRecordType};

const LAB: u32 = RecordType::LabReport as u32;
const XRAY: u32 = RecordType::Xray as u32;

#[test]
fn test_request_approve_use_revoke() {
    let env = Env::default();
    let world = common::setup(&env);
    let record_id = commit(
        &world,
        &env,
        &world.patient,
        None,
        VaultRecordType::LabReport,
        "baseline",
    )
    .record_id;

    // Request: the patient sees it, the doctor has no access yet.
    let request_id = request_access(&world, &env, AccessLevel::ReadWrite, RecordScope::All, 30);
    let incoming = world.grants.list_incoming(&world.patient);
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming.get(0).unwrap().status, RequestStatus::Pending);
    assert!(!world.grants.can_read(&world.doctor, &world.patient, &LAB));

    // Approval opens both read and write paths through the vault.
    world.grants.respond(&request_id, &world.patient, &true);
    assert!(world.grants.can_write(&world.doctor, &world.patient, &LAB));
    assert_eq!(world.vault.list_versions(&record_id, &world.doctor).len(), 1);
    let receipt = commit(
        &world,
        &env,
        &world.doctor,
        Some(record_id),
        VaultRecordType::LabReport,
        "doctor note",
    );
    assert_eq!(receipt.version_number, 2);
    assert_eq!(world.grants.list_collaborators(&world.patient).len(), 1);

    // Revocation closes them again, immediately.
    world.grants.revoke(&request_id, &world.patient);
    assert!(!world.grants.can_read(&world.doctor, &world.patient, &LAB));
    assert!(matches!(
        world.vault.try_list_versions(&record_id, &world.doctor),
        Err(Ok(VaultError::NotAuthorized))
    ));
    assert_eq!(world.grants.list_collaborators(&world.patient).len(), 0);

    // The audit trail keeps the terminal request.
    let row = world.grants.get_request(&request_id);
    assert_eq!(row.status, RequestStatus::Revoked);
}

#[test]
fn test_denied_request_grants_nothing() {
    let env = Env::default();
    let world = common::setup(&env);
    let request_id = request_access(&world, &env, AccessLevel::Read, RecordScope::All, 30);
    world.grants.respond(&request_id, &world.patient, &false);

    assert!(!world.grants.can_read(&world.doctor, &world.patient, &LAB));
    let row = world.grants.get_request(&request_id);
    assert_eq!(row.status, RequestStatus::Denied);
    assert!(row.expires_at.is_none());
}

#[test]
fn test_scope_limits_grant_to_named_types() {
    let env = Env::default();
    let world = common::setup(&env);
    let lab_record = commit(
        &world,
        &env,
        &world.patient,
        None,
        VaultRecordType::LabReport,
        "baseline",
    )
    .record_id;
    let xray_record = commit(
        &world,
        &env,
        &world.patient,
        None,
        VaultRecordType::Xray,
        "baseline",
    )
    .record_id;

    let request_id = request_access(
        &world,
        &env,
        AccessLevel::Read,
        RecordScope::Specific(vec![&env, RecordType::LabReport]),
        30,
    );
    world.grants.respond(&request_id, &world.patient, &true);

    assert!(world.grants.can_read(&world.doctor, &world.patient, &LAB));
    assert!(!world.grants.can_read(&world.doctor, &world.patient, &XRAY));
    assert_eq!(world.vault.list_versions(&lab_record, &world.doctor).len(), 1);
    assert!(matches!(
        world.vault.try_list_versions(&xray_record, &world.doctor),
        Err(Ok(VaultError::NotAuthorized))
    ));
}

#[test]
fn test_authorization_is_union_of_grants() {
    let env = Env::default();
    let world = common::setup(&env);

    let lab_grant = request_access(
        &world,
        &env,
        AccessLevel::Read,
        RecordScope::Specific(vec![&env, RecordType::LabReport]),
        30,
    );
    let xray_grant = request_access(
        &world,
        &env,
        AccessLevel::ReadWrite,
        RecordScope::Specific(vec![&env, RecordType::Xray]),
        30,
    );
    world.grants.respond(&lab_grant, &world.patient, &true);
    world.grants.respond(&xray_grant, &world.patient, &true);

    assert!(world.grants.can_read(&world.doctor, &world.patient, &LAB));
    assert!(world.grants.can_read(&world.doctor, &world.patient, &XRAY));
    // Write level comes only from the grant whose scope covers the type.
    assert!(!world.grants.can_write(&world.doctor, &world.patient, &LAB));
    assert!(world.grants.can_write(&world.doctor, &world.patient, &XRAY));
}

#[test]
fn test_expiry_is_lazy_and_sweep_is_silent() {
    let env = Env::default();
    let world = common::setup(&env);
    let request_id = request_access(&world, &env, AccessLevel::Read, RecordScope::All, 1);
    world.grants.respond(&request_id, &world.patient, &true);
    assert!(world.grants.can_read(&world.doctor, &world.patient, &LAB));

    // Past the deadline the grant stops working before any sweep runs.
    env.ledger().with_mut(|l| l.timestamp += 2 * DAY);
    assert!(!world.grants.can_read(&world.doctor, &world.patient, &LAB));
    assert_eq!(
        world.grants.get_request(&request_id).status,
        RequestStatus::Approved
    );

    // The sweep records the terminal state without notifying anyone.
    let doctor_unread = world.hub.unread_count(&world.doctor);
    let patient_unread = world.hub.unread_count(&world.patient);
    assert_eq!(world.grants.sweep_expired(), 1);
    assert_eq!(
        world.grants.get_request(&request_id).status,
        RequestStatus::Expired
    );
    assert_eq!(world.hub.unread_count(&world.doctor), doctor_unread);
    assert_eq!(world.hub.unread_count(&world.patient), patient_unread);

    // Nothing left for a second sweep.
    assert_eq!(world.grants.sweep_expired(), 0);
}

#[test]
fn test_settled_requests_reject_further_transitions() {
    let env = Env::default();
    let world = common::setup(&env);
    let request_id = request_access(&world, &env, AccessLevel::Read, RecordScope::All, 30);
    world.grants.respond(&request_id, &world.patient, &true);

    assert!(matches!(
        world.grants.try_respond(&request_id, &world.patient, &false),
        Err(Ok(GrantError::InvalidStatus))
    ));
    world.grants.revoke(&request_id, &world.patient);
    assert!(matches!(
        world.grants.try_revoke(&request_id, &world.patient),
        Err(Ok(GrantError::InvalidStatus))
    ));
}

#[test]
fn test_owner_needs_no_grant() {
    let env = Env::default();
    let world = common::setup(&env);
    let record_id = commit(
        &world,
        &env,
        &world.patient,
        None,
        VaultRecordType::Prescription,
        "baseline",
    )
    .record_id;

    assert!(world.grants.can_write(&world.patient, &world.patient, &LAB));
    let version_id = world
        .vault
        .get_record(&record_id, &world.patient)
        .current_version_id;
    let ticket = world
        .vault
        .resolve_download(&record_id, &version_id, &world.patient);
    assert_eq!(ticket.file_ref, s(&env, "blob://payload"));
}
