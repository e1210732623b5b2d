//! Version history under interleaved committers and grant changes.

use soroban_sdk::Env;

use crate::common::{self, commit, request_access};
use access_grants::{AccessLevel, RecordScope};
use record_vault::{Error as VaultError, RecordType, Role};

#[test]
fn test_interleaved_committers_keep_numbers_continuous() {
    let env = Env::default();
    let world = common::setup(&env);
    let request_id = request_access(&world, &env, AccessLevel::ReadWrite, RecordScope::All, 30);
    world.grants.respond(&request_id, &world.patient, &true);

    let record_id = commit(
        &world,
        &env,
        &world.patient,
        None,
        RecordType::LabReport,
        "baseline",
    )
    .record_id;
    for turn in 0..5u32 {
        let committer = if turn % 2 == 0 {
            &world.doctor
        } else {
            &world.patient
        };
        let receipt = commit(
            &world,
            &env,
            committer,
            Some(record_id),
            RecordType::LabReport,
            "follow-up",
        );
        assert_eq!(receipt.version_number, turn + 2);
    }

    let versions = world.vault.list_versions(&record_id, &world.patient);
    assert_eq!(versions.len(), 6);
    for (idx, version) in versions.iter().enumerate() {
        assert_eq!(version.version_number, idx as u32 + 1);
        let expected_role = if idx == 0 || idx % 2 == 0 {
            Role::Patient
        } else {
            Role::Doctor
        };
        assert_eq!(version.committed_by_role, expected_role);
    }

    let record = world.vault.get_record(&record_id, &world.patient);
    assert_eq!(record.current_version_number, 6);
    assert_eq!(record.current_version_id, versions.get(5).unwrap().id);
}

#[test]
fn test_history_survives_revocation() {
    let env = Env::default();
    let world = common::setup(&env);
    let request_id = request_access(&world, &env, AccessLevel::ReadWrite, RecordScope::All, 30);
    world.grants.respond(&request_id, &world.patient, &true);

    let record_id = commit(
        &world,
        &env,
        &world.patient,
        None,
        RecordType::LabReport,
        "baseline",
    )
    .record_id;
    commit(
        &world,
        &env,
        &world.doctor,
        Some(record_id),
        RecordType::LabReport,
        "doctor note",
    );
    world.grants.revoke(&request_id, &world.patient);

    // The owner still reads the full history, the doctor's version included.
    let versions = world.vault.list_versions(&record_id, &world.patient);
    assert_eq!(versions.len(), 2);
    assert_eq!(versions.get(1).unwrap().committed_by, world.doctor);
}

#[test]
fn test_deletion_closes_history_for_grant_holders_too() {
    let env = Env::default();
    let world = common::setup(&env);
    let request_id = request_access(&world, &env, AccessLevel::Read, RecordScope::All, 30);
    world.grants.respond(&request_id, &world.patient, &true);

    let record_id = commit(
        &world,
        &env,
        &world.patient,
        None,
        RecordType::LabReport,
        "baseline",
    )
    .record_id;
    assert_eq!(world.vault.list_versions(&record_id, &world.doctor).len(), 1);

    world.vault.delete_record(&record_id, &world.patient);
    assert!(matches!(
        world.vault.try_list_versions(&record_id, &world.doctor),
        Err(Ok(VaultError::RecordNotFound))
    ));
    assert_eq!(
        world.vault.list_records(&world.patient, &world.doctor).len(),
        0
    );
}
