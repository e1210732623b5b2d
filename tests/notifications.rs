//! Pull-based notification consistency across the producing contracts.

use soroban_sdk::Env;

use crate::common::{self, commit, request_access, s};
use access_grants::{AccessLevel, RecordScope};
use notification_hub::NotificationType;
use record_vault::RecordType;

#[test]
fn test_workflow_produces_matching_inbox() {
    let env = Env::default();
    let world = common::setup(&env);

    let record_id = commit(
        &world,
        &env,
        &world.patient,
        None,
        RecordType::LabReport,
        "baseline",
    )
    .record_id;

    let request_id = request_access(&world, &env, AccessLevel::ReadWrite, RecordScope::All, 30);
    assert_eq!(world.hub.unread_count(&world.patient), 1);

    world.grants.respond(&request_id, &world.patient, &true);
    assert_eq!(world.hub.unread_count(&world.doctor), 1);

    commit(
        &world,
        &env,
        &world.doctor,
        Some(record_id),
        RecordType::LabReport,
        "doctor note",
    );
    assert_eq!(world.hub.unread_count(&world.patient), 2);

    world.grants.revoke(&request_id, &world.patient);
    world
        .metrics
        .endorse(&world.patient, &world.doctor, &s(&env, "Cardiology"), &s(&env, ""));
    assert_eq!(world.hub.unread_count(&world.doctor), 3);

    // Doctor inbox, newest first: endorsement, revocation, response.
    let inbox = world.hub.list_notifications(&world.doctor, &false, &10);
    assert_eq!(inbox.len(), 3);
    assert_eq!(
        inbox.get(0).unwrap().notif_type,
        NotificationType::Endorsement
    );
    assert_eq!(
        inbox.get(1).unwrap().notif_type,
        NotificationType::AccessRevoked
    );
    assert_eq!(inbox.get(1).unwrap().reference_id, Some(request_id));
    assert_eq!(
        inbox.get(2).unwrap().notif_type,
        NotificationType::AccessRequestResponse
    );

    // Patient inbox points back at the request and the record.
    let patient_inbox = world.hub.list_notifications(&world.patient, &false, &10);
    assert_eq!(
        patient_inbox.get(0).unwrap().notif_type,
        NotificationType::RecordUpdated
    );
    assert_eq!(patient_inbox.get(0).unwrap().reference_id, Some(record_id));
    assert_eq!(
        patient_inbox.get(1).unwrap().notif_type,
        NotificationType::AccessRequest
    );
}

#[test]
fn test_read_state_tracks_unread_count() {
    let env = Env::default();
    let world = common::setup(&env);
    let first = request_access(&world, &env, AccessLevel::Read, RecordScope::All, 30);
    request_access(&world, &env, AccessLevel::Read, RecordScope::All, 30);
    assert_eq!(world.hub.unread_count(&world.patient), 2);

    let inbox = world.hub.list_notifications(&world.patient, &true, &10);
    let oldest = inbox.get(1).unwrap();
    assert_eq!(oldest.reference_id, Some(first));

    world.hub.mark_read(&world.patient, &oldest.id);
    assert_eq!(world.hub.unread_count(&world.patient), 1);
    assert_eq!(
        world.hub.list_notifications(&world.patient, &true, &10).len(),
        1
    );

    // Marking again changes nothing.
    world.hub.mark_read(&world.patient, &oldest.id);
    assert_eq!(world.hub.unread_count(&world.patient), 1);

    assert_eq!(world.hub.mark_all_read(&world.patient), 1);
    assert_eq!(world.hub.unread_count(&world.patient), 0);
}
