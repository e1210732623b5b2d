//! Derived activity aggregates over real vault and grant history.

use soroban_sdk::{testutils::Ledger, Env};

use crate::common::{self, commit, request_access, s, BASE_TS, DAY};
use access_grants::{AccessLevel, RecordScope};
use record_vault::RecordType;

#[test]
fn test_streak_evolves_with_daily_commits() {
    let env = Env::default();
    let world = common::setup(&env);
    let request_id = request_access(&world, &env, AccessLevel::ReadWrite, RecordScope::All, 60);
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

    // A commit a day for three days.
    for day in 1..=3u64 {
        env.ledger().with_mut(|l| l.timestamp = BASE_TS + day * DAY);
        commit(
            &world,
            &env,
            &world.doctor,
            Some(record_id),
            RecordType::LabReport,
            "daily review",
        );
        let summary = world.metrics.summary(&world.doctor, &1);
        assert_eq!(summary.current_streak, day as u32);
    }

    // A skipped day leaves yesterday's streak visible, then resets it.
    env.ledger().with_mut(|l| l.timestamp = BASE_TS + 4 * DAY);
    assert_eq!(world.metrics.summary(&world.doctor, &1).current_streak, 3);
    env.ledger().with_mut(|l| l.timestamp = BASE_TS + 5 * DAY);
    assert_eq!(world.metrics.summary(&world.doctor, &1).current_streak, 0);

    commit(
        &world,
        &env,
        &world.doctor,
        Some(record_id),
        RecordType::LabReport,
        "back again",
    );
    assert_eq!(world.metrics.summary(&world.doctor, &1).current_streak, 1);
}

#[test]
fn test_graph_window_tracks_ledger_clock() {
    let env = Env::default();
    let world = common::setup(&env);
    let request_id = request_access(&world, &env, AccessLevel::ReadWrite, RecordScope::All, 60);
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

    // Today's bucket carries the commit.
    let graph = world.metrics.contribution_graph(&world.doctor, &26);
    assert_eq!(graph.len(), 26 * 7);
    assert_eq!(graph.get(26 * 7 - 1).unwrap().day, BASE_TS / DAY);
    assert_eq!(graph.get(26 * 7 - 1).unwrap().count, 1);

    // A week later the same commit sits seven slots back, and the window
    // still ends at the new today.
    env.ledger().with_mut(|l| l.timestamp = BASE_TS + 7 * DAY);
    let graph = world.metrics.contribution_graph(&world.doctor, &26);
    assert_eq!(graph.get(26 * 7 - 1).unwrap().day, BASE_TS / DAY + 7);
    assert_eq!(graph.get(26 * 7 - 1).unwrap().count, 0);
    assert_eq!(graph.get(26 * 7 - 8).unwrap().count, 1);
}

#[test]
fn test_doctor_stats_reflect_live_grants_and_commits() {
    let env = Env::default();
    let world = common::setup(&env);
    let request_id = request_access(&world, &env, AccessLevel::ReadWrite, RecordScope::All, 10);
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
    world
        .metrics
        .endorse(&world.patient, &world.doctor, &s(&env, "Cardiology"), &s(&env, ""));

    let stats = world.metrics.doctor_stats(&world.doctor);
    assert_eq!(stats.total_cases_handled, 1);
    assert_eq!(stats.active_cases, 1);
    assert_eq!(stats.total_record_commits, 1);
    assert_eq!(stats.record_accuracy_score, 56);

    // Expiry drops the active case but not the handled total.
    env.ledger().with_mut(|l| l.timestamp += 11 * DAY);
    let stats = world.metrics.doctor_stats(&world.doctor);
    assert_eq!(stats.total_cases_handled, 1);
    assert_eq!(stats.active_cases, 0);
}
