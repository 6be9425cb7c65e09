//! Tests for the feedback intake service

use super::*;
use crate::auth::StaticBearerToken;
use crate::error::{ErrorKind, FeedbackError};
use crate::roster::{EmployeeId, Roster};
use crate::storage::{FeedbackStore, MemoryStore, SubmissionLedger};
use chrono::{FixedOffset, TimeZone, Utc};
use serde_json::{json, Map, Value};
use std::sync::Arc;

const TOKEN: &str = "test-token";

fn service_with(store: Arc<MemoryStore>) -> FeedbackService {
    FeedbackService::new(
        Arc::new(Roster::builtin()),
        store,
        Arc::new(StaticBearerToken::new(TOKEN)),
    )
}

/// A complete, valid submission from employee `number` with every rating `score`
fn full_submission(roster: &Roster, number: u32, score: i64) -> SubmissionRequest {
    let evaluator = roster.find_by_number(number).unwrap();
    let mut ratings = Map::new();
    let mut reasons = Map::new();
    for other in roster.iter().filter(|e| e.id != evaluator.id) {
        ratings.insert(other.id.to_string(), json!(score));
        if Rating::new(score).is_some_and(Rating::needs_reason) {
            reasons.insert(other.id.to_string(), json!(format!("Worked with {}", other.name)));
        }
    }

    SubmissionRequest {
        evaluator: Some(EvaluatorClaim {
            id: Some(json!(evaluator.id.0)),
            name: Some(evaluator.name.clone()),
            number: Some(json!(evaluator.number)),
        }),
        ratings: Some(ratings),
        reasons: Some(reasons),
        timestamp: Some(json!("2026-10-16T09:30:00.000Z")),
    }
}

#[tokio::test]
async fn test_uniform_submission_succeeds() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());
    let request = full_submission(service.roster(), 1, 5);

    let ack = service.submit(&request).await.unwrap();

    assert!(ack.success);
    assert_eq!(ack.metadata.total_ratings, 52);
    assert_eq!(ack.metadata.average_rating, "5.00");
    assert_eq!(ack.metadata.low_scores, 0);
    assert_eq!(ack.metadata.high_scores, 0);

    let records = store.load_records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, ack.submission_id);
    assert_eq!(records[0].evaluator.designation, "Office Superintendent");
    assert_eq!(records[0].timestamp, json!("2026-10-16T09:30:00.000Z"));

    let ledger = store.load_ledger().await.unwrap();
    assert_eq!(ledger.total_submissions, 1);
    assert_eq!(ledger.submissions[0].employee_id, EmployeeId(1));
    assert_eq!(ledger.submissions[0].submitted_at, records[0].server_timestamp);
}

#[tokio::test]
async fn test_second_submission_is_duplicate() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());
    let request = full_submission(service.roster(), 7, 6);

    service.submit(&request).await.unwrap();
    let first_completed_at = store.load_records().await.unwrap()[0].completed_at.clone();

    let err = service.submit(&request).await.unwrap_err();
    match err {
        FeedbackError::DuplicateSubmission { submitted_at } => {
            assert_eq!(submitted_at, first_completed_at)
        }
        other => panic!("expected duplicate, got {other:?}"),
    }

    assert_eq!(store.load_records().await.unwrap().len(), 1);
    assert_eq!(store.load_ledger().await.unwrap().total_submissions, 1);
}

#[tokio::test]
async fn test_validation_failure_writes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());
    let mut request = full_submission(service.roster(), 3, 5);
    request.ratings.as_mut().unwrap().insert("3".to_string(), json!(5));

    let err = service.submit(&request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SelfRating);
    assert!(store.load_records().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_extreme_ratings_need_and_keep_reasons() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());
    let request = full_submission(service.roster(), 2, 10);

    let ack = service.submit(&request).await.unwrap();
    assert_eq!(ack.metadata.high_scores, 52);
    assert_eq!(ack.metadata.average_rating, "10.00");

    let record = &store.load_records().await.unwrap()[0];
    assert_eq!(record.reasons.len(), 52);
    assert_eq!(record.reasons[&EmployeeId(1)], "Worked with Jitendra Nikhade");
}

#[tokio::test]
async fn test_ledger_failure_still_counts_as_submitted() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());
    store.fail_ledger_writes(true);

    let request = full_submission(service.roster(), 4, 5);
    assert!(service.submit(&request).await.is_ok());
    assert_eq!(store.load_records().await.unwrap().len(), 1);
    assert_eq!(store.load_ledger().await.unwrap().total_submissions, 0);

    // Still a duplicate, because the feedback store is authoritative
    let err = service.submit(&request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateSubmission);

    store.fail_ledger_writes(false);
    assert!(service.reconcile_ledger().await.unwrap());
    assert_eq!(service.stats().await.unwrap().total_submissions, 1);
}

#[tokio::test]
async fn test_feedback_write_failure_is_storage_error() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());
    store.fail_record_writes(true);

    let err = service
        .submit(&full_submission(service.roster(), 5, 5))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageFailure);
    assert_eq!(store.load_ledger().await.unwrap().total_submissions, 0);
}

#[tokio::test]
async fn test_stats_track_submissions() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total_employees, 53);
    assert_eq!(stats.total_submissions, 0);
    assert_eq!(stats.remaining, 53);
    assert_eq!(stats.completion_percentage, "0.0");

    for number in [1, 2, 3] {
        service
            .submit(&full_submission(service.roster(), number, 5))
            .await
            .unwrap();
    }

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total_submissions, 3);
    assert_eq!(stats.remaining, 50);
    // 300 / 53 = 5.66
    assert_eq!(stats.completion_percentage, "5.7");
}

#[tokio::test]
async fn test_check_submission() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());

    let status = service.check_submission(9).await.unwrap();
    assert!(!status.has_submitted);
    assert!(status.submitted_at.is_none());
    assert_eq!(status.employee_info.name, "Hemant Kadnake");

    service
        .submit(&full_submission(service.roster(), 9, 5))
        .await
        .unwrap();

    let status = service.check_submission(9).await.unwrap();
    assert!(status.has_submitted);
    assert_eq!(
        status.submitted_at,
        Some(store.load_records().await.unwrap()[0].completed_at.clone())
    );

    let err = service.check_submission(15).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_list_all_requires_credentials() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());
    service
        .submit(&full_submission(service.roster(), 1, 5))
        .await
        .unwrap();

    for bad in [None, Some("Bearer wrong"), Some(TOKEN)] {
        let err = service.list_all(bad).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    let header = format!("Bearer {TOKEN}");
    let records = service.list_all(Some(&header)).await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_record_ids_are_unique() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());

    for number in 1..=10 {
        service
            .submit(&full_submission(service.roster(), number, 5))
            .await
            .unwrap();
    }

    let mut ids: Vec<i64> = store
        .load_records()
        .await
        .unwrap()
        .iter()
        .map(|r| r.id.parse().unwrap())
        .collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

#[tokio::test]
async fn test_concurrent_duplicates_commit_once() {
    let store = Arc::new(MemoryStore::new());
    let service = Arc::new(service_with(store.clone()));
    let request = full_submission(service.roster(), 12, 5);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        let request = request.clone();
        handles.push(tokio::spawn(async move { service.submit(&request).await }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::DuplicateSubmission),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.load_records().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_distinct_evaluators_all_commit() {
    let store = Arc::new(MemoryStore::new());
    let service = Arc::new(service_with(store.clone()));

    let mut handles = Vec::new();
    for number in 20..30 {
        let service = service.clone();
        let request = full_submission(service.roster(), number, 5);
        handles.push(tokio::spawn(async move { service.submit(&request).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.load_records().await.unwrap().len(), 10);
    assert_eq!(store.load_ledger().await.unwrap().total_submissions, 10);
}

#[tokio::test]
async fn test_rebuild_and_reconcile_ledger() {
    let store = Arc::new(MemoryStore::new());
    let service = service_with(store.clone());
    for number in [1, 2] {
        service
            .submit(&full_submission(service.roster(), number, 5))
            .await
            .unwrap();
    }

    assert!(!service.reconcile_ledger().await.unwrap());

    store.save_ledger(&SubmissionLedger::default()).await.unwrap();
    assert!(service.reconcile_ledger().await.unwrap());
    assert_eq!(store.load_ledger().await.unwrap().total_submissions, 2);

    let ledger = service.rebuild_ledger().await.unwrap();
    assert_eq!(ledger.submissions.len(), 2);
    assert_eq!(ledger.submissions[1].employee_id, EmployeeId(2));
}

#[tokio::test]
async fn test_completion_offset_is_configurable() {
    let store = Arc::new(MemoryStore::new());
    let service =
        service_with(store.clone()).with_completion_offset(FixedOffset::east_opt(0).unwrap());

    service
        .submit(&full_submission(service.roster(), 1, 5))
        .await
        .unwrap();
    let record = &store.load_records().await.unwrap()[0];
    assert_eq!(
        record.completed_at,
        format_completion_time(record.server_timestamp, FixedOffset::east_opt(0).unwrap())
    );
}

#[test]
fn test_completion_time_format() {
    let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 34, 5).unwrap();
    let ist = FixedOffset::east_opt(DEFAULT_COMPLETION_OFFSET_SECS).unwrap();

    assert_eq!(
        format_completion_time(at, ist),
        "Friday, 16 October 2026 at 3:04:05 pm"
    );
}

#[test]
fn test_request_accepts_wire_shape() {
    let request: SubmissionRequest = serde_json::from_value(json!({
        "evaluator": {"id": 1, "name": "Jitendra Nikhade", "number": 1},
        "ratings": {"2": 5, "3": "6"},
        "timestamp": "2026-10-16T09:30:00.000Z"
    }))
    .unwrap();

    assert!(request.reasons.is_none());
    assert_eq!(request.ratings.as_ref().unwrap()["3"], Value::from("6"));
}
