use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use fitclub_api::middleware::error_handling::AppError;
use fitclub_core::{errors::ClubError, scheduling::ConflictReason};

#[test]
fn test_error_status_mapping() {
    let cases = vec![
        (
            AppError(ClubError::NotFound("missing".to_string())),
            StatusCode::NOT_FOUND,
        ),
        (
            AppError(ClubError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError(ClubError::Conflict(vec![ConflictReason::NotAvailable])),
            StatusCode::CONFLICT,
        ),
        (
            AppError(ClubError::Database(eyre::eyre!("db down"))),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
async fn test_conflict_response_lists_every_violation() {
    let monday_ten = NaiveDate::from_ymd_opt(2026, 8, 3)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    let error = AppError(ClubError::Conflict(vec![
        ConflictReason::NotAvailable,
        ConflictReason::Overlap {
            other_start: monday_ten,
            other_end: monday_ten + chrono::Duration::hours(1),
        },
        ConflictReason::InsufficientGap {
            other_start: monday_ten,
            other_end: monday_ten + chrono::Duration::hours(1),
            gap_minutes: 5,
        },
    ]));

    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body should be JSON");

    let conflicts = body["conflicts"].as_array().expect("conflicts array");
    assert_eq!(conflicts.len(), 3);
    assert_eq!(conflicts[0]["reason"], "not_available");
    assert_eq!(conflicts[1]["reason"], "overlap");
    assert_eq!(conflicts[2]["reason"], "insufficient_gap");
    assert_eq!(conflicts[2]["gap_minutes"], 5);
}
