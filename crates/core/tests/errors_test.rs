use std::error::Error;

use fitclub_core::errors::{ClubError, ClubResult};
use fitclub_core::scheduling::ConflictReason;

#[test]
fn test_club_error_display() {
    let not_found = ClubError::NotFound("Trainer not found".to_string());
    let validation = ClubError::Validation("Invalid input".to_string());
    let conflict = ClubError::Conflict(vec![ConflictReason::NotAvailable]);
    let database = ClubError::Database(eyre::eyre!("Database connection failed"));
    let internal = ClubError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(not_found.to_string(), "Resource not found: Trainer not found");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(conflict.to_string(), "Booking conflict: 1 rule(s) violated");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let club_error = ClubError::Internal(Box::new(io_error));

    assert!(club_error.source().is_some());
}

#[test]
fn test_club_result() {
    let result: ClubResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: ClubResult<i32> = Err(ClubError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_trait_implementation() {
    let eyre_error = eyre::eyre!("Database error");
    let club_error = ClubError::Database(eyre_error);

    assert!(club_error.to_string().contains("Database error"));
}

#[test]
fn test_conflict_reasons_are_preserved() {
    let reasons = vec![
        ConflictReason::NotAvailable,
        ConflictReason::Overlap {
            other_start: chrono::NaiveDate::from_ymd_opt(2026, 8, 3)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            other_end: chrono::NaiveDate::from_ymd_opt(2026, 8, 3)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap(),
        },
    ];

    let error = ClubError::Conflict(reasons.clone());

    match error {
        ClubError::Conflict(inner) => assert_eq!(inner, reasons),
        other => panic!("Expected conflict error, got {other:?}"),
    }
}
