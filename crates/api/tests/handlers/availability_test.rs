use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use fitclub_api::middleware::error_handling::AppError;
use fitclub_core::{
    errors::ClubError,
    models::availability::{DayOfWeek, SetAvailabilityRequest, WindowRequest},
    scheduling,
};

use crate::test_utils::TestContext;

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn window(day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> WindowRequest {
    WindowRequest {
        day,
        start_time: start,
        end_time: end,
    }
}

// Replicates the replacement flow of the set_availability handler: validate
// the proposed set, then delete the old windows and insert the new ones.
async fn set_availability_wrapper(
    ctx: &mut TestContext,
    trainer_id: Uuid,
    payload: SetAvailabilityRequest,
) -> Result<usize, AppError> {
    if let Err(issues) = scheduling::validate_windows(&payload.windows) {
        return Err(AppError(ClubError::Validation(format!(
            "Invalid availability windows: {issues:?}"
        ))));
    }

    ctx.availability_repo
        .delete_windows_by_trainer_id(trainer_id)
        .await?;

    for window in &payload.windows {
        ctx.availability_repo
            .create_window(
                trainer_id,
                window.day.index(),
                window.start_time,
                window.end_time,
            )
            .await?;
    }

    Ok(payload.windows.len())
}

#[tokio::test]
async fn test_valid_window_set_replaces_existing_windows() {
    let mut ctx = TestContext::new();
    let trainer_id = Uuid::new_v4();

    ctx.availability_repo
        .expect_delete_windows_by_trainer_id()
        .times(1)
        .returning(|_| Ok(()));
    ctx.availability_repo
        .expect_create_window()
        .times(2)
        .returning(|trainer_id, day, start, end| {
            Ok(crate::test_utils::db_window(trainer_id, day, start, end))
        });

    let payload = SetAvailabilityRequest {
        windows: vec![
            window(DayOfWeek::Monday, time(6, 0), time(12, 0)),
            window(DayOfWeek::Monday, time(13, 0), time(21, 0)),
        ],
    };

    let created = set_availability_wrapper(&mut ctx, trainer_id, payload).await.unwrap();
    assert_eq!(created, 2);
}

#[tokio::test]
async fn test_overlapping_window_set_never_reaches_the_database() {
    let mut ctx = TestContext::new();

    ctx.availability_repo.expect_delete_windows_by_trainer_id().times(0);
    ctx.availability_repo.expect_create_window().times(0);

    let payload = SetAvailabilityRequest {
        windows: vec![
            window(DayOfWeek::Monday, time(6, 0), time(12, 0)),
            window(DayOfWeek::Monday, time(11, 0), time(15, 0)),
        ],
    };

    let result = set_availability_wrapper(&mut ctx, Uuid::new_v4(), payload).await;
    assert!(matches!(result, Err(AppError(ClubError::Validation(_)))));
}

#[tokio::test]
async fn test_inverted_range_is_rejected() {
    let mut ctx = TestContext::new();

    ctx.availability_repo.expect_delete_windows_by_trainer_id().times(0);
    ctx.availability_repo.expect_create_window().times(0);

    let payload = SetAvailabilityRequest {
        windows: vec![window(DayOfWeek::Friday, time(18, 0), time(9, 0))],
    };

    let result = set_availability_wrapper(&mut ctx, Uuid::new_v4(), payload).await;
    assert!(matches!(result, Err(AppError(ClubError::Validation(_)))));
}
