use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use fitclub_api::middleware::error_handling::AppError;
use fitclub_core::{
    errors::ClubError,
    models::{
        appointment::{AppointmentResponse, AppointmentStatus, CreateAppointmentRequest},
        availability::{AvailabilityWindow, DayOfWeek},
    },
    scheduling::{self, BookingPolicy, ConflictReason, ExistingAppointment, ProposedBooking},
};
use fitclub_db::models::DbAppointment;

use crate::test_utils::{TestContext, db_appointment, db_service, db_trainer, db_window};

// 2026-08-03 is a Monday
fn monday(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 3)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn to_response(appointment: DbAppointment) -> AppointmentResponse {
    AppointmentResponse {
        id: appointment.id,
        branch_id: appointment.branch_id,
        service_id: appointment.service_id,
        trainer_id: appointment.trainer_id,
        member_id: appointment.member_id,
        starts_at: appointment.starts_at,
        ends_at: appointment.ends_at,
        status: AppointmentStatus::from_str(&appointment.status),
        notes: appointment.notes,
        created_at: appointment.created_at,
    }
}

// Replicates the booking flow of the create_appointment handler against
// mock repositories: resolve trainer and service, assemble the read model,
// run the conflict checker, and only then create the row.
async fn create_appointment_wrapper(
    ctx: &mut TestContext,
    payload: CreateAppointmentRequest,
    policy: BookingPolicy,
) -> Result<AppointmentResponse, AppError> {
    let trainer = ctx
        .trainer_repo
        .get_trainer_by_id(payload.trainer_id)
        .await?
        .ok_or_else(|| {
            AppError(ClubError::NotFound(format!(
                "Trainer with ID {} not found",
                payload.trainer_id
            )))
        })?;

    let service = ctx
        .service_repo
        .get_service_by_id(payload.service_id)
        .await?
        .ok_or_else(|| {
            AppError(ClubError::NotFound(format!(
                "Service with ID {} not found",
                payload.service_id
            )))
        })?;

    if trainer.branch_id != payload.branch_id {
        return Err(AppError(ClubError::Validation(
            "Trainer does not work at the requested branch".to_string(),
        )));
    }

    let ends_at = payload.starts_at + Duration::minutes(service.duration_minutes as i64);

    let windows = ctx
        .availability_repo
        .get_windows_by_trainer_id(payload.trainer_id)
        .await?
        .into_iter()
        .filter_map(|window| {
            DayOfWeek::from_index(window.day_of_week).map(|day| AvailabilityWindow {
                id: window.id,
                trainer_id: window.trainer_id,
                day,
                start_time: window.start_time,
                end_time: window.end_time,
            })
        })
        .collect::<Vec<_>>();

    let existing = ctx
        .appointment_repo
        .get_appointments_by_trainer_and_date(payload.trainer_id, payload.starts_at.date())
        .await?
        .into_iter()
        .map(|appointment| ExistingAppointment {
            starts_at: appointment.starts_at,
            ends_at: appointment.ends_at,
            status: AppointmentStatus::from_str(&appointment.status),
        })
        .collect::<Vec<_>>();

    let proposed = ProposedBooking {
        trainer_id: payload.trainer_id,
        starts_at: payload.starts_at,
        duration_minutes: service.duration_minutes as i64,
    };

    if let Err(reasons) = scheduling::validate_booking(&proposed, &windows, &existing, &policy) {
        return Err(AppError(ClubError::Conflict(reasons)));
    }

    let created = ctx
        .appointment_repo
        .create_appointment(
            payload.branch_id,
            payload.service_id,
            payload.trainer_id,
            payload.member_id,
            payload.starts_at,
            ends_at,
            None,
        )
        .await?;

    Ok(to_response(created))
}

// Replicates the approve/cancel lifecycle handlers: fetch, check the
// transition, update the status.
async fn transition_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
    target: AppointmentStatus,
) -> Result<AppointmentResponse, AppError> {
    let appointment = ctx
        .appointment_repo
        .get_appointment_by_id(id)
        .await?
        .ok_or_else(|| {
            AppError(ClubError::NotFound(format!(
                "Appointment with ID {} not found",
                id
            )))
        })?;

    let current = AppointmentStatus::from_str(&appointment.status);
    if !current.can_transition_to(target) {
        return Err(AppError(ClubError::Validation(format!(
            "Appointment cannot change from {} to {}",
            current.as_str(),
            target.as_str()
        ))));
    }

    let updated = ctx
        .appointment_repo
        .update_appointment_status(id, target.as_str())
        .await?
        .ok_or_else(|| {
            AppError(ClubError::NotFound(format!(
                "Appointment with ID {} not found",
                id
            )))
        })?;

    Ok(to_response(updated))
}

fn booking_payload(branch_id: Uuid, trainer_id: Uuid, service_id: Uuid) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        branch_id,
        service_id,
        trainer_id,
        member_id: Uuid::new_v4(),
        starts_at: monday(10, 0),
        notes: None,
    }
}

fn policy() -> BookingPolicy {
    BookingPolicy {
        min_gap_minutes: 10,
        open_when_unconfigured: false,
    }
}

#[tokio::test]
async fn test_booking_without_conflicts_creates_pending_appointment() {
    let mut ctx = TestContext::new();
    let branch_id = Uuid::new_v4();
    let trainer_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();

    ctx.trainer_repo
        .expect_get_trainer_by_id()
        .returning(move |id| Ok(Some(db_trainer(id, branch_id))));
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(db_service(id, branch_id, 60))));
    ctx.availability_repo
        .expect_get_windows_by_trainer_id()
        .returning(|trainer_id| Ok(vec![db_window(trainer_id, 1, time(6, 0), time(23, 59))]));
    ctx.appointment_repo
        .expect_get_appointments_by_trainer_and_date()
        .returning(|_, _| Ok(vec![]));
    ctx.appointment_repo
        .expect_create_appointment()
        .times(1)
        .returning(|branch_id, service_id, trainer_id, member_id, starts_at, ends_at, _| {
            Ok(DbAppointment {
                id: Uuid::new_v4(),
                branch_id,
                service_id,
                trainer_id,
                member_id,
                starts_at,
                ends_at,
                status: "pending".to_string(),
                notes: None,
                created_at: chrono::Utc::now(),
            })
        });

    let payload = booking_payload(branch_id, trainer_id, service_id);
    let result = create_appointment_wrapper(&mut ctx, payload, policy()).await.unwrap();

    assert_eq!(result.status, AppointmentStatus::Pending);
    assert_eq!(result.starts_at, monday(10, 0));
    assert_eq!(result.ends_at, monday(11, 0));
}

#[tokio::test]
async fn test_conflicting_booking_is_rejected_and_not_created() {
    let mut ctx = TestContext::new();
    let branch_id = Uuid::new_v4();

    ctx.trainer_repo
        .expect_get_trainer_by_id()
        .returning(move |id| Ok(Some(db_trainer(id, branch_id))));
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(db_service(id, branch_id, 60))));
    ctx.availability_repo
        .expect_get_windows_by_trainer_id()
        .returning(|trainer_id| Ok(vec![db_window(trainer_id, 1, time(6, 0), time(23, 59))]));
    ctx.appointment_repo
        .expect_get_appointments_by_trainer_and_date()
        .returning(|trainer_id, _| {
            Ok(vec![db_appointment(
                trainer_id,
                monday(10, 30),
                monday(11, 30),
                "approved",
            )])
        });
    // The conflicting proposal must never reach the database
    ctx.appointment_repo.expect_create_appointment().times(0);

    let payload = booking_payload(branch_id, Uuid::new_v4(), Uuid::new_v4());
    let result = create_appointment_wrapper(&mut ctx, payload, policy()).await;

    match result {
        Err(AppError(ClubError::Conflict(reasons))) => {
            assert!(reasons.iter().any(|r| matches!(r, ConflictReason::Overlap { .. })));
        }
        other => panic!("Expected a conflict error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancelled_appointments_do_not_block_booking() {
    let mut ctx = TestContext::new();
    let branch_id = Uuid::new_v4();

    ctx.trainer_repo
        .expect_get_trainer_by_id()
        .returning(move |id| Ok(Some(db_trainer(id, branch_id))));
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(db_service(id, branch_id, 60))));
    ctx.availability_repo
        .expect_get_windows_by_trainer_id()
        .returning(|trainer_id| Ok(vec![db_window(trainer_id, 1, time(6, 0), time(23, 59))]));
    ctx.appointment_repo
        .expect_get_appointments_by_trainer_and_date()
        .returning(|trainer_id, _| {
            Ok(vec![db_appointment(
                trainer_id,
                monday(10, 0),
                monday(11, 0),
                "cancelled",
            )])
        });
    ctx.appointment_repo
        .expect_create_appointment()
        .times(1)
        .returning(|branch_id, service_id, trainer_id, member_id, starts_at, ends_at, _| {
            Ok(DbAppointment {
                id: Uuid::new_v4(),
                branch_id,
                service_id,
                trainer_id,
                member_id,
                starts_at,
                ends_at,
                status: "pending".to_string(),
                notes: None,
                created_at: chrono::Utc::now(),
            })
        });

    let payload = booking_payload(branch_id, Uuid::new_v4(), Uuid::new_v4());
    let result = create_appointment_wrapper(&mut ctx, payload, policy()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_trainer_from_another_branch_is_rejected() {
    let mut ctx = TestContext::new();
    let other_branch = Uuid::new_v4();

    ctx.trainer_repo
        .expect_get_trainer_by_id()
        .returning(move |id| Ok(Some(db_trainer(id, other_branch))));
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(db_service(id, other_branch, 60))));

    let payload = booking_payload(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let result = create_appointment_wrapper(&mut ctx, payload, policy()).await;

    assert!(matches!(result, Err(AppError(ClubError::Validation(_)))));
}

#[tokio::test]
async fn test_pending_appointment_can_be_approved() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .returning(|_| {
            Ok(Some(db_appointment(
                Uuid::new_v4(),
                monday(10, 0),
                monday(11, 0),
                "pending",
            )))
        });
    ctx.appointment_repo
        .expect_update_appointment_status()
        .times(1)
        .returning(|_, status| {
            Ok(Some(db_appointment(
                Uuid::new_v4(),
                monday(10, 0),
                monday(11, 0),
                status,
            )))
        });

    let result = transition_wrapper(&mut ctx, id, AppointmentStatus::Approved).await.unwrap();

    assert_eq!(result.status, AppointmentStatus::Approved);
}

#[tokio::test]
async fn test_cancelled_appointment_is_terminal() {
    let mut ctx = TestContext::new();

    ctx.appointment_repo
        .expect_get_appointment_by_id()
        .returning(|_| {
            Ok(Some(db_appointment(
                Uuid::new_v4(),
                monday(10, 0),
                monday(11, 0),
                "cancelled",
            )))
        });
    // No status change may be written for a cancelled appointment
    ctx.appointment_repo.expect_update_appointment_status().times(0);

    let approve = transition_wrapper(&mut ctx, Uuid::new_v4(), AppointmentStatus::Approved).await;
    assert!(matches!(approve, Err(AppError(ClubError::Validation(_)))));

    let cancel = transition_wrapper(&mut ctx, Uuid::new_v4(), AppointmentStatus::Cancelled).await;
    assert!(matches!(cancel, Err(AppError(ClubError::Validation(_)))));
}
