//! # Appointment Handlers
//!
//! This module contains handlers for booking appointments and driving their
//! lifecycle. Booking is where the conflict detection lives: a proposed
//! appointment is checked against the trainer's weekly availability windows
//! and their existing bookings before anything is written.
//!
//! ## Booking Flow
//!
//! 1. Input Validation & Preparation:
//!    - Resolve the member, branch, trainer and service records
//!    - Verify the trainer and service belong to the requested branch
//!    - Compute the end time from the service duration
//!
//! 2. Read Model Assembly:
//!    - Fetch the trainer's availability windows
//!    - Fetch the trainer's appointments on the proposed calendar date
//!      (one query bounded to that day, instead of per-appointment lookups)
//!
//! 3. Conflict Validation:
//!    - Run the pure checker: availability, overlap, minimum gap
//!    - Every violated rule is returned together in a 409 response
//!
//! 4. Persistence:
//!    - Insert the appointment as Pending and return it
//!
//! Lifecycle transitions (approve, cancel) are separate handlers; a
//! cancelled appointment is terminal and rejects any further transition.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use fitclub_core::{
    errors::ClubError,
    models::{
        appointment::{AppointmentResponse, AppointmentStatus, CreateAppointmentRequest},
        availability::{AvailabilityWindow, DayOfWeek},
    },
    scheduling::{self, ExistingAppointment, ProposedBooking},
};
use fitclub_db::models::{DbAppointment, DbAvailabilityWindow};

use crate::{ApiState, middleware::error_handling::AppError};

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

fn to_core_window(window: DbAvailabilityWindow) -> Option<AvailabilityWindow> {
    DayOfWeek::from_index(window.day_of_week).map(|day| AvailabilityWindow {
        id: window.id,
        trainer_id: window.trainer_id,
        day,
        start_time: window.start_time,
        end_time: window.end_time,
    })
}

/// Books a new appointment after validating it against the trainer's
/// availability and existing bookings.
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// # Errors
///
/// * `ClubError::NotFound` - Member, branch, trainer or service missing
/// * `ClubError::Validation` - Trainer/service not offered at the branch
/// * `ClubError::Conflict` - One or more booking rules violated; the
///   response lists every violation
/// * `ClubError::Database` - Database error
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    // STEP 1: Input Validation & Preparation

    fitclub_db::repositories::member::get_member_by_id(&state.db_pool, payload.member_id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| {
            ClubError::NotFound(format!("Member with ID {} not found", payload.member_id))
        })?;

    fitclub_db::repositories::branch::get_branch_by_id(&state.db_pool, payload.branch_id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| {
            ClubError::NotFound(format!("Branch with ID {} not found", payload.branch_id))
        })?;

    let trainer =
        fitclub_db::repositories::trainer::get_trainer_by_id(&state.db_pool, payload.trainer_id)
            .await
            .map_err(ClubError::Database)?
            .ok_or_else(|| {
                ClubError::NotFound(format!("Trainer with ID {} not found", payload.trainer_id))
            })?;

    let service =
        fitclub_db::repositories::service::get_service_by_id(&state.db_pool, payload.service_id)
            .await
            .map_err(ClubError::Database)?
            .ok_or_else(|| {
                ClubError::NotFound(format!("Service with ID {} not found", payload.service_id))
            })?;

    if trainer.branch_id != payload.branch_id {
        return Err(AppError(ClubError::Validation(
            "Trainer does not work at the requested branch".to_string(),
        )));
    }
    if service.branch_id != payload.branch_id {
        return Err(AppError(ClubError::Validation(
            "Service is not offered at the requested branch".to_string(),
        )));
    }

    let ends_at = payload.starts_at + Duration::minutes(service.duration_minutes as i64);

    // STEP 2: Read Model Assembly

    let windows = fitclub_db::repositories::availability::get_windows_by_trainer_id(
        &state.db_pool,
        payload.trainer_id,
    )
    .await
    .map_err(ClubError::Database)?
    .into_iter()
    .filter_map(to_core_window)
    .collect::<Vec<_>>();

    let existing = fitclub_db::repositories::appointment::get_appointments_by_trainer_and_date(
        &state.db_pool,
        payload.trainer_id,
        payload.starts_at.date(),
    )
    .await
    .map_err(ClubError::Database)?
    .into_iter()
    .map(|appointment| ExistingAppointment {
        starts_at: appointment.starts_at,
        ends_at: appointment.ends_at,
        status: AppointmentStatus::from_str(&appointment.status),
    })
    .collect::<Vec<_>>();

    // STEP 3: Conflict Validation

    let proposed = ProposedBooking {
        trainer_id: payload.trainer_id,
        starts_at: payload.starts_at,
        duration_minutes: service.duration_minutes as i64,
    };

    if let Err(reasons) =
        scheduling::validate_booking(&proposed, &windows, &existing, &state.booking_policy)
    {
        return Err(AppError(ClubError::Conflict(reasons)));
    }

    // STEP 4: Persistence

    let appointment = fitclub_db::repositories::appointment::create_appointment(
        &state.db_pool,
        payload.branch_id,
        payload.service_id,
        payload.trainer_id,
        payload.member_id,
        payload.starts_at,
        ends_at,
        payload.notes.as_deref(),
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(appointment)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment =
        fitclub_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
            .await
            .map_err(ClubError::Database)?
            .ok_or_else(|| ClubError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(to_response(appointment)))
}

#[axum::debug_handler]
pub async fn list_member_appointments(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    fitclub_db::repositories::member::get_member_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Member with ID {} not found", id)))?;

    let appointments =
        fitclub_db::repositories::appointment::get_appointments_by_member_id(&state.db_pool, id)
            .await
            .map_err(ClubError::Database)?;

    Ok(Json(appointments.into_iter().map(to_response).collect()))
}

#[axum::debug_handler]
pub async fn list_trainer_appointments(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    fitclub_db::repositories::trainer::get_trainer_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Trainer with ID {} not found", id)))?;

    let appointments =
        fitclub_db::repositories::appointment::get_appointments_by_trainer_id(&state.db_pool, id)
            .await
            .map_err(ClubError::Database)?;

    Ok(Json(appointments.into_iter().map(to_response).collect()))
}

async fn transition(
    state: &ApiState,
    id: Uuid,
    target: AppointmentStatus,
) -> Result<DbAppointment, AppError> {
    let appointment =
        fitclub_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
            .await
            .map_err(ClubError::Database)?
            .ok_or_else(|| ClubError::NotFound(format!("Appointment with ID {} not found", id)))?;

    let current = AppointmentStatus::from_str(&appointment.status);
    if !current.can_transition_to(target) {
        return Err(AppError(ClubError::Validation(format!(
            "Appointment cannot change from {} to {}",
            current.as_str(),
            target.as_str()
        ))));
    }

    let updated = fitclub_db::repositories::appointment::update_appointment_status(
        &state.db_pool,
        id,
        target.as_str(),
    )
    .await
    .map_err(ClubError::Database)?
    .ok_or_else(|| ClubError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(updated)
}

#[axum::debug_handler]
pub async fn approve_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = transition(&state, id, AppointmentStatus::Approved).await?;

    // Thin notification so the member sees the decision
    fitclub_db::repositories::notification::create_notification(
        &state.db_pool,
        appointment.member_id,
        "Appointment approved",
        &format!("Your appointment on {} was approved.", appointment.starts_at),
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(appointment)))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = transition(&state, id, AppointmentStatus::Cancelled).await?;

    fitclub_db::repositories::notification::create_notification(
        &state.db_pool,
        appointment.member_id,
        "Appointment cancelled",
        &format!("Your appointment on {} was cancelled.", appointment.starts_at),
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(appointment)))
}
