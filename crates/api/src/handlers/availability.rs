use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use fitclub_core::{
    errors::ClubError,
    models::availability::{
        AvailabilityResponse, DayOfWeek, SetAvailabilityRequest, WindowResponse,
    },
    scheduling,
};
use fitclub_db::models::DbAvailabilityWindow;

use crate::{ApiState, middleware::error_handling::AppError};

fn to_window_response(window: DbAvailabilityWindow) -> Option<WindowResponse> {
    DayOfWeek::from_index(window.day_of_week).map(|day| WindowResponse {
        day,
        start_time: window.start_time,
        end_time: window.end_time,
    })
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    fitclub_db::repositories::trainer::get_trainer_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Trainer with ID {} not found", id)))?;

    let windows = fitclub_db::repositories::availability::get_windows_by_trainer_id(
        &state.db_pool,
        id,
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(AvailabilityResponse {
        trainer_id: id,
        windows: windows.into_iter().filter_map(to_window_response).collect(),
    }))
}

/// Replaces a trainer's whole weekly availability. The proposed set is
/// validated first: every range must be non-empty and same-day windows must
/// not overlap, so an invalid set never reaches the database.
#[axum::debug_handler]
pub async fn set_availability(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    fitclub_db::repositories::trainer::get_trainer_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Trainer with ID {} not found", id)))?;

    if let Err(issues) = scheduling::validate_windows(&payload.windows) {
        let description = issues
            .iter()
            .map(|issue| format!("{issue:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError(ClubError::Validation(format!(
            "Invalid availability windows: {description}"
        ))));
    }

    // Full replacement: drop the old set, then insert the new one
    fitclub_db::repositories::availability::delete_windows_by_trainer_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?;

    for window in &payload.windows {
        fitclub_db::repositories::availability::create_window(
            &state.db_pool,
            id,
            window.day.index(),
            window.start_time,
            window.end_time,
        )
        .await
        .map_err(ClubError::Database)?;
    }

    let windows = fitclub_db::repositories::availability::get_windows_by_trainer_id(
        &state.db_pool,
        id,
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(AvailabilityResponse {
        trainer_id: id,
        windows: windows.into_iter().filter_map(to_window_response).collect(),
    }))
}
