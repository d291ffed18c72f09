use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use fitclub_core::{
    errors::ClubError,
    models::service::{CreateServiceRequest, ServiceResponse, UpdateServiceRequest},
};
use fitclub_db::models::DbService;

use crate::{ApiState, middleware::error_handling::AppError};

fn to_response(service: DbService) -> ServiceResponse {
    ServiceResponse {
        id: service.id,
        branch_id: service.branch_id,
        name: service.name,
        duration_minutes: service.duration_minutes,
        price_cents: service.price_cents,
        created_at: service.created_at,
    }
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    if payload.duration_minutes <= 0 {
        return Err(AppError(ClubError::Validation(
            "Service duration must be positive".to_string(),
        )));
    }

    // The branch must exist before a service can reference it
    fitclub_db::repositories::branch::get_branch_by_id(&state.db_pool, payload.branch_id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| {
            ClubError::NotFound(format!("Branch with ID {} not found", payload.branch_id))
        })?;

    let service = fitclub_db::repositories::service::create_service(
        &state.db_pool,
        payload.branch_id,
        &payload.name,
        payload.duration_minutes,
        payload.price_cents,
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(service)))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let services = fitclub_db::repositories::service::list_services(&state.db_pool)
        .await
        .map_err(ClubError::Database)?;

    Ok(Json(services.into_iter().map(to_response).collect()))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, AppError> {
    let service = fitclub_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Service with ID {} not found", id)))?;

    Ok(Json(to_response(service)))
}

#[axum::debug_handler]
pub async fn update_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    if matches!(payload.duration_minutes, Some(minutes) if minutes <= 0) {
        return Err(AppError(ClubError::Validation(
            "Service duration must be positive".to_string(),
        )));
    }

    let service = fitclub_db::repositories::service::update_service(
        &state.db_pool,
        id,
        payload.name.as_deref(),
        payload.duration_minutes,
        payload.price_cents,
    )
    .await
    .map_err(ClubError::Database)?
    .ok_or_else(|| ClubError::NotFound(format!("Service with ID {} not found", id)))?;

    Ok(Json(to_response(service)))
}
