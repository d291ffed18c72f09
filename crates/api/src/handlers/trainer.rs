use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use fitclub_core::{
    errors::ClubError,
    models::trainer::{CreateTrainerRequest, TrainerResponse},
};
use fitclub_db::models::DbTrainer;

use crate::{ApiState, middleware::error_handling::AppError};

fn to_response(trainer: DbTrainer) -> TrainerResponse {
    TrainerResponse {
        id: trainer.id,
        branch_id: trainer.branch_id,
        full_name: trainer.full_name,
        specialty: trainer.specialty,
        created_at: trainer.created_at,
    }
}

#[axum::debug_handler]
pub async fn create_trainer(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTrainerRequest>,
) -> Result<Json<TrainerResponse>, AppError> {
    // The branch must exist before a trainer can be assigned to it
    fitclub_db::repositories::branch::get_branch_by_id(&state.db_pool, payload.branch_id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| {
            ClubError::NotFound(format!("Branch with ID {} not found", payload.branch_id))
        })?;

    let trainer = fitclub_db::repositories::trainer::create_trainer(
        &state.db_pool,
        payload.branch_id,
        &payload.full_name,
        payload.specialty.as_deref(),
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(trainer)))
}

#[axum::debug_handler]
pub async fn list_trainers(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<TrainerResponse>>, AppError> {
    let trainers = fitclub_db::repositories::trainer::list_trainers(&state.db_pool)
        .await
        .map_err(ClubError::Database)?;

    Ok(Json(trainers.into_iter().map(to_response).collect()))
}

#[axum::debug_handler]
pub async fn get_trainer(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TrainerResponse>, AppError> {
    let trainer = fitclub_db::repositories::trainer::get_trainer_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Trainer with ID {} not found", id)))?;

    Ok(Json(to_response(trainer)))
}
