use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use fitclub_core::{
    errors::ClubError,
    models::branch::{BranchResponse, CreateBranchRequest, UpdateBranchRequest},
};
use fitclub_db::models::DbBranch;

use crate::{ApiState, middleware::error_handling::AppError};

fn to_response(branch: DbBranch) -> BranchResponse {
    BranchResponse {
        id: branch.id,
        name: branch.name,
        address: branch.address,
        phone: branch.phone,
        created_at: branch.created_at,
    }
}

#[axum::debug_handler]
pub async fn create_branch(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBranchRequest>,
) -> Result<Json<BranchResponse>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(ClubError::Validation(
            "Branch name must not be empty".to_string(),
        )));
    }

    let branch = fitclub_db::repositories::branch::create_branch(
        &state.db_pool,
        &payload.name,
        &payload.address,
        payload.phone.as_deref(),
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(branch)))
}

#[axum::debug_handler]
pub async fn list_branches(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<BranchResponse>>, AppError> {
    let branches = fitclub_db::repositories::branch::list_branches(&state.db_pool)
        .await
        .map_err(ClubError::Database)?;

    Ok(Json(branches.into_iter().map(to_response).collect()))
}

#[axum::debug_handler]
pub async fn get_branch(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BranchResponse>, AppError> {
    let branch = fitclub_db::repositories::branch::get_branch_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Branch with ID {} not found", id)))?;

    Ok(Json(to_response(branch)))
}

#[axum::debug_handler]
pub async fn update_branch(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBranchRequest>,
) -> Result<Json<BranchResponse>, AppError> {
    let branch = fitclub_db::repositories::branch::update_branch(
        &state.db_pool,
        id,
        payload.name.as_deref(),
        payload.address.as_deref(),
        payload.phone.as_deref(),
    )
    .await
    .map_err(ClubError::Database)?
    .ok_or_else(|| ClubError::NotFound(format!("Branch with ID {} not found", id)))?;

    Ok(Json(to_response(branch)))
}

#[axum::debug_handler]
pub async fn delete_branch(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = fitclub_db::repositories::branch::delete_branch(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?;

    if !deleted {
        return Err(AppError(ClubError::NotFound(format!(
            "Branch with ID {} not found",
            id
        ))));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
