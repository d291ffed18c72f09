use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use fitclub_core::{
    errors::ClubError,
    models::member::{MemberResponse, RegisterMemberRequest},
};
use fitclub_db::models::DbMember;

use crate::{ApiState, middleware::error_handling::AppError};

fn to_response(member: DbMember) -> MemberResponse {
    MemberResponse {
        id: member.id,
        full_name: member.full_name,
        email: member.email,
        phone: member.phone,
        date_of_birth: member.date_of_birth,
        created_at: member.created_at,
    }
}

#[axum::debug_handler]
pub async fn register_member(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterMemberRequest>,
) -> Result<Json<MemberResponse>, AppError> {
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(AppError(ClubError::Validation(
            "A valid email address is required".to_string(),
        )));
    }

    let existing =
        fitclub_db::repositories::member::get_member_by_email(&state.db_pool, &payload.email)
            .await
            .map_err(ClubError::Database)?;

    if existing.is_some() {
        return Err(AppError(ClubError::Validation(format!(
            "A member with email {} already exists",
            payload.email
        ))));
    }

    let member = fitclub_db::repositories::member::create_member(
        &state.db_pool,
        &payload.full_name,
        &payload.email,
        payload.phone.as_deref(),
        payload.date_of_birth,
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(member)))
}

#[axum::debug_handler]
pub async fn get_member(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberResponse>, AppError> {
    let member = fitclub_db::repositories::member::get_member_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Member with ID {} not found", id)))?;

    Ok(Json(to_response(member)))
}
