//! # Recommendation Handlers
//!
//! Entry point for the AI-assisted recommendation feature. The handler only
//! validates the request shape and resolves the member; everything else
//! (caching, the external call, retries, fallback, logging) happens inside
//! the pipeline, which always produces a plan.

use axum::{
    Json,
    extract::{Path, State},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;
use uuid::Uuid;

use fitclub_ai::input::RecommendationInput;
use fitclub_core::{
    errors::ClubError,
    models::recommendation::{
        RecommendationHistoryEntry, RecommendationHistoryResponse, RecommendationRequest,
        RecommendationResponse,
    },
};

use crate::{ApiState, middleware::error_handling::AppError};

/// Produces a recommendation for a member from either measurements or a
/// base64-encoded photo. The two modes are mutually exclusive; supplying
/// both or neither is the one validation error this endpoint returns.
/// Whatever happens downstream, a plan comes back, flagged with its
/// provenance (`is_fallback`, `is_cached`).
#[axum::debug_handler]
pub async fn create_recommendation(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    fitclub_db::repositories::member::get_member_by_id(&state.db_pool, payload.member_id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| {
            ClubError::NotFound(format!("Member with ID {} not found", payload.member_id))
        })?;

    let photo = match payload.photo_base64 {
        Some(encoded) => {
            let bytes = BASE64.decode(encoded.as_bytes()).map_err(|_| {
                ClubError::Validation("Photo is not valid base64".to_string())
            })?;
            let content_type = payload
                .photo_content_type
                .unwrap_or_else(|| "image/jpeg".to_string());
            Some((bytes, content_type))
        }
        None => None,
    };

    let input = RecommendationInput::from_parts(payload.measurements, photo)?;

    let recommendation = state
        .pipeline
        .get_recommendation(payload.member_id, &input)
        .await;

    Ok(Json(RecommendationResponse {
        summary: recommendation.plan.summary,
        workout_plan: recommendation.plan.workout_plan,
        nutrition_tips: recommendation.plan.nutrition_tips,
        notes: recommendation.plan.notes,
        model: recommendation.model,
        is_fallback: recommendation.is_fallback,
        is_cached: recommendation.is_cached,
        after_image_url: recommendation.after_image_url,
    }))
}

/// Returns a member's recent recommendation history from the append-only
/// log, newest first.
#[axum::debug_handler]
pub async fn get_history(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecommendationHistoryResponse>, AppError> {
    fitclub_db::repositories::member::get_member_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Member with ID {} not found", id)))?;

    let logs =
        fitclub_db::repositories::recommendation::get_logs_by_member_id(&state.db_pool, id, 50)
            .await
            .map_err(ClubError::Database)?;

    let entries = logs
        .into_iter()
        .map(|log| RecommendationHistoryEntry {
            id: log.id,
            input_hash: log.input_hash,
            success: log.success,
            is_fallback: log.is_fallback,
            model: log.model,
            duration_ms: log.duration_ms,
            created_at: log.created_at,
        })
        .collect();

    Ok(Json(RecommendationHistoryResponse {
        member_id: id,
        entries,
    }))
}
