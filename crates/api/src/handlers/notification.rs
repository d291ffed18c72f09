use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use fitclub_core::{
    errors::ClubError,
    models::notification::{CreateNotificationRequest, NotificationResponse},
};
use fitclub_db::models::DbNotification;

use crate::{ApiState, middleware::error_handling::AppError};

fn to_response(notification: DbNotification) -> NotificationResponse {
    NotificationResponse {
        id: notification.id,
        member_id: notification.member_id,
        title: notification.title,
        body: notification.body,
        is_read: notification.is_read,
        created_at: notification.created_at,
    }
}

#[axum::debug_handler]
pub async fn create_notification(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<Json<NotificationResponse>, AppError> {
    fitclub_db::repositories::member::get_member_by_id(&state.db_pool, payload.member_id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| {
            ClubError::NotFound(format!("Member with ID {} not found", payload.member_id))
        })?;

    let notification = fitclub_db::repositories::notification::create_notification(
        &state.db_pool,
        payload.member_id,
        &payload.title,
        &payload.body,
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(notification)))
}

#[axum::debug_handler]
pub async fn list_member_notifications(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    fitclub_db::repositories::member::get_member_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Member with ID {} not found", id)))?;

    let notifications =
        fitclub_db::repositories::notification::get_notifications_by_member_id(&state.db_pool, id)
            .await
            .map_err(ClubError::Database)?;

    Ok(Json(notifications.into_iter().map(to_response).collect()))
}

#[axum::debug_handler]
pub async fn mark_read(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationResponse>, AppError> {
    let notification =
        fitclub_db::repositories::notification::mark_notification_read(&state.db_pool, id)
            .await
            .map_err(ClubError::Database)?
            .ok_or_else(|| {
                ClubError::NotFound(format!("Notification with ID {} not found", id))
            })?;

    Ok(Json(to_response(notification)))
}
