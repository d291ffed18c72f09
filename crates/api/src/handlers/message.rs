use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use fitclub_core::{
    errors::ClubError,
    models::message::{MessageResponse, MessageSender, SendMessageRequest},
};
use fitclub_db::models::DbMessage;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters identifying one member/trainer conversation
#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub member_id: Uuid,
    pub trainer_id: Uuid,
}

fn to_response(message: DbMessage) -> MessageResponse {
    MessageResponse {
        id: message.id,
        member_id: message.member_id,
        trainer_id: message.trainer_id,
        sender: MessageSender::from_str(&message.sender),
        body: message.body,
        sent_at: message.sent_at,
    }
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if payload.body.trim().is_empty() {
        return Err(AppError(ClubError::Validation(
            "Message body must not be empty".to_string(),
        )));
    }

    fitclub_db::repositories::member::get_member_by_id(&state.db_pool, payload.member_id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| {
            ClubError::NotFound(format!("Member with ID {} not found", payload.member_id))
        })?;

    fitclub_db::repositories::trainer::get_trainer_by_id(&state.db_pool, payload.trainer_id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| {
            ClubError::NotFound(format!("Trainer with ID {} not found", payload.trainer_id))
        })?;

    let message = fitclub_db::repositories::message::create_message(
        &state.db_pool,
        payload.member_id,
        payload.trainer_id,
        payload.sender.as_str(),
        &payload.body,
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(message)))
}

#[axum::debug_handler]
pub async fn get_conversation(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    let messages = fitclub_db::repositories::message::get_conversation(
        &state.db_pool,
        query.member_id,
        query.trainer_id,
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(messages.into_iter().map(to_response).collect()))
}
