use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use uuid::Uuid;

use fitclub_core::{
    errors::ClubError,
    models::ticket::{CreateTicketRequest, TicketResponse, TicketStatus, UpdateTicketStatusRequest},
};
use fitclub_db::models::DbSupportTicket;

use crate::{ApiState, middleware::error_handling::AppError};

fn to_response(ticket: DbSupportTicket) -> TicketResponse {
    TicketResponse {
        id: ticket.id,
        member_id: ticket.member_id,
        subject: ticket.subject,
        body: ticket.body,
        status: TicketStatus::from_str(&ticket.status),
        created_at: ticket.created_at,
        updated_at: ticket.updated_at,
    }
}

#[axum::debug_handler]
pub async fn create_ticket(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateTicketRequest>,
) -> Result<Json<TicketResponse>, AppError> {
    if payload.subject.trim().is_empty() {
        return Err(AppError(ClubError::Validation(
            "Ticket subject must not be empty".to_string(),
        )));
    }

    fitclub_db::repositories::member::get_member_by_id(&state.db_pool, payload.member_id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| {
            ClubError::NotFound(format!("Member with ID {} not found", payload.member_id))
        })?;

    let ticket = fitclub_db::repositories::ticket::create_ticket(
        &state.db_pool,
        payload.member_id,
        &payload.subject,
        &payload.body,
    )
    .await
    .map_err(ClubError::Database)?;

    Ok(Json(to_response(ticket)))
}

#[axum::debug_handler]
pub async fn list_member_tickets(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TicketResponse>>, AppError> {
    fitclub_db::repositories::member::get_member_by_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?
        .ok_or_else(|| ClubError::NotFound(format!("Member with ID {} not found", id)))?;

    let tickets = fitclub_db::repositories::ticket::get_tickets_by_member_id(&state.db_pool, id)
        .await
        .map_err(ClubError::Database)?;

    Ok(Json(tickets.into_iter().map(to_response).collect()))
}

#[axum::debug_handler]
pub async fn update_ticket_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTicketStatusRequest>,
) -> Result<Json<TicketResponse>, AppError> {
    let ticket = fitclub_db::repositories::ticket::update_ticket_status(
        &state.db_pool,
        id,
        payload.status.as_str(),
    )
    .await
    .map_err(ClubError::Database)?
    .ok_or_else(|| ClubError::NotFound(format!("Ticket with ID {} not found", id)))?;

    Ok(Json(to_response(ticket)))
}
