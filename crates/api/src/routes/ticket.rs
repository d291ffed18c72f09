use axum::{
    Router,
    routing::{post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/tickets", post(handlers::ticket::create_ticket))
        .route(
            "/api/tickets/:id/status",
            put(handlers::ticket::update_ticket_status),
        )
}
