use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/members", post(handlers::member::register_member))
        .route("/api/members/:id", get(handlers::member::get_member))
        .route(
            "/api/members/:id/appointments",
            get(handlers::appointment::list_member_appointments),
        )
        .route(
            "/api/members/:id/notifications",
            get(handlers::notification::list_member_notifications),
        )
        .route(
            "/api/members/:id/tickets",
            get(handlers::ticket::list_member_tickets),
        )
        .route(
            "/api/members/:id/recommendations",
            get(handlers::recommendation::get_history),
        )
}
