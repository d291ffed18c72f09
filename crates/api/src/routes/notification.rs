use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/notifications",
            post(handlers::notification::create_notification),
        )
        .route(
            "/api/notifications/:id/read",
            post(handlers::notification::mark_read),
        )
}
