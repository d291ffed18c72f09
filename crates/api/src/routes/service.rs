use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/services", post(handlers::service::create_service))
        .route("/api/services", get(handlers::service::list_services))
        .route("/api/services/:id", get(handlers::service::get_service))
        .route("/api/services/:id", put(handlers::service::update_service))
}
