use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/branches", post(handlers::branch::create_branch))
        .route("/api/branches", get(handlers::branch::list_branches))
        .route("/api/branches/:id", get(handlers::branch::get_branch))
        .route("/api/branches/:id", put(handlers::branch::update_branch))
        .route("/api/branches/:id", delete(handlers::branch::delete_branch))
}
