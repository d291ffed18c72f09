use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/messages", post(handlers::message::send_message))
        .route("/api/messages", get(handlers::message::get_conversation))
}
