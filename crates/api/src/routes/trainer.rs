use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/trainers", post(handlers::trainer::create_trainer))
        .route("/api/trainers", get(handlers::trainer::list_trainers))
        .route("/api/trainers/:id", get(handlers::trainer::get_trainer))
        .route(
            "/api/trainers/:id/availability",
            get(handlers::availability::get_availability),
        )
        .route(
            "/api/trainers/:id/availability",
            put(handlers::availability::set_availability),
        )
        .route(
            "/api/trainers/:id/appointments",
            get(handlers::appointment::list_trainer_appointments),
        )
}
