use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::response::success;

pub mod auth;
pub mod concerts;
pub mod feedback;
pub mod orders;
pub mod popular;
pub mod tickets;
pub mod users;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "encore-api",
    };

    success(payload, "Health check successful").into_response()
}
