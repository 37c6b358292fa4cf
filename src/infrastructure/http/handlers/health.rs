//! Health Handler
//!
//! 就绪检查：模型不可用时返回 503

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::application::GetHealth;
use crate::infrastructure::http::dto::HealthDto;
use crate::infrastructure::http::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthDto>) {
    let health = state.health_handler.handle(GetHealth);
    let status = if health.is_serving() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health.into()))
}
