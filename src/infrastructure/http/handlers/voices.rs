//! Voice Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::{ApiResponse, VoicesResponse};
use crate::infrastructure::http::state::AppState;

pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<ApiResponse<VoicesResponse>> {
    let voices = state.list_voices_handler.handle(ListVoices);
    Json(ApiResponse::success(VoicesResponse { voices }))
}
