//! Synthesize Handler
//!
//! 成功返回 WAV 音频；空文本返回 204，不调用模型

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::{SynthesisError, SynthesizedAudio};
use crate::infrastructure::http::dto::SynthesizeRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub const SAMPLE_RATE_HEADER: &str = "x-tts-sample-rate";
pub const CHANNELS_HEADER: &str = "x-tts-channels";
pub const DURATION_HEADER: &str = "x-tts-duration-ms";

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Response, ApiError> {
    let audio = state
        .synthesize_handler
        .handle(req.into())
        .await
        .map_err(|e| {
            if !matches!(e, SynthesisError::EmptyInput) {
                tracing::warn!(reason = e.reason(), "Synthesis request failed");
            }
            ApiError::from(e)
        })?;

    Ok(audio_response(audio))
}

fn audio_response(audio: SynthesizedAudio) -> Response {
    let mut response = Response::new(Body::from(audio.audio_data));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(audio.content_type),
    );
    headers.insert(SAMPLE_RATE_HEADER, HeaderValue::from(audio.sample_rate));
    headers.insert(CHANNELS_HEADER, HeaderValue::from(audio.channels));
    headers.insert(DURATION_HEADER, HeaderValue::from(audio.duration_ms));
    response
}
