//! HTTP Error Handling
//!
//! 错误响应使用真实的 HTTP 状态码，errno 与状态码一致。
//! 空文本不是错误：返回 204 且没有响应体

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ApiResponse;
use crate::application::SynthesisError;

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 无内容可返回（空文本）
    NoContent,
    Internal(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoContent => StatusCode::NO_CONTENT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let errno = i32::from(status.as_u16());

        let msg = match self {
            ApiError::NoContent => {
                tracing::debug!("Empty input, nothing to synthesize");
                return status.into_response();
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno, error = %msg, "Internal server error");
                msg
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(errno = errno, error = %msg, "Service unavailable");
                msg
            }
        };

        (status, Json(ApiResponse::error(errno, msg))).into_response()
    }
}

impl From<SynthesisError> for ApiError {
    fn from(e: SynthesisError) -> Self {
        match e {
            SynthesisError::EmptyInput => ApiError::NoContent,
            SynthesisError::ModelUnavailable => ApiError::ServiceUnavailable(e.to_string()),
            SynthesisError::GenerationFailed(_) | SynthesisError::EncodingFailed(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}
