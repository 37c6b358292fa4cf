//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{HealthResponse, Synthesize};
use crate::domain::generation::GenerationOverrides;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 错误响应
    pub fn error(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

// ============================================================================
// Synthesis DTOs
// ============================================================================

/// 合成请求
///
/// 参数字段为 null 或缺省时视为未指定
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub cfg_weight: Option<f32>,
    #[serde(default)]
    pub exaggeration: Option<f32>,
}

impl From<SynthesizeRequest> for Synthesize {
    fn from(req: SynthesizeRequest) -> Self {
        Self {
            text: req.text,
            voice: req.voice,
            overrides: GenerationOverrides {
                temperature: req.temperature,
                cfg_weight: req.cfg_weight,
                exaggeration: req.exaggeration,
            },
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
}

// ============================================================================
// Health DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub state: &'static str,
    pub device: &'static str,
    pub accelerator: bool,
    pub compiled: bool,
    pub warmed_up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    pub voices_loaded: usize,
}

impl From<HealthResponse> for HealthDto {
    fn from(health: HealthResponse) -> Self {
        let model = &health.model;
        Self {
            status: if health.is_serving() { "ok" } else { "unavailable" },
            state: model.state.as_str(),
            device: model.device.as_str(),
            accelerator: model.device.is_accelerator(),
            compiled: model.compiled,
            warmed_up: model.warmed_up,
            sample_rate: model.sample_rate,
            voices_loaded: health.voices_loaded,
        }
    }
}
