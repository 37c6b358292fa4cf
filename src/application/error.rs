//! 应用层错误定义
//!
//! 合成请求的失败原因，区分"空输入"与"合成失败"

use thiserror::Error;

use crate::application::ports::{EncodeError, ModelError};
use crate::domain::generation::WaveformError;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// 空文本，不调用模型
    #[error("Empty input text")]
    EmptyInput,

    /// 基础模型加载失败，服务不可用
    #[error("Synthesis model unavailable")]
    ModelUnavailable,

    /// 模型推理失败或输出格式异常
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// 编码失败
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

impl SynthesisError {
    /// 失败原因的简短标识（日志 / 响应使用）
    pub fn reason(&self) -> &'static str {
        match self {
            SynthesisError::EmptyInput => "empty_input",
            SynthesisError::ModelUnavailable => "model_unavailable",
            SynthesisError::GenerationFailed(_) => "generation_failed",
            SynthesisError::EncodingFailed(_) => "encoding_failed",
        }
    }
}

impl From<ModelError> for SynthesisError {
    fn from(err: ModelError) -> Self {
        Self::GenerationFailed(err.to_string())
    }
}

impl From<WaveformError> for SynthesisError {
    fn from(err: WaveformError) -> Self {
        Self::GenerationFailed(format!("malformed model output: {}", err))
    }
}

impl From<EncodeError> for SynthesisError {
    fn from(err: EncodeError) -> Self {
        Self::EncodingFailed(err.to_string())
    }
}
