//! Audio Encoder Port - 音频编码抽象
//!
//! 将规整后的波形编码为可直接返回给客户端的字节流

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::generation::Waveform;

/// 编码错误
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// WAV 样本格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// 16 位整型 PCM
    #[default]
    Pcm16,
    /// 32 位浮点
    Float32,
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleFormat::Pcm16 => write!(f, "pcm16"),
            SampleFormat::Float32 => write!(f, "float32"),
        }
    }
}

/// Audio Encoder Port
pub trait AudioEncoderPort: Send + Sync {
    /// 编码波形
    fn encode(&self, waveform: &Waveform) -> Result<Vec<u8>, EncodeError>;

    /// 输出的 Content-Type
    fn content_type(&self) -> &'static str;
}
