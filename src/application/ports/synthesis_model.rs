//! Synthesis Model Port - 语音合成模型抽象
//!
//! 模型本身视为黑盒能力：给定文本和参数，返回数值波形。
//! 具体实现在 infrastructure/adapters 层（HTTP 推理服务 / Fake）

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::generation::{GenerationParameters, RawWaveform};

/// 模型错误
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model load failed: {0}")]
    LoadFailed(String),

    #[error("Model compilation failed: {0}")]
    CompileFailed(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 计算设备
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeDevice {
    Cpu,
    Cuda,
    Metal,
}

impl ComputeDevice {
    /// 是否为加速设备（决定是否预热）
    pub fn is_accelerator(&self) -> bool {
        !matches!(self, ComputeDevice::Cpu)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComputeDevice::Cpu => "cpu",
            ComputeDevice::Cuda => "cuda",
            ComputeDevice::Metal => "metal",
        }
    }
}

impl std::fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已加载的模型
///
/// 调用方保证同一时刻只有一个调用进入（`&mut self`）
#[async_trait]
pub trait SynthesisModelPort: Send + Sync {
    /// 可选的编译/加速步骤
    async fn compile(&mut self, mode: &str) -> Result<(), ModelError>;

    /// 执行一次合成
    async fn generate(
        &mut self,
        text: &str,
        params: &GenerationParameters,
    ) -> Result<RawWaveform, ModelError>;

    /// 模型原生采样率
    fn sample_rate(&self) -> u32;
}

/// 模型加载器
///
/// 进程启动时调用一次
#[async_trait]
pub trait ModelLoaderPort: Send + Sync {
    /// 探测可用的计算设备
    async fn detect_device(&self) -> ComputeDevice;

    /// 在指定设备上加载基础模型
    async fn load(&self, device: ComputeDevice) -> Result<Box<dyn SynthesisModelPort>, ModelError>;
}
