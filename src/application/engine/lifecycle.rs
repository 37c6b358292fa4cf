//! Model Lifecycle
//!
//! Uninitialized → {Ready | Degraded | Unavailable}，Ready → Degraded。
//! Unavailable 为终态，不自动重试。

use serde::Serialize;

use crate::application::ports::ComputeDevice;

/// 预热文本
pub const DEFAULT_WARMUP_TEXT: &str = "This is a warmup sentence to initialize the CUDA graphs.";

/// 默认编译模式
pub const DEFAULT_COMPILE_MODE: &str = "reduce-overhead";

/// 模型资源状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelState {
    Uninitialized,
    Ready,
    /// 编译或预热失败，基础模型可用
    Degraded,
    /// 基础模型加载失败
    Unavailable,
}

impl ModelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelState::Uninitialized => "uninitialized",
            ModelState::Ready => "ready",
            ModelState::Degraded => "degraded",
            ModelState::Unavailable => "unavailable",
        }
    }

    /// 是否可以对外提供合成
    pub fn is_serving(&self) -> bool {
        matches!(self, ModelState::Ready | ModelState::Degraded)
    }

    pub fn can_transition_to(&self, next: ModelState) -> bool {
        matches!(
            (self, next),
            (
                ModelState::Uninitialized,
                ModelState::Ready | ModelState::Degraded | ModelState::Unavailable
            ) | (ModelState::Ready, ModelState::Degraded)
        )
    }

    /// 状态迁移，非法迁移保持原状态
    pub(crate) fn advance(&mut self, next: ModelState) {
        if !self.can_transition_to(next) {
            tracing::warn!(
                from = self.as_str(),
                to = next.as_str(),
                "Ignoring invalid model state transition"
            );
            return;
        }
        tracing::info!(from = self.as_str(), to = next.as_str(), "Model state transition");
        *self = next;
    }
}

impl std::fmt::Display for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 引擎启动选项
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// 是否尝试编译加速
    pub compile: bool,
    /// 编译模式（透传给模型）
    pub compile_mode: String,
    /// 加速设备上是否预热
    pub warmup: bool,
    /// 预热文本
    pub warmup_text: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            compile: true,
            compile_mode: DEFAULT_COMPILE_MODE.to_string(),
            warmup: true,
            warmup_text: DEFAULT_WARMUP_TEXT.to_string(),
        }
    }
}

/// 模型状态快照（就绪查询）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStatus {
    pub state: ModelState,
    pub device: ComputeDevice,
    pub compiled: bool,
    pub warmed_up: bool,
    pub sample_rate: Option<u32>,
}

impl ModelStatus {
    pub fn is_serving(&self) -> bool {
        self.state.is_serving()
    }
}
