//! Synthesis Engine - 合成编排核心
//!
//! - lifecycle: 模型资源状态机与启动选项
//! - synthesis_engine: 参数解析 → 推理 → 规整 → 编码

mod lifecycle;
mod synthesis_engine;

pub use lifecycle::{
    EngineOptions, ModelState, ModelStatus, DEFAULT_COMPILE_MODE, DEFAULT_WARMUP_TEXT,
};
pub use synthesis_engine::{SynthesisEngine, SynthesisRequest, SynthesizedAudio};
