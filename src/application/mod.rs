//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SynthesisModel、AudioEncoder、VoiceRegistry）
//! - engine: 合成引擎（模型生命周期 + 合成流水线）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod engine;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{handlers::SynthesizeHandler, Synthesize};

pub use engine::{
    EngineOptions, ModelState, ModelStatus, SynthesisEngine, SynthesisRequest, SynthesizedAudio,
};

pub use error::SynthesisError;

pub use ports::{
    AudioEncoderPort, ComputeDevice, EncodeError, ModelError, ModelLoaderPort, SampleFormat,
    SynthesisModelPort, VoiceRegistryPort,
};

pub use queries::{
    handlers::{GetHealthHandler, HealthResponse, ListVoicesHandler},
    GetHealth, ListVoices,
};
