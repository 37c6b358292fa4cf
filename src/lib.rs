//! voxserve - 语音合成服务
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice: 音色配置（参考音频 + 参数覆盖）
//! - Generation: 生成参数解析、模型输出波形规整
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SynthesisModel, ModelLoader, AudioEncoder, VoiceRegistry）
//! - Engine: 模型生命周期 + 合成流水线
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Voices: 目录扫描的音色注册表
//! - Adapters: 模型适配器（HTTP / Fake）、WAV 编码器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
