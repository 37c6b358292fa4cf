//! 基础设施层
//!
//! - adapters: 模型与编码器适配器
//! - http: HTTP 接口
//! - voices: 音色注册表

pub mod adapters;
pub mod http;
pub mod voices;
