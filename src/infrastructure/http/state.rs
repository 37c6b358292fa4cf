//! Application State
//!
//! 各 Command/Query Handler（共享同一个合成引擎与音色注册表）

use std::sync::Arc;

use crate::application::{
    GetHealthHandler, ListVoicesHandler, SynthesisEngine, SynthesizeHandler, VoiceRegistryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub health_handler: GetHealthHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(engine: Arc<SynthesisEngine>, voices: Arc<dyn VoiceRegistryPort>) -> Self {
        Self {
            synthesize_handler: SynthesizeHandler::new(engine.clone()),

            list_voices_handler: ListVoicesHandler::new(voices.clone()),
            health_handler: GetHealthHandler::new(engine, voices),
        }
    }
}
