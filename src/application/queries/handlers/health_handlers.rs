//! Health Query Handlers

use std::sync::Arc;

use crate::application::engine::{ModelStatus, SynthesisEngine};
use crate::application::ports::VoiceRegistryPort;
use crate::application::queries::GetHealth;

/// 就绪状态响应
#[derive(Debug, Clone)]
pub struct HealthResponse {
    pub model: ModelStatus,
    pub voices_loaded: usize,
}

impl HealthResponse {
    pub fn is_serving(&self) -> bool {
        self.model.is_serving()
    }
}

/// GetHealth Handler
pub struct GetHealthHandler {
    engine: Arc<SynthesisEngine>,
    voices: Arc<dyn VoiceRegistryPort>,
}

impl GetHealthHandler {
    pub fn new(engine: Arc<SynthesisEngine>, voices: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { engine, voices }
    }

    pub fn handle(&self, _query: GetHealth) -> HealthResponse {
        HealthResponse {
            model: self.engine.status().clone(),
            voices_loaded: self.voices.list().len(),
        }
    }
}
