//! Synthesize Command Handlers

use std::sync::Arc;

use crate::application::commands::Synthesize;
use crate::application::engine::{SynthesisEngine, SynthesizedAudio};
use crate::application::error::SynthesisError;

/// Synthesize Handler
pub struct SynthesizeHandler {
    engine: Arc<SynthesisEngine>,
}

impl SynthesizeHandler {
    pub fn new(engine: Arc<SynthesisEngine>) -> Self {
        Self { engine }
    }

    pub async fn handle(&self, command: Synthesize) -> Result<SynthesizedAudio, SynthesisError> {
        self.engine.synthesize(command.into()).await
    }
}
