//! Voice Query Handlers

use std::sync::Arc;

use crate::application::ports::VoiceRegistryPort;
use crate::application::queries::ListVoices;

/// ListVoices Handler
pub struct ListVoicesHandler {
    voices: Arc<dyn VoiceRegistryPort>,
}

impl ListVoicesHandler {
    pub fn new(voices: Arc<dyn VoiceRegistryPort>) -> Self {
        Self { voices }
    }

    pub fn handle(&self, _query: ListVoices) -> Vec<String> {
        self.voices.list()
    }
}
