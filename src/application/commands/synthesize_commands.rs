//! Synthesize Commands

use crate::application::engine::SynthesisRequest;
use crate::domain::generation::GenerationOverrides;

/// 合成命令
#[derive(Debug, Clone)]
pub struct Synthesize {
    pub text: String,
    pub voice: Option<String>,
    pub overrides: GenerationOverrides,
}

impl From<Synthesize> for SynthesisRequest {
    fn from(command: Synthesize) -> Self {
        Self {
            text: command.text,
            voice: command.voice,
            overrides: command.overrides,
        }
    }
}
