//! Voice Directory - 基于目录的音色加载

mod registry;

pub use registry::VoiceRegistry;
