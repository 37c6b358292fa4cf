//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_encoder;
mod synthesis_model;
mod voice_registry;

pub use audio_encoder::{AudioEncoderPort, EncodeError, SampleFormat};
pub use synthesis_model::{ComputeDevice, ModelError, ModelLoaderPort, SynthesisModelPort};
pub use voice_registry::VoiceRegistryPort;
