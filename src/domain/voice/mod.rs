//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色配置文件的 schema
//! - 音色 Profile 值对象

mod errors;
mod profile;

pub use errors::VoiceError;
pub use profile::{VoiceProfile, VoiceProfileFile};
