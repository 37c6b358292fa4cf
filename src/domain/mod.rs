//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色 Profile
//! - Generation Context: 合成参数合并、波形规整

pub mod generation;
pub mod voice;
