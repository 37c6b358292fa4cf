//! Generation Context - 合成参数与波形
//!
//! - parameters: 三层参数合并（默认值 → 音色 → 请求）
//! - waveform: 模型输出张量的规整

mod parameters;
mod waveform;

pub use parameters::{
    GenerationOverrides, GenerationParameters, DEFAULT_CFG_WEIGHT, DEFAULT_EXAGGERATION,
    DEFAULT_TEMPERATURE,
};
pub use waveform::{RawWaveform, Waveform, WaveformError, MAX_CHANNELS};
