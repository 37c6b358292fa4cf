//! Waveform - 模型输出规整
//!
//! 模型返回任意形状的张量（行优先展开），编码前统一为 channel × samples

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WaveformError {
    #[error("shape {shape:?} expects {expected} samples, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported waveform rank: {0:?}")]
    UnsupportedRank(Vec<usize>),

    #[error("waveform has no channels")]
    NoChannels,

    #[error("shape {0:?} overflows the sample count")]
    ShapeOverflow(Vec<usize>),

    #[error("too many channels: {0} (max 65535)")]
    TooManyChannels(usize),
}

/// WAV 声道数上限
pub const MAX_CHANNELS: usize = u16::MAX as usize;

/// 模型原始输出
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWaveform {
    /// 张量形状，空表示一维（等价于 `[samples.len()]`）
    #[serde(default)]
    pub shape: Vec<usize>,
    /// 行优先展开的样本
    pub samples: Vec<f32>,
    /// 原生采样率
    pub sample_rate: u32,
}

impl RawWaveform {
    /// 一维输出
    pub fn flat(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            shape: vec![samples.len()],
            samples,
            sample_rate,
        }
    }

    /// 按形状构造
    pub fn shaped(shape: Vec<usize>, samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            shape,
            samples,
            sample_rate,
        }
    }
}

/// 规整后的波形：channels[c][i]
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl Waveform {
    /// 规整模型输出
    ///
    /// - 一维 → 单声道
    /// - 二维 → 保持声道数
    /// - 更高维 → 去掉前导的长度为 1 的维度后按上述处理
    pub fn from_raw(raw: RawWaveform) -> Result<Self, WaveformError> {
        let RawWaveform {
            shape,
            samples,
            sample_rate,
        } = raw;

        let mut shape = if shape.is_empty() {
            vec![samples.len()]
        } else {
            shape
        };

        let expected = match shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d)) {
            Some(expected) => expected,
            None => return Err(WaveformError::ShapeOverflow(shape)),
        };
        if expected != samples.len() {
            return Err(WaveformError::ShapeMismatch {
                shape,
                expected,
                actual: samples.len(),
            });
        }

        while shape.len() > 2 && shape[0] == 1 {
            shape.remove(0);
        }

        let channels = match shape.len() {
            1 => vec![samples],
            2 => {
                let (count, frames) = (shape[0], shape[1]);
                if count == 0 {
                    return Err(WaveformError::NoChannels);
                }
                if count > MAX_CHANNELS {
                    return Err(WaveformError::TooManyChannels(count));
                }
                if frames == 0 {
                    // 每个声道都为空，保留声道数
                    vec![Vec::new(); count]
                } else {
                    samples.chunks(frames).map(<[f32]>::to_vec).collect()
                }
            }
            _ => return Err(WaveformError::UnsupportedRank(shape)),
        };

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// 声道数，构造时已保证不超过 `MAX_CHANNELS`
    pub fn channel_count(&self) -> u16 {
        self.channels.len() as u16
    }

    /// 每个声道的样本数
    pub fn frames(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or(0)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// 交错样本（WAV 帧顺序）
    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.frames()).flat_map(move |i| self.channels.iter().map(move |c| c[i]))
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.frames() as u64 * 1000) / self.sample_rate as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_output_becomes_single_channel() {
        let wave = Waveform::from_raw(RawWaveform::flat(vec![0.1, 0.2, 0.3], 24000)).unwrap();
        assert_eq!(wave.channel_count(), 1);
        assert_eq!(wave.frames(), 3);
        assert_eq!(wave.channel(0), Some(&[0.1, 0.2, 0.3][..]));
    }

    #[test]
    fn test_empty_shape_is_treated_as_flat() {
        let raw = RawWaveform::shaped(vec![], vec![0.5; 4], 16000);
        let wave = Waveform::from_raw(raw).unwrap();
        assert_eq!(wave.channel_count(), 1);
        assert_eq!(wave.frames(), 4);
    }

    #[test]
    fn test_two_dimensional_output_preserves_channels() {
        let raw = RawWaveform::shaped(vec![2, 3], vec![1.0, 2.0, 3.0, -1.0, -2.0, -3.0], 24000);
        let wave = Waveform::from_raw(raw).unwrap();

        assert_eq!(wave.channel_count(), 2);
        assert_eq!(wave.frames(), 3);
        assert_eq!(wave.channel(1), Some(&[-1.0, -2.0, -3.0][..]));
        assert_eq!(
            wave.interleaved().collect::<Vec<_>>(),
            vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0]
        );
    }

    #[test]
    fn test_leading_singleton_dims_are_squeezed() {
        let raw = RawWaveform::shaped(vec![1, 1, 4], vec![0.0; 4], 24000);
        let wave = Waveform::from_raw(raw).unwrap();
        assert_eq!(wave.channel_count(), 1);
        assert_eq!(wave.frames(), 4);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let raw = RawWaveform::shaped(vec![2, 3], vec![0.0; 5], 24000);
        assert!(matches!(
            Waveform::from_raw(raw),
            Err(WaveformError::ShapeMismatch { expected: 6, actual: 5, .. })
        ));
    }

    #[test]
    fn test_unsupported_rank() {
        let raw = RawWaveform::shaped(vec![2, 2, 2], vec![0.0; 8], 24000);
        assert!(matches!(
            Waveform::from_raw(raw),
            Err(WaveformError::UnsupportedRank(_))
        ));
    }

    #[test]
    fn test_zero_channels() {
        let raw = RawWaveform::shaped(vec![0, 10], vec![], 24000);
        assert_eq!(Waveform::from_raw(raw), Err(WaveformError::NoChannels));
    }

    #[test]
    fn test_overflowing_shape_is_rejected() {
        let raw = RawWaveform::shaped(vec![1 << 33, 1 << 31], vec![], 24000);
        assert!(matches!(
            Waveform::from_raw(raw),
            Err(WaveformError::ShapeOverflow(_))
        ));

        let raw = RawWaveform::shaped(vec![usize::MAX, 2, 1], vec![0.0; 2], 24000);
        assert!(matches!(
            Waveform::from_raw(raw),
            Err(WaveformError::ShapeOverflow(_))
        ));
    }

    #[test]
    fn test_huge_channel_count_with_no_frames_is_rejected() {
        let raw = RawWaveform::shaped(vec![1 << 62, 0], vec![], 24000);
        assert_eq!(
            Waveform::from_raw(raw),
            Err(WaveformError::TooManyChannels(1 << 62))
        );

        let raw = RawWaveform::shaped(vec![MAX_CHANNELS + 1, 0], vec![], 24000);
        assert_eq!(
            Waveform::from_raw(raw),
            Err(WaveformError::TooManyChannels(MAX_CHANNELS + 1))
        );
    }

    #[test]
    fn test_channel_limit_is_inclusive() {
        let raw = RawWaveform::shaped(vec![MAX_CHANNELS, 0], vec![], 24000);
        let wave = Waveform::from_raw(raw).unwrap();
        assert_eq!(wave.channel_count(), u16::MAX);
        assert_eq!(wave.frames(), 0);
    }

    #[test]
    fn test_duration() {
        let wave = Waveform::from_raw(RawWaveform::flat(vec![0.0; 24000], 24000)).unwrap();
        assert_eq!(wave.duration_ms(), 1000);
    }
}
