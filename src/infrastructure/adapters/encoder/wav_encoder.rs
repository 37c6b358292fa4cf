//! WAV Encoder - 基于 hound 的 WAV 编码器
//!
//! 多声道按帧交错写入，声道数与波形一致

use hound::{WavSpec, WavWriter};
use std::io::Cursor;

use crate::application::ports::{AudioEncoderPort, EncodeError, SampleFormat};
use crate::domain::generation::Waveform;

/// WAV 编码器
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder {
    format: SampleFormat,
}

impl WavEncoder {
    pub fn new(format: SampleFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    fn wav_spec(&self, channels: u16, sample_rate: u32) -> WavSpec {
        match self.format {
            SampleFormat::Pcm16 => WavSpec {
                channels,
                sample_rate,
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            },
            SampleFormat::Float32 => WavSpec {
                channels,
                sample_rate,
                bits_per_sample: 32,
                sample_format: hound::SampleFormat::Float,
            },
        }
    }
}

impl AudioEncoderPort for WavEncoder {
    fn encode(&self, waveform: &Waveform) -> Result<Vec<u8>, EncodeError> {
        let channels = waveform.channel_count();
        if channels == 0 {
            return Err(EncodeError::InvalidInput("Waveform has no channels".to_string()));
        }
        if waveform.sample_rate() == 0 {
            return Err(EncodeError::InvalidInput("Sample rate is zero".to_string()));
        }

        let spec = self.wav_spec(channels, waveform.sample_rate());
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec)
                .map_err(|e| EncodeError::EncodingError(e.to_string()))?;

            for sample in waveform.interleaved() {
                let written = match self.format {
                    SampleFormat::Pcm16 => writer.write_sample(to_pcm16(sample)),
                    SampleFormat::Float32 => writer.write_sample(sample),
                };
                written.map_err(|e| EncodeError::EncodingError(e.to_string()))?;
            }

            writer
                .finalize()
                .map_err(|e| EncodeError::EncodingError(e.to_string()))?;
        }

        Ok(cursor.into_inner())
    }

    fn content_type(&self) -> &'static str {
        "audio/wav"
    }
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}
