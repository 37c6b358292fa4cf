//! Audio encoders

mod wav_encoder;

pub use wav_encoder::WavEncoder;
