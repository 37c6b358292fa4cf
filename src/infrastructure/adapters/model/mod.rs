//! Synthesis model adapters
//!
//! - `http`: 远程推理服务
//! - `fake`: 本地开发与测试

mod device;
mod fake_model;
mod http_model;

pub use device::{select_device, DevicePreference};
pub use fake_model::{FakeModelConfig, FakeModelLoader, FakeModelProbe, FakeSynthesisModel};
pub use http_model::{HttpModelConfig, HttpModelLoader, HttpSynthesisModel};
