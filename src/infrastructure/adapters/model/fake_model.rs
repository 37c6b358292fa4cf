//! Fake Synthesis Model - 用于测试和本地开发的模型
//!
//! 不加载真实模型，按文本长度生成正弦波；可配置各阶段失败

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::ports::{ComputeDevice, ModelError, ModelLoaderPort, SynthesisModelPort};
use crate::domain::generation::{GenerationParameters, RawWaveform};

/// Fake 模型配置
#[derive(Debug, Clone)]
pub struct FakeModelConfig {
    /// 报告的计算设备
    pub device: ComputeDevice,
    /// 采样率
    pub sample_rate: u32,
    /// 输出声道数，0 表示一维输出
    pub channels: usize,
    /// 每个字符生成的音频时长（毫秒）
    pub ms_per_char: u32,
    /// 每次推理的模拟延迟（毫秒）
    pub latency_ms: u64,
    pub fail_load: bool,
    pub fail_compile: bool,
    pub fail_generate: bool,
}

impl Default for FakeModelConfig {
    fn default() -> Self {
        Self {
            device: ComputeDevice::Cpu,
            sample_rate: 24000,
            channels: 0,
            ms_per_char: 50,
            latency_ms: 0,
            fail_load: false,
            fail_compile: false,
            fail_generate: false,
        }
    }
}

/// 调用记录，加载器与模型共享
#[derive(Debug, Default)]
pub struct FakeModelProbe {
    compile_calls: AtomicUsize,
    generate_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    texts: Mutex<Vec<String>>,
    last_params: Mutex<Option<GenerationParameters>>,
}

impl FakeModelProbe {
    pub fn compile_calls(&self) -> usize {
        self.compile_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    /// 观察到的最大并发推理数
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn last_params(&self) -> Option<GenerationParameters> {
        self.last_params.lock().ok().and_then(|p| p.clone())
    }

    fn record(&self, text: &str, params: &GenerationParameters) {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut texts) = self.texts.lock() {
            texts.push(text.to_string());
        }
        if let Ok(mut last) = self.last_params.lock() {
            *last = Some(params.clone());
        }
    }
}

/// Fake 模型加载器
pub struct FakeModelLoader {
    config: FakeModelConfig,
    probe: Arc<FakeModelProbe>,
}

impl FakeModelLoader {
    pub fn new(config: FakeModelConfig) -> Self {
        Self {
            config,
            probe: Arc::new(FakeModelProbe::default()),
        }
    }

    pub fn probe(&self) -> Arc<FakeModelProbe> {
        self.probe.clone()
    }
}

#[async_trait]
impl ModelLoaderPort for FakeModelLoader {
    async fn detect_device(&self) -> ComputeDevice {
        self.config.device
    }

    async fn load(&self, device: ComputeDevice) -> Result<Box<dyn SynthesisModelPort>, ModelError> {
        if self.config.fail_load {
            return Err(ModelError::LoadFailed(
                "fake model configured to fail loading".to_string(),
            ));
        }

        tracing::info!(
            device = %device,
            sample_rate = self.config.sample_rate,
            "FakeSynthesisModel loaded"
        );

        Ok(Box::new(FakeSynthesisModel {
            config: self.config.clone(),
            probe: self.probe.clone(),
        }))
    }
}

/// Fake 模型
pub struct FakeSynthesisModel {
    config: FakeModelConfig,
    probe: Arc<FakeModelProbe>,
}

impl FakeSynthesisModel {
    /// 生成正弦波，频率随 temperature 变化
    fn tone(&self, text: &str, params: &GenerationParameters) -> RawWaveform {
        let chars = text.chars().count() as u64;
        let frames = (chars * self.config.ms_per_char as u64 * self.config.sample_rate as u64
            / 1000)
            .max(1) as usize;
        let freq = 220.0 + params.temperature * 100.0;
        let rate = self.config.sample_rate as f32;

        let mono: Vec<f32> = (0..frames)
            .map(|i| 0.3 * (2.0 * std::f32::consts::PI * freq * i as f32 / rate).sin())
            .collect();

        match self.config.channels {
            0 => RawWaveform::flat(mono, self.config.sample_rate),
            n => RawWaveform::shaped(vec![n, frames], mono.repeat(n), self.config.sample_rate),
        }
    }
}

#[async_trait]
impl SynthesisModelPort for FakeSynthesisModel {
    async fn compile(&mut self, mode: &str) -> Result<(), ModelError> {
        self.probe.compile_calls.fetch_add(1, Ordering::SeqCst);
        if self.config.fail_compile {
            return Err(ModelError::CompileFailed(format!(
                "fake model cannot compile in mode {}",
                mode
            )));
        }
        Ok(())
    }

    async fn generate(
        &mut self,
        text: &str,
        params: &GenerationParameters,
    ) -> Result<RawWaveform, ModelError> {
        let current = self.probe.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.probe.max_in_flight.fetch_max(current, Ordering::SeqCst);
        self.probe.record(text, params);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        self.probe.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.config.fail_generate {
            return Err(ModelError::GenerationFailed(
                "fake model configured to fail generation".to_string(),
            ));
        }

        tracing::debug!(
            text_len = text.len(),
            temperature = params.temperature,
            "FakeSynthesisModel: returning tone"
        );

        Ok(self.tone(text, params))
    }

    fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flat_output_length() {
        let loader = FakeModelLoader::new(FakeModelConfig::default());
        let mut model = loader.load(ComputeDevice::Cpu).await.unwrap();

        let raw = model
            .generate("abcd", &GenerationParameters::default())
            .await
            .unwrap();

        // 4 chars * 50ms * 24kHz
        assert_eq!(raw.shape, vec![4800]);
        assert_eq!(raw.samples.len(), 4800);
        assert_eq!(loader.probe().generate_calls(), 1);
    }

    #[tokio::test]
    async fn test_multichannel_output_shape() {
        let loader = FakeModelLoader::new(FakeModelConfig {
            channels: 2,
            ms_per_char: 1,
            sample_rate: 1000,
            ..Default::default()
        });
        let mut model = loader.load(ComputeDevice::Cpu).await.unwrap();

        let raw = model
            .generate("abc", &GenerationParameters::default())
            .await
            .unwrap();
        assert_eq!(raw.shape, vec![2, 3]);
        assert_eq!(raw.samples.len(), 6);
    }

    #[tokio::test]
    async fn test_configured_failures() {
        let loader = FakeModelLoader::new(FakeModelConfig {
            fail_load: true,
            ..Default::default()
        });
        assert!(matches!(
            loader.load(ComputeDevice::Cpu).await,
            Err(ModelError::LoadFailed(_))
        ));

        let loader = FakeModelLoader::new(FakeModelConfig {
            fail_compile: true,
            fail_generate: true,
            ..Default::default()
        });
        let mut model = loader.load(ComputeDevice::Cpu).await.unwrap();
        assert!(model.compile("default").await.is_err());
        assert!(model
            .generate("x", &GenerationParameters::default())
            .await
            .is_err());
        assert_eq!(loader.probe().compile_calls(), 1);
    }
}
