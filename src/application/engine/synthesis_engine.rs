//! Synthesis Engine
//!
//! 持有唯一的模型资源，负责：
//! - 启动时加载 / 编译 / 预热
//! - 每个请求的参数解析、推理、波形规整、WAV 编码
//!
//! 模型调用通过 Mutex 串行化，同一设备上下文不会被并发进入

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use super::lifecycle::{EngineOptions, ModelState, ModelStatus};
use crate::application::error::SynthesisError;
use crate::application::ports::{
    AudioEncoderPort, ComputeDevice, ModelLoaderPort, SynthesisModelPort, VoiceRegistryPort,
};
use crate::domain::generation::{GenerationOverrides, GenerationParameters, Waveform};

/// 合成请求
#[derive(Debug, Clone, Default)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: Option<String>,
    pub overrides: GenerationOverrides,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_overrides(mut self, overrides: GenerationOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// 编码后的音频（WAV）
    pub audio_data: Vec<u8>,
    pub content_type: &'static str,
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_ms: u64,
}

/// 合成引擎
pub struct SynthesisEngine {
    status: ModelStatus,
    /// Unavailable 时为 None
    model: Option<Mutex<Box<dyn SynthesisModelPort>>>,
    voices: Arc<dyn VoiceRegistryPort>,
    encoder: Arc<dyn AudioEncoderPort>,
}

impl SynthesisEngine {
    /// 初始化模型资源
    ///
    /// 基础模型加载失败不会返回错误：引擎进入 Unavailable，
    /// 之后所有合成请求立即返回 `ModelUnavailable`
    pub async fn initialize(
        loader: &dyn ModelLoaderPort,
        options: &EngineOptions,
        voices: Arc<dyn VoiceRegistryPort>,
        encoder: Arc<dyn AudioEncoderPort>,
    ) -> Self {
        let mut state = ModelState::Uninitialized;
        let device = loader.detect_device().await;

        tracing::info!(device = %device, "Initializing synthesis model");

        let mut model = match loader.load(device).await {
            Ok(model) => model,
            Err(e) => {
                tracing::error!(device = %device, error = %e, "Failed to load synthesis model");
                state.advance(ModelState::Unavailable);
                return Self {
                    status: ModelStatus {
                        state,
                        device,
                        compiled: false,
                        warmed_up: false,
                        sample_rate: None,
                    },
                    model: None,
                    voices,
                    encoder,
                };
            }
        };

        tracing::info!(
            device = %device,
            sample_rate = model.sample_rate(),
            "Synthesis model loaded"
        );

        let mut degraded = false;

        let mut compiled = false;
        if options.compile {
            tracing::info!(mode = %options.compile_mode, "Compiling model (this may take a while)");
            match model.compile(&options.compile_mode).await {
                Ok(()) => {
                    compiled = true;
                    tracing::info!("Model compilation complete");
                }
                Err(e) => {
                    degraded = true;
                    tracing::warn!(error = %e, "Compilation failed, falling back to standard mode");
                }
            }
        }

        let mut warmed_up = false;
        if options.warmup && device.is_accelerator() {
            tracing::info!(device = %device, "Warming up model");
            match model
                .generate(&options.warmup_text, &GenerationParameters::default())
                .await
            {
                Ok(_) => {
                    warmed_up = true;
                    tracing::info!("Model warmup complete");
                }
                Err(e) => {
                    degraded = true;
                    tracing::warn!(error = %e, "Model warmup failed, continuing without warmup");
                }
            }
        }

        state.advance(if degraded {
            ModelState::Degraded
        } else {
            ModelState::Ready
        });

        Self {
            status: ModelStatus {
                state,
                device,
                compiled,
                warmed_up,
                sample_rate: Some(model.sample_rate()),
            },
            model: Some(Mutex::new(model)),
            voices,
            encoder,
        }
    }

    pub fn status(&self) -> &ModelStatus {
        &self.status
    }

    pub fn state(&self) -> ModelState {
        self.status.state
    }

    pub fn device(&self) -> ComputeDevice {
        self.status.device
    }

    pub fn is_serving(&self) -> bool {
        self.status.is_serving()
    }

    /// 三层参数解析：默认值 → 音色 → 请求
    ///
    /// 找不到音色时记录警告并按未指定音色处理
    pub fn resolve_parameters(
        &self,
        voice: Option<&str>,
        overrides: &GenerationOverrides,
    ) -> GenerationParameters {
        let profile = match voice.filter(|name| !name.is_empty()) {
            Some(name) => match self.voices.get(name) {
                Some(profile) => {
                    tracing::info!(voice = name, "Using voice configuration");
                    Some(profile)
                }
                None => {
                    tracing::warn!(voice = name, "Voice not found, using defaults");
                    None
                }
            },
            None => None,
        };

        GenerationParameters::resolve(profile.as_ref(), overrides)
    }

    /// 合成语音
    pub async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        let request_id = Uuid::new_v4();
        let text_len = request.text.chars().count();

        tracing::info!(
            request_id = %request_id,
            text_len = text_len,
            voice = ?request.voice,
            "Received synthesis request"
        );

        if request.text.is_empty() {
            tracing::debug!(request_id = %request_id, "Empty text, nothing to synthesize");
            return Err(SynthesisError::EmptyInput);
        }

        let model = match &self.model {
            Some(model) if self.status.is_serving() => model,
            _ => {
                tracing::warn!(request_id = %request_id, "Synthesis model unavailable");
                return Err(SynthesisError::ModelUnavailable);
            }
        };

        let params = self.resolve_parameters(request.voice.as_deref(), &request.overrides);

        tracing::info!(
            request_id = %request_id,
            temperature = params.temperature,
            cfg_weight = params.cfg_weight,
            exaggeration = params.exaggeration,
            audio_prompt = ?params.audio_prompt_path,
            "Generating with params"
        );

        match self.run_pipeline(model, &request.text, &params).await {
            Ok(audio) => {
                tracing::info!(
                    request_id = %request_id,
                    sample_rate = audio.sample_rate,
                    channels = audio.channels,
                    duration_ms = audio.duration_ms,
                    audio_size = audio.audio_data.len(),
                    "Synthesis completed"
                );
                Ok(audio)
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    text_len = text_len,
                    voice = ?request.voice,
                    params = ?params,
                    reason = e.reason(),
                    error = %e,
                    "Synthesis failed"
                );
                Err(e)
            }
        }
    }

    /// 推理 → 规整 → 编码
    async fn run_pipeline(
        &self,
        model: &Mutex<Box<dyn SynthesisModelPort>>,
        text: &str,
        params: &GenerationParameters,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        let raw = {
            let mut model = model.lock().await;
            model.generate(text, params).await?
        };

        let waveform = Waveform::from_raw(raw)?;

        let audio_data = self.encoder.encode(&waveform)?;

        Ok(SynthesizedAudio {
            audio_data,
            content_type: self.encoder.content_type(),
            sample_rate: waveform.sample_rate(),
            channels: waveform.channel_count(),
            duration_ms: waveform.duration_ms(),
        })
    }
}
