//! HTTP Synthesis Model - 调用外部模型推理服务
//!
//! 实现 ModelLoaderPort / SynthesisModelPort，模型运行在独立的推理进程中
//!
//! 推理服务 API:
//! POST {base}/load      {"device": "cuda"}                  → {"sample_rate": 24000}
//! POST {base}/compile   {"mode": "reduce-overhead"}         → 2xx
//! POST {base}/generate  {"text": "...", "temperature": ...} → {"sample_rate", "shape", "samples"}

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::device::{select_device, DevicePreference};
use crate::application::ports::{ComputeDevice, ModelError, ModelLoaderPort, SynthesisModelPort};
use crate::domain::generation::{GenerationParameters, RawWaveform};

#[derive(Debug, Serialize)]
struct LoadRequest {
    device: ComputeDevice,
}

#[derive(Debug, Deserialize)]
struct LoadResponse {
    sample_rate: u32,
}

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    mode: &'a str,
}

/// 推理请求体 (JSON)
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    text: &'a str,
    temperature: f32,
    cfg_weight: f32,
    exaggeration: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_prompt_path: Option<String>,
}

impl<'a> GenerateRequest<'a> {
    fn new(text: &'a str, params: &GenerationParameters) -> Self {
        Self {
            text,
            temperature: params.temperature,
            cfg_weight: params.cfg_weight,
            exaggeration: params.exaggeration,
            audio_prompt_path: params
                .audio_prompt_path()
                .map(|p| p.to_string_lossy().into_owned()),
        }
    }
}

/// HTTP 模型配置
#[derive(Debug, Clone)]
pub struct HttpModelConfig {
    /// 推理服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 设备偏好
    pub device: DevicePreference,
}

impl Default for HttpModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            timeout_secs: 300,
            device: DevicePreference::Auto,
        }
    }
}

impl HttpModelConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_device(mut self, device: DevicePreference) -> Self {
        self.device = device;
        self
    }
}

/// HTTP 模型加载器
pub struct HttpModelLoader {
    client: Client,
    config: HttpModelConfig,
}

impl HttpModelLoader {
    pub fn new(config: HttpModelConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ModelLoaderPort for HttpModelLoader {
    async fn detect_device(&self) -> ComputeDevice {
        select_device(self.config.device)
    }

    async fn load(&self, device: ComputeDevice) -> Result<Box<dyn SynthesisModelPort>, ModelError> {
        let url = endpoint(&self.config.base_url, "load");
        tracing::debug!(url = %url, device = %device, "Loading model");

        let response = self
            .client
            .post(&url)
            .json(&LoadRequest { device })
            .send()
            .await
            .map_err(map_send_error)?;
        let response = check_status(response, ModelError::LoadFailed).await?;

        let loaded: LoadResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Invalid load response: {}", e)))?;

        Ok(Box::new(HttpSynthesisModel {
            client: self.client.clone(),
            base_url: self.config.base_url.clone(),
            sample_rate: loaded.sample_rate,
        }))
    }
}

/// 远程模型句柄
pub struct HttpSynthesisModel {
    client: Client,
    base_url: String,
    sample_rate: u32,
}

#[async_trait]
impl SynthesisModelPort for HttpSynthesisModel {
    async fn compile(&mut self, mode: &str) -> Result<(), ModelError> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "compile"))
            .json(&CompileRequest { mode })
            .send()
            .await
            .map_err(map_send_error)?;
        check_status(response, ModelError::CompileFailed).await?;
        Ok(())
    }

    async fn generate(
        &mut self,
        text: &str,
        params: &GenerationParameters,
    ) -> Result<RawWaveform, ModelError> {
        let body = GenerateRequest::new(text, params);

        tracing::debug!(
            text_len = text.len(),
            audio_prompt = ?body.audio_prompt_path,
            "Sending generate request"
        );

        let response = self
            .client
            .post(endpoint(&self.base_url, "generate"))
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;
        let response = check_status(response, ModelError::GenerationFailed).await?;

        let waveform: RawWaveform = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Invalid waveform: {}", e)))?;

        tracing::debug!(
            shape = ?waveform.shape,
            samples = waveform.samples.len(),
            sample_rate = waveform.sample_rate,
            "Generate request completed"
        );

        Ok(waveform)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

fn map_send_error(e: reqwest::Error) -> ModelError {
    if e.is_timeout() {
        ModelError::Timeout
    } else if e.is_connect() {
        ModelError::NetworkError(format!("Cannot connect to model service: {}", e))
    } else {
        ModelError::NetworkError(e.to_string())
    }
}

/// 非 2xx 转换为对应阶段的错误
async fn check_status(
    response: Response,
    to_error: fn(String) -> ModelError,
) -> Result<Response, ModelError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response.text().await.unwrap_or_default();
    Err(to_error(format!("HTTP {}: {}", status, error_text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_default() {
        let config = HttpModelConfig::default();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.device, DevicePreference::Auto);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpModelConfig::new("http://gpu-box:9000")
            .with_timeout(60)
            .with_device(DevicePreference::Cuda);
        assert_eq!(config.base_url, "http://gpu-box:9000");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.device, DevicePreference::Cuda);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(endpoint("http://m:9000/", "generate"), "http://m:9000/generate");
        assert_eq!(endpoint("http://m:9000", "load"), "http://m:9000/load");
    }

    #[test]
    fn test_generate_request_body() {
        let params = GenerationParameters {
            audio_prompt_path: Some(PathBuf::from("/voices/a.wav")),
            ..Default::default()
        };
        let body = serde_json::to_value(GenerateRequest::new("hi", &params)).unwrap();
        assert_eq!(body["text"], "hi");
        assert_eq!(body["audio_prompt_path"], "/voices/a.wav");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);

        let body = serde_json::to_value(GenerateRequest::new(
            "hi",
            &GenerationParameters::default(),
        ))
        .unwrap();
        assert!(body.get("audio_prompt_path").is_none());
    }

    #[test]
    fn test_waveform_response_parsing() {
        let raw: RawWaveform =
            serde_json::from_str(r#"{"sample_rate": 24000, "shape": [1, 3], "samples": [0.0, 0.5, -0.5]}"#)
                .unwrap();
        assert_eq!(raw.shape, vec![1, 3]);
        assert_eq!(raw.sample_rate, 24000);

        let flat: RawWaveform =
            serde_json::from_str(r#"{"sample_rate": 16000, "samples": [0.1]}"#).unwrap();
        assert!(flat.shape.is_empty());
    }

    #[tokio::test]
    async fn test_load_against_unreachable_service_fails() {
        let loader = HttpModelLoader::new(
            HttpModelConfig::new("http://127.0.0.1:1").with_timeout(2),
        )
        .unwrap();
        let result = loader.load(ComputeDevice::Cpu).await;
        assert!(matches!(
            result,
            Err(ModelError::NetworkError(_)) | Err(ModelError::Timeout)
        ));
    }
}
