//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::engine::{EngineOptions, DEFAULT_COMPILE_MODE, DEFAULT_WARMUP_TEXT};
use crate::application::ports::SampleFormat;
use crate::infrastructure::adapters::{DevicePreference, HttpModelConfig};
use crate::infrastructure::http;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 音色配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 合成模型配置
    #[serde(default)]
    pub model: ModelConfig,

    /// 音频输出配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<&ServerConfig> for http::ServerConfig {
    fn from(config: &ServerConfig) -> Self {
        http::ServerConfig::new(config.host.clone(), config.port)
    }
}

/// 音色配置
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    /// 音色目录（`<name>.toml`，不递归）
    #[serde(default = "default_voices_dir")]
    pub dir: PathBuf,
}

fn default_voices_dir() -> PathBuf {
    PathBuf::from("voices")
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            dir: default_voices_dir(),
        }
    }
}

/// 模型后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    /// 外部推理服务
    #[default]
    Http,
    /// 正弦波模型，本地开发用
    Fake,
}

impl std::fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelBackend::Http => write!(f, "http"),
            ModelBackend::Fake => write!(f, "fake"),
        }
    }
}

/// 合成模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub backend: ModelBackend,

    /// 推理服务基础 URL（http 后端）
    #[serde(default = "default_model_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,

    /// 设备偏好: auto / cpu / cuda / metal
    #[serde(default)]
    pub device: DevicePreference,

    /// 是否尝试编译优化
    #[serde(default = "default_true")]
    pub compile: bool,

    #[serde(default = "default_compile_mode")]
    pub compile_mode: String,

    /// 是否在加速设备上预热
    #[serde(default = "default_true")]
    pub warmup: bool,

    #[serde(default = "default_warmup_text")]
    pub warmup_text: String,
}

fn default_model_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_model_timeout() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_compile_mode() -> String {
    DEFAULT_COMPILE_MODE.to_string()
}

fn default_warmup_text() -> String {
    DEFAULT_WARMUP_TEXT.to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::default(),
            url: default_model_url(),
            timeout_secs: default_model_timeout(),
            device: DevicePreference::default(),
            compile: true,
            compile_mode: default_compile_mode(),
            warmup: true,
            warmup_text: default_warmup_text(),
        }
    }
}

impl ModelConfig {
    /// HTTP 模型适配器配置
    pub fn http_model_config(&self) -> HttpModelConfig {
        HttpModelConfig::new(self.url.clone())
            .with_timeout(self.timeout_secs)
            .with_device(self.device)
    }

    /// 引擎初始化选项
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            compile: self.compile,
            compile_mode: self.compile_mode.clone(),
            warmup: self.warmup,
            warmup_text: self.warmup_text.clone(),
        }
    }
}

/// 音频输出配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioConfig {
    /// WAV 样本格式: pcm16 / float32
    #[serde(default)]
    pub sample_format: SampleFormat,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.voices.dir, PathBuf::from("voices"));
        assert_eq!(config.model.backend, ModelBackend::Http);
        assert_eq!(config.model.device, DevicePreference::Auto);
        assert!(config.model.compile);
        assert!(config.model.warmup);
        assert_eq!(config.audio.sample_format, SampleFormat::Pcm16);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_engine_options_follow_model_config() {
        let config = ModelConfig {
            compile: false,
            warmup_text: "hello".to_string(),
            ..Default::default()
        };
        let options = config.engine_options();
        assert!(!options.compile);
        assert!(options.warmup);
        assert_eq!(options.compile_mode, DEFAULT_COMPILE_MODE);
        assert_eq!(options.warmup_text, "hello");
    }

    #[test]
    fn test_partial_toml_uses_field_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [model]
            backend = "fake"
            device = "cuda"

            [audio]
            sample_format = "float32"
            "#,
        )
        .unwrap();
        assert_eq!(config.model.backend, ModelBackend::Fake);
        assert_eq!(config.model.device, DevicePreference::Cuda);
        assert_eq!(config.model.timeout_secs, 300);
        assert_eq!(config.audio.sample_format, SampleFormat::Float32);
        assert_eq!(config.server.port, 8000);
    }
}
