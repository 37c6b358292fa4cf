//! Voice Context - Profile

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::generation::GenerationOverrides;

use super::VoiceError;

/// 音色配置文件（TOML）
///
/// 所有字段可选，未知字段忽略
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceProfileFile {
    /// 参考音频路径，相对于配置文件所在目录
    #[serde(default)]
    pub audio_path: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub cfg_weight: Option<f32>,
    #[serde(default)]
    pub exaggeration: Option<f32>,
}

impl VoiceProfileFile {
    /// 解析 TOML 内容
    pub fn parse(content: &str, source: &Path) -> Result<Self, VoiceError> {
        toml::from_str(content).map_err(|e| VoiceError::Parse {
            path: source.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// 参考音频相对于配置文件目录的路径（未做存在性检查）
    pub fn audio_path_relative_to(&self, source: &Path) -> Option<PathBuf> {
        let audio_path = self.audio_path.as_ref()?;
        let base = source.parent().unwrap_or_else(|| Path::new("."));
        Some(base.join(audio_path))
    }
}

/// 音色 Profile
///
/// 不变量:
/// - name 来源于配置文件名（不含扩展名）
/// - reference_audio 若存在，则为加载时已确认存在的绝对路径
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceProfile {
    name: String,
    reference_audio: Option<PathBuf>,
    overrides: GenerationOverrides,
}

impl VoiceProfile {
    pub fn new(
        name: impl Into<String>,
        reference_audio: Option<PathBuf>,
        overrides: GenerationOverrides,
    ) -> Self {
        Self {
            name: name.into(),
            reference_audio,
            overrides,
        }
    }

    /// 由已解析的配置文件构建，reference_audio 需由调用方解析为绝对路径
    pub fn from_file(
        name: impl Into<String>,
        file: &VoiceProfileFile,
        reference_audio: Option<PathBuf>,
    ) -> Self {
        Self::new(
            name,
            reference_audio,
            GenerationOverrides {
                temperature: file.temperature,
                cfg_weight: file.cfg_weight,
                exaggeration: file.exaggeration,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference_audio(&self) -> Option<&Path> {
        self.reference_audio.as_deref()
    }

    pub fn overrides(&self) -> &GenerationOverrides {
        &self.overrides
    }
}
