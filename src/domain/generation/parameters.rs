//! Generation Parameters
//!
//! 每个请求重新构建，按层覆盖：系统默认值 → 音色 Profile → 请求参数

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::voice::VoiceProfile;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_CFG_WEIGHT: f32 = 0.5;
pub const DEFAULT_EXAGGERATION: f32 = 0.5;

/// 可选参数覆盖
///
/// `None` 表示未提供，不会覆盖上一层的值
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOverrides {
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub cfg_weight: Option<f32>,
    #[serde(default)]
    pub exaggeration: Option<f32>,
}

impl GenerationOverrides {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.cfg_weight.is_none() && self.exaggeration.is_none()
    }
}

/// 最终传给模型的生成参数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub temperature: f32,
    pub cfg_weight: f32,
    pub exaggeration: f32,
    /// 参考音频（音色克隆）
    pub audio_prompt_path: Option<PathBuf>,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            cfg_weight: DEFAULT_CFG_WEIGHT,
            exaggeration: DEFAULT_EXAGGERATION,
            audio_prompt_path: None,
        }
    }
}

impl GenerationParameters {
    /// 应用音色层：先参考音频，再逐字段覆盖
    pub fn with_profile(mut self, profile: &VoiceProfile) -> Self {
        if let Some(audio) = profile.reference_audio() {
            self.audio_prompt_path = Some(audio.to_path_buf());
        }
        self.with_overrides(profile.overrides())
    }

    /// 应用覆盖层，仅 `Some` 字段生效
    pub fn with_overrides(mut self, overrides: &GenerationOverrides) -> Self {
        if let Some(temperature) = overrides.temperature {
            self.temperature = temperature;
        }
        if let Some(cfg_weight) = overrides.cfg_weight {
            self.cfg_weight = cfg_weight;
        }
        if let Some(exaggeration) = overrides.exaggeration {
            self.exaggeration = exaggeration;
        }
        self
    }

    /// 三层合并
    pub fn resolve(profile: Option<&VoiceProfile>, overrides: &GenerationOverrides) -> Self {
        let base = Self::default();
        let base = match profile {
            Some(profile) => base.with_profile(profile),
            None => base,
        };
        base.with_overrides(overrides)
    }

    pub fn audio_prompt_path(&self) -> Option<&Path> {
        self.audio_prompt_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(overrides: GenerationOverrides, audio: Option<&str>) -> VoiceProfile {
        VoiceProfile::new("narrator", audio.map(PathBuf::from), overrides)
    }

    #[test]
    fn test_defaults() {
        let params = GenerationParameters::resolve(None, &GenerationOverrides::default());
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.cfg_weight, 0.5);
        assert_eq!(params.exaggeration, 0.5);
        assert!(params.audio_prompt_path().is_none());
    }

    #[test]
    fn test_temperature_precedence() {
        let voice = profile(
            GenerationOverrides {
                temperature: Some(0.9),
                ..Default::default()
            },
            None,
        );
        let from_profile = GenerationParameters::resolve(Some(&voice), &Default::default());
        assert_eq!(from_profile.temperature, 0.9);

        let request = GenerationOverrides {
            temperature: Some(0.3),
            ..Default::default()
        };
        let from_request = GenerationParameters::resolve(Some(&voice), &request);
        assert_eq!(from_request.temperature, 0.3);
        assert_eq!(from_request.cfg_weight, DEFAULT_CFG_WEIGHT);
        assert_eq!(from_request.exaggeration, DEFAULT_EXAGGERATION);
    }

    #[test]
    fn test_cfg_weight_precedence() {
        let voice = profile(
            GenerationOverrides {
                cfg_weight: Some(0.2),
                ..Default::default()
            },
            None,
        );
        assert_eq!(
            GenerationParameters::resolve(Some(&voice), &Default::default()).cfg_weight,
            0.2
        );

        let request = GenerationOverrides {
            cfg_weight: Some(0.8),
            ..Default::default()
        };
        let params = GenerationParameters::resolve(Some(&voice), &request);
        assert_eq!(params.cfg_weight, 0.8);
        assert_eq!(params.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_exaggeration_precedence() {
        let voice = profile(
            GenerationOverrides {
                exaggeration: Some(1.2),
                ..Default::default()
            },
            None,
        );
        assert_eq!(
            GenerationParameters::resolve(Some(&voice), &Default::default()).exaggeration,
            1.2
        );

        let request = GenerationOverrides {
            exaggeration: Some(0.1),
            ..Default::default()
        };
        assert_eq!(
            GenerationParameters::resolve(Some(&voice), &request).exaggeration,
            0.1
        );
    }

    #[test]
    fn test_profile_audio_is_applied() {
        let voice = profile(GenerationOverrides::default(), Some("/voices/ref.wav"));
        let params = GenerationParameters::resolve(Some(&voice), &Default::default());
        assert_eq!(params.audio_prompt_path(), Some(Path::new("/voices/ref.wav")));
    }

    #[test]
    fn test_null_override_is_absent() {
        let overrides: GenerationOverrides =
            serde_json::from_str(r#"{"temperature": null, "cfg_weight": 0.4}"#).unwrap();
        assert_eq!(overrides.temperature, None);

        let voice = profile(
            GenerationOverrides {
                temperature: Some(0.9),
                ..Default::default()
            },
            None,
        );
        let params = GenerationParameters::resolve(Some(&voice), &overrides);
        assert_eq!(params.temperature, 0.9);
        assert_eq!(params.cfg_weight, 0.4);
    }

    #[test]
    fn test_overrides_is_empty() {
        assert!(GenerationOverrides::default().is_empty());
        assert!(!GenerationOverrides {
            exaggeration: Some(0.5),
            ..Default::default()
        }
        .is_empty());
    }
}
