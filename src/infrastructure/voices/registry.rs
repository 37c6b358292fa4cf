//! Voice Registry - 实现 VoiceRegistryPort
//!
//! 启动时扫描音色目录（不递归），每个 `<name>.toml` 对应一个音色。
//! 单个文件出错只跳过该文件，不影响其他音色加载

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::application::ports::VoiceRegistryPort;
use crate::domain::voice::{VoiceError, VoiceProfile, VoiceProfileFile};

const PROFILE_EXTENSION: &str = "toml";

/// 音色注册表
///
/// 加载完成后只读
#[derive(Debug, Default)]
pub struct VoiceRegistry {
    voices: BTreeMap<String, VoiceProfile>,
}

impl VoiceRegistry {
    /// 空注册表
    pub fn empty() -> Self {
        Self::default()
    }

    /// 由已构建的 Profile 创建（同名后者覆盖前者）
    pub fn from_profiles(profiles: impl IntoIterator<Item = VoiceProfile>) -> Self {
        let voices = profiles
            .into_iter()
            .map(|profile| (profile.name().to_string(), profile))
            .collect();
        Self { voices }
    }

    /// 从目录加载音色
    ///
    /// 目录不存在时创建空目录并返回空注册表；
    /// 仅在目录无法创建或无法遍历时返回错误
    pub async fn load(dir: impl AsRef<Path>) -> Result<Self, VoiceError> {
        let dir = dir.as_ref();

        if !fs::try_exists(dir).await.unwrap_or(false) {
            tracing::warn!(dir = %dir.display(), "Voices directory does not exist, creating it");
            fs::create_dir_all(dir)
                .await
                .map_err(|e| VoiceError::Directory {
                    path: dir.to_path_buf(),
                    message: e.to_string(),
                })?;
            return Ok(Self::empty());
        }

        let mut entries = fs::read_dir(dir).await.map_err(|e| VoiceError::Directory {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut voices = BTreeMap::new();

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    return Err(VoiceError::Directory {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    })
                }
            };

            let path = entry.path();
            if !is_profile_file(&path) {
                continue;
            }
            match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => continue,
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Failed to stat voice config");
                    continue;
                }
            }

            match load_profile(&path).await {
                Ok(profile) => {
                    tracing::debug!(
                        voice = profile.name(),
                        audio = ?profile.reference_audio(),
                        "Voice loaded"
                    );
                    voices.insert(profile.name().to_string(), profile);
                }
                Err(e @ VoiceError::MissingReferenceAudio { .. }) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping voice");
                }
                Err(e) => {
                    tracing::error!(
                        path = %path.display(),
                        error = %e,
                        "Failed to load voice config"
                    );
                }
            }
        }

        tracing::info!(count = voices.len(), dir = %dir.display(), "Loaded voices");

        Ok(Self { voices })
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

impl VoiceRegistryPort for VoiceRegistry {
    fn get(&self, name: &str) -> Option<VoiceProfile> {
        self.voices.get(name).cloned()
    }

    fn list(&self) -> Vec<String> {
        self.voices.keys().cloned().collect()
    }
}

fn is_profile_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == PROFILE_EXTENSION)
        .unwrap_or(false)
}

/// 加载单个音色配置
async fn load_profile(path: &Path) -> Result<VoiceProfile, VoiceError> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| VoiceError::InvalidName(path.to_path_buf()))?
        .to_string();

    let content = fs::read_to_string(path).await.map_err(|e| VoiceError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let file = VoiceProfileFile::parse(&content, path)?;

    let reference_audio = match file.audio_path_relative_to(path) {
        Some(candidate) => Some(resolve_audio(&name, candidate).await?),
        None => None,
    };

    Ok(VoiceProfile::from_file(name, &file, reference_audio))
}

/// 解析为绝对路径并确认文件存在
async fn resolve_audio(voice: &str, candidate: PathBuf) -> Result<PathBuf, VoiceError> {
    let missing = || VoiceError::MissingReferenceAudio {
        voice: voice.to_string(),
        path: candidate.clone(),
    };

    let resolved = fs::canonicalize(&candidate).await.map_err(|_| missing())?;
    let is_file = fs::metadata(&resolved)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(missing());
    }

    Ok(resolved)
}
