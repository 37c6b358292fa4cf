//! Voice Context - Errors

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("无法读取音色配置 {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("音色配置解析失败 {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("音色 '{voice}' 引用的参考音频不存在: {path}")]
    MissingReferenceAudio { voice: String, path: PathBuf },

    #[error("无效的音色文件名: {0}")]
    InvalidName(PathBuf),

    #[error("音色目录不可用 {path}: {message}")]
    Directory { path: PathBuf, message: String },
}
