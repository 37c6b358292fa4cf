//! Device selection
//!
//! 自动选择计算设备：CUDA (NVIDIA) → Metal (Apple Silicon) → CPU

use serde::Deserialize;
use std::path::Path;

use crate::application::ports::ComputeDevice;

/// NVIDIA 驱动存在的标志文件
const NVIDIA_MARKERS: &[&str] = &["/proc/driver/nvidia/version", "/dev/nvidia0"];

/// 设备偏好（配置项）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    /// 自动选择
    #[default]
    Auto,
    Cpu,
    Cuda,
    Metal,
}

impl std::fmt::Display for DevicePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DevicePreference::Auto => write!(f, "auto"),
            DevicePreference::Cpu => write!(f, "cpu"),
            DevicePreference::Cuda => write!(f, "cuda"),
            DevicePreference::Metal => write!(f, "metal"),
        }
    }
}

/// 按偏好选择设备
///
/// 显式指定的设备直接使用（模型可能运行在另一台主机上）
pub fn select_device(preference: DevicePreference) -> ComputeDevice {
    match preference {
        DevicePreference::Cpu => {
            tracing::info!("Using CPU device (forced)");
            ComputeDevice::Cpu
        }
        DevicePreference::Cuda => {
            tracing::info!("Using CUDA device (forced)");
            ComputeDevice::Cuda
        }
        DevicePreference::Metal => {
            tracing::info!("Using Metal device (forced)");
            ComputeDevice::Metal
        }
        DevicePreference::Auto => match detect_accelerator() {
            Some(device) => {
                tracing::info!(device = %device, "Accelerator available");
                device
            }
            None => {
                tracing::info!("No accelerator available, falling back to CPU");
                ComputeDevice::Cpu
            }
        },
    }
}

/// 探测本机加速设备
fn detect_accelerator() -> Option<ComputeDevice> {
    if cuda_visible(std::env::var("CUDA_VISIBLE_DEVICES").ok().as_deref())
        && NVIDIA_MARKERS.iter().any(|p| Path::new(p).exists())
    {
        return Some(ComputeDevice::Cuda);
    }

    if cfg!(all(target_os = "macos", target_arch = "aarch64")) {
        return Some(ComputeDevice::Metal);
    }

    None
}

/// `CUDA_VISIBLE_DEVICES` 为空或 -1 时表示禁用 GPU
fn cuda_visible(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => true,
        Some("") | Some("-1") => false,
        Some(_) => true,
    }
}
