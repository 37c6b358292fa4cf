//! Voice Registry Port - 音色查询抽象
//!
//! 启动时加载完成后只读，实现无需加锁

use crate::domain::voice::VoiceProfile;

pub trait VoiceRegistryPort: Send + Sync {
    /// 按名称查找音色，不存在返回 None
    fn get(&self, name: &str) -> Option<VoiceProfile>;

    /// 已加载的音色名称
    fn list(&self) -> Vec<String>;
}
