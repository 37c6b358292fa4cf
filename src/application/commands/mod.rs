//! 应用层 - 命令
//!
//! CQRS 命令侧：合成请求

mod synthesize_commands;

pub mod handlers;

pub use synthesize_commands::*;
