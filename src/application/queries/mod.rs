//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：音色列表、服务就绪状态

mod health_queries;
mod voice_queries;

pub mod handlers;

pub use health_queries::*;
pub use voice_queries::*;
