//! Health Queries

/// 服务就绪状态查询
#[derive(Debug, Clone)]
pub struct GetHealth;
