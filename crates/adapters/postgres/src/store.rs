//! 数据存取句柄
//!
//! 路由状态中携带的存储句柄。数据库可以未配置（缺少 DATABASE_URL），
//! 此时取用连接池返回配置错误，对应请求级 500

use sqlx::PgPool;
use timetrack_errors::{AppError, AppResult};

/// 存储句柄
#[derive(Debug, Clone, Default)]
pub struct Store {
    pool: Option<PgPool>,
}

impl Store {
    /// 已配置的存储
    pub fn connected(pool: PgPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// 未配置的存储
    pub fn unconfigured() -> Self {
        Self { pool: None }
    }

    /// 取连接池；未配置时返回配置错误
    pub fn pool(&self) -> AppResult<&PgPool> {
        self.pool.as_ref().ok_or(AppError::Configuration)
    }

    pub fn is_configured(&self) -> bool {
        self.pool.is_some()
    }
}
