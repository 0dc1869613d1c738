//! PostgreSQL 基础数据查询

use sqlx::PgPool;
use timetrack_errors::{AppError, AppResult};

use crate::domain::{Activity, Project};

pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 全部项目，按名称排序
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description
            FROM projects
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list projects: {}", e)))
    }

    /// 全部活动类型，按名称排序
    pub async fn list_activities(&self) -> AppResult<Vec<Activity>> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, name
            FROM activities
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list activities: {}", e)))
    }
}
