//! 基础数据实体
//!
//! 项目与活动类型对本系统只读

use serde::Serialize;

/// 项目
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// 活动类型
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Activity {
    pub id: i32,
    pub name: String,
}
