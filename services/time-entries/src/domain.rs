//! 工时记录实体

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// 用户角色
///
/// users.role 列存文本；非 admin 值一律按普通成员处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn from_db(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            _ => Role::Member,
        }
    }
}

/// 工时记录列表视图
///
/// 带冗余展示字段（项目名、活动名、用户邮箱/姓名），免去前端二次查询
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TimeEntryView {
    pub id: i32,
    pub user_id: i32,
    pub user_email: String,
    pub user_name: String,
    pub project_id: i32,
    pub project_name: String,
    pub activity_id: i32,
    pub activity_name: String,
    pub entry_date: NaiveDate,
    pub hours: Decimal,
    pub comment: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 校验通过的新建记录
#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    pub project_id: i32,
    pub activity_id: i32,
    pub entry_date: NaiveDate,
    pub hours: Decimal,
    pub comment: String,
}

/// 校验通过的更新请求
#[derive(Debug, Clone)]
pub struct TimeEntryUpdate {
    pub id: i32,
    pub project_id: i32,
    pub activity_id: i32,
    pub entry_date: NaiveDate,
    pub hours: Decimal,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_db() {
        assert_eq!(Role::from_db("admin"), Role::Admin);
        assert_eq!(Role::from_db("member"), Role::Member);
        // 未知角色按成员处理
        assert_eq!(Role::from_db("manager"), Role::Member);
        assert_eq!(Role::from_db(""), Role::Member);
    }
}
