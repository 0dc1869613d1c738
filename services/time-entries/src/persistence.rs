//! PostgreSQL 工时记录仓储
//!
//! 全部查询走参数绑定。归属校验与写操作在同一事务内完成，
//! 每个操作独立提交

use sqlx::PgPool;

use timetrack_errors::{AppError, AppResult};

use crate::domain::{NewTimeEntry, Role, TimeEntryUpdate, TimeEntryView};

const ENTRY_LIST_COLUMNS: &str = r#"
    SELECT te.id, te.user_id, u.email AS user_email, u.full_name AS user_name,
           te.project_id, p.name AS project_name,
           te.activity_id, a.name AS activity_name,
           te.entry_date, te.hours, te.comment,
           te.created_at, te.updated_at
    FROM time_entries te
    JOIN users u ON te.user_id = u.id
    JOIN projects p ON te.project_id = p.id
    JOIN activities a ON te.activity_id = a.id
"#;

pub struct TimeEntryRepository {
    pool: PgPool,
}

impl TimeEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 查询用户角色；用户不存在时返回 None
    pub async fn find_role(&self, user_id: i32) -> AppResult<Option<Role>> {
        let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up user role: {}", e)))?;

        Ok(role.map(|r| Role::from_db(&r)))
    }

    /// 全部记录（管理员视角），最新在前
    pub async fn list_all(&self) -> AppResult<Vec<TimeEntryView>> {
        let query = format!(
            "{} ORDER BY te.entry_date DESC, te.created_at DESC",
            ENTRY_LIST_COLUMNS
        );
        sqlx::query_as::<_, TimeEntryView>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list time entries: {}", e)))
    }

    /// 指定用户的记录，最新在前
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<TimeEntryView>> {
        let query = format!(
            "{} WHERE te.user_id = $1 ORDER BY te.entry_date DESC, te.created_at DESC",
            ENTRY_LIST_COLUMNS
        );
        sqlx::query_as::<_, TimeEntryView>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list time entries: {}", e)))
    }

    /// 新建记录，归属人即调用方，返回新记录 ID
    pub async fn insert(&self, owner_id: i32, entry: &NewTimeEntry) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO time_entries (user_id, project_id, activity_id, entry_date, hours, comment)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(owner_id)
        .bind(entry.project_id)
        .bind(entry.activity_id)
        .bind(entry.entry_date)
        .bind(entry.hours)
        .bind(&entry.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert time entry: {}", e)))
    }

    /// 整体覆盖记录内容并刷新 updated_at
    ///
    /// 记录不存在与归属人不符同样返回 Forbidden，不暴露他人记录是否存在
    pub async fn update(&self, caller_id: i32, entry: &TimeEntryUpdate) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        let owner: Option<i32> =
            sqlx::query_scalar("SELECT user_id FROM time_entries WHERE id = $1")
                .bind(entry.id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to look up entry owner: {}", e)))?;

        if owner != Some(caller_id) {
            return Err(AppError::Forbidden);
        }

        sqlx::query(
            r#"
            UPDATE time_entries
            SET project_id = $1, activity_id = $2, entry_date = $3,
                hours = $4, comment = $5, updated_at = CURRENT_TIMESTAMP
            WHERE id = $6
            "#,
        )
        .bind(entry.project_id)
        .bind(entry.activity_id)
        .bind(entry.entry_date)
        .bind(entry.hours)
        .bind(&entry.comment)
        .bind(entry.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update time entry: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))?;
        Ok(())
    }

    /// 软删除：仅把工时清零，其余字段（含备注与时间戳）保持原样
    pub async fn zero_hours(&self, caller_id: i32, entry_id: i32) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        let owner: Option<i32> =
            sqlx::query_scalar("SELECT user_id FROM time_entries WHERE id = $1")
                .bind(entry_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::database(format!("Failed to look up entry owner: {}", e)))?;

        if owner != Some(caller_id) {
            return Err(AppError::Forbidden);
        }

        sqlx::query("UPDATE time_entries SET hours = 0 WHERE id = $1")
            .bind(entry_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to zero time entry: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))?;
        Ok(())
    }
}
