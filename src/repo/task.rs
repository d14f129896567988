use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{NewTask, Task, TaskFilter, UpdateTask};

#[derive(Clone)]
pub struct TaskRepository {
    pool: Arc<SqlitePool>,
}

impl TaskRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, column_id: Uuid, user_id: Uuid, input: &NewTask) -> Result<Task> {
        let id = Uuid::new_v4();

        // New tasks go to the bottom of their column
        let max_order = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(sort_order) FROM tasks WHERE column_id = $1",
        )
        .bind(column_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, column_id, title, description, assignee, due_date, priority, sort_order, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(column_id)
        .bind(input.title.trim())
        .bind(input.description.as_deref())
        .bind(input.assignee.as_deref())
        .bind(input.due_date)
        .bind(input.priority.unwrap_or_default())
        .bind(max_order.unwrap_or(-1) + 1)
        .bind(user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(task)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(task)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Task> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn list_by_board(&self, board_id: Uuid, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut conn = self.pool.acquire().await?;
        Self::list_by_board_in(&mut conn, board_id, filter).await
    }

    /// Tasks reach their board only through their column, so this joins on
    /// `columns.board_id`.
    pub async fn list_by_board_in(
        conn: &mut SqliteConnection,
        board_id: Uuid,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.* FROM tasks t
            INNER JOIN columns col ON t.column_id = col.id
            WHERE col.board_id = $1
              AND ($2 IS NULL OR t.priority = $2)
              AND ($3 IS NULL OR t.assignee = $3 COLLATE NOCASE)
              AND ($4 IS NULL OR (t.due_date IS NOT NULL AND t.due_date <= $4))
            ORDER BY t.sort_order ASC, t.created_at ASC
            "#,
        )
        .bind(board_id)
        .bind(filter.priority)
        .bind(filter.assignee.as_deref())
        .bind(filter.due_before)
        .fetch_all(&mut *conn)
        .await?;

        Ok(tasks)
    }

    pub async fn update(&self, id: Uuid, input: &UpdateTask) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                assignee = COALESCE($4, assignee),
                due_date = COALESCE($5, due_date),
                priority = COALESCE($6, priority),
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.title.as_deref().map(str::trim))
        .bind(input.description.as_deref())
        .bind(input.assignee.as_deref())
        .bind(input.due_date)
        .bind(input.priority)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(task)
    }

    pub async fn get_board_id_for_task(&self, task_id: Uuid) -> Result<Uuid> {
        let board_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT col.board_id FROM tasks t
            INNER JOIN columns col ON t.column_id = col.id
            WHERE t.id = $1
            "#,
        )
        .bind(task_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(board_id)
    }
}
