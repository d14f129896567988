use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Column, NewColumn};

#[derive(Clone)]
pub struct ColumnRepository {
    pool: Arc<SqlitePool>,
}

impl ColumnRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &NewColumn) -> Result<Column> {
        let mut conn = self.pool.acquire().await?;
        Self::insert(&mut conn, input).await
    }

    pub async fn insert(conn: &mut SqliteConnection, input: &NewColumn) -> Result<Column> {
        let id = Uuid::new_v4();

        // Get the next sort order if not specified
        let sort_order = match input.sort_order {
            Some(order) => order,
            None => {
                let max_order = sqlx::query_scalar::<_, Option<i32>>(
                    "SELECT MAX(sort_order) FROM columns WHERE board_id = $1",
                )
                .bind(input.board_id)
                .fetch_one(&mut *conn)
                .await?;
                max_order.unwrap_or(-1) + 1
            }
        };

        let column = sqlx::query_as::<_, Column>(
            r#"
            INSERT INTO columns (id, board_id, title, sort_order, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.board_id)
        .bind(input.title.trim())
        .bind(sort_order)
        .bind(input.user_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                AppError::Validation("Sort order already used on this board".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(column)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Column>> {
        let column = sqlx::query_as::<_, Column>("SELECT * FROM columns WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(column)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Column> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn list_by_board(&self, board_id: Uuid) -> Result<Vec<Column>> {
        let mut conn = self.pool.acquire().await?;
        Self::list_by_board_in(&mut conn, board_id).await
    }

    pub async fn list_by_board_in(conn: &mut SqliteConnection, board_id: Uuid) -> Result<Vec<Column>> {
        let columns = sqlx::query_as::<_, Column>(
            "SELECT * FROM columns WHERE board_id = $1 ORDER BY sort_order ASC",
        )
        .bind(board_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(columns)
    }
}
