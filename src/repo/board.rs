use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Board, NewBoard, UpdateBoard, DEFAULT_BOARD_COLOR};

#[derive(Clone)]
pub struct BoardRepository {
    pool: Arc<SqlitePool>,
}

impl BoardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &NewBoard, user_id: Uuid) -> Result<Board> {
        let mut conn = self.pool.acquire().await?;
        Self::insert(&mut conn, input, user_id).await
    }

    /// Inserts a board on the given connection, which may be inside a transaction.
    pub async fn insert(conn: &mut SqliteConnection, input: &NewBoard, user_id: Uuid) -> Result<Board> {
        let id = Uuid::new_v4();

        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (id, title, description, color, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.title.trim())
        .bind(input.description.as_deref())
        .bind(input.color.as_deref().unwrap_or(DEFAULT_BOARD_COLOR))
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(board)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>> {
        let mut conn = self.pool.acquire().await?;
        Self::find_in(&mut conn, id).await
    }

    pub async fn find_in(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>("SELECT * FROM boards WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(board)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Board> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Board>> {
        let boards = sqlx::query_as::<_, Board>(
            r#"
            SELECT * FROM boards
            WHERE user_id = $1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(boards)
    }

    pub async fn update(&self, id: Uuid, input: &UpdateBoard) -> Result<Board> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                color = COALESCE($4, color),
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.title.as_deref().map(str::trim))
        .bind(input.description.as_deref())
        .bind(input.color.as_deref())
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(board)
    }
}
