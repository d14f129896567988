use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{require_title, AppError, Result};
use crate::models::{
    Board, BoardDetail, Column, ColumnWithTasks, NewBoard, NewColumn, NewTask, Task, TaskFilter,
    UpdateBoard, UpdateTask, DEFAULT_COLUMNS,
};
use crate::repo::{board::BoardRepository, column::ColumnRepository, task::TaskRepository};

/// Multi-entity reads and writes over boards, columns and tasks.
///
/// Writes that touch more than one row run in a single transaction, and the
/// board detail is read from one snapshot. Nothing here retries: the first
/// failure aborts the operation and is returned as is.
#[derive(Clone)]
pub struct BoardDataService {
    pool: Arc<SqlitePool>,
    boards: BoardRepository,
    columns: ColumnRepository,
    tasks: TaskRepository,
}

impl BoardDataService {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            boards: BoardRepository::new(pool.clone()),
            columns: ColumnRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list_boards(&self, user_id: Uuid) -> Result<Vec<Board>> {
        self.boards.list_for_user(user_id).await
    }

    /// Creates the board together with the default "To Do", "In Progress",
    /// "In Review" and "Done" columns. Either all five rows are written or
    /// none are.
    pub async fn create_board_with_default_columns(
        &self,
        user_id: Uuid,
        input: &NewBoard,
    ) -> Result<Board> {
        require_title(&input.title, "Board")?;

        let mut tx = self.pool.begin().await?;
        let board = BoardRepository::insert(&mut tx, input, user_id).await?;

        for (title, sort_order) in DEFAULT_COLUMNS {
            let column = NewColumn {
                board_id: board.id,
                user_id: board.user_id,
                title: title.to_string(),
                sort_order: Some(sort_order),
            };

            ColumnRepository::insert(&mut tx, &column)
                .await
                .inspect_err(|e| {
                    tracing::warn!(
                        board_id = %board.id,
                        column = title,
                        "Default column creation failed, rolling back board: {}",
                        e
                    )
                })?;
        }

        tx.commit().await?;
        tracing::info!(board_id = %board.id, user_id = %user_id, "Created board with default columns");

        Ok(board)
    }

    /// Loads a board and its columns with their tasks attached.
    pub async fn get_board_with_columns_and_tasks(
        &self,
        board_id: Uuid,
        filter: &TaskFilter,
    ) -> Result<BoardDetail> {
        let mut tx = self.pool.begin().await?;

        let board = BoardRepository::find_in(&mut tx, board_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let columns = ColumnRepository::list_by_board_in(&mut tx, board_id).await?;
        let tasks = TaskRepository::list_by_board_in(&mut tx, board_id, filter).await?;

        tx.commit().await?;

        tracing::debug!(
            board_id = %board_id,
            columns = columns.len(),
            tasks = tasks.len(),
            "Loaded board detail"
        );

        Ok(BoardDetail {
            board,
            columns: group_tasks_by_column(columns, tasks),
        })
    }

    pub async fn update_board(&self, board_id: Uuid, input: &UpdateBoard) -> Result<Board> {
        if let Some(title) = input.title.as_deref() {
            require_title(title, "Board")?;
        }
        self.boards.update(board_id, input).await
    }

    pub async fn create_column(
        &self,
        user_id: Uuid,
        board_id: Uuid,
        title: &str,
        sort_order: Option<i32>,
    ) -> Result<Column> {
        let title = require_title(title, "Column")?;
        self.columns
            .create(&NewColumn {
                board_id,
                user_id,
                title: title.to_string(),
                sort_order,
            })
            .await
    }

    pub async fn create_task(&self, user_id: Uuid, column_id: Uuid, input: &NewTask) -> Result<Task> {
        require_title(&input.title, "Task")?;
        self.columns.get_by_id(column_id).await?;
        let task = self.tasks.create(column_id, user_id, input).await?;
        tracing::debug!(task_id = %task.id, column_id = %column_id, "Created task");
        Ok(task)
    }

    pub async fn update_task(&self, task_id: Uuid, input: &UpdateTask) -> Result<Task> {
        if let Some(title) = input.title.as_deref() {
            require_title(title, "Task")?;
        }
        self.tasks.update(task_id, input).await
    }
}

/// Attaches each task to the column it references, keeping both the column
/// order and the task order given. Tasks pointing at a column not in
/// `columns` are dropped.
pub fn group_tasks_by_column(columns: Vec<Column>, tasks: Vec<Task>) -> Vec<ColumnWithTasks> {
    let mut by_column: HashMap<Uuid, Vec<Task>> = HashMap::new();
    for task in tasks {
        by_column.entry(task.column_id).or_default().push(task);
    }

    let grouped = columns
        .into_iter()
        .map(|column| {
            let tasks = by_column.remove(&column.id).unwrap_or_default();
            ColumnWithTasks { column, tasks }
        })
        .collect();

    if !by_column.is_empty() {
        tracing::warn!(
            orphans = by_column.values().map(Vec::len).sum::<usize>(),
            "Tasks reference columns outside the board"
        );
    }

    grouped
}
