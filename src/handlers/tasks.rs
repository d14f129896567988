use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::ensure_owner;
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{NewTask, Task, TaskFilter, UpdateTask};
use crate::state::AppState;

pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(column_id): Path<Uuid>,
    Json(input): Json<NewTask>,
) -> Result<Json<Task>> {
    let column = state.columns.get_by_id(column_id).await?;
    let board = state.boards.get_by_id(column.board_id).await?;
    ensure_owner(board.user_id, &auth)?;

    let task = state
        .board_data
        .create_task(auth.user.id, column_id, &input)
        .await?;

    Ok(Json(task))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<Vec<Task>>> {
    let board = state.boards.get_by_id(board_id).await?;
    ensure_owner(board.user_id, &auth)?;

    let tasks = state.tasks.list_by_board(board_id, &filter).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Task>> {
    let board_id = state.tasks.get_board_id_for_task(task_id).await?;
    let board = state.boards.get_by_id(board_id).await?;
    ensure_owner(board.user_id, &auth)?;

    let task = state.tasks.get_by_id(task_id).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<Uuid>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>> {
    let board_id = state.tasks.get_board_id_for_task(task_id).await?;
    let board = state.boards.get_by_id(board_id).await?;
    ensure_owner(board.user_id, &auth)?;

    let task = state.board_data.update_task(task_id, &input).await?;
    Ok(Json(task))
}
