use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use super::ensure_owner;
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{Board, BoardDetail, NewBoard, TaskFilter, UpdateBoard};
use crate::state::AppState;

pub async fn create_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<NewBoard>,
) -> Result<Json<Board>> {
    let board = state
        .board_data
        .create_board_with_default_columns(auth.user.id, &input)
        .await?;

    Ok(Json(board))
}

pub async fn list_boards(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Board>>> {
    let boards = state.board_data.list_boards(auth.user.id).await?;
    Ok(Json(boards))
}

pub async fn get_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<BoardDetail>> {
    let detail = state
        .board_data
        .get_board_with_columns_and_tasks(board_id, &filter)
        .await?;
    ensure_owner(detail.board.user_id, &auth)?;

    Ok(Json(detail))
}

pub async fn update_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<UpdateBoard>,
) -> Result<Json<Board>> {
    let board = state.boards.get_by_id(board_id).await?;
    ensure_owner(board.user_id, &auth)?;

    let updated = state.board_data.update_board(board_id, &input).await?;
    Ok(Json(updated))
}
