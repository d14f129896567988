use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::ensure_owner;
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::{Column, CreateColumn};
use crate::state::AppState;

pub async fn create_column(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
    Json(input): Json<CreateColumn>,
) -> Result<Json<Column>> {
    let board = state.boards.get_by_id(board_id).await?;
    ensure_owner(board.user_id, &auth)?;

    let column = state
        .board_data
        .create_column(auth.user.id, board_id, &input.title, input.sort_order)
        .await?;

    Ok(Json(column))
}

pub async fn list_columns(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(board_id): Path<Uuid>,
) -> Result<Json<Vec<Column>>> {
    let board = state.boards.get_by_id(board_id).await?;
    ensure_owner(board.user_id, &auth)?;

    let columns = state.columns.list_by_board(board_id).await?;
    Ok(Json(columns))
}
