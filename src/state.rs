use sqlx::SqlitePool;
use std::sync::Arc;

use crate::repo::{
    board::BoardRepository, column::ColumnRepository, session::SessionRepository,
    task::TaskRepository, user::UserRepository,
};
use crate::services::BoardDataService;

#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub sessions: SessionRepository,
    pub boards: BoardRepository,
    pub columns: ColumnRepository,
    pub tasks: TaskRepository,
    pub board_data: BoardDataService,
    pub pool: Arc<SqlitePool>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let pool = Arc::new(pool);
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            boards: BoardRepository::new(pool.clone()),
            columns: ColumnRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool.clone()),
            board_data: BoardDataService::new(pool.clone()),
            pool,
        }
    }
}
