use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{Board, NewBoard};
use crate::services::BoardDataService;

/// The signed-in user's boards, newest first.
#[derive(Debug)]
pub struct BoardsView {
    user_id: Uuid,
    boards: Vec<Board>,
    loading: bool,
    error: Option<String>,
}

impl BoardsView {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            boards: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Boards updated within the seven days before `now`.
    pub fn recently_active(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::days(7);
        self.boards.iter().filter(|b| b.updated_at > cutoff).count()
    }

    pub async fn reload(&mut self, service: &BoardDataService) {
        self.loading = true;
        self.error = None;

        match service.list_boards(self.user_id).await {
            Ok(boards) => self.boards = boards,
            Err(e) => self.error = Some(e.to_string()),
        }

        self.loading = false;
    }

    /// Creates a board with its default columns and puts it at the top of the list.
    pub async fn create(&mut self, service: &BoardDataService, input: &NewBoard) -> Option<Board> {
        match service
            .create_board_with_default_columns(self.user_id, input)
            .await
        {
            Ok(board) => {
                self.boards.insert(0, board.clone());
                Some(board)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}
