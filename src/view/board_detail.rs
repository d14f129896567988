use uuid::Uuid;

use crate::models::{Board, ColumnWithTasks, NewTask, Task, TaskFilter, UpdateBoard, UpdateTask};
use crate::services::BoardDataService;

#[derive(Debug)]
pub struct BoardDetailView {
    board_id: Uuid,
    user_id: Uuid,
    filter: TaskFilter,
    board: Option<Board>,
    columns: Vec<ColumnWithTasks>,
    loading: bool,
    error: Option<String>,
}

impl BoardDetailView {
    pub fn new(board_id: Uuid, user_id: Uuid) -> Self {
        Self {
            board_id,
            user_id,
            filter: TaskFilter::default(),
            board: None,
            columns: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn columns(&self) -> &[ColumnWithTasks] {
        &self.columns
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    pub async fn load(&mut self, service: &BoardDataService) {
        self.loading = true;
        self.error = None;

        match service
            .get_board_with_columns_and_tasks(self.board_id, &self.filter)
            .await
        {
            Ok(detail) => {
                self.board = Some(detail.board);
                self.columns = detail.columns;
            }
            Err(e) => self.error = Some(e.to_string()),
        }

        self.loading = false;
    }

    pub async fn update_board(
        &mut self,
        service: &BoardDataService,
        changes: &UpdateBoard,
    ) -> Option<Board> {
        match service.update_board(self.board_id, changes).await {
            Ok(board) => {
                self.board = Some(board.clone());
                Some(board)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub async fn create_task(
        &mut self,
        service: &BoardDataService,
        column_id: Uuid,
        input: &NewTask,
    ) -> Option<Task> {
        match service.create_task(self.user_id, column_id, input).await {
            Ok(task) => {
                if self.filter.matches(&task) {
                    if let Some(column) =
                        self.columns.iter_mut().find(|c| c.column.id == column_id)
                    {
                        column.tasks.push(task.clone());
                    }
                }
                Some(task)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// New tasks from the board screen land in the leftmost column.
    pub async fn create_task_in_first_column(
        &mut self,
        service: &BoardDataService,
        input: &NewTask,
    ) -> Option<Task> {
        let Some(column_id) = self.columns.first().map(|c| c.column.id) else {
            self.error = Some("No column available to add task".to_string());
            return None;
        };
        self.create_task(service, column_id, input).await
    }

    pub async fn update_task(
        &mut self,
        service: &BoardDataService,
        task_id: Uuid,
        changes: &UpdateTask,
    ) -> Option<Task> {
        match service.update_task(task_id, changes).await {
            Ok(task) => {
                let keep = self.filter.matches(&task);
                let mut replaced = false;
                for column in &mut self.columns {
                    if let Some(pos) = column.tasks.iter().position(|t| t.id == task_id) {
                        if keep {
                            column.tasks[pos] = task.clone();
                            replaced = true;
                        } else {
                            column.tasks.remove(pos);
                        }
                    }
                }
                // A task the filter used to hide shows up once it matches.
                if keep && !replaced {
                    if let Some(column) =
                        self.columns.iter_mut().find(|c| c.column.id == task.column_id)
                    {
                        let pos = column
                            .tasks
                            .partition_point(|t| t.sort_order <= task.sort_order);
                        column.tasks.insert(pos, task.clone());
                    }
                }
                Some(task)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}
