pub mod board;
pub mod column;
pub mod session;
pub mod task;
pub mod user;

pub use board::{Board, BoardDetail, NewBoard, UpdateBoard, DEFAULT_BOARD_COLOR};
pub use column::{Column, ColumnWithTasks, CreateColumn, NewColumn, DEFAULT_COLUMNS};
pub use session::Session;
pub use task::{NewTask, Task, TaskFilter, TaskPriority, UpdateTask};
pub use user::{CreateUser, User, UserResponse};
