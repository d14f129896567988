pub mod board_data;

pub use board_data::{group_tasks_by_column, BoardDataService};
