use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::Task;

/// Columns every new board starts with, paired with their sort order.
pub const DEFAULT_COLUMNS: [(&str, i32); 4] = [
    ("To Do", 0),
    ("In Progress", 1),
    ("In Review", 2),
    ("Done", 3),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Column {
    pub id: Uuid,
    pub board_id: Uuid,
    pub title: String,
    pub sort_order: i32,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewColumn {
    pub board_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateColumn {
    pub title: String,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnWithTasks {
    #[serde(flatten)]
    pub column: Column,
    pub tasks: Vec<Task>,
}

impl From<Column> for ColumnWithTasks {
    fn from(column: Column) -> Self {
        Self {
            column,
            tasks: vec![],
        }
    }
}
