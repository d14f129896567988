use chrono::NaiveDate;
use kanban_board::error::AppError;
use kanban_board::models::{
    NewBoard, NewTask, TaskFilter, TaskPriority, UpdateBoard, UpdateTask, DEFAULT_BOARD_COLOR,
};
use kanban_board::state::AppState;
use kanban_board::test_utils;
use uuid::Uuid;

async fn setup() -> (AppState, Uuid) {
    let state = test_utils::create_test_state().await;
    let user_id = test_utils::create_test_user(&state, "owner@example.com", "Owner").await;
    (state, user_id)
}

async fn count_rows(state: &AppState, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(state.pool.as_ref())
        .await
        .unwrap()
}

mod create_board_tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_four_default_columns() {
        let (state, user_id) = setup().await;

        let board = state
            .board_data
            .create_board_with_default_columns(user_id, &NewBoard::titled("Roadmap"))
            .await
            .unwrap();

        assert_eq!(board.title, "Roadmap");
        assert_eq!(board.user_id, user_id);
        assert_eq!(board.color, DEFAULT_BOARD_COLOR);
        assert!(board.description.is_none());

        let columns = state.columns.list_by_board(board.id).await.unwrap();
        let titles: Vec<_> = columns.iter().map(|c| c.title.as_str()).collect();
        let orders: Vec<_> = columns.iter().map(|c| c.sort_order).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "In Review", "Done"]);
        assert_eq!(orders, vec![0, 1, 2, 3]);
        assert!(columns.iter().all(|c| c.user_id == user_id));
    }

    #[tokio::test]
    async fn test_keeps_supplied_color_and_description() {
        let (state, user_id) = setup().await;

        let board = state
            .board_data
            .create_board_with_default_columns(
                user_id,
                &NewBoard {
                    title: "Design".to_string(),
                    description: Some("UI work".to_string()),
                    color: Some("bg-green-500".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(board.color, "bg-green-500");
        assert_eq!(board.description.as_deref(), Some("UI work"));
    }

    #[tokio::test]
    async fn test_empty_title_is_rejected_before_writing() {
        let (state, user_id) = setup().await;

        let err = state
            .board_data
            .create_board_with_default_columns(user_id, &NewBoard::titled("   "))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(count_rows(&state, "boards").await, 0);
    }

    #[tokio::test]
    async fn test_column_failure_rolls_back_board() {
        let (state, user_id) = setup().await;

        sqlx::query(
            r#"
            CREATE TRIGGER fail_in_review BEFORE INSERT ON columns
            WHEN NEW.title = 'In Review'
            BEGIN
                SELECT RAISE(ABORT, 'injected column failure');
            END
            "#,
        )
        .execute(state.pool.as_ref())
        .await
        .unwrap();

        let err = state
            .board_data
            .create_board_with_default_columns(user_id, &NewBoard::titled("Doomed"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert!(err.to_string().contains("injected column failure"));

        let boards = state.board_data.list_boards(user_id).await.unwrap();
        assert!(boards.is_empty());
        assert_eq!(count_rows(&state, "columns").await, 0);
    }
}

mod board_detail_tests {
    use super::*;

    #[tokio::test]
    async fn test_tasks_are_grouped_under_their_columns() {
        let (state, user_id) = setup().await;
        let service = &state.board_data;

        let board = service
            .create_board_with_default_columns(user_id, &NewBoard::titled("Sprint"))
            .await
            .unwrap();
        service
            .create_column(user_id, board.id, "Blocked", None)
            .await
            .unwrap();

        let columns = state.columns.list_by_board(board.id).await.unwrap();
        assert_eq!(columns.len(), 5);

        let per_column = [3, 0, 2, 1, 4];
        for (column, count) in columns.iter().zip(per_column) {
            for i in 0..count {
                service
                    .create_task(user_id, column.id, &NewTask::titled(format!("{} #{}", column.title, i)))
                    .await
                    .unwrap();
            }
        }

        // A second board's tasks must not leak in
        let other = service
            .create_board_with_default_columns(user_id, &NewBoard::titled("Other"))
            .await
            .unwrap();
        let other_columns = state.columns.list_by_board(other.id).await.unwrap();
        service
            .create_task(user_id, other_columns[0].id, &NewTask::titled("Elsewhere"))
            .await
            .unwrap();

        let detail = service
            .get_board_with_columns_and_tasks(board.id, &TaskFilter::default())
            .await
            .unwrap();

        assert_eq!(detail.board.id, board.id);
        assert_eq!(detail.columns.len(), 5);
        assert_eq!(detail.task_count(), per_column.iter().sum::<usize>());

        for (entry, count) in detail.columns.iter().zip(per_column) {
            assert_eq!(entry.tasks.len(), count);
            assert!(entry.tasks.iter().all(|t| t.column_id == entry.column.id));
        }

        let orders: Vec<_> = detail.columns.iter().map(|c| c.column.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_missing_board_is_not_found() {
        let (state, _) = setup().await;

        let err = state
            .board_data
            .get_board_with_columns_and_tasks(Uuid::new_v4(), &TaskFilter::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = state.boards.get_by_id(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_filter_narrows_tasks() {
        let (state, user_id) = setup().await;
        let service = &state.board_data;

        let board = service
            .create_board_with_default_columns(user_id, &NewBoard::titled("Filtered"))
            .await
            .unwrap();
        let columns = state.columns.list_by_board(board.id).await.unwrap();

        service
            .create_task(
                user_id,
                columns[0].id,
                &NewTask {
                    title: "Urgent".to_string(),
                    priority: Some(TaskPriority::High),
                    assignee: Some("Alex".to_string()),
                    due_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                    ..NewTask::default()
                },
            )
            .await
            .unwrap();
        service
            .create_task(
                user_id,
                columns[1].id,
                &NewTask {
                    title: "Someday".to_string(),
                    priority: Some(TaskPriority::Low),
                    due_date: NaiveDate::from_ymd_opt(2024, 9, 1),
                    ..NewTask::default()
                },
            )
            .await
            .unwrap();

        let high = service
            .get_board_with_columns_and_tasks(
                board.id,
                &TaskFilter {
                    priority: Some(TaskPriority::High),
                    ..TaskFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(high.task_count(), 1);
        assert_eq!(high.columns[0].tasks[0].title, "Urgent");
        assert_eq!(high.columns.len(), 4);

        let by_assignee = state
            .tasks
            .list_by_board(
                board.id,
                &TaskFilter {
                    assignee: Some("alex".to_string()),
                    ..TaskFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_assignee.len(), 1);

        let due_soon = state
            .tasks
            .list_by_board(
                board.id,
                &TaskFilter {
                    due_before: NaiveDate::from_ymd_opt(2024, 6, 1),
                    ..TaskFilter::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(due_soon.len(), 1);
        assert_eq!(due_soon[0].title, "Urgent");
    }
}

mod entity_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_boards_newest_first() {
        let (state, user_id) = setup().await;
        let service = &state.board_data;

        let first = service
            .create_board_with_default_columns(user_id, &NewBoard::titled("First"))
            .await
            .unwrap();
        let second = service
            .create_board_with_default_columns(user_id, &NewBoard::titled("Second"))
            .await
            .unwrap();

        // The board inserted first gets the later creation time
        for (id, created_at) in [
            (first.id, "2024-01-02T00:00:00.000Z"),
            (second.id, "2024-01-01T00:00:00.000Z"),
        ] {
            sqlx::query("UPDATE boards SET created_at = $2 WHERE id = $1")
                .bind(id)
                .bind(created_at)
                .execute(state.pool.as_ref())
                .await
                .unwrap();
        }

        let boards = service.list_boards(user_id).await.unwrap();
        let ids: Vec<_> = boards.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_list_boards_only_returns_own_boards() {
        let (state, user_id) = setup().await;
        let stranger = test_utils::create_test_user(&state, "other@example.com", "Other").await;

        state
            .board_data
            .create_board_with_default_columns(stranger, &NewBoard::titled("Theirs"))
            .await
            .unwrap();

        assert!(state.board_data.list_boards(user_id).await.unwrap().is_empty());
        assert_eq!(state.board_data.list_boards(stranger).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_board_round_trips() {
        let (state, user_id) = setup().await;
        let service = &state.board_data;

        let board = service
            .create_board_with_default_columns(user_id, &NewBoard::titled("Before"))
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = service
            .update_board(
                board.id,
                &UpdateBoard {
                    title: Some("After".to_string()),
                    ..UpdateBoard::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.color, board.color);

        let fetched = state.boards.get_by_id(board.id).await.unwrap();
        assert_eq!(fetched.title, "After");
        assert!(fetched.updated_at >= board.updated_at);
        assert_eq!(fetched.created_at, board.created_at);
    }

    #[tokio::test]
    async fn test_update_board_rejects_empty_title() {
        let (state, user_id) = setup().await;

        let board = state
            .board_data
            .create_board_with_default_columns(user_id, &NewBoard::titled("Keep"))
            .await
            .unwrap();

        let err = state
            .board_data
            .update_board(
                board.id,
                &UpdateBoard {
                    title: Some("".to_string()),
                    ..UpdateBoard::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(state.boards.get_by_id(board.id).await.unwrap().title, "Keep");
    }

    #[tokio::test]
    async fn test_update_missing_board_is_not_found() {
        let (state, _) = setup().await;

        let err = state
            .board_data
            .update_board(Uuid::new_v4(), &UpdateBoard::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_column_sort_order_is_rejected() {
        let (state, user_id) = setup().await;

        let board = state
            .board_data
            .create_board_with_default_columns(user_id, &NewBoard::titled("Ordered"))
            .await
            .unwrap();

        let err = state
            .board_data
            .create_column(user_id, board.id, "Also first", Some(0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ref msg) if msg == "Sort order already used on this board"
        ));
        assert_eq!(state.columns.list_by_board(board.id).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_tasks_append_to_column_with_default_priority() {
        let (state, user_id) = setup().await;

        let board = state
            .board_data
            .create_board_with_default_columns(user_id, &NewBoard::titled("Tasks"))
            .await
            .unwrap();
        let column = state.columns.list_by_board(board.id).await.unwrap().remove(0);

        let mut orders = Vec::new();
        for title in ["one", "two", "three"] {
            let task = state
                .board_data
                .create_task(user_id, column.id, &NewTask::titled(title))
                .await
                .unwrap();
            assert_eq!(task.priority, TaskPriority::Medium);
            orders.push(task.sort_order);
        }
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_update_task_merges_fields() {
        let (state, user_id) = setup().await;

        let board = state
            .board_data
            .create_board_with_default_columns(user_id, &NewBoard::titled("Tasks"))
            .await
            .unwrap();
        let column = state.columns.list_by_board(board.id).await.unwrap().remove(0);
        let task = state
            .board_data
            .create_task(
                user_id,
                column.id,
                &NewTask {
                    title: "Draft".to_string(),
                    description: Some("first pass".to_string()),
                    ..NewTask::default()
                },
            )
            .await
            .unwrap();

        let updated = state
            .board_data
            .update_task(
                task.id,
                &UpdateTask {
                    priority: Some(TaskPriority::High),
                    assignee: Some("Sam".to_string()),
                    ..UpdateTask::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Draft");
        assert_eq!(updated.description.as_deref(), Some("first pass"));
        assert_eq!(updated.priority, TaskPriority::High);
        assert_eq!(updated.assignee.as_deref(), Some("Sam"));
        assert_eq!(updated.column_id, column.id);
    }

    #[tokio::test]
    async fn test_task_validation_and_missing_rows() {
        let (state, user_id) = setup().await;

        let board = state
            .board_data
            .create_board_with_default_columns(user_id, &NewBoard::titled("Tasks"))
            .await
            .unwrap();
        let column = state.columns.list_by_board(board.id).await.unwrap().remove(0);

        let err = state
            .board_data
            .create_task(user_id, column.id, &NewTask::titled(""))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(count_rows(&state, "tasks").await, 0);

        let err = state
            .board_data
            .update_task(Uuid::new_v4(), &UpdateTask::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = state
            .board_data
            .create_task(user_id, Uuid::new_v4(), &NewTask::titled("Orphan"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(count_rows(&state, "tasks").await, 0);
    }
}
