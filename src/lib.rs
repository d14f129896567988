pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod services;
pub mod state;
pub mod view;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Auth routes
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        // Board routes
        .route(
            "/boards",
            get(handlers::boards::list_boards).post(handlers::boards::create_board),
        )
        .route(
            "/boards/{board_id}",
            get(handlers::boards::get_board).put(handlers::boards::update_board),
        )
        // Column routes
        .route(
            "/boards/{board_id}/columns",
            get(handlers::columns::list_columns).post(handlers::columns::create_column),
        )
        // Task routes
        .route("/boards/{board_id}/tasks", get(handlers::tasks::list_tasks))
        .route(
            "/columns/{column_id}/tasks",
            post(handlers::tasks::create_task),
        )
        .route(
            "/tasks/{task_id}",
            get(handlers::tasks::get_task).put(handlers::tasks::update_task),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub mod test_utils {
    use crate::auth::hash_password;
    use crate::state::AppState;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;
    use uuid::Uuid;

    pub async fn create_test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    pub async fn create_test_state() -> AppState {
        let pool = create_test_pool().await;
        AppState::new(pool)
    }

    pub async fn create_test_user(state: &AppState, email: &str, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        let password_hash = hash_password("testpassword123").unwrap();
        state
            .users
            .create(id, email, &password_hash, name)
            .await
            .unwrap();
        id
    }

    pub async fn create_test_session(state: &AppState, user_id: Uuid) -> String {
        let token = format!("test_token_{}", Uuid::new_v4());
        state.sessions.create(user_id, &token).await.unwrap();
        token
    }
}
