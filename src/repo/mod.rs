pub mod board;
pub mod column;
pub mod session;
pub mod task;
pub mod user;
