//! Per-screen state containers.
//!
//! Each view caches what it last loaded, exposes the mutations its screen
//! offers, and turns failures into a message in `error` while leaving the
//! cached state as it was.

mod board_detail;
mod boards;

pub use board_detail::BoardDetailView;
pub use boards::BoardsView;
