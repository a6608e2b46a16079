//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board), kept apart from the
//! engine that owns turn order and the move log.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{LINES, has_line};
