//! Rigid point groups for an interactive 2D board.
//!
//! Points and gliders can be grouped so that dragging any member drags the
//! rest along. Groups nest: an element keeps a stack of the groups it joined
//! and only the newest one is active.

pub mod board;
pub mod editor;
pub mod error;
pub mod group;
pub mod types;

pub use board::Board;
pub use error::{GroupError, PropertyError};
pub use group::{FailurePolicy, Group, GroupPolicy};
