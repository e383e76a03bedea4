//! Kanban task board: a board state model with drag-and-drop reconciliation
//! and a terminal front end.

pub mod app;
pub mod clock;
pub mod column;
pub mod config;
pub mod error;
pub mod form;
pub mod kanban_board;
pub mod reconciler;
pub mod store;
pub mod task;
pub mod ui;

pub use column::{Column, ColumnId, ColumnTitles};
pub use error::BoardError;
pub use kanban_board::Board;
pub use reconciler::{DragLocation, DragOutcome, DropResult, IgnoreReason};
pub use store::BoardStore;
pub use task::{Task, TaskDraft, TaskId};
