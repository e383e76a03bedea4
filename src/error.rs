//! Error types for board transitions

use thiserror::Error;

use crate::column::ColumnId;
use crate::task::TaskId;

pub type Result<T> = std::result::Result<T, BoardError>;

/// Reasons a board transition was refused, or a board failed its
/// consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("task not found: {id}")]
    TaskNotFound { id: TaskId },

    #[error("column not found: {id}")]
    ColumnNotFound { id: ColumnId },

    /// The id source handed out an id that is already on the board
    #[error("duplicate task id: {id}")]
    DuplicateTask { id: TaskId },

    /// The drag started from a position that no longer holds the dragged task
    #[error("stale drag source: {column}[{index}] does not hold {id}")]
    StaleDragSource {
        column: ColumnId,
        index: usize,
        id: TaskId,
    },

    #[error("task {id} has status {status} but is listed in {found:?}")]
    MisplacedTask {
        id: TaskId,
        status: ColumnId,
        found: Vec<ColumnId>,
    },

    #[error("column {column} lists unknown task {id}")]
    OrphanTaskId { column: ColumnId, id: TaskId },

    #[error("column {column} lists task {id} more than once")]
    DuplicateTaskId { column: ColumnId, id: TaskId },

    #[error("column order is not the fixed three-column order")]
    ColumnOrder,
}

impl BoardError {
    /// True for misses the UI can trigger in normal operation (acting on a
    /// task that was already removed). Everything else means the board or a
    /// collaborator broke its contract.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::TaskNotFound { .. } | Self::StaleDragSource { .. })
    }
}
