//! Turns a completed drag gesture into a board transition.

use chrono::{DateTime, Utc};

use crate::column::ColumnId;
use crate::error::BoardError;
use crate::kanban_board::Board;
use crate::task::TaskId;

/// A slot in a column: the column and the index within its task ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragLocation {
    pub column_id: ColumnId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column_id: ColumnId, index: usize) -> Self {
        Self { column_id, index }
    }
}

/// What the drag source reports when a gesture ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    pub source: DragLocation,
    /// `None` when the drop was cancelled or landed outside every column.
    pub destination: Option<DragLocation>,
    pub draggable_id: TaskId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The board was not attached yet when the drop arrived.
    NotReady,
    NoDestination,
    SamePosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Ignored(IgnoreReason),
    Applied(Board),
    Rejected(BoardError),
}

/// Reconciles a drop against `board`.
///
/// Cancelled and same-slot drops are ignored without touching the board.
/// Everything else is delegated to [`Board::move_task`], which either yields
/// the complete next board or an error and no change at all.
pub fn reconcile(board: &Board, result: &DropResult, ready: bool, now: DateTime<Utc>) -> DragOutcome {
    if !ready {
        return DragOutcome::Ignored(IgnoreReason::NotReady);
    }
    let Some(destination) = result.destination else {
        return DragOutcome::Ignored(IgnoreReason::NoDestination);
    };
    if destination == result.source {
        return DragOutcome::Ignored(IgnoreReason::SamePosition);
    }

    match board.move_task(result.source, destination, &result.draggable_id, now) {
        Ok(next) => DragOutcome::Applied(next),
        Err(err) => DragOutcome::Rejected(err),
    }
}
