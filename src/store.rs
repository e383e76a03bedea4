//! The single owner of the board value.
//!
//! `BoardStore` is handed to the application shell explicitly. Reads go
//! through [`BoardStore::board`]; writes go through the transition methods,
//! which replace the whole board on success and leave it untouched on any
//! failure. Failures are logged, never returned: the UI treats them as no-ops.

use tracing::{debug, error, info, trace};

use crate::clock::{Clock, IdSource, SystemClock, UuidIds};
use crate::error::Result;
use crate::kanban_board::Board;
use crate::reconciler::{self, DragOutcome, DropResult};
use crate::task::{TaskDraft, TaskId};

pub struct BoardStore {
    board: Board,
    ready: bool,
    ids: Box<dyn IdSource>,
    clock: Box<dyn Clock>,
}

impl BoardStore {
    /// A store with random ids and the system clock.
    pub fn new(board: Board) -> Self {
        Self::with_collaborators(board, UuidIds, SystemClock)
    }

    pub fn with_collaborators(
        board: Board,
        ids: impl IdSource + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            board,
            ready: false,
            ids: Box::new(ids),
            clock: Box::new(clock),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Called once the UI has been drawn; drops arriving earlier are discarded.
    pub fn mark_ready(&mut self) {
        if !self.ready {
            debug!("board ready");
            self.ready = true;
        }
    }

    pub fn create_task(&mut self, draft: TaskDraft) -> Option<TaskId> {
        let id = self.ids.next_id();
        let next = self.board.create_task(id.clone(), draft, self.clock.now());
        self.commit("create", next).then_some(id)
    }

    pub fn update_task(&mut self, id: &TaskId, draft: TaskDraft) -> bool {
        let next = self.board.update_task(id, draft, self.clock.now());
        self.commit("update", next)
    }

    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let next = self.board.delete_task(id);
        self.commit("delete", next)
    }

    /// Applies a finished drag. Returns whether the board changed.
    pub fn on_drag_end(&mut self, result: &DropResult) -> bool {
        match reconciler::reconcile(&self.board, result, self.ready, self.clock.now()) {
            DragOutcome::Ignored(reason) => {
                trace!(?reason, task = %result.draggable_id, "drop ignored");
                false
            }
            DragOutcome::Applied(next) => self.commit("move", Ok(next)),
            DragOutcome::Rejected(err) => self.commit("move", Err(err)),
        }
    }

    fn commit(&mut self, op: &'static str, next: Result<Board>) -> bool {
        let next = match next {
            Ok(next) => next,
            Err(err) if err.is_lookup_miss() => {
                debug!(op, %err, "transition skipped");
                return false;
            }
            Err(err) => {
                error!(op, %err, "transition refused");
                return false;
            }
        };

        if let Err(err) = next.check_invariants() {
            error!(op, %err, "transition would break the board, keeping previous state");
            return false;
        }

        info!(op, tasks = next.len(), "board updated");
        self.board = next;
        true
    }
}
