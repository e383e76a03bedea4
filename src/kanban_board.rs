use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::column::{Column, ColumnId, ColumnTitles};
use crate::error::{BoardError, Result};
use crate::reconciler::DragLocation;
use crate::task::{Task, TaskDraft, TaskId};

/// The canonical board state.
///
/// Every transition takes `&self` and returns a fresh `Board`; the caller
/// decides whether to adopt it. A transition that fails leaves nothing
/// half-applied because `self` is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    tasks: BTreeMap<TaskId, Task>,
    columns: BTreeMap<ColumnId, Column>,
    column_order: [ColumnId; 3],
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&ColumnTitles::default())
    }
}

impl Board {
    /// Three empty columns.
    pub fn new(titles: &ColumnTitles) -> Self {
        let columns = ColumnId::ALL
            .into_iter()
            .map(|id| (id, Column::new(id, titles.get(id))))
            .collect();
        Self {
            tasks: BTreeMap::new(),
            columns,
            column_order: ColumnId::ALL,
        }
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(&id)
    }

    /// Columns in display order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    pub fn column_order(&self) -> &[ColumnId; 3] {
        &self.column_order
    }

    /// Tasks of a column in display order. Ids with no task behind them are
    /// skipped rather than rendered.
    pub fn tasks_in(&self, id: ColumnId) -> Vec<&Task> {
        self.column(id)
            .map(|column| {
                column
                    .task_ids
                    .iter()
                    .filter_map(|task_id| self.tasks.get(task_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Column and index currently holding the task.
    pub fn locate(&self, id: &TaskId) -> Option<(ColumnId, usize)> {
        self.columns()
            .find_map(|column| column.position(id).map(|index| (column.id, index)))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn column_or_err(&self, id: ColumnId) -> Result<&Column> {
        self.columns.get(&id).ok_or(BoardError::ColumnNotFound { id })
    }

    fn column_mut(&mut self, id: ColumnId) -> Result<&mut Column> {
        self.columns
            .get_mut(&id)
            .ok_or(BoardError::ColumnNotFound { id })
    }

    /// Adds a task at the end of its status column.
    pub fn create_task(&self, id: TaskId, draft: TaskDraft, now: DateTime<Utc>) -> Result<Board> {
        if self.tasks.contains_key(&id) {
            return Err(BoardError::DuplicateTask { id });
        }

        let mut next = self.clone();
        next.column_mut(draft.status)?.task_ids.push(id.clone());
        next.tasks.insert(
            id.clone(),
            Task {
                id,
                title: draft.title,
                description: draft.description,
                status: draft.status,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(next)
    }

    /// Replaces the editable fields of a task. A status change moves the task
    /// to the end of its new column so that column membership always follows
    /// `status`.
    pub fn update_task(&self, id: &TaskId, draft: TaskDraft, now: DateTime<Utc>) -> Result<Board> {
        let task = self
            .tasks
            .get(id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.clone() })?;
        let previous = task.status;

        let mut next = self.clone();
        if previous != draft.status {
            next.column_mut(previous)?.task_ids.retain(|t| t != id);
            next.column_mut(draft.status)?.task_ids.push(id.clone());
        }
        next.tasks.insert(
            id.clone(),
            Task {
                title: draft.title,
                description: draft.description,
                status: draft.status,
                updated_at: now,
                ..task.clone()
            },
        );
        Ok(next)
    }

    pub fn delete_task(&self, id: &TaskId) -> Result<Board> {
        let task = self
            .tasks
            .get(id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.clone() })?;

        let mut next = self.clone();
        next.column_mut(task.status)?.task_ids.retain(|t| t != id);
        next.tasks.remove(id);
        Ok(next)
    }

    /// Moves `task_id` from `source` to `destination`.
    ///
    /// Within one column the destination index addresses the sequence after
    /// the task has been removed. Across columns it addresses the destination
    /// column as it is, and the task takes the destination's status. An index
    /// past the end is clamped to the end.
    pub fn move_task(
        &self,
        source: DragLocation,
        destination: DragLocation,
        task_id: &TaskId,
        now: DateTime<Utc>,
    ) -> Result<Board> {
        let source_column = self.column_or_err(source.column_id)?;
        let dest_column = self.column_or_err(destination.column_id)?;

        if source_column.task_ids.get(source.index) != Some(task_id) {
            return Err(BoardError::StaleDragSource {
                column: source.column_id,
                index: source.index,
                id: task_id.clone(),
            });
        }
        if source == destination {
            return Ok(self.clone());
        }

        let mut next = self.clone();

        if source.column_id == destination.column_id {
            let mut task_ids = source_column.task_ids.clone();
            task_ids.remove(source.index);
            let at = destination.index.min(task_ids.len());
            task_ids.insert(at, task_id.clone());
            next.column_mut(source.column_id)?.task_ids = task_ids;
            return Ok(next);
        }

        let task = self
            .tasks
            .get(task_id)
            .ok_or_else(|| BoardError::TaskNotFound { id: task_id.clone() })?;

        let mut source_ids = source_column.task_ids.clone();
        source_ids.remove(source.index);
        let mut dest_ids = dest_column.task_ids.clone();
        let at = destination.index.min(dest_ids.len());
        dest_ids.insert(at, task_id.clone());

        next.column_mut(source.column_id)?.task_ids = source_ids;
        next.column_mut(destination.column_id)?.task_ids = dest_ids;
        next.tasks.insert(
            task_id.clone(),
            Task {
                status: destination.column_id,
                updated_at: now,
                ..task.clone()
            },
        );
        Ok(next)
    }

    /// Verifies the cross references between tasks and columns.
    pub fn check_invariants(&self) -> Result<()> {
        if self.column_order != ColumnId::ALL || self.columns.len() != ColumnId::ALL.len() {
            return Err(BoardError::ColumnOrder);
        }

        for id in ColumnId::ALL {
            let column = self.column_or_err(id)?;
            let mut seen = HashSet::new();
            for task_id in &column.task_ids {
                if !seen.insert(task_id) {
                    return Err(BoardError::DuplicateTaskId {
                        column: id,
                        id: task_id.clone(),
                    });
                }
                if !self.tasks.contains_key(task_id) {
                    return Err(BoardError::OrphanTaskId {
                        column: id,
                        id: task_id.clone(),
                    });
                }
            }
        }

        for task in self.tasks.values() {
            let found: Vec<ColumnId> = self
                .columns()
                .filter(|column| column.contains(&task.id))
                .map(|column| column.id)
                .collect();
            if found != [task.status] {
                return Err(BoardError::MisplacedTask {
                    id: task.id.clone(),
                    status: task.status,
                    found,
                });
            }
        }

        Ok(())
    }
}
