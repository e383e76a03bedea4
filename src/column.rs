use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// The three fixed workflow stages of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Todo,
    Progress,
    Done,
}

impl ColumnId {
    /// All columns in display order.
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::Progress, ColumnId::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Progress => "progress",
            Self::Done => "done",
        }
    }

    /// Parses a column id from its wire name. Returns `None` for anything
    /// outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "progress" => Some(Self::Progress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_some()
    }

    /// Position of this column in display order.
    pub fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::Progress => 1,
            Self::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next column to the right, or `None` at the last column.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Next column to the left, or `None` at the first column.
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column id: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for ColumnId {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

/// Display titles for the three columns, chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTitles {
    pub todo: String,
    pub progress: String,
    pub done: String,
}

impl ColumnTitles {
    pub fn get(&self, id: ColumnId) -> &str {
        match id {
            ColumnId::Todo => &self.todo,
            ColumnId::Progress => &self.progress,
            ColumnId::Done => &self.done,
        }
    }
}

impl Default for ColumnTitles {
    fn default() -> Self {
        Self {
            todo: "To Do".to_string(),
            progress: "In Progress".to_string(),
            done: "Done".to_string(),
        }
    }
}

/// An ordered bucket of task ids. Order is the displayed vertical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub task_ids: Vec<TaskId>,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|t| t == id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.task_ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }
}
