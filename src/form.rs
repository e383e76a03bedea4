//! State of the create/edit task form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::column::ColumnId;
use crate::task::{Task, TaskDraft, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
    Submit,
    Cancel,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Status,
        FormField::Submit,
        FormField::Cancel,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(TaskId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit { mode: FormMode, draft: TaskDraft },
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub status: ColumnId,
    pub focus: FormField,
    /// Validation message from the last submit attempt.
    pub error: Option<String>,
    max_title_len: usize,
}

impl TaskForm {
    /// An empty form for a new task in `status`.
    pub fn create(status: ColumnId, max_title_len: usize) -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            status,
            focus: FormField::Title,
            error: None,
            max_title_len,
        }
    }

    /// A form pre-filled from an existing task.
    pub fn edit(task: &Task, max_title_len: usize) -> Self {
        Self {
            mode: FormMode::Edit(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            focus: FormField::Title,
            error: None,
            max_title_len,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Close,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                FormField::Description => self.description.push('\n'),
                FormField::Cancel => return FormAction::Close,
                _ => return self.submit(),
            },
            KeyCode::Left if self.focus == FormField::Status => {
                self.status = self.status.prev().unwrap_or(ColumnId::Done);
            }
            KeyCode::Right if self.focus == FormField::Status => {
                self.status = self.status.next().unwrap_or(ColumnId::Todo);
            }
            KeyCode::Backspace => match self.focus {
                FormField::Title => {
                    self.title.pop();
                }
                FormField::Description => {
                    self.description.pop();
                }
                _ => {}
            },
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => match self.focus {
                FormField::Title if self.title.chars().count() < self.max_title_len => {
                    self.title.push(c);
                }
                FormField::Description => self.description.push(c),
                _ => {}
            },
            _ => {}
        }
        FormAction::None
    }

    fn submit(&mut self) -> FormAction {
        match self.validate() {
            Ok(draft) => FormAction::Submit {
                mode: self.mode.clone(),
                draft,
            },
            Err(message) => {
                self.error = Some(message);
                FormAction::None
            }
        }
    }

    /// Both text fields are required.
    pub fn validate(&self) -> Result<TaskDraft, String> {
        let title = self.title.trim();
        let description = self.description.trim_end();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        if title.chars().count() > self.max_title_len {
            return Err(format!(
                "Title is longer than {} characters",
                self.max_title_len
            ));
        }
        if description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        Ok(TaskDraft::new(title, description, self.status))
    }
}
