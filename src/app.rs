//! Application state and event handling.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::debug;

use crate::column::ColumnId;
use crate::form::{FormAction, FormMode, TaskForm};
use crate::kanban_board::Board;
use crate::reconciler::{DragLocation, DropResult};
use crate::store::BoardStore;
use crate::task::{Task, TaskId};
use crate::ui::{self, theme::Theme};

pub enum Mode {
    Board,
    Form(TaskForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragInput {
    Keyboard,
    Mouse,
}

/// A card that has been picked up and not yet dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub task_id: TaskId,
    pub source: DragLocation,
    /// Slot the card would land in, `None` while outside every column.
    pub over: Option<DragLocation>,
    pub input: DragInput,
}

pub struct App {
    store: BoardStore,
    pub theme: Theme,
    max_title_len: usize,
    pub mode: Mode,
    pub selected_column: ColumnId,
    pub selected_row: usize,
    pub drag: Option<DragState>,
    /// One-line message for the status bar.
    pub notice: Option<String>,
    pub should_quit: bool,
    viewport: Rect,
    /// First visible card of each column, indexed by `ColumnId::index`.
    scroll: [usize; 3],
}

impl App {
    pub fn new(store: BoardStore, theme: Theme, max_title_len: usize) -> Self {
        Self {
            store,
            theme,
            max_title_len,
            mode: Mode::Board,
            selected_column: ColumnId::Todo,
            selected_row: 0,
            drag: None,
            notice: None,
            should_quit: false,
            viewport: Rect::default(),
            scroll: [0; 3],
        }
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    /// Records the area of the last drawn frame, used to map mouse positions.
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
        self.keep_in_view();
    }

    /// Index of the first card drawn in `column`.
    pub fn scroll_offset(&self, column: ColumnId) -> usize {
        self.scroll[column.index()]
    }

    /// Whole cards that fit in `column` on the current viewport.
    fn visible_rows(&self, column: ColumnId) -> usize {
        let inner = ui::board_layout(self.viewport).column_inner(column);
        usize::from(inner.height / ui::CARD_HEIGHT).max(1)
    }

    /// Scrolls the columns so the selected card, or the slot a keyboard
    /// drag is aiming at, stays on screen.
    fn keep_in_view(&mut self) {
        if self.viewport.is_empty() {
            return;
        }
        for column in ColumnId::ALL {
            let max = self
                .column_len(column)
                .saturating_sub(self.visible_rows(column));
            let scroll = &mut self.scroll[column.index()];
            *scroll = (*scroll).min(max);
        }

        let focus = match &self.drag {
            Some(drag) if drag.input == DragInput::Keyboard => drag.over,
            Some(_) => None,
            None => Some(DragLocation::new(self.selected_column, self.selected_row)),
        };
        let Some(focus) = focus else {
            return;
        };
        let rows = self.visible_rows(focus.column_id);
        let scroll = &mut self.scroll[focus.column_id.index()];
        if focus.index < *scroll {
            *scroll = focus.index;
        } else if focus.index >= *scroll + rows {
            *scroll = focus.index + 1 - rows;
        }
    }

    /// Called after the first frame has been drawn.
    pub fn mark_ready(&mut self) {
        self.store.mark_ready();
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let column = self.board().column(self.selected_column)?;
        let id = column.task_ids.get(self.selected_row)?;
        self.board().task(id)
    }

    pub fn is_dragging(&self, id: &TaskId) -> bool {
        self.drag.as_ref().is_some_and(|d| &d.task_id == id)
    }

    pub fn is_dragged_over(&self, column: ColumnId) -> bool {
        self.drag
            .as_ref()
            .and_then(|d| d.over)
            .is_some_and(|over| over.column_id == column)
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            _ => {}
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        self.dispatch_key(key);
        self.keep_in_view();
    }

    fn dispatch_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let Mode::Form(form) = &mut self.mode {
            let action = form.handle_key(key);
            self.apply_form_action(action);
            return;
        }

        if self
            .drag
            .as_ref()
            .is_some_and(|d| d.input == DragInput::Keyboard)
        {
            self.handle_drag_key(key.code);
            return;
        }

        self.notice = None;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(prev) = self.selected_column.prev() {
                    self.select_column(prev);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(next) = self.selected_column.next() {
                    self.select_column(next);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.select_prev_row(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_row(),
            KeyCode::Char('a' | 'n') => {
                self.mode = Mode::Form(TaskForm::create(self.selected_column, self.max_title_len));
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(task) = self.selected_task() {
                    self.mode = Mode::Form(TaskForm::edit(task, self.max_title_len));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char(' ') => self.pick_up_selected(),
            _ => {}
        }
    }

    fn column_len(&self, column: ColumnId) -> usize {
        self.board().column(column).map_or(0, |c| c.len())
    }

    fn select_prev_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn select_next_row(&mut self) {
        if self.selected_row + 1 < self.column_len(self.selected_column) {
            self.selected_row += 1;
        }
    }

    fn select_column(&mut self, column: ColumnId) {
        self.selected_column = column;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.column_len(self.selected_column);
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    fn select_task(&mut self, id: &TaskId) {
        if let Some((column, row)) = self.board().locate(id) {
            self.selected_column = column;
            self.selected_row = row;
        }
    }

    fn apply_form_action(&mut self, action: FormAction) {
        match action {
            FormAction::None => {}
            FormAction::Close => self.mode = Mode::Board,
            FormAction::Submit { mode, draft } => {
                let title = draft.title.clone();
                match mode {
                    FormMode::Create => {
                        if let Some(id) = self.store.create_task(draft) {
                            self.select_task(&id);
                            self.notice = Some(format!("Created \"{title}\""));
                        }
                    }
                    FormMode::Edit(id) => {
                        if self.store.update_task(&id, draft) {
                            self.select_task(&id);
                            self.notice = Some(format!("Updated \"{title}\""));
                        }
                    }
                }
                self.mode = Mode::Board;
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, title) = (task.id.clone(), task.title.clone());
        if self.store.delete_task(&id) {
            self.notice = Some(format!("Deleted \"{title}\""));
            self.clamp_selection();
        }
    }

    fn pick_up_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let source = DragLocation::new(self.selected_column, self.selected_row);
        debug!(task = %task.id, ?source, "keyboard drag started");
        self.drag = Some(DragState {
            task_id: task.id.clone(),
            source,
            over: Some(source),
            input: DragInput::Keyboard,
        });
    }

    /// Highest index a drop into `column` may use. Within the source column
    /// the card is counted out, so the last slot is one lower.
    fn max_drop_index(&self, column: ColumnId, source: DragLocation) -> usize {
        let len = self.column_len(column);
        if column == source.column_id {
            len.saturating_sub(1)
        } else {
            len
        }
    }

    fn handle_drag_key(&mut self, code: KeyCode) {
        let Some(drag) = self.drag.clone() else {
            return;
        };
        let over = drag.over.unwrap_or(drag.source);

        let moved = match code {
            KeyCode::Esc => {
                self.finish_drag(None);
                return;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.finish_drag(Some(over));
                return;
            }
            KeyCode::Left | KeyCode::Char('h') => over
                .column_id
                .prev()
                .map(|c| DragLocation::new(c, over.index)),
            KeyCode::Right | KeyCode::Char('l') => over
                .column_id
                .next()
                .map(|c| DragLocation::new(c, over.index)),
            KeyCode::Up | KeyCode::Char('k') => Some(DragLocation::new(
                over.column_id,
                over.index.saturating_sub(1),
            )),
            KeyCode::Down | KeyCode::Char('j') => {
                Some(DragLocation::new(over.column_id, over.index + 1))
            }
            _ => None,
        };

        if let Some(mut target) = moved {
            target.index = target
                .index
                .min(self.max_drop_index(target.column_id, drag.source));
            if let Some(d) = self.drag.as_mut() {
                d.over = Some(target);
            }
        }
    }

    /// Ends the current drag and hands the result to the store.
    fn finish_drag(&mut self, destination: Option<DragLocation>) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let result = DropResult {
            source: drag.source,
            destination,
            draggable_id: drag.task_id,
        };
        if self.store.on_drag_end(&result) {
            self.select_task(&result.draggable_id);
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        self.dispatch_mouse(mouse);
        self.keep_in_view();
    }

    fn dispatch_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(self.mode, Mode::Board) {
            return;
        }
        let (x, y) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(source) = self.card_at(x, y) else {
                    return;
                };
                self.selected_column = source.column_id;
                self.selected_row = source.index;
                let Some(task) = self.selected_task() else {
                    return;
                };
                self.drag = Some(DragState {
                    task_id: task.id.clone(),
                    source,
                    over: Some(source),
                    input: DragInput::Mouse,
                });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(source) = self.mouse_drag_source() else {
                    return;
                };
                let over = self.drop_target(x, y, source);
                if let Some(d) = self.drag.as_mut() {
                    d.over = over;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(source) = self.mouse_drag_source() else {
                    return;
                };
                let over = self.drop_target(x, y, source);
                self.finish_drag(over);
            }
            // the wheel walks the selection through the column under the pointer
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                if self.drag.is_some() {
                    return;
                }
                let Some((column, _)) = ui::board_layout(self.viewport).column_at(x, y) else {
                    return;
                };
                if column != self.selected_column {
                    self.select_column(column);
                }
                if mouse.kind == MouseEventKind::ScrollDown {
                    self.select_next_row();
                } else {
                    self.select_prev_row();
                }
            }
            _ => {}
        }
    }

    fn mouse_drag_source(&self) -> Option<DragLocation> {
        self.drag
            .as_ref()
            .filter(|d| d.input == DragInput::Mouse)
            .map(|d| d.source)
    }

    /// The card under a screen position.
    fn card_at(&self, x: u16, y: u16) -> Option<DragLocation> {
        let layout = ui::board_layout(self.viewport);
        let (column, area) = layout.column_at(x, y)?;
        if y < area.y {
            return None;
        }
        let row = usize::from((y - area.y) / ui::CARD_HEIGHT);
        if row >= self.visible_rows(column) {
            return None;
        }
        let index = self.scroll_offset(column) + row;
        (index < self.column_len(column)).then(|| DragLocation::new(column, index))
    }

    /// The slot a card dragged from `source` would land in at a screen
    /// position. Hovering over the lower half of a card targets the slot
    /// below it.
    fn drop_target(&self, x: u16, y: u16, source: DragLocation) -> Option<DragLocation> {
        let layout = ui::board_layout(self.viewport);
        let (column, area) = layout.column_at(x, y)?;
        let offset = y.saturating_sub(area.y) + ui::CARD_HEIGHT / 2;
        let mut slot = self.scroll_offset(column) + usize::from(offset / ui::CARD_HEIGHT);
        if column == source.column_id && slot > source.index {
            slot -= 1;
        }
        Some(DragLocation::new(
            column,
            slot.min(self.max_drop_index(column, source)),
        ))
    }
}
