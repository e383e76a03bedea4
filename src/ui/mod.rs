//! Terminal UI rendering.

pub mod task_card;
pub mod task_form;
pub mod task_list;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, DragInput, Mode};
use crate::column::ColumnId;

/// Rows taken by one card: border, title, description, border.
pub const CARD_HEIGHT: u16 = 4;

/// Screen regions of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub header: Rect,
    pub columns: [Rect; 3],
    pub status: Rect,
}

impl BoardLayout {
    pub fn column_area(&self, id: ColumnId) -> Rect {
        self.columns[id.index()]
    }

    /// The part of a column inside its border, where cards are stacked.
    pub fn column_inner(&self, id: ColumnId) -> Rect {
        Block::default()
            .borders(Borders::ALL)
            .inner(self.column_area(id))
    }

    /// Column under a screen position, with its inner area.
    pub fn column_at(&self, x: u16, y: u16) -> Option<(ColumnId, Rect)> {
        ColumnId::ALL
            .into_iter()
            .find(|id| contains(self.column_area(*id), x, y))
            .map(|id| (id, self.column_inner(id)))
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

pub fn board_layout(area: Rect) -> BoardLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(CARD_HEIGHT + 2),
            Constraint::Length(1),
        ])
        .split(area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .split(rows[1]);

    BoardLayout {
        header: rows[0],
        columns: [chunks[0], chunks[1], chunks[2]],
        status: rows[2],
    }
}

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = board_layout(area);
    let theme = &app.theme;

    frame.render_widget(Block::default().style(theme.base()), area);
    render_header(frame, layout.header, app);

    for column in app.board().columns() {
        let tasks = app.board().tasks_in(column.id);
        let view = task_list::ListView {
            theme,
            focused: app.selected_column == column.id,
            selected_row: (app.selected_column == column.id).then_some(app.selected_row),
            dragging: app.drag.as_ref().map(|d| &d.task_id),
            dragged_over: app.is_dragged_over(column.id),
            scroll: app.scroll_offset(column.id),
        };
        task_list::render(frame, layout.column_area(column.id), column, &tasks, &view);
    }

    render_status_bar(frame, layout.status, app);

    if let Mode::Form(form) = &app.mode {
        task_form::render(frame, area, form, app.board(), theme);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled("Task Board", theme.heading()),
        Span::styled(format!("  {} tasks  ", app.board().len()), theme.dimmed()),
        Span::styled(" + New task [a] ", theme.button(true)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.column_border(false));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let line = match &app.drag {
        Some(drag) => {
            let title = app
                .board()
                .task(&drag.task_id)
                .map_or("", |t| t.title.as_str());
            let target = match drag.over {
                Some(over) => {
                    let column = app
                        .board()
                        .column(over.column_id)
                        .map_or(over.column_id.as_str(), |c| c.title.as_str());
                    format!("{column} #{}", over.index + 1)
                }
                None => "nowhere".to_string(),
            };
            let hint = match drag.input {
                DragInput::Keyboard => "  [arrows] aim  [Space] drop  [Esc] cancel",
                DragInput::Mouse => "  release outside a column to cancel",
            };
            Line::from(vec![
                Span::styled(format!(" Moving \"{title}\" to {target}"), theme.heading()),
                Span::styled(hint, theme.dimmed()),
            ])
        }
        None => match &app.notice {
            Some(notice) => Line::from(Span::styled(format!(" {notice}"), theme.success())),
            None => Line::from(Span::raw(
                " [arrows] select  [a] new  [e] edit  [d] delete  [Space] move  [q] quit",
            )),
        },
    };
    frame.render_widget(Paragraph::new(line).style(theme.status_bar()), area);
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::clock::{ManualClock, SequentialIds};
    use crate::kanban_board::Board;
    use crate::store::BoardStore;
    use crate::task::TaskDraft;
    use crate::ui::theme::Theme;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_columns_and_cards() {
        let clock = ManualClock::new(DateTime::from_timestamp(0, 0).unwrap());
        let mut store = BoardStore::with_collaborators(Board::default(), SequentialIds::new(), clock);
        store.create_task(TaskDraft::new("Buy milk", "two litres", ColumnId::Progress));
        let app = App::new(store, Theme::DARK, 80);

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let text = screen_text(&terminal);
        for expected in ["Task Board", "To Do", "In Progress", "Done", "Buy milk", "two litres"] {
            assert!(text.contains(expected), "missing {expected:?}");
        }
    }

    #[test]
    fn column_scrolls_to_keep_selection_on_screen() {
        let clock = ManualClock::new(DateTime::from_timestamp(0, 0).unwrap());
        let mut store = BoardStore::with_collaborators(Board::default(), SequentialIds::new(), clock);
        for i in 1..=6 {
            store.create_task(TaskDraft::new(format!("card{i}"), "desc", ColumnId::Todo));
        }
        let mut app = App::new(store, Theme::LIGHT, 80);
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        app.set_viewport(Rect::new(0, 0, 100, 24));
        for _ in 0..5 {
            app.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        }
        assert_eq!(app.selected_task().unwrap().title, "card6");

        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let text = screen_text(&terminal);
        for expected in ["card3", "card4", "card5", "card6", "▲ 2"] {
            assert!(text.contains(expected), "missing {expected:?}");
        }
        assert!(!text.contains("card1"));
        assert!(!text.contains("card2"));
    }

    #[test]
    fn unscrolled_column_marks_hidden_cards_below() {
        let clock = ManualClock::new(DateTime::from_timestamp(0, 0).unwrap());
        let mut store = BoardStore::with_collaborators(Board::default(), SequentialIds::new(), clock);
        for i in 1..=6 {
            store.create_task(TaskDraft::new(format!("card{i}"), "desc", ColumnId::Todo));
        }
        let mut app = App::new(store, Theme::LIGHT, 80);
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        app.set_viewport(Rect::new(0, 0, 100, 24));

        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("card4"));
        assert!(!text.contains("card5"));
        assert!(text.contains("▼ 2"));
    }

    #[test]
    fn layout_splits_three_columns_left_to_right() {
        let layout = board_layout(Rect::new(0, 0, 90, 30));
        assert!(layout.columns[0].x < layout.columns[1].x);
        assert!(layout.columns[1].x < layout.columns[2].x);
        let inner = layout.column_inner(ColumnId::Done);
        let (id, _) = layout.column_at(inner.x, inner.y).unwrap();
        assert_eq!(id, ColumnId::Done);
        assert!(layout.column_at(1, 0).is_none());
    }
}
