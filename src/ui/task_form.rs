//! Create/edit task dialog.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;
use crate::form::{FormField, TaskForm};
use crate::kanban_board::Board;

const WIDTH: u16 = 60;
const HEIGHT: u16 = 15;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn field_block<'a>(label: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(label, theme.dimmed()))
        .borders(Borders::ALL)
        .border_style(theme.input(focused))
}

/// Text with a cursor marker when focused.
fn field_text(value: &str, focused: bool) -> String {
    if focused {
        format!("{value}▏")
    } else {
        value.to_string()
    }
}

pub fn render(frame: &mut Frame, area: Rect, form: &TaskForm, board: &Board, theme: &Theme) {
    let dialog = centered(area, WIDTH, HEIGHT);
    let title = if form.is_edit() {
        " Edit task "
    } else {
        " New task "
    };
    let block = Block::default()
        .title(Span::styled(title, theme.heading()))
        .borders(Borders::ALL)
        .border_style(theme.column_border(true))
        .style(theme.card());
    let inner = block.inner(dialog);

    frame.render_widget(Clear, dialog);
    frame.render_widget(block, dialog);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let focus = form.focus;

    let title_input = Paragraph::new(field_text(&form.title, focus == FormField::Title))
        .block(field_block("Title", focus == FormField::Title, theme));
    frame.render_widget(title_input, rows[0]);

    let description = Paragraph::new(field_text(
        &form.description,
        focus == FormField::Description,
    ))
    .wrap(Wrap { trim: false })
    .block(field_block(
        "Description",
        focus == FormField::Description,
        theme,
    ));
    frame.render_widget(description, rows[1]);

    let status_title = board
        .column(form.status)
        .map_or(form.status.as_str(), |c| c.title.as_str());
    let status = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", theme.dimmed()),
        Span::raw(status_title),
        Span::styled(" ▶", theme.dimmed()),
    ]))
    .block(field_block("Status", focus == FormField::Status, theme));
    frame.render_widget(status, rows[2]);

    let submit_label = if form.is_edit() {
        " Update "
    } else {
        " Create "
    };
    let buttons = Line::from(vec![
        Span::styled(" Cancel ", theme.button(focus == FormField::Cancel)),
        Span::raw("  "),
        Span::styled(submit_label, theme.button(focus == FormField::Submit)),
    ])
    .alignment(ratatui::layout::Alignment::Right);
    frame.render_widget(Paragraph::new(buttons), rows[3]);

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), theme.error())),
            rows[4],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        let dialog = centered(area, WIDTH, HEIGHT);
        assert_eq!(dialog, Rect::new(20, 12, WIDTH, HEIGHT));

        let small = centered(Rect::new(0, 0, 30, 10), WIDTH, HEIGHT);
        assert_eq!(small, Rect::new(0, 0, 30, 10));
    }
}
