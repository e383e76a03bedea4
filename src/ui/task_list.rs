//! One board column and the cards stacked in it.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::task_card::{self, CardView};
use super::theme::Theme;
use super::CARD_HEIGHT;
use crate::column::Column;
use crate::task::{Task, TaskId};

pub struct ListView<'a> {
    pub theme: &'a Theme,
    pub focused: bool,
    pub selected_row: Option<usize>,
    /// Task currently being dragged, wherever it is.
    pub dragging: Option<&'a TaskId>,
    pub dragged_over: bool,
    /// Index of the first card to draw.
    pub scroll: usize,
}

pub fn render(frame: &mut Frame, area: Rect, column: &Column, tasks: &[&Task], view: &ListView) {
    let theme = view.theme;
    let title = Line::from(vec![
        Span::styled(format!(" {} ", column.title), theme.heading()),
        Span::styled(format!("({}) ", tasks.len()), theme.dimmed()),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme.column_border(view.focused || view.dragged_over))
        .style(theme.column(view.dragged_over));
    let inner = block.inner(area);
    let rows = usize::from(inner.height / CARD_HEIGHT);
    let scroll = view.scroll.min(tasks.len());
    let below = tasks.len().saturating_sub(scroll + rows);
    let block = match overflow_marker(scroll, below) {
        Some(marker) => block.title_bottom(
            Line::from(Span::styled(marker, theme.dimmed())).alignment(Alignment::Right),
        ),
        None => block,
    };
    frame.render_widget(block, area);

    if tasks.is_empty() {
        let hint = if view.dragged_over {
            "Drop here"
        } else {
            "No tasks"
        };
        frame.render_widget(Paragraph::new(Span::styled(hint, theme.dimmed())), inner);
        return;
    }

    for (row, (index, task)) in tasks.iter().enumerate().skip(scroll).take(rows).enumerate() {
        let offset = u16::try_from(row)
            .unwrap_or(u16::MAX)
            .saturating_mul(CARD_HEIGHT);
        let card_area = Rect::new(inner.x, inner.y + offset, inner.width, CARD_HEIGHT);
        let card = CardView {
            theme,
            selected: view.selected_row == Some(index),
            dragging: view.dragging == Some(&task.id),
        };
        task_card::render(frame, card_area, task, &card);
    }
}

/// Counts of cards scrolled off above and below, e.g. ` ▲ 2  ▼ 1 `.
fn overflow_marker(above: usize, below: usize) -> Option<String> {
    let mut parts = Vec::new();
    if above > 0 {
        parts.push(format!("▲ {above}"));
    }
    if below > 0 {
        parts.push(format!("▼ {below}"));
    }
    (!parts.is_empty()).then(|| format!(" {} ", parts.join("  ")))
}
