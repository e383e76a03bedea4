use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::task::Task;

pub struct CardView<'a> {
    pub theme: &'a Theme,
    pub selected: bool,
    pub dragging: bool,
}

/// Renders a card: title on the first line, first line of the description
/// below it. The selected card shows its edit/delete keys.
pub fn render(frame: &mut Frame, area: Rect, task: &Task, view: &CardView) {
    let theme = view.theme;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border(view.selected, view.dragging))
        .style(theme.card());
    if view.selected && !view.dragging {
        block = block.title_bottom(
            Line::from(Span::styled(" e edit · d delete ", theme.dimmed()))
                .alignment(Alignment::Right),
        );
    }

    let description = task.description.lines().next().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(task.title.as_str(), theme.card_title(view.dragging))),
        Line::from(Span::styled(description, theme.dimmed())),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
