//! Color palettes and the styles derived from them.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub card_background: Color,
    pub list_background: Color,
    /// Tint of a column while a card is dragged over it.
    pub drag_background: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        primary: Color::Rgb(0x25, 0x63, 0xeb),
        secondary: Color::Rgb(0x7c, 0x3a, 0xed),
        background: Color::Rgb(0xf8, 0xfa, 0xfc),
        card_background: Color::Rgb(0xff, 0xff, 0xff),
        list_background: Color::Rgb(0xf1, 0xf5, 0xf9),
        drag_background: Color::Rgb(0xe2, 0xe8, 0xf0),
        text_primary: Color::Rgb(0x1e, 0x29, 0x3b),
        text_secondary: Color::Rgb(0x64, 0x74, 0x8b),
        border: Color::Rgb(0xe2, 0xe8, 0xf0),
        error: Color::Rgb(0xef, 0x44, 0x44),
        success: Color::Rgb(0x22, 0xc5, 0x5e),
    };

    pub const DARK: Theme = Theme {
        primary: Color::Rgb(0x60, 0xa5, 0xfa),
        secondary: Color::Rgb(0xa7, 0x8b, 0xfa),
        background: Color::Rgb(0x0f, 0x17, 0x2a),
        card_background: Color::Rgb(0x1e, 0x29, 0x3b),
        list_background: Color::Rgb(0x1e, 0x29, 0x3b),
        drag_background: Color::Rgb(0x33, 0x41, 0x55),
        text_primary: Color::Rgb(0xe2, 0xe8, 0xf0),
        text_secondary: Color::Rgb(0x94, 0xa3, 0xb8),
        border: Color::Rgb(0x33, 0x41, 0x55),
        error: Color::Rgb(0xf8, 0x71, 0x71),
        success: Color::Rgb(0x4a, 0xde, 0x80),
    };

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Self::LIGHT,
            ThemeName::Dark => Self::DARK,
        }
    }

    /// Screen background with primary text.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.background)
    }

    pub fn heading(&self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn column(&self, dragged_over: bool) -> Style {
        let bg = if dragged_over {
            self.drag_background
        } else {
            self.list_background
        };
        Style::default().fg(self.text_primary).bg(bg)
    }

    pub fn column_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn card(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.card_background)
    }

    pub fn card_border(&self, selected: bool, dragging: bool) -> Style {
        match (selected, dragging) {
            (_, true) => Style::default()
                .fg(self.secondary)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(self.primary),
            (false, false) => Style::default().fg(self.border),
        }
    }

    pub fn card_title(&self, dragging: bool) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if dragging {
            style.fg(self.text_secondary).add_modifier(Modifier::ITALIC)
        } else {
            style.fg(self.text_primary)
        }
    }

    /// A form button; `active` when it has focus.
    pub fn button(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(Color::White)
                .bg(self.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text_primary)
        }
    }

    pub fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text_secondary).bg(self.list_background)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::LIGHT
    }
}
