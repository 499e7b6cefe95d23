//! Color palette handed to every view function.
//!
//! Views never look a theme up on their own; the active `Theme` lives on the
//! model and is passed down explicitly.

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextColors {
    pub primary: Color,
    pub secondary: Color,
    pub inactive: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub is_dark_mode: bool,
    pub primary: Color,
    pub background: Color,
    pub card: Color,
    pub divider: Color,
    pub error: Color,
    pub text: TextColors,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            is_dark_mode: true,
            primary: Color::Rgb(30, 215, 96),
            background: Color::Rgb(18, 18, 18),
            card: Color::Rgb(40, 40, 40),
            divider: Color::Rgb(64, 64, 64),
            error: Color::Rgb(233, 20, 41),
            text: TextColors {
                primary: Color::White,
                secondary: Color::Rgb(179, 179, 179),
                inactive: Color::Rgb(110, 110, 110),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            is_dark_mode: false,
            primary: Color::Rgb(29, 185, 84),
            background: Color::Rgb(255, 255, 255),
            card: Color::Rgb(243, 243, 243),
            divider: Color::Rgb(218, 218, 218),
            error: Color::Rgb(196, 30, 58),
            text: TextColors {
                primary: Color::Rgb(18, 18, 18),
                secondary: Color::Rgb(83, 83, 83),
                inactive: Color::Rgb(150, 150, 150),
            },
        }
    }

    pub fn from_dark_mode(is_dark_mode: bool) -> Self {
        if is_dark_mode { Self::dark() } else { Self::light() }
    }

    pub fn toggled(&self) -> Self {
        Self::from_dark_mode(!self.is_dark_mode)
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text.primary).bg(self.background)
    }

    pub fn highlight(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text.primary)
        }
    }

    /// Bordered card used by every screen section.
    pub fn card_block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(self.divider))
            .title_style(Style::default().fg(self.text.secondary))
            .style(Style::default().bg(self.card).fg(self.text.primary))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
