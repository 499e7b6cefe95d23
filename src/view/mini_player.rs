//! Mini-player bar shown under every screen while a track is active

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::NowPlaying;
use crate::theme::Theme;

const ARTWORK_WIDTH: u16 = 5;
const TOGGLE_WIDTH: u16 = 7;

/// What a click on the mini-player means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MiniPlayerHit {
    TogglePlayback,
    OpenPlayer,
}

/// Play/pause control: the right-most columns inside the border, full height.
pub fn toggle_area(area: Rect) -> Rect {
    let width = TOGGLE_WIDTH.min(area.width);
    Rect {
        x: area.right().saturating_sub(width + 1).max(area.x),
        y: area.y,
        width,
        height: area.height,
    }
}

/// Resolve a click. The toggle is tested first and a hit there never falls
/// through to the body.
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<MiniPlayerHit> {
    let position = Position::new(column, row);
    if !area.contains(position) {
        return None;
    }
    if toggle_area(area).contains(position) {
        Some(MiniPlayerHit::TogglePlayback)
    } else {
        Some(MiniPlayerHit::OpenPlayer)
    }
}

pub fn render_mini_player(frame: &mut Frame, area: Rect, now: &NowPlaying, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.divider))
        .style(Style::default().bg(theme.card));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ARTWORK_WIDTH), // Artwork tile
            Constraint::Min(0),                // Title + artist
            Constraint::Length(TOGGLE_WIDTH + 1),
        ])
        .split(inner);

    let artwork_style = if now.artwork_url.is_some() {
        Style::default().fg(theme.background).bg(theme.primary)
    } else {
        Style::default().fg(theme.text.inactive).bg(theme.divider)
    };
    frame.render_widget(Paragraph::new(" ♫ ").style(artwork_style), chunks[0]);

    let text = Line::from(vec![
        Span::styled(
            now.title.clone(),
            Style::default().fg(theme.text.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" · ", Style::default().fg(theme.text.inactive)),
        Span::styled(now.artist.clone(), Style::default().fg(theme.text.secondary)),
    ]);
    frame.render_widget(Paragraph::new(text), chunks[1]);

    let toggle = if now.is_playing { "[ ⏸ ]" } else { "[ ▶ ]" };
    frame.render_widget(
        Paragraph::new(toggle).style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
        chunks[2],
    );
}
