//! Full player screen

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use crate::model::NowPlaying;
use crate::theme::Theme;

use super::utils::format_duration;

pub fn render_player(frame: &mut Frame, area: Rect, now: Option<&NowPlaying>, theme: &Theme) {
    let Some(now) = now else {
        let idle = Paragraph::new("Nothing playing")
            .style(Style::default().fg(theme.text.inactive))
            .block(theme.card_block(" Now Playing "));
        frame.render_widget(idle, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Track info
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Hints
        ])
        .split(area);

    let status = if now.is_playing { "▶ Playing" } else { "⏸ Paused" };
    let info = vec![
        Line::from(Span::styled(
            now.title.clone(),
            Style::default().fg(theme.text.primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(now.artist.clone(), Style::default().fg(theme.text.secondary))),
        Line::from(Span::styled(now.album.clone(), Style::default().fg(theme.text.inactive))),
        Line::from(Span::styled(status, Style::default().fg(theme.primary))),
    ];
    frame.render_widget(Paragraph::new(info).block(theme.card_block(" Now Playing ")), chunks[0]);

    let time_str = format!("{} / {}", format_duration(now.progress_ms), format_duration(now.duration_ms));
    let gauge = Gauge::default()
        .block(theme.card_block(""))
        .gauge_style(Style::default().fg(theme.primary).bg(theme.divider))
        .ratio(now.progress_ratio())
        .label(time_str);
    frame.render_widget(gauge, chunks[1]);

    let hints = Paragraph::new("Space play/pause · Enter track details · Esc back")
        .style(Style::default().fg(theme.text.inactive));
    frame.render_widget(hints, chunks[2]);
}
