//! Overlay rendering (status notification, help popup)

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::Notice;
use crate::theme::Theme;

use super::utils::centered_rect;

pub fn render_notice(frame: &mut Frame, notice: &Notice, theme: &Theme) {
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;
    let line_count = notice.message.chars().count().div_ceil(inner_width).max(1) as u16;
    let popup_area = centered_rect(area, popup_width, 2 + line_count);

    frame.render_widget(Clear, popup_area);

    let (color, title) = if notice.is_error {
        (theme.error, " Error (Esc to dismiss) ")
    } else {
        (theme.primary, " Info (Esc to dismiss) ")
    };

    let widget = Paragraph::new(notice.message.clone())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title)
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(theme.card)),
        );

    frame.render_widget(widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame, theme: &Theme) {
    let keybindings = [
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Switch tab"),
        ("1 / 2 / 3", "Library / Search / Settings"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Open selection"),
        ("Backspace / Esc", "Go back"),
        ("r", "Retry after an error"),
        ("/", "Edit search query"),
        ("", ""),
        ("", "── Playback ──"),
        ("Space", "Play / Pause"),
        ("p", "Open player"),
        ("", ""),
        ("", "── General ──"),
        ("h", "Toggle this help"),
        ("q", "Quit"),
    ];

    let popup_area = centered_rect(frame.area(), 62, keybindings.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(theme.text.secondary).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(theme.text.primary)),
                ])
            }
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.divider))
            .title(" Help (h or Esc to close) ")
            .title_style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(theme.card)),
    );

    frame.render_widget(help, popup_area);
}
