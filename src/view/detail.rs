//! Generic detail screen rendering.
//!
//! One renderer covers every entity kind: the load state picks between the
//! spinner, the error view with its retry control, and the entity content.
//! Entity-specific parts come from `DetailView`.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::model::{DetailScreen, EntityKind, LoadState, Resource, Target};
use crate::theme::Theme;

use super::utils::{calculate_num_width, format_duration, render_scrollable_list, spinner, truncate_string};

/// How an entity presents itself once loaded.
pub trait DetailView: Resource {
    /// Header lines shown above the target rows.
    fn header(&self, theme: &Theme) -> Vec<Line<'static>>;

    fn list_title(&self) -> &'static str;

    /// Shown in place of the rows when there are no targets.
    fn empty_message(&self) -> &'static str;
}

pub fn kind_title(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Artist => " Artist ",
        EntityKind::Album => " Album ",
        EntityKind::Track => " Track ",
        EntityKind::Playlist => " Playlist ",
    }
}

pub fn render_detail<R: DetailView>(
    frame: &mut Frame,
    area: Rect,
    screen: &DetailScreen<R>,
    theme: &Theme,
    tick: usize,
) {
    let block = theme.card_block(kind_title(R::KIND));
    match screen.state() {
        LoadState::Loading => render_loading(frame, area, block, theme, tick),
        LoadState::Failure(message) => render_failure(frame, area, block, message, theme),
        LoadState::Success(data) => {
            let header = data.header(theme);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(header.len() as u16 + 2), Constraint::Min(0)])
                .split(area);

            frame.render_widget(Paragraph::new(header).block(block), chunks[0]);

            let list_block = theme.card_block(data.list_title());
            let targets = screen.targets();
            if targets.is_empty() {
                let empty = Paragraph::new(data.empty_message())
                    .style(Style::default().fg(theme.text.inactive))
                    .block(list_block);
                frame.render_widget(empty, chunks[1]);
            } else {
                let width = chunks[1].width.saturating_sub(4) as usize;
                render_target_list(frame, chunks[1], &targets, screen.selected(), width, list_block, theme);
            }
        }
    }
}

pub fn render_loading(frame: &mut Frame, area: Rect, block: Block, theme: &Theme, tick: usize) {
    let line = Line::from(vec![
        Span::styled(spinner(tick), Style::default().fg(theme.primary)),
        Span::styled(" Loading", Style::default().fg(theme.text.secondary)),
    ]);
    let loading = Paragraph::new(vec![Line::default(), line])
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(loading, area);
}

/// Blocking error view. The retry control is bound to `r` and Enter.
pub fn render_failure(frame: &mut Frame, area: Rect, block: Block, message: &str, theme: &Theme) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme.error))),
        Line::default(),
        Line::from(Span::styled(
            "[ r ] Retry",
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        )),
    ];
    let failure = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(failure, area);
}

fn render_target_list(
    frame: &mut Frame,
    area: Rect,
    targets: &[Target],
    selected: usize,
    width: usize,
    block: Block,
    theme: &Theme,
) {
    let num_width = calculate_num_width(targets.len());
    let duration_width = 6;
    let remaining = width.saturating_sub(num_width + duration_width + 4);
    let label_width = remaining * 55 / 100;
    let subtitle_width = remaining.saturating_sub(label_width);

    let items: Vec<ListItem> = targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let duration = target.duration_ms.map(format_duration).unwrap_or_default();
            let text = format!(
                "{:>num_width$}  {} {} {:>duration_width$}",
                i + 1,
                truncate_string(&target.label, label_width),
                truncate_string(&target.subtitle, subtitle_width),
                duration,
            );
            let style = if i == selected {
                theme.highlight(true)
            } else {
                Style::default().fg(theme.text.primary)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    render_scrollable_list(frame, area, items, selected, block);
}
