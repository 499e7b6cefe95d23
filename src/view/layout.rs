//! Layout rendering (tab bar, breadcrumb, main area structure)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use crate::model::{AppModel, Route, Tab};
use crate::theme::Theme;

use super::detail::kind_title;

/// Screen regions. The mini-player row only exists while a track is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppLayout {
    pub tabs: Rect,
    pub content: Rect,
    pub mini_player: Option<Rect>,
}

impl AppLayout {
    pub fn compute(area: Rect, has_player: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                             // Tabs + breadcrumb
                Constraint::Min(0),                                // Active screen
                Constraint::Length(if has_player { 3 } else { 0 }), // Mini-player
            ])
            .split(area);

        Self {
            tabs: chunks[0],
            content: chunks[1],
            mini_player: has_player.then_some(chunks[2]),
        }
    }
}

fn route_label(route: &Route) -> String {
    if let (Some(kind), Some(id)) = (route.entity_kind(), route.id()) {
        return format!("{} {}", kind_title(kind).trim(), id);
    }
    match route {
        Route::Player => "Now Playing".to_string(),
        other => other.name().to_string(),
    }
}

pub fn render_tab_bar(frame: &mut Frame, area: Rect, model: &AppModel, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(36), // Tabs
            Constraint::Min(0),     // Breadcrumb
            Constraint::Length(14), // Account
        ])
        .split(area);

    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
    let tabs = Tabs::new(titles)
        .select(model.navigator.active_tab().index())
        .style(Style::default().fg(theme.text.secondary))
        .highlight_style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))
        .divider(Span::styled("|", Style::default().fg(theme.divider)))
        .block(theme.card_block(""));
    frame.render_widget(tabs, chunks[0]);

    let crumbs = model
        .navigator
        .breadcrumb()
        .into_iter()
        .map(route_label)
        .collect::<Vec<_>>()
        .join(" › ");
    let breadcrumb = Paragraph::new(crumbs)
        .style(Style::default().fg(theme.text.secondary))
        .block(theme.card_block(""));
    frame.render_widget(breadcrumb, chunks[1]);

    let (label, color) = if model.signed_in {
        ("● Signed in", theme.primary)
    } else {
        ("○ Signed out", theme.text.inactive)
    };
    let account = Paragraph::new(label)
        .style(Style::default().fg(color))
        .block(theme.card_block(""));
    frame.render_widget(account, chunks[2]);
}
