//! Tab root screens: library, search and settings

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{ListItem, Paragraph},
    Frame,
};

use crate::model::{LibraryScreen, LoadState, SearchScreen, SettingsItem, SettingsScreen};
use crate::theme::Theme;

use super::detail::{render_failure, render_loading};
use super::utils::{calculate_num_width, render_scrollable_list, truncate_string};

pub fn render_library(frame: &mut Frame, area: Rect, screen: &LibraryScreen, theme: &Theme, tick: usize) {
    let block = theme.card_block(" Your Playlists ");
    match screen.loader.state() {
        LoadState::Loading => render_loading(frame, area, block, theme, tick),
        LoadState::Failure(message) => render_failure(frame, area, block, message, theme),
        LoadState::Success(playlists) if playlists.is_empty() => {
            let empty = Paragraph::new("No playlists yet")
                .style(Style::default().fg(theme.text.inactive))
                .block(block);
            frame.render_widget(empty, area);
        }
        LoadState::Success(playlists) => {
            let num_width = calculate_num_width(playlists.len());
            let name_width = (area.width as usize).saturating_sub(num_width + 24);
            let items: Vec<ListItem> = playlists
                .iter()
                .enumerate()
                .map(|(i, playlist)| {
                    let text = format!(
                        "{:>num_width$}  {} {:>5} tracks",
                        i + 1,
                        truncate_string(&playlist.name, name_width),
                        playlist.total_tracks,
                    );
                    let style = if i == screen.selected() {
                        theme.highlight(true)
                    } else {
                        Style::default().fg(theme.text.primary)
                    };
                    ListItem::new(text).style(style)
                })
                .collect();
            render_scrollable_list(frame, area, items, screen.selected(), block);
        }
    }
}

pub fn render_search(frame: &mut Frame, area: Rect, screen: &SearchScreen, theme: &Theme, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(0),    // Results
        ])
        .split(area);

    let input_style = if screen.editing {
        Style::default().fg(theme.primary)
    } else {
        Style::default().fg(theme.text.primary)
    };
    let input_text = if screen.query.is_empty() && screen.editing {
        Span::styled("Type to search...", Style::default().fg(theme.text.inactive))
    } else if screen.editing {
        Span::styled(format!("{}▏", screen.query), input_style)
    } else {
        Span::styled(screen.query.clone(), input_style)
    };
    let title = if screen.editing { " Search (Enter to submit) " } else { " Search (/ to edit) " };
    frame.render_widget(Paragraph::new(Line::from(input_text)).block(theme.card_block(title)), chunks[0]);

    let block = theme.card_block(" Results ");
    let Some(results) = screen.results() else {
        let hint = Paragraph::new("Find artists, albums, songs and playlists")
            .style(Style::default().fg(theme.text.inactive))
            .block(block);
        frame.render_widget(hint, chunks[1]);
        return;
    };

    match results.state() {
        LoadState::Loading => render_loading(frame, chunks[1], block, theme, tick),
        LoadState::Failure(message) => render_failure(frame, chunks[1], block, message, theme),
        LoadState::Success(results) if results.is_empty() => {
            let query = screen.submitted().unwrap_or_default();
            let empty = Paragraph::new(format!("No results for \"{}\"", query))
                .style(Style::default().fg(theme.text.inactive))
                .block(block);
            frame.render_widget(empty, chunks[1]);
        }
        LoadState::Success(results) => {
            let width = chunks[1].width.saturating_sub(4) as usize;
            let name_width = width * 55 / 100;
            let subtitle_width = width.saturating_sub(name_width + 3);

            let mut items = Vec::new();
            let mut selected_row = 0;
            let mut current_section = None;
            for (i, (section, hit, _)) in results.rows().into_iter().enumerate() {
                if current_section != Some(section) {
                    current_section = Some(section);
                    items.push(
                        ListItem::new(section.title())
                            .style(Style::default().fg(theme.text.secondary).add_modifier(Modifier::BOLD)),
                    );
                }
                if i == screen.selected() {
                    selected_row = items.len();
                }
                let style = if i == screen.selected() {
                    theme.highlight(true)
                } else {
                    Style::default().fg(theme.text.primary)
                };
                let text = format!(
                    "  {} {}",
                    truncate_string(&hit.name, name_width),
                    truncate_string(&hit.subtitle, subtitle_width)
                );
                items.push(ListItem::new(text).style(style));
            }
            render_scrollable_list(frame, chunks[1], items, selected_row, block);
        }
    }
}

pub fn render_settings(frame: &mut Frame, area: Rect, screen: &SettingsScreen, signed_in: bool, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Account
            Constraint::Min(0),    // Options
        ])
        .split(area);

    let account = if signed_in {
        Span::styled("Signed in to Spotify", Style::default().fg(theme.primary))
    } else {
        Span::styled("Not signed in", Style::default().fg(theme.text.inactive))
    };
    frame.render_widget(Paragraph::new(Line::from(account)).block(theme.card_block(" Account ")), chunks[0]);

    let items: Vec<ListItem> = SettingsItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let text = match item {
                SettingsItem::DarkMode => {
                    format!("Dark mode   [{}]", if theme.is_dark_mode { "on" } else { "off" })
                }
                SettingsItem::Logout => "Log out".to_string(),
            };
            let style = if i == screen.selected() {
                theme.highlight(true)
            } else if *item == SettingsItem::Logout {
                Style::default().fg(theme.error)
            } else {
                Style::default().fg(theme.text.primary)
            };
            ListItem::new(text).style(style)
        })
        .collect();
    render_scrollable_list(frame, chunks[1], items, screen.selected(), theme.card_block(" Settings "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlaylistSummary, SearchHit, SearchResults};
    use crate::testing::render_to_string;

    #[test]
    fn library_lists_playlists() {
        let mut screen = LibraryScreen::default();
        let ticket = screen.loader.begin();
        screen.loader.resolve(
            ticket,
            Ok(vec![PlaylistSummary { id: "P1".into(), name: "Focus".into(), owner: "me".into(), total_tracks: 12 }]),
        );
        let text = render_to_string(60, 8, |frame| {
            let area = frame.area();
            render_library(frame, area, &screen, &Theme::dark(), 0)
        });
        assert!(text.contains("Focus"));
        assert!(text.contains("12 tracks"));
    }

    #[test]
    fn search_groups_rows_under_best_match_first() {
        let mut screen = SearchScreen { query: "daft".into(), ..Default::default() };
        let (ticket, query) = screen.submit().unwrap();
        let mut results = SearchResults {
            tracks: vec![SearchHit { id: "T1".into(), name: "One More Time".into(), subtitle: "Daft Punk".into() }],
            artists: vec![SearchHit { id: "A1".into(), name: "Daft Punk".into(), subtitle: "french house".into() }],
            ..Default::default()
        };
        results.determine_best_match(&query);
        assert!(screen.results().is_some());

        let mut state = crate::model::ScreenState::Search(screen);
        crate::model::search_loader(&mut state).unwrap().resolve(ticket, Ok(results));
        let crate::model::ScreenState::Search(screen) = state else { panic!("search screen") };

        let text = render_to_string(60, 12, |frame| {
            let area = frame.area();
            render_search(frame, area, &screen, &Theme::dark(), 0)
        });
        let artists = text.find("Artists").unwrap();
        let songs = text.find("Songs").unwrap();
        assert!(artists < songs);
    }

    #[test]
    fn settings_show_dark_mode_state() {
        let text = render_to_string(50, 10, |frame| {
            let area = frame.area();
            render_settings(frame, area, &SettingsScreen::default(), false, &Theme::light())
        });
        assert!(text.contains("Dark mode   [off]"));
        assert!(text.contains("Log out"));
        assert!(text.contains("Not signed in"));
    }
}
