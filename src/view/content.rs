//! Entity headers for the detail screens

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::model::{artist_names, Album, ArtistPage, Playlist, Track};
use crate::theme::Theme;

use super::detail::DetailView;
use super::utils::{followers_label, format_count, format_duration};

fn title_line(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(theme.text.primary).add_modifier(Modifier::BOLD),
    ))
}

fn secondary_line(text: String, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().fg(theme.text.secondary)))
}

fn artwork_line(url: Option<&str>, theme: &Theme) -> Line<'static> {
    match url {
        Some(url) => Line::from(Span::styled(format!("♫ {}", url), Style::default().fg(theme.text.inactive))),
        None => Line::from(Span::styled("♫ no artwork", Style::default().fg(theme.text.inactive))),
    }
}

impl DetailView for ArtistPage {
    fn header(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            title_line(&self.artist.name, theme),
            secondary_line(followers_label(self.artist.followers.total), theme),
        ];
        if !self.artist.genres.is_empty() {
            lines.push(Line::from(Span::styled(
                self.artist.genres.join(" · "),
                Style::default().fg(theme.primary),
            )));
        }
        lines
    }

    fn list_title(&self) -> &'static str {
        " Top Tracks "
    }

    fn empty_message(&self) -> &'static str {
        "No top tracks"
    }
}

impl DetailView for Album {
    fn header(&self, theme: &Theme) -> Vec<Line<'static>> {
        let year: String = self.release_date.chars().take(4).collect();
        let mut byline = artist_names(&self.artists);
        if !year.is_empty() {
            byline = format!("{} · {}", byline, year);
        }
        vec![
            title_line(&self.name, theme),
            secondary_line(byline, theme),
            secondary_line(format!("{} tracks", self.total_tracks), theme),
            artwork_line(self.images.first().map(|i| i.url.as_str()), theme),
        ]
    }

    fn list_title(&self) -> &'static str {
        " Artists & Tracks "
    }

    fn empty_message(&self) -> &'static str {
        "No tracks"
    }
}

impl DetailView for Track {
    fn header(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut title = vec![Span::styled(
            self.name.clone(),
            Style::default().fg(theme.text.primary).add_modifier(Modifier::BOLD),
        )];
        if self.explicit {
            title.push(Span::styled(" [E]", Style::default().fg(theme.text.inactive)));
        }
        vec![
            Line::from(title),
            secondary_line(artist_names(&self.artists), theme),
            secondary_line(format!("{} · {}", self.album.name, format_duration(self.duration_ms)), theme),
            artwork_line(self.album.images.first().map(|i| i.url.as_str()), theme),
        ]
    }

    fn list_title(&self) -> &'static str {
        " Album & Artists "
    }

    fn empty_message(&self) -> &'static str {
        "Nothing to open"
    }
}

impl DetailView for Playlist {
    fn header(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![title_line(&self.name, theme)];
        if let Some(description) = &self.description {
            lines.push(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(theme.text.inactive),
            )));
        }
        lines.push(secondary_line(
            format!(
                "By {} · {} · {} tracks",
                self.owner,
                followers_label(self.followers.total),
                format_count(self.total_tracks)
            ),
            theme,
        ));
        lines
    }

    fn list_title(&self) -> &'static str {
        " Tracks "
    }

    fn empty_message(&self) -> &'static str {
        "This playlist is empty"
    }
}
