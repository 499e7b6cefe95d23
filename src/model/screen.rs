//! Mounted screens and their per-instance state

use super::catalog::{Album, PlaylistSummary, Playlist, Track};
use super::content::SearchResults;
use super::detail::{ArtistPage, DetailScreen};
use super::load::{Loader, Ticket};
use super::types::{EntityKind, Route, ScreenKey};

/// One entry on a navigation stack.
#[derive(Debug)]
pub struct Screen {
    pub key: ScreenKey,
    pub route: Route,
    pub state: ScreenState,
}

#[derive(Debug)]
pub enum ScreenState {
    Library(LibraryScreen),
    Search(SearchScreen),
    Settings(SettingsScreen),
    Player,
    Artist(DetailScreen<ArtistPage>),
    Album(DetailScreen<Album>),
    Track(DetailScreen<Track>),
    Playlist(DetailScreen<Playlist>),
}

/// The user's playlists, shown at the root of the Library tab.
#[derive(Debug, Default)]
pub struct LibraryScreen {
    pub loader: Loader<Vec<PlaylistSummary>>,
    selected: usize,
}

impl LibraryScreen {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let count = self.loader.state().data().map_or(0, Vec::len);
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_route(&self) -> Option<Route> {
        let playlist = self.loader.state().data()?.get(self.selected)?;
        Route::detail(EntityKind::Playlist, &playlist.id).ok()
    }
}

pub fn library_loader(state: &mut ScreenState) -> Option<&mut Loader<Vec<PlaylistSummary>>> {
    match state {
        ScreenState::Library(screen) => Some(&mut screen.loader),
        _ => None,
    }
}

#[derive(Debug)]
pub struct SearchScreen {
    pub query: String,
    pub editing: bool,
    pub(crate) submitted: Option<String>,
    pub(crate) results: Option<Loader<SearchResults>>,
    pub(crate) selected: usize,
}

impl Default for SearchScreen {
    fn default() -> Self {
        Self { query: String::new(), editing: true, submitted: None, results: None, selected: 0 }
    }
}

impl SearchScreen {
    pub fn results(&self) -> Option<&Loader<SearchResults>> {
        self.results.as_ref()
    }

    pub fn submitted(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    /// Start a search for the current query. Returns the ticket and the
    /// query to send, or `None` for a blank query.
    pub fn submit(&mut self) -> Option<(Ticket, String)> {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return None;
        }
        self.editing = false;
        self.selected = 0;
        self.submitted = Some(query.clone());
        let ticket = self.results.get_or_insert_with(Loader::new).begin();
        Some((ticket, query))
    }

    pub fn retry(&mut self) -> Option<(Ticket, String)> {
        let query = self.submitted.clone()?;
        let ticket = self.results.as_mut()?.retry()?;
        self.selected = 0;
        Some((ticket, query))
    }

    fn row_count(&self) -> usize {
        self.results
            .as_ref()
            .and_then(|loader| loader.state().data())
            .map_or(0, |results| results.rows().len())
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let count = self.row_count();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_route(&self) -> Option<Route> {
        let results = self.results.as_ref()?.state().data()?;
        results.rows().into_iter().nth(self.selected)?.2
    }
}

pub fn search_loader(state: &mut ScreenState) -> Option<&mut Loader<SearchResults>> {
    match state {
        ScreenState::Search(screen) => screen.results.as_mut(),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsItem {
    DarkMode,
    Logout,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 2] = [SettingsItem::DarkMode, SettingsItem::Logout];
}

#[derive(Debug, Default)]
pub struct SettingsScreen {
    selected: usize,
}

impl SettingsScreen {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> SettingsItem {
        SettingsItem::ALL[self.selected.min(SettingsItem::ALL.len() - 1)]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(SettingsItem::ALL.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
