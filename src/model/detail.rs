//! Generic detail screen: one load state machine for every entity kind.
//!
//! `DetailScreen<R>` holds the routed id, a `Loader<R>` and the selected
//! row. Each entity kind plugs in through `Resource`, which knows how to fetch
//! itself and which related entities it links to.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use super::catalog::{artist_names, Album, Artist, CatalogApi, CatalogError, Playlist, Track};
use super::load::{LoadState, Loader, Ticket};
use super::screen::ScreenState;
use super::types::{EntityId, EntityKind, Route};

/// A selectable row on a detail screen that opens a related entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub route: Route,
    pub label: String,
    pub subtitle: String,
    pub duration_ms: Option<u32>,
}

/// An artist together with its top tracks, fetched one after the other.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtistPage {
    pub artist: Artist,
    pub top_tracks: Vec<Track>,
}

pub trait Resource: Sized + Send + Sync + 'static {
    const KIND: EntityKind;

    fn fetch(catalog: Arc<dyn CatalogApi>, token: String, id: EntityId) -> BoxFuture<'static, Result<Self, CatalogError>>;

    /// Related entities, in the order their rows are displayed.
    fn targets(&self) -> Vec<Target>;

    fn mount(screen: DetailScreen<Self>) -> ScreenState;

    fn detail_mut(state: &mut ScreenState) -> Option<&mut DetailScreen<Self>>;
}

/// Locate the loader of a mounted detail screen.
pub fn detail_loader<R: Resource>(state: &mut ScreenState) -> Option<&mut Loader<R>> {
    R::detail_mut(state).map(DetailScreen::loader_mut)
}

#[derive(Debug)]
pub struct DetailScreen<R> {
    id: EntityId,
    loader: Loader<R>,
    selected: usize,
}

impl<R: Resource> DetailScreen<R> {
    pub fn new(id: EntityId) -> Self {
        Self { id, loader: Loader::new(), selected: 0 }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn state(&self) -> &LoadState<R> {
        self.loader.state()
    }

    pub fn loader_mut(&mut self) -> &mut Loader<R> {
        &mut self.loader
    }

    pub fn begin(&mut self) -> Ticket {
        self.selected = 0;
        self.loader.begin()
    }

    /// The routed id changed: load the new entity in place.
    pub fn set_id(&mut self, id: EntityId) -> Ticket {
        self.id = id;
        self.begin()
    }

    pub fn retry(&mut self) -> Option<Ticket> {
        let ticket = self.loader.retry()?;
        self.selected = 0;
        Some(ticket)
    }

    pub fn targets(&self) -> Vec<Target> {
        self.loader.state().data().map(R::targets).unwrap_or_default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let count = self.targets().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_route(&self) -> Option<Route> {
        self.targets().into_iter().nth(self.selected).map(|t| t.route)
    }
}

fn track_target(track: &Track) -> Option<Target> {
    Some(Target {
        route: Route::detail(EntityKind::Track, &track.id).ok()?,
        label: track.name.clone(),
        subtitle: artist_names(&track.artists),
        duration_ms: Some(track.duration_ms),
    })
}

fn artist_target(id: &str, name: &str) -> Option<Target> {
    Some(Target {
        route: Route::detail(EntityKind::Artist, id).ok()?,
        label: name.to_string(),
        subtitle: "Artist".to_string(),
        duration_ms: None,
    })
}

impl Resource for ArtistPage {
    const KIND: EntityKind = EntityKind::Artist;

    fn fetch(catalog: Arc<dyn CatalogApi>, token: String, id: EntityId) -> BoxFuture<'static, Result<Self, CatalogError>> {
        async move {
            let artist = catalog.get_artist(&token, id.as_str()).await?;
            let top = catalog.get_artist_top_tracks(&token, id.as_str()).await?;
            Ok(ArtistPage { artist, top_tracks: top.tracks })
        }
        .boxed()
    }

    fn targets(&self) -> Vec<Target> {
        self.top_tracks.iter().filter_map(track_target).collect()
    }

    fn mount(screen: DetailScreen<Self>) -> ScreenState {
        ScreenState::Artist(screen)
    }

    fn detail_mut(state: &mut ScreenState) -> Option<&mut DetailScreen<Self>> {
        match state {
            ScreenState::Artist(screen) => Some(screen),
            _ => None,
        }
    }
}

impl Resource for Album {
    const KIND: EntityKind = EntityKind::Album;

    fn fetch(catalog: Arc<dyn CatalogApi>, token: String, id: EntityId) -> BoxFuture<'static, Result<Self, CatalogError>> {
        async move { catalog.get_album(&token, id.as_str()).await }.boxed()
    }

    fn targets(&self) -> Vec<Target> {
        let artists = self.artists.iter().filter_map(|a| artist_target(&a.id, &a.name));
        let tracks = self.tracks.iter().filter_map(|t| {
            Some(Target {
                route: Route::detail(EntityKind::Track, &t.id).ok()?,
                label: t.name.clone(),
                subtitle: artist_names(&t.artists),
                duration_ms: Some(t.duration_ms),
            })
        });
        artists.chain(tracks).collect()
    }

    fn mount(screen: DetailScreen<Self>) -> ScreenState {
        ScreenState::Album(screen)
    }

    fn detail_mut(state: &mut ScreenState) -> Option<&mut DetailScreen<Self>> {
        match state {
            ScreenState::Album(screen) => Some(screen),
            _ => None,
        }
    }
}

impl Resource for Track {
    const KIND: EntityKind = EntityKind::Track;

    fn fetch(catalog: Arc<dyn CatalogApi>, token: String, id: EntityId) -> BoxFuture<'static, Result<Self, CatalogError>> {
        async move { catalog.get_track(&token, id.as_str()).await }.boxed()
    }

    fn targets(&self) -> Vec<Target> {
        let album = Route::detail(EntityKind::Album, &self.album.id).ok().map(|route| Target {
            route,
            label: self.album.name.clone(),
            subtitle: "Album".to_string(),
            duration_ms: None,
        });
        album
            .into_iter()
            .chain(self.artists.iter().filter_map(|a| artist_target(&a.id, &a.name)))
            .collect()
    }

    fn mount(screen: DetailScreen<Self>) -> ScreenState {
        ScreenState::Track(screen)
    }

    fn detail_mut(state: &mut ScreenState) -> Option<&mut DetailScreen<Self>> {
        match state {
            ScreenState::Track(screen) => Some(screen),
            _ => None,
        }
    }
}

impl Resource for Playlist {
    const KIND: EntityKind = EntityKind::Playlist;

    fn fetch(catalog: Arc<dyn CatalogApi>, token: String, id: EntityId) -> BoxFuture<'static, Result<Self, CatalogError>> {
        async move { catalog.get_playlist(&token, id.as_str()).await }.boxed()
    }

    fn targets(&self) -> Vec<Target> {
        self.tracks.iter().filter_map(track_target).collect()
    }

    fn mount(screen: DetailScreen<Self>) -> ScreenState {
        ScreenState::Playlist(screen)
    }

    fn detail_mut(state: &mut ScreenState) -> Option<&mut DetailScreen<Self>> {
        match state {
            ScreenState::Playlist(screen) => Some(screen),
            _ => None,
        }
    }
}
