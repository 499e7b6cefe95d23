//! Hand-written fakes for the service traits and a TestBackend render helper.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ratatui::{backend::TestBackend, Frame, Terminal};
use tokio::sync::Semaphore;

use crate::auth::AuthProvider;
use crate::controller::{AppController, Services};
use crate::config::AppConfig;
use crate::model::{
    Album, AppModel, Artist, CatalogApi, CatalogError, LibraryApi, NowPlaying, PlaybackController, Playlist,
    PlaylistSummary, SearchResults, TopTracks, Track,
};
use crate::theme::Theme;

/// Draw once into an in-memory terminal and return the screen as text, one
/// line per row.
pub fn render_to_string<F: FnOnce(&mut Frame)>(width: u16, height: u16, draw: F) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..height {
        for x in 0..width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

pub struct FakeAuth {
    token: Mutex<Option<String>>,
    logout_succeeds: bool,
    pub logout_calls: AtomicUsize,
}

impl FakeAuth {
    pub fn signed_in() -> Self {
        Self { token: Mutex::new(Some("token".into())), logout_succeeds: true, logout_calls: AtomicUsize::new(0) }
    }

    pub fn signed_out() -> Self {
        Self { token: Mutex::new(None), logout_succeeds: true, logout_calls: AtomicUsize::new(0) }
    }

    pub fn failing_logout() -> Self {
        Self { logout_succeeds: false, ..Self::signed_in() }
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn get_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    async fn logout(&self) -> bool {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.logout_succeeds {
            *self.token.lock().unwrap() = None;
        }
        self.logout_succeeds
    }

    fn is_authenticated(&self) -> bool {
        self.token.lock().unwrap().is_some()
    }

    fn is_loading(&self) -> bool {
        false
    }
}

/// Catalog and library fake. Responses are configured per call kind and every
/// call is recorded as `(method, id or query)`.
#[derive(Default)]
pub struct FakeCatalog {
    pub artist: Mutex<Option<Result<Artist, CatalogError>>>,
    pub top_tracks: Mutex<Option<Result<TopTracks, CatalogError>>>,
    pub album: Mutex<Option<Result<Album, CatalogError>>>,
    pub track: Mutex<Option<Result<Track, CatalogError>>>,
    pub playlist: Mutex<Option<Result<Playlist, CatalogError>>>,
    pub playlists: Mutex<Option<Result<Vec<PlaylistSummary>, CatalogError>>>,
    pub search: Mutex<Option<Result<SearchResults, CatalogError>>>,
    calls: Mutex<Vec<(&'static str, String)>>,
    /// When set, every call waits for a permit before answering.
    gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakeCatalog {
    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Hold every response until a permit is added to the returned semaphore.
    pub fn hold_responses(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    async fn answer<T: Clone>(
        &self,
        method: &'static str,
        subject: &str,
        slot: &Mutex<Option<Result<T, CatalogError>>>,
    ) -> Result<T, CatalogError> {
        self.calls.lock().unwrap().push((method, subject.to_string()));
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        slot.lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(CatalogError::Request(format!("no fake response for {}", method))))
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn get_artist(&self, _token: &str, id: &str) -> Result<Artist, CatalogError> {
        self.answer("get_artist", id, &self.artist).await
    }

    async fn get_artist_top_tracks(&self, _token: &str, id: &str) -> Result<TopTracks, CatalogError> {
        self.answer("get_artist_top_tracks", id, &self.top_tracks).await
    }

    async fn get_album(&self, _token: &str, id: &str) -> Result<Album, CatalogError> {
        self.answer("get_album", id, &self.album).await
    }

    async fn get_track(&self, _token: &str, id: &str) -> Result<Track, CatalogError> {
        self.answer("get_track", id, &self.track).await
    }

    async fn get_playlist(&self, _token: &str, id: &str) -> Result<Playlist, CatalogError> {
        self.answer("get_playlist", id, &self.playlist).await
    }
}

#[async_trait]
impl LibraryApi for FakeCatalog {
    async fn user_playlists(&self, _token: &str) -> Result<Vec<PlaylistSummary>, CatalogError> {
        self.answer("user_playlists", "", &self.playlists).await
    }

    async fn search(&self, _token: &str, query: &str, _limit: u32) -> Result<SearchResults, CatalogError> {
        self.answer("search", query, &self.search).await
    }
}

/// Playback fake. `plays`/`pauses` count commands as soon as they arrive.
#[derive(Default)]
pub struct FakePlayback {
    pub now: Mutex<Option<NowPlaying>>,
    pub fail: AtomicBool,
    pub plays: AtomicUsize,
    pub pauses: AtomicUsize,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

impl FakePlayback {
    /// Hold every play/pause until a permit is added to the returned semaphore.
    pub fn hold_commands(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    async fn command(&self, counter: &AtomicUsize) -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("http error: status code 404 Not Found"));
        }
        Ok(())
    }
}

#[async_trait]
impl PlaybackController for FakePlayback {
    async fn now_playing(&self, _token: &str) -> Result<Option<NowPlaying>> {
        Ok(self.now.lock().unwrap().clone())
    }

    async fn play(&self, _token: &str) -> Result<()> {
        self.command(&self.plays).await
    }

    async fn pause(&self, _token: &str) -> Result<()> {
        self.command(&self.pauses).await
    }
}

pub struct Harness {
    pub controller: AppController,
    pub auth: Arc<FakeAuth>,
    pub catalog: Arc<FakeCatalog>,
    pub playback: Arc<FakePlayback>,
}

impl Harness {
    pub fn new(auth: FakeAuth) -> Self {
        let auth = Arc::new(auth);
        let catalog = Arc::new(FakeCatalog::default());
        let playback = Arc::new(FakePlayback::default());
        let services = Services {
            auth: auth.clone(),
            catalog: catalog.clone(),
            library: catalog.clone(),
            playback: playback.clone(),
        };
        let model = Arc::new(tokio::sync::Mutex::new(AppModel::new(Theme::dark(), auth.is_authenticated())));
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "spotify-browse-harness-{}-{}.json",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::SeqCst)
        ));
        let config = AppConfig::load_from(&path).unwrap();
        Self { controller: AppController::new(model, services, config), auth, catalog, playback }
    }
}
