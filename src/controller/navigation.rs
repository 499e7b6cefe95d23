//! Navigation-related controller methods (routing, screen loads, retries)
//!
//! Every load follows the same path: the screen's loader enters `Loading` and
//! hands out a ticket while the model is locked, then a spawned task asks the
//! auth provider for a token, runs the fetch and applies the outcome to the
//! screen identified by its `ScreenKey`. A screen that was unmounted in the
//! meantime is simply not found, and a ticket from a superseded request is
//! rejected by the loader.

use futures::future::{BoxFuture, FutureExt};
use tokio::task::JoinHandle;

use crate::model::{
    detail_loader, library_loader, search_loader, Album, ArtistPage, CatalogError, DetailScreen, EntityId,
    EntityKind, Loader, NowPlaying, Playlist, Resource, Route, ScreenKey, ScreenState, SettingsItem, Tab, Ticket,
    Track,
};

use super::AppController;

/// Finds the loader a response belongs to inside a mounted screen.
type Locate<T> = fn(&mut ScreenState) -> Option<&mut Loader<T>>;

/// A load that has been started on a screen and still needs its request.
enum Pending {
    Detail { kind: EntityKind, key: ScreenKey, ticket: Ticket, id: EntityId },
    Library { key: ScreenKey, ticket: Ticket },
    Search { key: ScreenKey, ticket: Ticket, query: String },
}

struct FetchMeta {
    route: &'static str,
    subject: String,
    fallback: &'static str,
}

enum Activation {
    Open(Route),
    Retry,
    Setting(SettingsItem),
}

fn has_failed(state: &ScreenState) -> bool {
    match state {
        ScreenState::Artist(screen) => screen.state().error().is_some(),
        ScreenState::Album(screen) => screen.state().error().is_some(),
        ScreenState::Track(screen) => screen.state().error().is_some(),
        ScreenState::Playlist(screen) => screen.state().error().is_some(),
        ScreenState::Library(screen) => screen.loader.state().error().is_some(),
        ScreenState::Search(screen) => screen.results().is_some_and(|r| r.state().error().is_some()),
        ScreenState::Settings(_) | ScreenState::Player => false,
    }
}

fn retry_detail<R: Resource>(key: ScreenKey, screen: &mut DetailScreen<R>) -> Option<Pending> {
    let ticket = screen.retry()?;
    Some(Pending::Detail { kind: R::KIND, key, ticket, id: screen.id().clone() })
}

impl AppController {
    /// Show `route` on the active tab. Detail routes return the spawned fetch.
    pub async fn navigate(&self, route: Route) -> Option<JoinHandle<()>> {
        tracing::debug!(route = route.name(), id = ?route.id().map(EntityId::as_str), "Navigating");
        let pending = match &route {
            Route::Library => {
                self.switch_tab(Tab::Library).await;
                return None;
            }
            Route::Search => {
                self.switch_tab(Tab::Search).await;
                return None;
            }
            Route::Settings => {
                self.switch_tab(Tab::Settings).await;
                return None;
            }
            Route::Player => {
                self.open_player().await;
                return None;
            }
            Route::ArtistDetail { id } => self.mount_detail::<ArtistPage>(route.clone(), id.clone()).await,
            Route::AlbumDetail { id } => self.mount_detail::<Album>(route.clone(), id.clone()).await,
            Route::TrackDetail { id } => self.mount_detail::<Track>(route.clone(), id.clone()).await,
            Route::PlaylistDetail { id } => self.mount_detail::<Playlist>(route.clone(), id.clone()).await,
        };
        Some(self.dispatch(pending))
    }

    /// Reuse the current screen when it shows the same kind of entity,
    /// otherwise push a fresh one.
    async fn mount_detail<R: Resource>(&self, route: Route, id: EntityId) -> Pending {
        let mut model = self.model.lock().await;
        let current = model.navigator.current_mut();
        if let Some(screen) = R::detail_mut(&mut current.state) {
            let ticket = screen.set_id(id.clone());
            let key = current.key;
            current.route = route;
            tracing::debug!(key = ?key, id = %id, "Reloading detail screen in place");
            return Pending::Detail { kind: R::KIND, key, ticket, id };
        }

        let mut screen = DetailScreen::<R>::new(id.clone());
        let ticket = screen.begin();
        let key = model.navigator.push(route, R::mount(screen));
        Pending::Detail { kind: R::KIND, key, ticket, id }
    }

    pub async fn switch_tab(&self, tab: Tab) {
        self.model.lock().await.navigator.switch_tab(tab);
    }

    /// Pop the top screen of the active tab. Returns whether anything was
    /// unmounted.
    pub async fn back(&self) -> bool {
        self.model.lock().await.navigator.back().is_some()
    }

    /// Re-issue the failed load of the current screen.
    pub async fn retry_current(&self) -> Option<JoinHandle<()>> {
        let pending = {
            let mut model = self.model.lock().await;
            let screen = model.navigator.current_mut();
            let key = screen.key;
            match &mut screen.state {
                ScreenState::Artist(detail) => retry_detail(key, detail),
                ScreenState::Album(detail) => retry_detail(key, detail),
                ScreenState::Track(detail) => retry_detail(key, detail),
                ScreenState::Playlist(detail) => retry_detail(key, detail),
                ScreenState::Library(library) => library.loader.retry().map(|ticket| Pending::Library { key, ticket }),
                ScreenState::Search(search) => {
                    search.retry().map(|(ticket, query)| Pending::Search { key, ticket, query })
                }
                ScreenState::Settings(_) | ScreenState::Player => None,
            }
        }?;

        tracing::info!("Retrying load");
        Some(self.dispatch(pending))
    }

    /// (Re)load the user's playlists on the Library root.
    pub async fn refresh_library(&self) -> Option<JoinHandle<()>> {
        let pending = {
            let mut model = self.model.lock().await;
            let key = model.navigator.root_key(Tab::Library);
            let screen = model.navigator.screen_mut(key)?;
            let ScreenState::Library(library) = &mut screen.state else {
                return None;
            };
            Pending::Library { key, ticket: library.loader.begin() }
        };
        Some(self.dispatch(pending))
    }

    pub async fn submit_search(&self) -> Option<JoinHandle<()>> {
        let pending = {
            let mut model = self.model.lock().await;
            let screen = model.navigator.current_mut();
            let key = screen.key;
            let ScreenState::Search(search) = &mut screen.state else {
                return None;
            };
            let (ticket, query) = search.submit()?;
            Pending::Search { key, ticket, query }
        };
        Some(self.dispatch(pending))
    }

    /// Enter on the current screen: open the selected row, retry a failed
    /// load, or run the selected setting.
    pub async fn activate_selection(&self) -> Option<JoinHandle<()>> {
        let activation = {
            let model = self.model.lock().await;
            let state = &model.navigator.current().state;
            if has_failed(state) {
                Some(Activation::Retry)
            } else {
                match state {
                    ScreenState::Library(screen) => screen.selected_route().map(Activation::Open),
                    ScreenState::Search(screen) => screen.selected_route().map(Activation::Open),
                    ScreenState::Settings(screen) => Some(Activation::Setting(screen.selected_item())),
                    ScreenState::Player => model.player.as_ref().and_then(NowPlaying::track_route).map(Activation::Open),
                    ScreenState::Artist(screen) => screen.selected_route().map(Activation::Open),
                    ScreenState::Album(screen) => screen.selected_route().map(Activation::Open),
                    ScreenState::Track(screen) => screen.selected_route().map(Activation::Open),
                    ScreenState::Playlist(screen) => screen.selected_route().map(Activation::Open),
                }
            }
        };

        match activation? {
            Activation::Open(route) => self.navigate(route).await,
            Activation::Retry => self.retry_current().await,
            Activation::Setting(SettingsItem::DarkMode) => {
                self.toggle_dark_mode().await;
                None
            }
            Activation::Setting(SettingsItem::Logout) => {
                self.logout().await;
                None
            }
        }
    }

    fn dispatch(&self, pending: Pending) -> JoinHandle<()> {
        match pending {
            Pending::Detail { kind, key, ticket, id } => match kind {
                EntityKind::Artist => self.spawn_detail::<ArtistPage>(key, ticket, id),
                EntityKind::Album => self.spawn_detail::<Album>(key, ticket, id),
                EntityKind::Track => self.spawn_detail::<Track>(key, ticket, id),
                EntityKind::Playlist => self.spawn_detail::<Playlist>(key, ticket, id),
            },
            Pending::Library { key, ticket } => {
                let library = self.services.library.clone();
                let meta = FetchMeta { route: "Library", subject: String::new(), fallback: "Failed to load playlists" };
                self.spawn_fetch(key, ticket, meta, library_loader, move |token| {
                    async move { library.user_playlists(&token).await }.boxed()
                })
            }
            Pending::Search { key, ticket, query } => {
                let library = self.services.library.clone();
                let limit = self.search_limit;
                let meta = FetchMeta { route: "Search", subject: query.clone(), fallback: "Search failed" };
                self.spawn_fetch(key, ticket, meta, search_loader, move |token| {
                    async move { library.search(&token, &query, limit).await }.boxed()
                })
            }
        }
    }

    fn spawn_detail<R: Resource>(&self, key: ScreenKey, ticket: Ticket, id: EntityId) -> JoinHandle<()> {
        let catalog = self.services.catalog.clone();
        let meta = FetchMeta { route: R::KIND.as_str(), subject: id.to_string(), fallback: R::KIND.fallback_error() };
        self.spawn_fetch(key, ticket, meta, detail_loader::<R>, move |token| R::fetch(catalog, token, id))
    }

    fn spawn_fetch<T, F>(&self, key: ScreenKey, ticket: Ticket, meta: FetchMeta, locate: Locate<T>, fetch: F) -> JoinHandle<()>
    where
        T: Send + 'static,
        F: FnOnce(String) -> BoxFuture<'static, Result<T, CatalogError>> + Send + 'static,
    {
        let controller = self.clone();
        tokio::spawn(async move {
            let FetchMeta { route, subject, fallback } = meta;
            let generation = ticket.generation();
            tracing::debug!(route, id = %subject, generation, "Fetch started");

            let outcome = match controller.services.auth.get_token().await {
                Some(token) => fetch(token).await,
                None => Err(CatalogError::AuthenticationRequired),
            };
            crate::log_api_result!(route, outcome);
            let outcome = outcome.map_err(|e| e.display_message(fallback));

            let mut model = controller.model.lock().await;
            let Some(screen) = model.navigator.screen_mut(key) else {
                tracing::debug!(route, id = %subject, generation, "Screen unmounted, dropping response");
                return;
            };
            let applied = locate(&mut screen.state).is_some_and(|loader| loader.resolve(ticket, outcome));
            if applied {
                tracing::debug!(route, id = %subject, generation, "Response applied");
            } else {
                tracing::debug!(route, id = %subject, generation, "Stale response dropped");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AlbumTrack, Artist, ArtistRef, Followers, LoadState, PlaylistSummary, SearchHit, SearchResults, TopTracks,
    };
    use crate::testing::{render_to_string, FakeAuth, Harness};
    use crate::view::AppView;

    fn route(kind: EntityKind, id: &str) -> Route {
        Route::detail(kind, id).unwrap()
    }

    fn artist_x() -> Artist {
        Artist {
            id: "A1".into(),
            name: "X".into(),
            images: vec![],
            followers: Followers { total: 5 },
            genres: vec!["pop".into()],
        }
    }

    async fn album_state(h: &Harness) -> LoadState<Album> {
        let model = h.controller.model.lock().await;
        match &model.navigator.current().state {
            ScreenState::Album(screen) => screen.state().clone(),
            other => panic!("expected album screen, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn artist_loads_artist_then_top_tracks() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.artist.lock().unwrap() = Some(Ok(artist_x()));
        *h.catalog.top_tracks.lock().unwrap() = Some(Ok(TopTracks { tracks: vec![] }));

        h.controller.navigate(route(EntityKind::Artist, "A1")).await.unwrap().await.unwrap();

        assert_eq!(
            h.catalog.calls(),
            vec![("get_artist", "A1".to_string()), ("get_artist_top_tracks", "A1".to_string())]
        );
        let model = h.controller.model.lock().await;
        let ScreenState::Artist(screen) = &model.navigator.current().state else {
            panic!("expected artist screen");
        };
        assert_eq!(screen.state().data().unwrap().artist.name, "X");
        assert!(screen.targets().is_empty());

        let text = render_to_string(80, 24, |frame| AppView::render(frame, &model, 0));
        assert!(text.contains("5 followers"));
        assert!(text.contains("No top tracks"));
    }

    #[tokio::test]
    async fn failed_top_tracks_fails_the_artist() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.artist.lock().unwrap() = Some(Ok(artist_x()));
        *h.catalog.top_tracks.lock().unwrap() = Some(Err(CatalogError::Request("rate limited".into())));

        h.controller.navigate(route(EntityKind::Artist, "A1")).await.unwrap().await.unwrap();

        let model = h.controller.model.lock().await;
        let ScreenState::Artist(screen) = &model.navigator.current().state else {
            panic!("expected artist screen");
        };
        assert_eq!(screen.state().error(), Some("rate limited"));
    }

    #[tokio::test]
    async fn album_track_and_playlist_load() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.album.lock().unwrap() = Some(Ok(Album {
            id: "AL1".into(),
            name: "Record".into(),
            tracks: vec![AlbumTrack { id: "T1".into(), name: "Intro".into(), ..Default::default() }],
            ..Default::default()
        }));
        *h.catalog.track.lock().unwrap() = Some(Ok(Track {
            id: "T1".into(),
            name: "Intro".into(),
            artists: vec![ArtistRef { id: "A1".into(), name: "X".into() }],
            ..Default::default()
        }));
        *h.catalog.playlist.lock().unwrap() = Some(Ok(Playlist { id: "P1".into(), name: "Mix".into(), ..Default::default() }));

        h.controller.navigate(route(EntityKind::Album, "AL1")).await.unwrap().await.unwrap();
        assert_eq!(album_state(&h).await.data().unwrap().name, "Record");

        // Album -> track is a different kind, so it pushes.
        h.controller.navigate(route(EntityKind::Track, "T1")).await.unwrap().await.unwrap();
        h.controller.navigate(route(EntityKind::Playlist, "P1")).await.unwrap().await.unwrap();

        let model = h.controller.model.lock().await;
        assert_eq!(model.navigator.depth(), 4);
        let ScreenState::Playlist(screen) = &model.navigator.current().state else {
            panic!("expected playlist screen");
        };
        assert_eq!(screen.state().data().unwrap().name, "Mix");
        assert_eq!(
            h.catalog.calls(),
            vec![
                ("get_album", "AL1".to_string()),
                ("get_track", "T1".to_string()),
                ("get_playlist", "P1".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn missing_token_fails_without_calling_catalog() {
        let h = Harness::new(FakeAuth::signed_out());
        for kind in [EntityKind::Artist, EntityKind::Album, EntityKind::Track, EntityKind::Playlist] {
            h.controller.navigate(route(kind, "X1")).await.unwrap().await.unwrap();
        }
        assert_eq!(h.catalog.call_count(), 0);

        let model = h.controller.model.lock().await;
        let ScreenState::Playlist(screen) = &model.navigator.current().state else {
            panic!("expected playlist screen");
        };
        assert_eq!(screen.state().error(), Some("Authentication required"));
    }

    #[tokio::test]
    async fn rejection_shows_message_and_retry() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.album.lock().unwrap() = Some(Err(CatalogError::Request("network down".into())));

        h.controller.navigate(route(EntityKind::Album, "AL1")).await.unwrap().await.unwrap();
        assert_eq!(album_state(&h).await, LoadState::Failure("network down".into()));

        let model = h.controller.model.lock().await;
        let text = render_to_string(80, 24, |frame| AppView::render(frame, &model, 0));
        assert!(text.contains("network down"));
        assert!(text.contains("[ r ] Retry"));
    }

    #[tokio::test]
    async fn empty_rejection_uses_fallback() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.album.lock().unwrap() = Some(Err(CatalogError::Request(String::new())));

        h.controller.navigate(route(EntityKind::Album, "AL1")).await.unwrap().await.unwrap();
        assert_eq!(album_state(&h).await, LoadState::Failure("Failed to load album".into()));
    }

    fn reject(h: &Harness, kind: EntityKind, message: &str) {
        fn err<T>(message: &str) -> Option<Result<T, CatalogError>> {
            Some(Err(CatalogError::Request(message.to_string())))
        }
        match kind {
            EntityKind::Artist => *h.catalog.artist.lock().unwrap() = err(message),
            EntityKind::Album => *h.catalog.album.lock().unwrap() = err(message),
            EntityKind::Track => *h.catalog.track.lock().unwrap() = err(message),
            EntityKind::Playlist => *h.catalog.playlist.lock().unwrap() = err(message),
        }
    }

    /// Kind and failure message of the detail screen on top, if any.
    async fn current_failure(h: &Harness) -> Option<(EntityKind, Option<String>)> {
        let model = h.controller.model.lock().await;
        let failure = match &model.navigator.current().state {
            ScreenState::Artist(screen) => (EntityKind::Artist, screen.state().error().map(str::to_string)),
            ScreenState::Album(screen) => (EntityKind::Album, screen.state().error().map(str::to_string)),
            ScreenState::Track(screen) => (EntityKind::Track, screen.state().error().map(str::to_string)),
            ScreenState::Playlist(screen) => (EntityKind::Playlist, screen.state().error().map(str::to_string)),
            _ => return None,
        };
        Some(failure)
    }

    #[tokio::test]
    async fn every_kind_reports_failures_on_its_own_screen() {
        let kinds = [EntityKind::Artist, EntityKind::Album, EntityKind::Track, EntityKind::Playlist];
        for kind in kinds {
            let cases = [
                (true, "network down", "network down".to_string()),
                (true, "", kind.fallback_error().to_string()),
                (false, "network down", "Authentication required".to_string()),
            ];
            for (signed_in, rejection, expected) in cases {
                let auth = if signed_in { FakeAuth::signed_in() } else { FakeAuth::signed_out() };
                let h = Harness::new(auth);
                reject(&h, kind, rejection);

                h.controller.navigate(route(kind, "X1")).await.unwrap().await.unwrap();

                assert_eq!(current_failure(&h).await, Some((kind, Some(expected))), "{kind:?} / {rejection:?}");
                if !signed_in {
                    assert_eq!(h.catalog.call_count(), 0, "{kind:?} fetched without a token");
                }
            }
        }
    }

    #[tokio::test]
    async fn retry_issues_exactly_one_fetch_with_same_id() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.album.lock().unwrap() = Some(Err(CatalogError::Request("network down".into())));
        h.controller.navigate(route(EntityKind::Album, "AL1")).await.unwrap().await.unwrap();

        *h.catalog.album.lock().unwrap() = Some(Ok(Album { id: "AL1".into(), name: "Record".into(), ..Default::default() }));
        let retry = h.controller.retry_current().await.unwrap();
        assert!(album_state(&h).await.is_loading());
        retry.await.unwrap();

        assert_eq!(h.catalog.calls(), vec![("get_album", "AL1".to_string()), ("get_album", "AL1".to_string())]);
        assert_eq!(album_state(&h).await.data().unwrap().name, "Record");

        // Success is terminal for the mount.
        assert!(h.controller.retry_current().await.is_none());
        assert_eq!(h.catalog.call_count(), 2);
    }

    #[tokio::test]
    async fn late_response_after_back_is_ignored() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.album.lock().unwrap() = Some(Ok(Album::default()));
        let gate = h.catalog.hold_responses();

        let fetch = h.controller.navigate(route(EntityKind::Album, "AL1")).await.unwrap();
        assert!(h.controller.back().await);
        gate.add_permits(1);
        fetch.await.unwrap();

        let model = h.controller.model.lock().await;
        assert_eq!(model.navigator.depth(), 1);
        assert_eq!(model.navigator.current().route, Route::Library);
    }

    #[tokio::test]
    async fn param_change_reloads_in_place_and_drops_stale_response() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.track.lock().unwrap() = Some(Ok(Track { id: "T2".into(), name: "Two".into(), ..Default::default() }));
        let gate = h.catalog.hold_responses();

        let first = h.controller.navigate(route(EntityKind::Track, "T1")).await.unwrap();
        let second = h.controller.navigate(route(EntityKind::Track, "T2")).await.unwrap();
        {
            let model = h.controller.model.lock().await;
            assert_eq!(model.navigator.depth(), 2);
            assert_eq!(model.navigator.current().route, route(EntityKind::Track, "T2"));
        }

        gate.add_permits(1);
        first.await.unwrap();
        {
            let model = h.controller.model.lock().await;
            let ScreenState::Track(screen) = &model.navigator.current().state else {
                panic!("expected track screen");
            };
            assert!(screen.state().is_loading(), "superseded response must not land");
        }

        gate.add_permits(1);
        second.await.unwrap();
        let model = h.controller.model.lock().await;
        let ScreenState::Track(screen) = &model.navigator.current().state else {
            panic!("expected track screen");
        };
        assert_eq!(screen.id().as_str(), "T2");
        assert_eq!(screen.state().data().unwrap().name, "Two");
    }

    #[tokio::test]
    async fn library_rows_open_playlists() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.playlists.lock().unwrap() = Some(Ok(vec![PlaylistSummary {
            id: "P1".into(),
            name: "Focus".into(),
            ..Default::default()
        }]));
        *h.catalog.playlist.lock().unwrap() = Some(Ok(Playlist { id: "P1".into(), ..Default::default() }));

        h.controller.refresh_library().await.unwrap().await.unwrap();
        h.controller.activate_selection().await.unwrap().await.unwrap();

        let model = h.controller.model.lock().await;
        assert_eq!(model.navigator.current().route, route(EntityKind::Playlist, "P1"));
    }

    #[tokio::test]
    async fn search_submits_trimmed_query() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.search.lock().unwrap() = Some(Ok(SearchResults {
            artists: vec![SearchHit { id: "A1".into(), name: "Daft Punk".into(), subtitle: String::new() }],
            best_match: crate::model::SearchResultSection::Artists,
            ..Default::default()
        }));
        h.controller.switch_tab(Tab::Search).await;
        {
            let mut model = h.controller.model.lock().await;
            let ScreenState::Search(search) = &mut model.navigator.current_mut().state else {
                panic!("expected search screen");
            };
            search.query = "  daft punk ".into();
        }

        h.controller.submit_search().await.unwrap().await.unwrap();
        assert_eq!(h.catalog.calls(), vec![("search", "daft punk".to_string())]);

        let model = h.controller.model.lock().await;
        let ScreenState::Search(search) = &model.navigator.current().state else {
            panic!("expected search screen");
        };
        assert_eq!(search.selected_route(), Some(route(EntityKind::Artist, "A1")));
    }

    #[tokio::test]
    async fn enter_on_failure_retries() {
        let h = Harness::new(FakeAuth::signed_in());
        *h.catalog.album.lock().unwrap() = Some(Err(CatalogError::Request("network down".into())));
        h.controller.navigate(route(EntityKind::Album, "AL1")).await.unwrap().await.unwrap();

        h.controller.activate_selection().await.unwrap().await.unwrap();
        assert_eq!(h.catalog.call_count(), 2);
    }
}
