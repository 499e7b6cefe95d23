//! Spotify Web API client implementing the catalog, library and playback
//! service traits.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use rspotify::{
    model::{
        AlbumId, ArtistId, FullTrack, Market, PlayableItem, PlaylistId, SearchResult, SearchType, SimplifiedArtist,
        TrackId,
    },
    prelude::*,
    AuthCodeSpotify, Config,
};

use crate::auth::OAuthSession;

use super::catalog::{
    Album, AlbumRef, AlbumTrack, Artist, ArtistRef, CatalogApi, CatalogError, Followers, Image, LibraryApi, Playlist,
    PlaylistSummary, TopTracks, Track,
};
use super::content::{SearchHit, SearchResults};
use super::playback::{NowPlaying, PlaybackController};

/// Spotify API client. The access token is supplied per call by the caller,
/// so this client never refreshes on its own.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<AuthCodeSpotify>,
}

impl SpotifyClient {
    pub fn new() -> Self {
        let client = AuthCodeSpotify::with_config(
            Default::default(),
            Default::default(),
            Config {
                token_cached: false,
                token_refreshing: false,
                ..Default::default()
            },
        );
        tracing::debug!("rspotify client initialized");
        Self { client: Arc::new(client) }
    }

    async fn authorize(&self, access_token: &str) -> Result<(), CatalogError> {
        let mut guard = self
            .client
            .token
            .lock()
            .await
            .map_err(|_| CatalogError::Request("Token store is unavailable".into()))?;
        *guard = Some(OAuthSession::rspotify_token(access_token));
        Ok(())
    }

    async fn get_device_id(&self) -> Option<String> {
        match self.client.device().await {
            Ok(devices) => {
                let active = devices.iter().find(|d| d.is_active);
                if let Some(device) = active {
                    tracing::debug!(device_name = %device.name, device_id = ?device.id, "Found active device");
                    return device.id.clone();
                }
                tracing::debug!(available_devices = devices.len(), "No active device found");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to get devices list");
                None
            }
        }
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

fn images(images: Vec<rspotify::model::Image>) -> Vec<Image> {
    images
        .into_iter()
        .map(|image| Image { url: image.url, width: image.width, height: image.height })
        .collect()
}

fn artist_refs(artists: &[SimplifiedArtist]) -> Vec<ArtistRef> {
    artists
        .iter()
        .map(|a| ArtistRef {
            id: a.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default(),
            name: a.name.clone(),
        })
        .collect()
}

fn track(track: FullTrack) -> Track {
    Track {
        id: track.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default(),
        artists: artist_refs(&track.artists),
        album: AlbumRef {
            id: track.album.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default(),
            name: track.album.name,
            images: images(track.album.images),
        },
        name: track.name,
        duration_ms: track.duration.num_milliseconds().max(0) as u32,
        track_number: track.track_number,
        explicit: track.explicit,
    }
}

fn first_artist(artists: &[SimplifiedArtist]) -> String {
    artists.first().map(|a| a.name.clone()).unwrap_or_default()
}

#[async_trait]
impl CatalogApi for SpotifyClient {
    async fn get_artist(&self, token: &str, id: &str) -> Result<Artist, CatalogError> {
        let artist_id = ArtistId::from_id(id)?;
        self.authorize(token).await?;
        tracing::debug!(artist_id = id, "API: artist");
        let artist = self.client.artist(artist_id).await?;

        Ok(Artist {
            id: artist.id.id().to_string(),
            name: artist.name,
            images: images(artist.images),
            followers: Followers { total: artist.followers.total },
            genres: artist.genres,
        })
    }

    async fn get_artist_top_tracks(&self, token: &str, id: &str) -> Result<TopTracks, CatalogError> {
        let artist_id = ArtistId::from_id(id)?;
        self.authorize(token).await?;
        tracing::debug!(artist_id = id, "API: artist_top_tracks");
        // FromToken uses the account's country
        let tracks = self.client.artist_top_tracks(artist_id, Some(Market::FromToken)).await?;
        Ok(TopTracks { tracks: tracks.into_iter().map(track).collect() })
    }

    async fn get_album(&self, token: &str, id: &str) -> Result<Album, CatalogError> {
        let album_id = AlbumId::from_id(id)?;
        self.authorize(token).await?;
        tracing::debug!(album_id = id, "API: album");
        let album = self.client.album(album_id, None).await?;

        let tracks = album
            .tracks
            .items
            .iter()
            .map(|t| AlbumTrack {
                id: t.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default(),
                name: t.name.clone(),
                artists: artist_refs(&t.artists),
                duration_ms: t.duration.num_milliseconds().max(0) as u32,
                track_number: t.track_number,
            })
            .collect();

        Ok(Album {
            id: album.id.id().to_string(),
            name: album.name,
            artists: artist_refs(&album.artists),
            images: images(album.images),
            release_date: album.release_date,
            total_tracks: album.tracks.total,
            tracks,
        })
    }

    async fn get_track(&self, token: &str, id: &str) -> Result<Track, CatalogError> {
        let track_id = TrackId::from_id(id)?;
        self.authorize(token).await?;
        tracing::debug!(track_id = id, "API: track");
        Ok(track(self.client.track(track_id, None).await?))
    }

    async fn get_playlist(&self, token: &str, id: &str) -> Result<Playlist, CatalogError> {
        let playlist_id = PlaylistId::from_id(id)?;
        self.authorize(token).await?;
        tracing::debug!(playlist_id = id, "API: playlist");
        let playlist = self.client.playlist(playlist_id, None, None).await?;

        let tracks = playlist
            .tracks
            .items
            .into_iter()
            .filter_map(|item| match item.track {
                Some(PlayableItem::Track(t)) => Some(track(t)),
                _ => None,
            })
            .collect();

        Ok(Playlist {
            id: playlist.id.id().to_string(),
            name: playlist.name,
            description: playlist.description.filter(|d| !d.trim().is_empty()),
            owner: playlist
                .owner
                .display_name
                .unwrap_or_else(|| playlist.owner.id.id().to_string()),
            images: images(playlist.images),
            followers: Followers { total: playlist.followers.total },
            total_tracks: playlist.tracks.total,
            tracks,
        })
    }
}

#[async_trait]
impl LibraryApi for SpotifyClient {
    async fn user_playlists(&self, token: &str) -> Result<Vec<PlaylistSummary>, CatalogError> {
        self.authorize(token).await?;
        tracing::debug!("API: current_user_playlists");
        let playlists: Vec<_> = self.client.current_user_playlists().try_collect().await?;

        Ok(playlists
            .into_iter()
            .map(|playlist| PlaylistSummary {
                id: playlist.id.id().to_string(),
                name: playlist.name,
                owner: playlist
                    .owner
                    .display_name
                    .unwrap_or_else(|| playlist.owner.id.id().to_string()),
                total_tracks: playlist.tracks.total,
            })
            .collect())
    }

    async fn search(&self, token: &str, query: &str, limit: u32) -> Result<SearchResults, CatalogError> {
        self.authorize(token).await?;
        tracing::debug!(query, limit, "API: search");
        let market: Option<Market> = None;

        let (track_result, album_result, artist_result, playlist_result) = futures::join!(
            self.client.search(query, SearchType::Track, market, None, Some(limit), None),
            self.client.search(query, SearchType::Album, market, None, Some(limit), None),
            self.client.search(query, SearchType::Artist, market, None, Some(limit), None),
            self.client.search(query, SearchType::Playlist, market, None, Some(limit), None)
        );

        // Partial results are still useful; only fail when every category did.
        if let (Err(e), Err(_), Err(_), Err(_)) = (&track_result, &album_result, &artist_result, &playlist_result) {
            return Err(CatalogError::Request(e.to_string()));
        }

        let mut results = SearchResults::default();

        if let Ok(SearchResult::Tracks(page)) = track_result {
            results.tracks = page
                .items
                .into_iter()
                .map(|t| SearchHit {
                    id: t.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default(),
                    subtitle: first_artist(&t.artists),
                    name: t.name,
                })
                .collect();
        }

        if let Ok(SearchResult::Albums(page)) = album_result {
            results.albums = page
                .items
                .into_iter()
                .map(|album| SearchHit {
                    id: album.id.as_ref().map(|id| id.id().to_string()).unwrap_or_default(),
                    subtitle: first_artist(&album.artists),
                    name: album.name,
                })
                .collect();
        }

        if let Ok(SearchResult::Artists(page)) = artist_result {
            results.artists = page
                .items
                .into_iter()
                .map(|artist| SearchHit {
                    id: artist.id.id().to_string(),
                    subtitle: artist.genres.iter().take(2).cloned().collect::<Vec<_>>().join(", "),
                    name: artist.name,
                })
                .collect();
        }

        if let Ok(SearchResult::Playlists(page)) = playlist_result {
            results.playlists = page
                .items
                .into_iter()
                .map(|playlist| SearchHit {
                    id: playlist.id.id().to_string(),
                    subtitle: playlist
                        .owner
                        .display_name
                        .unwrap_or_else(|| playlist.owner.id.id().to_string()),
                    name: playlist.name,
                })
                .collect();
        }

        results.determine_best_match(query);
        Ok(results)
    }
}

#[async_trait]
impl PlaybackController for SpotifyClient {
    async fn now_playing(&self, token: &str) -> Result<Option<NowPlaying>> {
        self.authorize(token).await?;
        tracing::trace!("Fetching current playback state");
        let Some(context) = self.client.current_playback(None, None::<Vec<_>>).await? else {
            return Ok(None);
        };

        let Some(PlayableItem::Track(full)) = context.item else {
            return Ok(None);
        };

        let progress_ms = context.progress.map_or(0, |p| p.num_milliseconds().max(0) as u32);
        let track = track(full);
        Ok(Some(NowPlaying {
            track_id: track.id,
            title: track.name,
            artist: super::catalog::artist_names(&track.artists),
            artwork_url: track.album.images.first().map(|i| i.url.clone()),
            album: track.album.name,
            is_playing: context.is_playing,
            progress_ms,
            duration_ms: track.duration_ms,
        }))
    }

    async fn play(&self, token: &str) -> Result<()> {
        self.authorize(token).await?;
        let device_id = self.get_device_id().await;
        tracing::debug!(device_id = ?device_id, "API: resume_playback");
        self.client.resume_playback(device_id.as_deref(), None).await?;
        Ok(())
    }

    async fn pause(&self, token: &str) -> Result<()> {
        self.authorize(token).await?;
        let device_id = self.get_device_id().await;
        tracing::debug!(device_id = ?device_id, "API: pause_playback");
        self.client.pause_playback(device_id.as_deref()).await?;
        Ok(())
    }
}
