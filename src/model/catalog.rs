//! Catalog entities and the service traits that fetch them.

use async_trait::async_trait;
use thiserror::Error;

use super::content::SearchResults;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("{0}")]
    Request(String),
}

impl CatalogError {
    /// Display text for the error view, or `fallback` when there is none.
    pub fn display_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

impl From<rspotify::ClientError> for CatalogError {
    fn from(err: rspotify::ClientError) -> Self {
        CatalogError::Request(err.to_string())
    }
}

impl From<rspotify::model::IdError> for CatalogError {
    fn from(err: rspotify::model::IdError) -> Self {
        CatalogError::InvalidId(err.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Followers {
    pub total: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
    pub images: Vec<Image>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub images: Vec<Image>,
    pub followers: Followers,
    pub genres: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
    pub duration_ms: u32,
    pub track_number: u32,
    pub explicit: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopTracks {
    pub tracks: Vec<Track>,
}

/// A track as listed inside an album (no album back-reference).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlbumTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub duration_ms: u32,
    pub track_number: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub images: Vec<Image>,
    pub release_date: String,
    pub total_tracks: u32,
    pub tracks: Vec<AlbumTrack>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: String,
    pub images: Vec<Image>,
    pub followers: Followers,
    pub total_tracks: u32,
    pub tracks: Vec<Track>,
}

/// Sidebar entry for one of the user's playlists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub total_tracks: u32,
}

/// Comma separated artist names.
pub fn artist_names(artists: &[ArtistRef]) -> String {
    artists.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ")
}

/// Remote catalog, keyed by access token and entity id.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_artist(&self, token: &str, id: &str) -> Result<Artist, CatalogError>;
    async fn get_artist_top_tracks(&self, token: &str, id: &str) -> Result<TopTracks, CatalogError>;
    async fn get_album(&self, token: &str, id: &str) -> Result<Album, CatalogError>;
    async fn get_track(&self, token: &str, id: &str) -> Result<Track, CatalogError>;
    async fn get_playlist(&self, token: &str, id: &str) -> Result<Playlist, CatalogError>;
}

/// User library and search, used by the tab roots.
#[async_trait]
pub trait LibraryApi: Send + Sync {
    async fn user_playlists(&self, token: &str) -> Result<Vec<PlaylistSummary>, CatalogError>;
    async fn search(&self, token: &str, query: &str, limit: u32) -> Result<SearchResults, CatalogError>;
}
