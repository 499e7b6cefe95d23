//! Model module - Application state and data types
//!
//! - `types`: tabs, routes and validated entity ids
//! - `catalog`: catalog entities and the service traits that fetch them
//! - `content`: search results
//! - `load`: tri-state load status with request generations
//! - `detail`: the generic detail screen and per-entity resources
//! - `screen`: mounted screens and their local state
//! - `navigation`: tab + stack navigator
//! - `playback`: now-playing state and the playback controller seam
//! - `spotify_client`: rspotify-backed implementation of the service traits
//! - `app_model`: the shared application model

mod types;
mod catalog;
mod content;
mod load;
mod detail;
mod screen;
mod navigation;
mod playback;
mod spotify_client;
mod app_model;

pub use types::{EntityId, EntityKind, Route, RouteError, ScreenKey, Tab};

pub use catalog::{
    artist_names, Album, AlbumRef, AlbumTrack, Artist, ArtistRef, CatalogApi, CatalogError, Followers, Image,
    LibraryApi, Playlist, PlaylistSummary, TopTracks, Track,
};

pub use content::{SearchHit, SearchResultSection, SearchResults};

pub use load::{LoadState, Loader, Ticket};

pub use detail::{detail_loader, ArtistPage, DetailScreen, Resource, Target};

pub use screen::{
    library_loader, search_loader, LibraryScreen, Screen, ScreenState, SearchScreen, SettingsItem, SettingsScreen,
};

pub use navigation::Navigator;

pub use playback::{NowPlaying, PlaybackController};

pub use spotify_client::SpotifyClient;

pub use app_model::{AppModel, Notice};
