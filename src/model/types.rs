//! Core type definitions: tabs, routes and validated entity ids

use std::fmt;

use thiserror::Error;

/// Top-level tabs. Each one owns its own screen stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Library,
    Search,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Library, Tab::Search, Tab::Settings];

    pub fn index(self) -> usize {
        match self {
            Tab::Library => 0,
            Tab::Search => 1,
            Tab::Settings => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Library => "Library",
            Tab::Search => "Search",
            Tab::Settings => "Settings",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Library => Tab::Search,
            Tab::Search => Tab::Settings,
            Tab::Settings => Tab::Library,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Library => Tab::Settings,
            Tab::Search => Tab::Library,
            Tab::Settings => Tab::Search,
        }
    }
}

/// The four catalog entity kinds a detail screen can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Artist,
    Album,
    Track,
    Playlist,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Album => "album",
            EntityKind::Track => "track",
            EntityKind::Playlist => "playlist",
        }
    }

    /// Shown when a failed load carries no message of its own.
    pub fn fallback_error(self) -> &'static str {
        match self {
            EntityKind::Artist => "Failed to load artist",
            EntityKind::Album => "Failed to load album",
            EntityKind::Track => "Failed to load track",
            EntityKind::Playlist => "Failed to load playlist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("missing {0} id")]
    EmptyId(&'static str),
    #[error("invalid {kind} id: {raw:?}")]
    InvalidId { kind: &'static str, raw: String },
    #[error("expected a {expected} uri, got {raw:?}")]
    WrongKind { expected: &'static str, raw: String },
}

/// A catalog id that has passed validation at the navigation boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    /// Accepts a bare base-62 id or a `spotify:<kind>:<id>` uri of the
    /// matching kind.
    pub fn parse(kind: EntityKind, raw: &str) -> Result<Self, RouteError> {
        let trimmed = raw.trim();
        let id = match trimmed.strip_prefix("spotify:") {
            Some(rest) => {
                let (uri_kind, id) = rest.split_once(':').ok_or_else(|| RouteError::InvalidId {
                    kind: kind.as_str(),
                    raw: raw.to_string(),
                })?;
                if uri_kind != kind.as_str() {
                    return Err(RouteError::WrongKind { expected: kind.as_str(), raw: raw.to_string() });
                }
                id
            }
            None => trimmed,
        };

        if id.is_empty() {
            return Err(RouteError::EmptyId(kind.as_str()));
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RouteError::InvalidId { kind: kind.as_str(), raw: raw.to_string() });
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every place the navigator can show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Library,
    Search,
    Settings,
    Player,
    ArtistDetail { id: EntityId },
    AlbumDetail { id: EntityId },
    TrackDetail { id: EntityId },
    PlaylistDetail { id: EntityId },
}

impl Route {
    /// Build a detail route from an unvalidated id.
    pub fn detail(kind: EntityKind, raw_id: &str) -> Result<Self, RouteError> {
        let id = EntityId::parse(kind, raw_id)?;
        Ok(match kind {
            EntityKind::Artist => Route::ArtistDetail { id },
            EntityKind::Album => Route::AlbumDetail { id },
            EntityKind::Track => Route::TrackDetail { id },
            EntityKind::Playlist => Route::PlaylistDetail { id },
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Library => "Library",
            Route::Search => "Search",
            Route::Settings => "Settings",
            Route::Player => "Player",
            Route::ArtistDetail { .. } => "ArtistDetail",
            Route::AlbumDetail { .. } => "AlbumDetail",
            Route::TrackDetail { .. } => "TrackDetail",
            Route::PlaylistDetail { .. } => "PlaylistDetail",
        }
    }

    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            Route::ArtistDetail { .. } => Some(EntityKind::Artist),
            Route::AlbumDetail { .. } => Some(EntityKind::Album),
            Route::TrackDetail { .. } => Some(EntityKind::Track),
            Route::PlaylistDetail { .. } => Some(EntityKind::Playlist),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&EntityId> {
        match self {
            Route::ArtistDetail { id }
            | Route::AlbumDetail { id }
            | Route::TrackDetail { id }
            | Route::PlaylistDetail { id } => Some(id),
            _ => None,
        }
    }
}

/// Identity of one mounted screen instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenKey(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_id() {
        let id = EntityId::parse(EntityKind::Artist, "A1").unwrap();
        assert_eq!(id.as_str(), "A1");
    }

    #[test]
    fn parses_matching_uri() {
        let id = EntityId::parse(EntityKind::Album, "spotify:album:4aawyAB9vmqN3uQ7FjRGTy").unwrap();
        assert_eq!(id.as_str(), "4aawyAB9vmqN3uQ7FjRGTy");
    }

    #[test]
    fn rejects_uri_of_other_kind() {
        let err = EntityId::parse(EntityKind::Album, "spotify:track:abc").unwrap_err();
        assert!(matches!(err, RouteError::WrongKind { expected: "album", .. }));
    }

    #[test]
    fn rejects_empty_and_malformed_ids() {
        assert_eq!(EntityId::parse(EntityKind::Track, "  "), Err(RouteError::EmptyId("track")));
        assert!(matches!(
            EntityId::parse(EntityKind::Track, "ab cd"),
            Err(RouteError::InvalidId { .. })
        ));
        assert!(matches!(
            EntityId::parse(EntityKind::Playlist, "spotify:playlist"),
            Err(RouteError::InvalidId { .. })
        ));
    }

    #[test]
    fn detail_route_carries_kind_and_name() {
        let route = Route::detail(EntityKind::Playlist, "P9").unwrap();
        assert_eq!(route.name(), "PlaylistDetail");
        assert_eq!(route.entity_kind(), Some(EntityKind::Playlist));
        assert_eq!(route.id().map(EntityId::as_str), Some("P9"));
        assert_eq!(Route::Settings.id(), None);
    }

    #[test]
    fn tabs_cycle_both_ways() {
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
        assert_eq!(Tab::Settings.next(), Tab::Library);
    }
}
