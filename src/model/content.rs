//! Search result data and best-match ordering

use super::types::{EntityKind, Route};

/// One search hit, already reduced to what a result row shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    /// Artist, owner or genres, depending on the section.
    pub subtitle: String,
}

/// Which section of search results a hit belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchResultSection {
    #[default]
    Tracks,
    Albums,
    Artists,
    Playlists,
}

impl SearchResultSection {
    pub fn title(self) -> &'static str {
        match self {
            Self::Tracks => "Songs",
            Self::Albums => "Albums",
            Self::Artists => "Artists",
            Self::Playlists => "Playlists",
        }
    }

    pub fn kind(self) -> EntityKind {
        match self {
            Self::Tracks => EntityKind::Track,
            Self::Albums => EntityKind::Album,
            Self::Artists => EntityKind::Artist,
            Self::Playlists => EntityKind::Playlist,
        }
    }
}

/// Combined search results
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub tracks: Vec<SearchHit>,
    pub albums: Vec<SearchHit>,
    pub artists: Vec<SearchHit>,
    pub playlists: Vec<SearchHit>,
    pub best_match: SearchResultSection,
}

/// Score a name against the query: exact, prefix, substring, or nothing.
fn match_score(name: &str, query: &str, weights: [u32; 3]) -> u32 {
    let name = name.to_lowercase();
    if name == query {
        weights[0]
    } else if name.starts_with(query) {
        weights[1]
    } else if name.contains(query) {
        weights[2]
    } else {
        0
    }
}

impl SearchResults {
    /// Pick the category whose top hit best matches the query.
    ///
    /// Artists win exact matches, then songs, albums and playlists. With no
    /// match at all the first non-empty category is used, songs first.
    pub fn determine_best_match(&mut self, query: &str) {
        let query = query.to_lowercase();
        let top = |hits: &[SearchHit], weights: [u32; 3]| {
            hits.first().map_or(0, |hit| match_score(&hit.name, &query, weights))
        };

        let artist_score = top(&self.artists, [100, 80, 60]);
        let track_score = self.tracks.first().map_or(0, |t| {
            match_score(&t.name, &query, [95, 75, 55]).max(match_score(&t.subtitle, &query, [95, 75, 55]))
        });
        let album_score = top(&self.albums, [85, 65, 45]);
        let playlist_score = top(&self.playlists, [80, 60, 40]);

        let max_score = artist_score.max(track_score).max(album_score).max(playlist_score);

        self.best_match = if max_score == 0 {
            if !self.tracks.is_empty() {
                SearchResultSection::Tracks
            } else if !self.artists.is_empty() {
                SearchResultSection::Artists
            } else if !self.albums.is_empty() {
                SearchResultSection::Albums
            } else {
                SearchResultSection::Playlists
            }
        } else if artist_score == max_score {
            SearchResultSection::Artists
        } else if track_score == max_score {
            SearchResultSection::Tracks
        } else if album_score == max_score {
            SearchResultSection::Albums
        } else {
            SearchResultSection::Playlists
        };
    }

    pub fn section(&self, section: SearchResultSection) -> &[SearchHit] {
        match section {
            SearchResultSection::Tracks => &self.tracks,
            SearchResultSection::Albums => &self.albums,
            SearchResultSection::Artists => &self.artists,
            SearchResultSection::Playlists => &self.playlists,
        }
    }

    /// Sections in display order: best match first, the rest in default order.
    pub fn ordered_sections(&self) -> Vec<SearchResultSection> {
        let mut sections = vec![self.best_match];
        sections.extend(
            [
                SearchResultSection::Tracks,
                SearchResultSection::Albums,
                SearchResultSection::Artists,
                SearchResultSection::Playlists,
            ]
            .into_iter()
            .filter(|s| *s != self.best_match),
        );
        sections
    }

    /// Every hit in display order, paired with the route it opens.
    pub fn rows(&self) -> Vec<(SearchResultSection, &SearchHit, Option<Route>)> {
        self.ordered_sections()
            .into_iter()
            .flat_map(|section| {
                self.section(section)
                    .iter()
                    .map(move |hit| (section, hit, Route::detail(section.kind(), &hit.id).ok()))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.albums.is_empty() && self.artists.is_empty() && self.playlists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, name: &str, subtitle: &str) -> SearchHit {
        SearchHit { id: id.into(), name: name.into(), subtitle: subtitle.into() }
    }

    #[test]
    fn exact_artist_match_wins() {
        let mut results = SearchResults {
            tracks: vec![hit("t1", "Yellow", "Coldplay")],
            artists: vec![hit("a1", "Coldplay", "")],
            ..Default::default()
        };
        results.determine_best_match("coldplay");
        assert_eq!(results.best_match, SearchResultSection::Artists);
    }

    #[test]
    fn track_prefix_beats_album_substring() {
        let mut results = SearchResults {
            tracks: vec![hit("t1", "Clocks Remastered", "Coldplay")],
            albums: vec![hit("al1", "The Clocks Collection", "Various")],
            ..Default::default()
        };
        results.determine_best_match("clocks");
        assert_eq!(results.best_match, SearchResultSection::Tracks);
    }

    #[test]
    fn no_match_prefers_first_non_empty_category() {
        let mut results = SearchResults {
            albums: vec![hit("al1", "Parachutes", "Coldplay")],
            artists: vec![hit("a1", "Somebody", "")],
            ..Default::default()
        };
        results.determine_best_match("zzz");
        assert_eq!(results.best_match, SearchResultSection::Artists);
    }

    #[test]
    fn rows_list_best_match_first_with_routes() {
        let mut results = SearchResults {
            tracks: vec![hit("t1", "Song", "X")],
            playlists: vec![hit("p1", "Mix", "me")],
            ..Default::default()
        };
        results.best_match = SearchResultSection::Playlists;

        let rows = results.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, SearchResultSection::Playlists);
        assert_eq!(rows[0].2, Some(Route::detail(EntityKind::Playlist, "p1").unwrap()));
        assert_eq!(rows[1].2, Some(Route::detail(EntityKind::Track, "t1").unwrap()));
    }
}
