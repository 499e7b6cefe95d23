//! Playback state reflected by the mini-player and the full player

use anyhow::Result;
use async_trait::async_trait;

use super::types::{EntityKind, Route};

/// The active track as reported by the playback controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NowPlaying {
    pub track_id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork_url: Option<String>,
    pub is_playing: bool,
    pub progress_ms: u32,
    pub duration_ms: u32,
}

impl NowPlaying {
    pub fn track_route(&self) -> Option<Route> {
        Route::detail(EntityKind::Track, &self.track_id).ok()
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.duration_ms > 0 {
            (self.progress_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Externally owned player. The UI only reads its state and asks it to
/// play or pause.
#[async_trait]
pub trait PlaybackController: Send + Sync {
    async fn now_playing(&self, token: &str) -> Result<Option<NowPlaying>>;
    async fn play(&self, token: &str) -> Result<()>;
    async fn pause(&self, token: &str) -> Result<()>;
}
