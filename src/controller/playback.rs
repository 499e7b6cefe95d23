//! Playback control methods (mini-player, full player, state polling)

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::model::{CatalogError, Route, ScreenState};
use crate::view::{hit_test, AppLayout, MiniPlayerHit};

use super::AppController;

impl AppController {
    pub async fn toggle_playback(&self) {
        let (is_playing, track_id) = {
            let model = self.model.lock().await;
            match &model.player {
                Some(now) => (now.is_playing, now.track_id.clone()),
                None => return,
            }
        };

        let Some(token) = self.services.auth.get_token().await else {
            self.model.lock().await.set_error(CatalogError::AuthenticationRequired.to_string());
            return;
        };

        tracing::debug!(is_playing, "Toggling playback");
        let result = if is_playing {
            self.services.playback.pause(&token).await
        } else {
            self.services.playback.play(&token).await
        };

        let mut model = self.model.lock().await;
        match result {
            Ok(()) => {
                // The poller may have replaced the player meanwhile; only the
                // track the command was sent for takes the new state.
                if let Some(now) = model.player.as_mut().filter(|now| now.track_id == track_id) {
                    now.is_playing = !is_playing;
                }
                tracing::info!(action = if is_playing { "paused" } else { "resumed" }, "Playback toggled");
            }
            Err(e) => {
                tracing::error!(error = %e, "Toggle playback failed");
                model.set_error(Self::format_error(&e));
            }
        }
    }

    /// Push the full player unless it is already on top.
    pub async fn open_player(&self) {
        let mut model = self.model.lock().await;
        if matches!(model.navigator.current().state, ScreenState::Player) {
            return;
        }
        model.navigator.push(Route::Player, ScreenState::Player);
    }

    /// Route a left click through the mini-player. Returns whether it hit.
    pub async fn handle_mini_player_click(&self, column: u16, row: u16) -> bool {
        let hit = {
            let model = self.model.lock().await;
            let layout = AppLayout::compute(model.viewport, model.player.is_some());
            layout.mini_player.and_then(|area| hit_test(area, column, row))
        };

        match hit {
            // The toggle sits inside the bar; it must never open the player.
            Some(MiniPlayerHit::TogglePlayback) => {
                self.toggle_playback().await;
                true
            }
            Some(MiniPlayerHit::OpenPlayer) => {
                self.open_player().await;
                true
            }
            None => false,
        }
    }

    pub async fn refresh_playback(&self) {
        let Some(token) = self.services.auth.get_token().await else {
            return;
        };
        match self.services.playback.now_playing(&token).await {
            Ok(now) => self.model.lock().await.player = now,
            Err(e) => tracing::warn!(error = %e, "Failed to refresh playback state"),
        }
    }

    /// Poll the playback state until the app quits.
    pub fn start_playback_poller(&self, period: Duration) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if controller.model.lock().await.should_quit() {
                    tracing::debug!("Playback poller stopping");
                    break;
                }
                controller.refresh_playback().await;
            }
        })
    }
}
