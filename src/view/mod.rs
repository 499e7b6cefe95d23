//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Screen regions, tab bar and breadcrumb
//! - `detail`: Generic detail screen renderer
//! - `content`: Entity headers for the detail screens
//! - `screens`: Library, search and settings tab roots
//! - `player`: Full player screen
//! - `mini_player`: Mini-player bar and its hit testing
//! - `overlays`: Status notification and help popup

mod utils;
mod layout;
mod detail;
mod content;
mod screens;
mod player;
mod mini_player;
mod overlays;

use ratatui::{widgets::Block, Frame};

use crate::model::{AppModel, ScreenState};

pub use layout::AppLayout;
pub use mini_player::{hit_test, MiniPlayerHit};

pub struct AppView;

impl AppView {
    /// Draw one frame. `tick` advances the loading spinner.
    pub fn render(frame: &mut Frame, model: &AppModel, tick: usize) {
        let theme = &model.theme;
        let area = frame.area();
        frame.render_widget(Block::default().style(theme.base()), area);

        let layout = AppLayout::compute(area, model.player.is_some());

        layout::render_tab_bar(frame, layout.tabs, model, theme);

        let screen = model.navigator.current();
        match &screen.state {
            ScreenState::Library(library) => screens::render_library(frame, layout.content, library, theme, tick),
            ScreenState::Search(search) => screens::render_search(frame, layout.content, search, theme, tick),
            ScreenState::Settings(settings) => {
                screens::render_settings(frame, layout.content, settings, model.signed_in, theme)
            }
            ScreenState::Player => player::render_player(frame, layout.content, model.player.as_ref(), theme),
            ScreenState::Artist(detail) => detail::render_detail(frame, layout.content, detail, theme, tick),
            ScreenState::Album(detail) => detail::render_detail(frame, layout.content, detail, theme, tick),
            ScreenState::Track(detail) => detail::render_detail(frame, layout.content, detail, theme, tick),
            ScreenState::Playlist(detail) => detail::render_detail(frame, layout.content, detail, theme, tick),
        }

        if let (Some(mini_area), Some(now)) = (layout.mini_player, model.player.as_ref()) {
            mini_player::render_mini_player(frame, mini_area, now, theme);
        }

        if let Some(notice) = model.notice() {
            overlays::render_notice(frame, notice, theme);
        }

        if model.show_help {
            overlays::render_help_popup(frame, theme);
        }
    }
}
