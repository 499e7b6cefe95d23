//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and the injected services, and runs the
//! background fetches that feed each screen.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `navigation`: Routing, screen loads and retries
//! - `playback`: Mini-player and full player control
//! - `settings`: Theme toggle and sign-out

mod input;
mod navigation;
mod playback;
mod settings;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::auth::AuthProvider;
use crate::config::AppConfig;
use crate::model::{AppModel, CatalogApi, LibraryApi, PlaybackController};

/// Everything the controller talks to outside the model.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthProvider>,
    pub catalog: Arc<dyn CatalogApi>,
    pub library: Arc<dyn LibraryApi>,
    pub playback: Arc<dyn PlaybackController>,
}

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) services: Services,
    pub(crate) config: Arc<Mutex<AppConfig>>,
    search_limit: u32,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, services: Services, config: AppConfig) -> Self {
        Self {
            model,
            services,
            search_limit: config.search_limit,
            config: Arc::new(Mutex::new(config)),
        }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        let error_str = error.to_string();

        // Handle common Spotify API errors
        if error_str.contains("404") {
            "No active device found. Start playing on Spotify and try again.".to_string()
        } else if error_str.contains("403") {
            "Action forbidden. Check your Spotify Premium status.".to_string()
        } else if error_str.contains("401") {
            "Authentication expired. Please sign in again.".to_string()
        } else if error_str.contains("429") {
            "Rate limited. Please wait a moment.".to_string()
        } else {
            format!("Error: {}", error_str)
        }
    }
}
