//! Main application model

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::theme::Theme;

use super::navigation::Navigator;
use super::playback::NowPlaying;

const NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

/// A transient message shown over the content (playback or sign-out results).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
    pub created_at: Instant,
}

/// Everything the view reads. Shared behind one mutex between the render
/// loop and background fetches.
#[derive(Debug)]
pub struct AppModel {
    pub navigator: Navigator,
    pub theme: Theme,
    pub player: Option<NowPlaying>,
    pub signed_in: bool,
    /// Terminal area of the last drawn frame, used for mouse hit testing.
    pub viewport: Rect,
    pub show_help: bool,
    notice: Option<Notice>,
    should_quit: bool,
}

impl AppModel {
    pub fn new(theme: Theme, signed_in: bool) -> Self {
        Self {
            navigator: Navigator::new(),
            theme,
            player: None,
            signed_in,
            viewport: Rect::default(),
            show_help: false,
            notice: None,
            should_quit: false,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(message = %message, "Showing error notice");
        self.notice = Some(Notice { message, is_error: true, created_at: Instant::now() });
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice { message: message.into(), is_error: false, created_at: Instant::now() });
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn auto_clear_old_notice(&mut self) {
        if self.notice.as_ref().is_some_and(|n| n.created_at.elapsed() >= NOTICE_TIMEOUT) {
            self.notice = None;
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, value: bool) {
        self.should_quit = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_replace_each_other() {
        let mut model = AppModel::new(Theme::dark(), true);
        model.set_error("boom");
        model.set_info("Signed out");
        let notice = model.notice().unwrap();
        assert_eq!(notice.message, "Signed out");
        assert!(!notice.is_error);
        model.clear_notice();
        assert!(model.notice().is_none());
    }

    #[test]
    fn fresh_notice_survives_auto_clear() {
        let mut model = AppModel::new(Theme::dark(), true);
        model.set_error("boom");
        model.auto_clear_old_notice();
        assert!(model.notice().is_some());
    }
}
