//! Settings actions

use super::AppController;

impl AppController {
    /// Flip the theme and persist the choice.
    pub async fn toggle_dark_mode(&self) {
        let dark_mode = {
            let mut model = self.model.lock().await;
            model.theme = model.theme.toggled();
            model.theme.is_dark_mode
        };
        tracing::info!(dark_mode, "Theme toggled");

        let saved = {
            let mut config = self.config.lock().await;
            config.dark_mode = dark_mode;
            config.save()
        };
        if let Err(e) = saved {
            tracing::warn!(error = %e, "Could not save config");
            self.model.lock().await.set_error(Self::format_error(&e));
        }
    }

    pub async fn logout(&self) {
        if self.services.auth.is_loading() {
            self.model.lock().await.set_info("Still signing in, try again in a moment");
            return;
        }
        tracing::info!("Signing out");
        let signed_out = self.services.auth.logout().await;
        let signed_in = self.services.auth.is_authenticated();

        let mut model = self.model.lock().await;
        model.signed_in = signed_in;
        if signed_out {
            model.player = None;
            model.set_info("Signed out");
        } else {
            model.set_error("Sign-out failed. Please try again.");
        }
    }
}
