use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::config::AppConfig;

pub const SCOPES: &str =
    "user-read-playback-state user-modify-playback-state user-read-currently-playing playlist-read-private playlist-read-collaborative user-library-read user-follow-read";

const RESPONSE: &str = r#"
<!doctype html>
<html>
<head><title>Success</title></head>
<body><h1>Authentication Successful!</h1><script>window.close();</script></body>
</html>
"#;

/// Access tokens are refreshed once fewer than this many seconds remain.
const REFRESH_MARGIN_SECS: i64 = 300;
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Capability handed to screens that need an access token.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// A usable access token, or `None` when signed out or refresh failed.
    async fn get_token(&self) -> Option<String>;
    /// Forget the session. Returns whether sign-out completed cleanly.
    async fn logout(&self) -> bool;
    fn is_authenticated(&self) -> bool;
    fn is_loading(&self) -> bool;
}

#[derive(Clone, Debug)]
struct SessionToken {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl SessionToken {
    fn new(access_token: String, refresh_token: String, expires_at: DateTime<Utc>) -> Self {
        Self { access_token, refresh_token, expires_at }
    }

    /// Keep the expiry librespot-oauth reported rather than assuming a lifetime.
    fn from_oauth(token: librespot_oauth::OAuthToken) -> Self {
        let remaining = token.expires_at.saturating_duration_since(Instant::now());
        let remaining = chrono::Duration::from_std(remaining)
            .unwrap_or_else(|_| chrono::Duration::seconds(TOKEN_LIFETIME_SECS));
        Self::new(token.access_token, token.refresh_token, Utc::now() + remaining)
    }

    fn needs_refresh(&self) -> bool {
        (self.expires_at - Utc::now()).num_seconds() < REFRESH_MARGIN_SECS
    }
}

/// Exchanges a refresh token for a new session token.
#[async_trait]
trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<SessionToken>;
}

#[derive(Clone)]
struct OAuthApp {
    client_id: String,
    redirect_uri: String,
}

impl OAuthApp {
    fn client(&self, interactive: bool) -> Result<librespot_oauth::OAuthClient> {
        let mut builder = librespot_oauth::OAuthClientBuilder::new(
            &self.client_id,
            &self.redirect_uri,
            SCOPES.split_whitespace().collect(),
        );
        if interactive {
            builder = builder.open_in_browser().with_custom_message(RESPONSE);
        }
        Ok(builder.build()?)
    }
}

#[async_trait]
impl TokenRefresher for OAuthApp {
    async fn refresh(&self, refresh_token: &str) -> Result<SessionToken> {
        let token = self.client(false)?.refresh_token_async(refresh_token).await?;
        tracing::debug!("Token refreshed successfully");
        Ok(SessionToken::from_oauth(token))
    }
}

/// OAuth session backed by a cached refresh token on disk.
pub struct OAuthSession {
    app: OAuthApp,
    refresher: Box<dyn TokenRefresher>,
    refresh_token_file: PathBuf,
    token: RwLock<Option<SessionToken>>,
    /// Held for the whole refresh so only one exchange runs per expiry.
    refreshing: Mutex<()>,
    authenticated: AtomicBool,
    loading: AtomicBool,
}

impl OAuthSession {
    fn empty(config: &AppConfig) -> Self {
        let app = OAuthApp { client_id: config.client_id.clone(), redirect_uri: config.redirect_uri.clone() };
        Self::with_refresher(config, app.clone(), Box::new(app))
    }

    fn with_refresher(config: &AppConfig, app: OAuthApp, refresher: Box<dyn TokenRefresher>) -> Self {
        Self {
            app,
            refresher,
            refresh_token_file: config.refresh_token_file(),
            token: RwLock::new(None),
            refreshing: Mutex::new(()),
            authenticated: AtomicBool::new(false),
            loading: AtomicBool::new(false),
        }
    }

    /// Sign in using the cached refresh token when possible, otherwise through
    /// the browser.
    pub async fn sign_in(config: &AppConfig) -> Result<Self> {
        let session = Self::empty(config);
        if !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)?;
        }

        let stored_refresh_token = fs::read_to_string(&session.refresh_token_file).ok();

        let token = match stored_refresh_token {
            Some(refresh_token) => {
                tracing::info!("Found cached refresh token");
                match session.refresher.refresh(refresh_token.trim()).await {
                    Ok(token) => token,
                    Err(e) => {
                        tracing::warn!(error = %e, "Cached refresh token failed, re-authenticating");
                        session.browser_auth().await?
                    }
                }
            }
            None => {
                tracing::info!("No cached credentials found, starting browser authentication");
                session.browser_auth().await?
            }
        };

        session.store(token).await;
        Ok(session)
    }

    async fn browser_auth(&self) -> Result<SessionToken> {
        tracing::info!("Starting browser-based OAuth flow");
        let token = self.app.client(true)?.get_access_token_async().await?;
        tracing::info!("Browser authentication completed successfully");
        Ok(SessionToken::from_oauth(token))
    }

    async fn store(&self, token: SessionToken) {
        if let Err(e) = fs::write(&self.refresh_token_file, &token.refresh_token) {
            tracing::warn!(error = %e, "Could not persist refresh token");
        }
        *self.token.write().await = Some(token);
        self.authenticated.store(true, Ordering::SeqCst);
    }

    /// Rspotify token carrying the current access token, for clients that
    /// keep their own copy.
    pub fn rspotify_token(access_token: &str) -> rspotify::Token {
        rspotify::Token {
            access_token: access_token.to_string(),
            expires_in: chrono::Duration::seconds(TOKEN_LIFETIME_SECS),
            expires_at: Some(Utc::now() + chrono::Duration::seconds(TOKEN_LIFETIME_SECS)),
            scopes: SCOPES
                .split_whitespace()
                .map(|s| s.to_string())
                .collect::<HashSet<String>>(),
            refresh_token: None,
        }
    }
}

#[async_trait]
impl AuthProvider for OAuthSession {
    async fn get_token(&self) -> Option<String> {
        let current = self.token.read().await.clone()?;
        if !current.needs_refresh() {
            return Some(current.access_token);
        }

        let _refreshing = self.refreshing.lock().await;
        // Another task may have refreshed while this one waited.
        let current = self.token.read().await.clone()?;
        if !current.needs_refresh() {
            return Some(current.access_token);
        }

        tracing::info!("Token expiring soon, refreshing...");
        self.loading.store(true, Ordering::SeqCst);
        let access_token = match self.refresher.refresh(&current.refresh_token).await {
            Ok(token) => {
                let access_token = token.access_token.clone();
                self.store(token).await;
                Some(access_token)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to refresh token");
                None
            }
        };
        self.loading.store(false, Ordering::SeqCst);
        access_token
    }

    async fn logout(&self) -> bool {
        let _refreshing = self.refreshing.lock().await;
        *self.token.write().await = None;
        self.authenticated.store(false, Ordering::SeqCst);

        match fs::remove_file(&self.refresh_token_file) {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                tracing::error!(error = %e, "Could not remove cached refresh token");
                false
            }
        }
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}
