mod auth;
mod config;
mod controller;
mod logging;
mod model;
mod theme;
mod view;

#[cfg(test)]
mod testing;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::Mutex;

use auth::{AuthProvider, OAuthSession};
use config::AppConfig;
use controller::{AppController, Services};
use model::{AppModel, SpotifyClient};
use theme::Theme;
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== spotify-browse starting ===");

    let session = Arc::new(OAuthSession::sign_in(&config).await?);
    let spotify = Arc::new(SpotifyClient::new());
    let services = Services {
        auth: session.clone(),
        catalog: spotify.clone(),
        library: spotify.clone(),
        playback: spotify,
    };

    let app_model = AppModel::new(Theme::from_dark_mode(config.dark_mode), session.is_authenticated());
    let model = Arc::new(Mutex::new(app_model));
    let poll_interval = config.playback_poll_interval();
    let controller = AppController::new(model.clone(), services, config);

    controller.refresh_library().await;
    controller.start_playback_poller(poll_interval);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("spotify-browse shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    let mut tick: usize = 0;

    loop {
        let should_quit = {
            let mut model_guard = model.lock().await;
            model_guard.auto_clear_old_notice();

            let frame_area = terminal.get_frame().area();
            model_guard.viewport = frame_area;
            terminal.draw(|f| AppView::render(f, &model_guard, tick))?;
            model_guard.should_quit()
        };

        if should_quit {
            break;
        }

        // Short poll keeps the spinner moving and responses showing promptly
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    let _ = controller.handle_key_event(key).await;
                }
                Event::Mouse(mouse) => {
                    let _ = controller.handle_mouse_event(mouse).await;
                }
                _ => {}
            }
        }

        tick = tick.wrapping_add(1);
    }

    Ok(())
}
