//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::model::{ScreenState, Tab};

use super::AppController;

fn move_selection(state: &mut ScreenState, down: bool) {
    match state {
        ScreenState::Library(screen) if down => screen.select_next(),
        ScreenState::Library(screen) => screen.select_prev(),
        ScreenState::Search(screen) if down => screen.select_next(),
        ScreenState::Search(screen) => screen.select_prev(),
        ScreenState::Settings(screen) if down => screen.select_next(),
        ScreenState::Settings(screen) => screen.select_prev(),
        ScreenState::Artist(screen) if down => screen.select_next(),
        ScreenState::Artist(screen) => screen.select_prev(),
        ScreenState::Album(screen) if down => screen.select_next(),
        ScreenState::Album(screen) => screen.select_prev(),
        ScreenState::Track(screen) if down => screen.select_next(),
        ScreenState::Track(screen) => screen.select_prev(),
        ScreenState::Playlist(screen) if down => screen.select_next(),
        ScreenState::Playlist(screen) => screen.select_prev(),
        ScreenState::Player => {}
    }
}

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true);
            return Ok(());
        }

        // Handle notice first (blocks all other interactions)
        if model.notice().is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_notice();
            }
            return Ok(());
        }

        // Handle help popup
        if model.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.show_help = false;
            }
            return Ok(());
        }

        // Search input captures typing while editing
        if let ScreenState::Search(search) = &mut model.navigator.current_mut().state {
            if search.editing {
                match key.code {
                    KeyCode::Enter => {
                        drop(model);
                        self.submit_search().await;
                        return Ok(());
                    }
                    KeyCode::Esc => {
                        search.editing = false;
                        return Ok(());
                    }
                    KeyCode::Backspace => {
                        search.query.pop();
                        return Ok(());
                    }
                    KeyCode::Char(c) => {
                        search.query.push(c);
                        return Ok(());
                    }
                    KeyCode::Tab | KeyCode::BackTab => {}
                    _ => return Ok(()),
                }
            }
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                tracing::info!("Quit requested");
                model.set_should_quit(true);
            }
            KeyCode::Tab => {
                let tab = model.navigator.active_tab().next();
                model.navigator.switch_tab(tab);
            }
            KeyCode::BackTab => {
                let tab = model.navigator.active_tab().prev();
                model.navigator.switch_tab(tab);
            }
            KeyCode::Char('1') => model.navigator.switch_tab(Tab::Library),
            KeyCode::Char('2') => model.navigator.switch_tab(Tab::Search),
            KeyCode::Char('3') => model.navigator.switch_tab(Tab::Settings),
            KeyCode::Char('h') | KeyCode::Char('H') => model.show_help = true,
            KeyCode::Up => move_selection(&mut model.navigator.current_mut().state, false),
            KeyCode::Down => move_selection(&mut model.navigator.current_mut().state, true),
            KeyCode::Char('/') => {
                model.navigator.switch_tab(Tab::Search);
                if let ScreenState::Search(search) = &mut model.navigator.current_mut().state {
                    search.editing = true;
                }
            }
            KeyCode::Backspace | KeyCode::Esc => {
                model.navigator.back();
            }
            KeyCode::Enter => {
                drop(model);
                self.activate_selection().await;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.retry_current().await;
            }
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_playback().await;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if model.player.is_some() {
                    drop(model);
                    self.open_player().await;
                }
            }
            _ => {}
        }

        Ok(())
    }

    pub async fn handle_mouse_event(&self, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.model.lock().await.notice().is_some() {
                    return Ok(());
                }
                self.handle_mini_player_click(mouse.column, mouse.row).await;
            }
            MouseEventKind::ScrollDown => {
                let mut model = self.model.lock().await;
                move_selection(&mut model.navigator.current_mut().state, true);
            }
            MouseEventKind::ScrollUp => {
                let mut model = self.model.lock().await;
                move_selection(&mut model.navigator.current_mut().state, false);
            }
            _ => {}
        }
        Ok(())
    }
}
