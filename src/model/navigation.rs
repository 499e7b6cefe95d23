//! Tab + stack navigation.
//!
//! Every tab owns a root screen that is never popped and a stack of screens
//! pushed on top of it. Screens on inactive tabs stay mounted.

use super::screen::{LibraryScreen, Screen, ScreenState, SearchScreen, SettingsScreen};
use super::types::{Route, ScreenKey, Tab};

#[derive(Debug)]
struct TabStack {
    root: Screen,
    pushed: Vec<Screen>,
}

impl TabStack {
    fn top(&self) -> &Screen {
        self.pushed.last().unwrap_or(&self.root)
    }

    fn top_mut(&mut self) -> &mut Screen {
        match self.pushed.last_mut() {
            Some(screen) => screen,
            None => &mut self.root,
        }
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Screen> {
        std::iter::once(&mut self.root).chain(self.pushed.iter_mut())
    }
}

#[derive(Debug)]
pub struct Navigator {
    active: Tab,
    stacks: Vec<TabStack>,
    next_key: u64,
}

impl Navigator {
    pub fn new() -> Self {
        let mut next_key = 0;
        let stacks = Tab::ALL
            .iter()
            .map(|tab| {
                let (route, state) = match tab {
                    Tab::Library => (Route::Library, ScreenState::Library(LibraryScreen::default())),
                    Tab::Search => (Route::Search, ScreenState::Search(SearchScreen::default())),
                    Tab::Settings => (Route::Settings, ScreenState::Settings(SettingsScreen::default())),
                };
                next_key += 1;
                TabStack { root: Screen { key: ScreenKey(next_key), route, state }, pushed: Vec::new() }
            })
            .collect();

        Self { active: Tab::Library, stacks, next_key }
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        tracing::debug!(tab = tab.title(), "Switching tab");
        self.active = tab;
    }

    pub fn current(&self) -> &Screen {
        self.stacks[self.active.index()].top()
    }

    pub fn current_mut(&mut self) -> &mut Screen {
        self.stacks[self.active.index()].top_mut()
    }

    pub fn root_key(&self, tab: Tab) -> ScreenKey {
        self.stacks[tab.index()].root.key
    }

    /// Depth of the active stack, root included.
    pub fn depth(&self) -> usize {
        self.stacks[self.active.index()].pushed.len() + 1
    }

    /// Routes of the active stack from root to top.
    pub fn breadcrumb(&self) -> Vec<&Route> {
        let stack = &self.stacks[self.active.index()];
        std::iter::once(&stack.root.route)
            .chain(stack.pushed.iter().map(|s| &s.route))
            .collect()
    }

    /// Mount a new screen on top of the active tab.
    pub fn push(&mut self, route: Route, state: ScreenState) -> ScreenKey {
        self.next_key += 1;
        let key = ScreenKey(self.next_key);
        tracing::debug!(route = route.name(), key = key.0, "Mounting screen");
        self.stacks[self.active.index()].pushed.push(Screen { key, route, state });
        key
    }

    /// Unmount the top screen of the active tab. A no-op at the root.
    pub fn back(&mut self) -> Option<Screen> {
        let popped = self.stacks[self.active.index()].pushed.pop();
        if let Some(screen) = &popped {
            tracing::debug!(route = screen.route.name(), key = screen.key.0, "Unmounting screen");
        }
        popped
    }

    /// Find a mounted screen on any tab.
    pub fn screen_mut(&mut self, key: ScreenKey) -> Option<&mut Screen> {
        self.stacks
            .iter_mut()
            .flat_map(|stack| stack.iter_mut())
            .find(|screen| screen.key == key)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::EntityKind;

    fn track_route(id: &str) -> Route {
        Route::detail(EntityKind::Track, id).unwrap()
    }

    #[test]
    fn starts_on_library_root() {
        let nav = Navigator::new();
        assert_eq!(nav.active_tab(), Tab::Library);
        assert_eq!(nav.current().route, Route::Library);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn push_and_back() {
        let mut nav = Navigator::new();
        let key = nav.push(track_route("T1"), ScreenState::Player);
        assert_eq!(nav.current().key, key);
        assert_eq!(nav.depth(), 2);

        let popped = nav.back().unwrap();
        assert_eq!(popped.key, key);
        assert_eq!(nav.current().route, Route::Library);
        assert!(nav.back().is_none(), "root stays mounted");
    }

    #[test]
    fn unmounted_screen_cannot_be_found() {
        let mut nav = Navigator::new();
        let key = nav.push(track_route("T1"), ScreenState::Player);
        assert!(nav.screen_mut(key).is_some());
        nav.back();
        assert!(nav.screen_mut(key).is_none());
    }

    #[test]
    fn tabs_keep_their_own_stacks() {
        let mut nav = Navigator::new();
        let library_key = nav.push(track_route("T1"), ScreenState::Player);

        nav.switch_tab(Tab::Search);
        assert_eq!(nav.current().route, Route::Search);
        nav.push(track_route("T2"), ScreenState::Player);
        assert_eq!(nav.breadcrumb().len(), 2);

        nav.switch_tab(Tab::Library);
        assert_eq!(nav.current().key, library_key);
        assert!(nav.screen_mut(nav.root_key(Tab::Settings)).is_some());
    }

    #[test]
    fn keys_are_unique() {
        let mut nav = Navigator::new();
        let a = nav.push(track_route("T1"), ScreenState::Player);
        nav.back();
        let b = nav.push(track_route("T1"), ScreenState::Player);
        assert_ne!(a, b);
        assert_ne!(nav.root_key(Tab::Library), nav.root_key(Tab::Search));
    }
}
