//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use htabs::core::host::FlatList;
use htabs::core::manager::TabManager;
use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::ui::tab_strip::TabStripState;

/// Top-level application state.
pub struct AppState {
    /// The tab forest and the flat strip it is mirrored onto.
    pub tabs: TabManager<FlatList>,
    /// Widget-level state (scroll offset) of the stacked strip.
    pub strip_state: TabStripState,
    /// User-configurable keybindings and layout.
    pub config: AppConfig,
    /// Last known terminal size, used for mouse hit-testing.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Shown in the bottom bar instead of the key hints.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let host = FlatList::new(config.orientation);
        Self {
            tabs: TabManager::new(host, config.indent()),
            strip_state: TabStripState::default(),
            config,
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
        }
    }

    /// Title of the selected tab, for status messages.
    pub fn active_title(&self) -> Option<String> {
        let id = self.tabs.active_tab()?;
        self.tabs.payload(id).map(|p| p.title.clone())
    }
}
