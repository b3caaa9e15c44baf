//! Window controller for Briar.
//!
//! Owns the tab registry, the active-tab index, chrome visibility and the
//! shared address/find input. Everything here runs on the UI thread.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::engine::{BarMode, EngineFactory, EngineView, FindOptions, ViewSettings, WindowChrome};
use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::navigation::normalize_input;
use crate::types::errors::TabError;
use crate::types::settings::BrowserConfig;
use crate::types::tab::{step_zoom, Tab, MIN_ZOOM, TAB_SLOTS};

/// Where keyboard focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    SearchBar,
}

/// The single top-level browser window.
pub struct BrowserWindow<F: EngineFactory, C: WindowChrome> {
    config: Arc<BrowserConfig>,
    view_settings: ViewSettings,
    factory: F,
    chrome: C,
    tabs: TabManager<F::View>,
    active: usize,
    chrome_visible: bool,
    focus: Focus,
    input: String,
    history: HistoryManager,
    downloads: Option<DownloadManager>,
}

impl<F: EngineFactory, C: WindowChrome> BrowserWindow<F, C> {
    /// Creates the window and eagerly populates slot 0.
    ///
    /// Slot 0 navigates straight to `initial` (normalized like address-bar
    /// input) or, without one, to the home page.
    pub fn new(
        config: Arc<BrowserConfig>,
        factory: F,
        chrome: C,
        initial: Option<&str>,
    ) -> Result<Self, TabError> {
        let history = HistoryManager::new(config.history_path(), config.history);
        let mut window = Self {
            view_settings: ViewSettings::from_config(&config),
            config,
            factory,
            chrome,
            tabs: TabManager::new(),
            active: 0,
            chrome_visible: false,
            focus: Focus::Page,
            input: String::new(),
            history,
            downloads: None,
        };

        let first_uri = match initial {
            Some(input) => normalize_input(input, &window.config.search_url),
            None => window.config.home_page.clone(),
        };
        window.populate(0, &first_uri)?;
        window.chrome.select_tab(0);
        let view = &window.active_tab()?.view;
        view.set_visible(true);
        view.focus();
        Ok(window)
    }

    /// Attaches the worker that receives engine download requests.
    pub fn with_downloads(mut self, downloads: DownloadManager) -> Self {
        self.downloads = Some(downloads);
        self
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn chrome(&self) -> &C {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut C {
        &mut self.chrome
    }

    pub fn tabs(&self) -> &TabManager<F::View> {
        &self.tabs
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn downloads(&self) -> Option<&DownloadManager> {
        self.downloads.as_ref()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_chrome_visible(&self) -> bool {
        self.chrome_visible
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Current contents of the address/find input.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn active_tab(&self) -> Result<&Tab<F::View>, TabError> {
        self.tabs.get_tab(self.active)
    }

    pub fn active_tab_mut(&mut self) -> Result<&mut Tab<F::View>, TabError> {
        self.tabs.get_tab_mut(self.active)
    }

    /// Creates the tab for `slot` if it does not exist yet, pointed at the home page.
    pub fn ensure_tab(&mut self, slot: usize) -> Result<(), TabError> {
        let home = self.config.home_page.clone();
        self.populate(slot, &home)
    }

    fn populate(&mut self, slot: usize, uri: &str) -> Result<(), TabError> {
        if slot >= TAB_SLOTS {
            return Err(TabError::InvalidIndex(slot));
        }
        if self.tabs.is_populated(slot) {
            return Ok(());
        }

        let view = self
            .factory
            .create_view(slot, &self.view_settings)
            .map_err(TabError::EngineUnavailable)?;
        self.chrome.add_tab(slot);
        view.load_uri(uri);
        self.tabs.insert_tab(slot, Tab::new(view, uri))?;
        info!(slot, %uri, "tab created");
        Ok(())
    }

    pub fn set_find_mode(&mut self, find_mode: bool) -> Result<(), TabError> {
        self.active_tab_mut()?.find_mode = find_mode;
        Ok(())
    }

    /// Shows or hides the address/find bar as a unit.
    ///
    /// Showing it focuses the input; hiding it returns focus to the page.
    pub fn toggle_chrome(&mut self) -> Result<(), TabError> {
        if self.chrome_visible {
            return self.hide_chrome();
        }

        let tab = self.tabs.get_tab(self.active)?;
        let mode = if tab.find_mode {
            BarMode::Find
        } else {
            BarMode::Search
        };
        tab.view.show_bar(mode, &self.input);
        self.chrome_visible = true;
        self.focus = Focus::SearchBar;
        Ok(())
    }

    pub fn hide_chrome(&mut self) -> Result<(), TabError> {
        let view = &self.tabs.get_tab(self.active)?.view;
        view.hide_bar();
        view.focus();
        self.chrome_visible = false;
        self.focus = Focus::Page;
        Ok(())
    }

    /// Sets the active tab's zoom; factors below [`MIN_ZOOM`] are raised to it.
    pub fn set_zoom(&mut self, factor: f64) -> Result<(), TabError> {
        let tab = self.active_tab_mut()?;
        tab.zoom = factor.max(MIN_ZOOM);
        tab.view.set_zoom(tab.zoom);
        Ok(())
    }

    pub fn adjust_zoom(&mut self, delta: f64) -> Result<(), TabError> {
        let tab = self.active_tab_mut()?;
        tab.zoom = step_zoom(tab.zoom, delta);
        tab.view.set_zoom(tab.zoom);
        Ok(())
    }

    /// Makes `slot` the active tab, creating it first when empty.
    pub fn select_tab(&mut self, slot: usize) -> Result<(), TabError> {
        self.ensure_tab(slot)?;
        if slot == self.active {
            self.tabs.get_tab(slot)?.view.focus();
            self.focus = Focus::Page;
            return Ok(());
        }

        let chrome_visible = self.chrome_visible;
        {
            let old = &self.tabs.get_tab(self.active)?.view;
            if chrome_visible {
                old.hide_bar();
            }
            old.set_visible(false);
        }

        self.active = slot;
        let tab = self.tabs.get_tab(slot)?;
        tab.view.set_visible(true);
        if chrome_visible {
            let mode = if tab.find_mode {
                BarMode::Find
            } else {
                BarMode::Search
            };
            tab.view.show_bar(mode, &self.input);
        }
        tab.view.focus();
        self.focus = Focus::Page;

        let title = tab.display_title().to_string();
        self.chrome.select_tab(slot);
        self.chrome.set_title(&title);
        debug!(slot, "tab selected");
        Ok(())
    }

    /// Moves the active index by `delta`; moving past either end is a no-op.
    pub fn move_tab(&mut self, delta: isize) -> Result<(), TabError> {
        match self.active.checked_add_signed(delta) {
            Some(target) if target < TAB_SLOTS => self.select_tab(target),
            _ => Ok(()),
        }
    }

    /// Handles submission of the shared input field.
    ///
    /// In navigation mode the text is loaded into the active tab; in find mode
    /// it starts a case-insensitive, wrap-around search and hides the bar.
    pub fn submit_input(&mut self, text: &str) -> Result<(), TabError> {
        self.input = text.to_string();
        let tab = self.tabs.get_tab(self.active)?;

        if !tab.find_mode {
            let uri = normalize_input(text, &self.config.search_url);
            debug!(%uri, "navigating from input");
            tab.view.load_uri(&uri);
            return Ok(());
        }

        tab.view.search_text(text, FindOptions::default());
        self.toggle_chrome()
    }

    /// Engine signal: the page in `slot` finished loading.
    pub fn on_load_finished(&mut self, slot: usize, url: &str, title: &str) {
        let display_title = match self.tabs.get_tab_mut(slot) {
            Ok(tab) => {
                tab.url = url.to_string();
                if !title.is_empty() {
                    tab.title = title.to_string();
                }
                tab.display_title().to_string()
            }
            Err(e) => {
                warn!(slot, "load finished for unknown tab: {}", e);
                return;
            }
        };

        self.chrome.set_tab_title(slot, &display_title);
        if slot == self.active {
            if let Err(e) = self.hide_chrome() {
                warn!("could not hide chrome: {}", e);
            }
            self.input = url.to_string();
            self.chrome.set_title(&display_title);
        }

        self.record_history(url);
    }

    /// Engine signal: the document title of `slot` changed.
    pub fn on_title_changed(&mut self, slot: usize, title: &str) {
        let Ok(tab) = self.tabs.get_tab_mut(slot) else {
            return;
        };
        tab.title = title.to_string();
        let display_title = tab.display_title().to_string();

        self.chrome.set_tab_title(slot, &display_title);
        if slot == self.active {
            self.chrome.set_title(&display_title);
        }
    }

    /// Engine signal: a page asked to download `url`.
    pub fn on_download_requested(&mut self, url: &str) {
        let Some(downloads) = self.downloads.as_mut() else {
            warn!(%url, "download ignored, no download worker");
            return;
        };
        match downloads.start_download(url) {
            Ok(id) => info!(%id, %url, "download queued"),
            Err(e) => warn!(%url, "download rejected: {}", e),
        }
    }

    /// Appends to the history log. A failing log turns history off for the session.
    fn record_history(&mut self, url: &str) {
        if !self.history.is_recording_enabled() {
            return;
        }
        if let Err(e) = self.history.record_visit(url) {
            warn!("history disabled for this session: {}", e);
            self.history.set_recording_enabled(false);
        }
    }
}
