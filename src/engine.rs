//! Seams between the browser core and the web engine / windowing toolkit.
//!
//! The core never talks to `wry` or `tao` directly. It issues imperative
//! commands through these traits; engine failures are absorbed by the
//! implementations, which is why most methods return `()`.

use std::path::PathBuf;

use crate::types::settings::BrowserConfig;

/// Flags for an in-page text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    pub case_insensitive: bool,
    pub wrap_around: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            wrap_around: true,
        }
    }
}

/// Placeholder shown in the chrome's input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    Search,
    Find,
}

impl BarMode {
    pub fn placeholder(self) -> &'static str {
        match self {
            BarMode::Search => "Search",
            BarMode::Find => "Find",
        }
    }
}

/// One renderable page instance, owned by exactly one tab.
pub trait EngineView {
    fn load_uri(&self, uri: &str);
    fn go_back(&self);
    fn go_forward(&self);
    fn reload(&self);
    fn reload_bypass_cache(&self);
    fn set_zoom(&self, factor: f64);
    /// Runs a script in the page; the result is not observed.
    fn run_script(&self, script: &str);
    fn search_text(&self, text: &str, options: FindOptions);
    fn search_next(&self);
    fn search_previous(&self);
    fn is_inspector_attached(&self) -> bool;
    fn show_inspector(&self);
    fn close_inspector(&self);
    /// Shows the address/find bar over the page and focuses its input.
    fn show_bar(&self, mode: BarMode, text: &str);
    fn hide_bar(&self);
    fn set_visible(&self, visible: bool);
    fn focus(&self);
}

/// Per-view settings derived from the process-wide configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    /// Directory the engine keeps its data in; `None` disables on-disk caching.
    pub data_dir: Option<PathBuf>,
    /// Private session with no persistent cookies.
    pub incognito: bool,
    pub user_stylesheet: Option<PathBuf>,
    pub smooth_scroll: bool,
    pub animations: bool,
    pub theme: Option<PathBuf>,
    pub dark_mode: bool,
}

impl ViewSettings {
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self {
            data_dir: config.caching.then(|| config.cache_dir.clone()),
            incognito: !config.cookies,
            user_stylesheet: Some(config.user_stylesheet.clone()),
            smooth_scroll: config.smooth_scroll,
            animations: config.animations,
            theme: config.theme.clone(),
            dark_mode: config.dark_mode,
        }
    }
}

/// Builds engine views for tab slots.
///
/// Implementations bind the view's key, load-completion, title and download
/// handlers before returning it, so events carry the slot index. New views
/// start hidden; the window shows the active one.
pub trait EngineFactory {
    type View: EngineView;

    fn create_view(&mut self, slot: usize, settings: &ViewSettings) -> Result<Self::View, String>;
}

/// Window-level toolkit operations.
pub trait WindowChrome {
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn set_title(&mut self, title: &str);
    fn add_tab(&mut self, slot: usize);
    fn select_tab(&mut self, slot: usize);
    fn set_tab_title(&mut self, slot: usize, title: &str);
}
