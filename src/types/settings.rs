use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::platform;

/// Window size used when either dimension is left unset.
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 720);

/// Search prefix for input that is not a URL.
pub const DEFAULT_SEARCH_URL: &str = "https://duckduckgo.com/?q=";

/// Top-level settings as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BrowserSettings {
    pub options: OptionSettings,
    pub appearance: AppearanceSettings,
    pub privacy: PrivacySettings,
    /// Extra keybindings, e.g. `"Ctrl+Shift+X": "reload"`.
    pub keys: BTreeMap<String, String>,
}

/// Paths and URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OptionSettings {
    /// Engine data directory; derived from the platform cache dir when unset.
    pub cache_dir: Option<String>,
    pub home_page: String,
    /// Stylesheet for the browser chrome; the built-in one is used when unset.
    pub theme: Option<String>,
    pub search_url: String,
    pub download_dir: Option<String>,
}

impl Default for OptionSettings {
    fn default() -> Self {
        Self {
            cache_dir: None,
            home_page: "https://duckduckgo.com".to_string(),
            theme: None,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            download_dir: None,
        }
    }
}

/// Appearance and visual settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppearanceSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub dark_mode: bool,
    pub smooth_scroll: bool,
    pub animations: bool,
    /// Width of the tab sidebar in logical pixels; 0 hides it.
    pub sidebar_width: u32,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            dark_mode: true,
            smooth_scroll: false,
            animations: true,
            sidebar_width: 0,
        }
    }
}

/// Privacy-related settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PrivacySettings {
    pub cookies: bool,
    pub history: bool,
    pub caching: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            cookies: true,
            history: true,
            caching: true,
        }
    }
}

/// Process-wide configuration, resolved once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    pub cache_dir: PathBuf,
    pub download_dir: PathBuf,
    pub home_page: String,
    pub search_url: String,
    pub theme: Option<PathBuf>,
    /// User stylesheet injected into every page.
    pub user_stylesheet: PathBuf,
    pub width: u32,
    pub height: u32,
    pub dark_mode: bool,
    pub smooth_scroll: bool,
    pub animations: bool,
    pub sidebar_width: u32,
    pub cookies: bool,
    pub history: bool,
    pub caching: bool,
}

impl BrowserConfig {
    /// Resolves on-disk settings against the platform directories.
    pub fn resolve(settings: &BrowserSettings) -> Self {
        let options = &settings.options;
        let appearance = &settings.appearance;

        let cache_dir = options
            .cache_dir
            .as_deref()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(platform::get_cache_dir);
        let download_dir = options
            .download_dir
            .as_deref()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(platform::get_download_dir);

        let (width, height) = match (appearance.width, appearance.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            _ => DEFAULT_WINDOW_SIZE,
        };

        Self {
            cache_dir,
            download_dir,
            home_page: options.home_page.clone(),
            search_url: options.search_url.clone(),
            theme: options
                .theme
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            user_stylesheet: platform::get_config_dir().join("style.css"),
            width,
            height,
            dark_mode: appearance.dark_mode,
            smooth_scroll: appearance.smooth_scroll,
            animations: appearance.animations,
            sidebar_width: appearance.sidebar_width,
            cookies: settings.privacy.cookies,
            history: settings.privacy.history,
            caching: settings.privacy.caching,
        }
    }

    /// Path of the plain-text history log.
    pub fn history_path(&self) -> PathBuf {
        self.cache_dir.join("history")
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::resolve(&BrowserSettings::default())
    }
}
