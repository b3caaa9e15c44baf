// Briar platform abstraction
// Provides platform-specific directories for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for Briar.
///
/// - **Linux**: `~/.config/briar` (or `$XDG_CONFIG_HOME/briar`)
/// - **macOS**: `~/Library/Application Support/Briar`
/// - **Windows**: `%APPDATA%/Briar`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific cache directory for Briar.
///
/// Engine data (cookies, cache) and the history log live here.
///
/// - **Linux**: `~/.cache/briar` (or `$XDG_CACHE_HOME/briar`)
/// - **macOS**: `~/Library/Caches/Briar`
/// - **Windows**: `%LOCALAPPDATA%/Briar/cache`
pub fn get_cache_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_cache_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_cache_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_cache_dir()
    }
}

/// Returns the directory downloads are written to.
///
/// - **Linux / macOS**: `~/Downloads`
/// - **Windows**: `%USERPROFILE%/Downloads`
pub fn get_download_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_download_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_download_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_download_dir()
    }
}
