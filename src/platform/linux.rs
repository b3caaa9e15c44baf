// Briar platform paths for Linux
// Config:    ~/.config/briar
// Cache:     ~/.cache/briar
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/briar` if set, otherwise `~/.config/briar`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("briar"),
        _ => home_dir().join(".config").join("briar"),
    }
}

/// Uses `$XDG_CACHE_HOME/briar` if set, otherwise `~/.cache/briar`.
pub fn get_cache_dir() -> PathBuf {
    match env::var("XDG_CACHE_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("briar"),
        _ => home_dir().join(".cache").join("briar"),
    }
}

pub fn get_download_dir() -> PathBuf {
    home_dir().join("Downloads")
}
