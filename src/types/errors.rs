use std::fmt;

// === TabError ===

/// Errors related to the tab registry.
#[derive(Debug)]
pub enum TabError {
    /// The slot index lies outside the registry.
    InvalidIndex(usize),
    /// The slot has never been populated.
    EmptySlot(usize),
    /// The engine could not create a view for the slot.
    EngineUnavailable(String),
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::InvalidIndex(index) => write!(f, "Invalid tab index: {}", index),
            TabError::EmptySlot(index) => write!(f, "Tab slot is empty: {}", index),
            TabError::EngineUnavailable(msg) => {
                write!(f, "Engine view could not be created: {}", msg)
            }
        }
    }
}

impl std::error::Error for TabError {}

// === ShortcutError ===

/// Errors related to keybinding management.
#[derive(Debug)]
pub enum ShortcutError {
    /// No action with the given name exists.
    UnknownAction(String),
    /// The key combination is already bound.
    Conflict(String),
    /// The provided key combination could not be parsed.
    InvalidKeys(String),
}

impl fmt::Display for ShortcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutError::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            ShortcutError::Conflict(msg) => write!(f, "Shortcut conflict: {}", msg),
            ShortcutError::InvalidKeys(keys) => write!(f, "Invalid shortcut keys: {}", keys),
        }
    }
}

impl std::error::Error for ShortcutError {}

// === HistoryError ===

/// Errors related to the history log.
#[derive(Debug)]
pub enum HistoryError {
    /// History recording is turned off.
    Disabled,
    /// The log file could not be opened or written.
    IoError(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Disabled => write!(f, "History recording is disabled"),
            HistoryError::IoError(msg) => write!(f, "History I/O error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {}

// === DownloadError ===

/// Errors related to download management operations.
#[derive(Debug)]
pub enum DownloadError {
    /// Download with the given ID was not found.
    NotFound(String),
    /// The URL cannot be downloaded.
    InvalidUrl(String),
    /// A network error occurred during download.
    NetworkError(String),
    /// A file system error occurred.
    FileSystemError(String),
    /// The download has already finished.
    AlreadyFinished(String),
    /// The background worker could not be started.
    WorkerUnavailable(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::NotFound(id) => write!(f, "Download not found: {}", id),
            DownloadError::InvalidUrl(url) => write!(f, "Invalid download URL: {}", url),
            DownloadError::NetworkError(msg) => write!(f, "Download network error: {}", msg),
            DownloadError::FileSystemError(msg) => {
                write!(f, "Download file system error: {}", msg)
            }
            DownloadError::AlreadyFinished(id) => {
                write!(f, "Download already finished: {}", id)
            }
            DownloadError::WorkerUnavailable(msg) => {
                write!(f, "Download worker unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for DownloadError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
