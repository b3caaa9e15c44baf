// Briar state managers
// Managers handle stateful operations: keymap, tab slots, history log, downloads.

pub mod download_manager;
pub mod history_manager;
pub mod shortcut_manager;
pub mod tab_manager;
