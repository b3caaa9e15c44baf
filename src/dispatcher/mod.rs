//! Action Dispatcher for Briar.
//!
//! Resolves a (modifier mask, keysym) pair through the keymap and runs the
//! bound handler against the window.

pub mod handlers;

use tracing::{debug, warn};

use crate::engine::{EngineFactory, WindowChrome};
use crate::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait};
use crate::types::shortcut::Action;
use crate::window::BrowserWindow;

pub use handlers::{handler_for, Handler};

pub struct Dispatcher {
    shortcuts: ShortcutManager,
}

impl Dispatcher {
    pub fn new(shortcuts: ShortcutManager) -> Self {
        Self { shortcuts }
    }

    pub fn shortcuts(&self) -> &ShortcutManager {
        &self.shortcuts
    }

    pub fn resolve(&self, mask: u32, key: u32) -> Option<Action> {
        self.shortcuts.lookup_mask(mask, key)
    }

    /// Runs the action bound to the key, if any. Returns whether the key was consumed.
    ///
    /// Handler failures are logged, never propagated.
    pub fn dispatch<F, C>(&self, window: &mut BrowserWindow<F, C>, mask: u32, key: u32) -> bool
    where
        F: EngineFactory,
        C: WindowChrome,
    {
        let Some(action) = self.resolve(mask, key) else {
            return false;
        };

        debug!(%action, mask, key, "dispatching");
        if let Err(e) = handler_for::<F, C>(action)(window, key) {
            warn!(%action, "action failed: {}", e);
        }
        true
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ShortcutManager::new())
    }
}
