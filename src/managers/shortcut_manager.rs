//! Shortcut Manager for Briar.
//!
//! Holds the ordered keymap table. Lookup is a linear scan and the first
//! structural match wins, so table order is priority order.

use tracing::{debug, warn};

use crate::types::errors::ShortcutError;
use crate::types::shortcut::{keysym, parse_keys, Action, KeyBinding, Modifier};

use Action::*;
use Modifier::{Alt, Primary, PrimaryShift};

const fn key(c: char) -> u32 {
    c as u32
}

/// The built-in bindings, in priority order.
pub const DEFAULT_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(Primary, key('h'), GoBack),
    KeyBinding::new(Primary, key('l'), GoForward),
    KeyBinding::new(Primary, key('e'), Search),
    KeyBinding::new(PrimaryShift, key('K'), ZoomIn),
    KeyBinding::new(PrimaryShift, key('J'), ZoomOut),
    KeyBinding::new(PrimaryShift, key('Q'), ZoomReset),
    KeyBinding::new(PrimaryShift, key('I'), Inspector),
    KeyBinding::new(Primary, key('j'), Down),
    KeyBinding::new(Primary, key('k'), Up),
    KeyBinding::new(Primary, key('u'), HalfPageUp),
    KeyBinding::new(Primary, key('d'), HalfPageDown),
    KeyBinding::new(Primary, key('f'), Find),
    KeyBinding::new(Primary, key('n'), FindNext),
    KeyBinding::new(PrimaryShift, key('N'), FindPrev),
    KeyBinding::new(Primary, key('r'), Reload),
    KeyBinding::new(Modifier::None, keysym::ESCAPE, HideBar),
    KeyBinding::new(PrimaryShift, key('R'), ReloadForce),
    KeyBinding::new(Modifier::None, keysym::F11, Fullscreen),
    KeyBinding::new(Primary, key('g'), GoTop),
    KeyBinding::new(PrimaryShift, key('G'), GoBottom),
    KeyBinding::new(Alt, key('h'), TabPrev),
    KeyBinding::new(Alt, key('l'), TabNext),
    KeyBinding::new(Alt, key('1'), TabSel),
    KeyBinding::new(Alt, key('2'), TabSel),
    KeyBinding::new(Alt, key('3'), TabSel),
    KeyBinding::new(Alt, key('4'), TabSel),
    KeyBinding::new(Alt, key('5'), TabSel),
    KeyBinding::new(Alt, key('6'), TabSel),
    KeyBinding::new(Alt, key('7'), TabSel),
    KeyBinding::new(Alt, key('8'), TabSel),
    KeyBinding::new(Alt, key('9'), TabSel),
];

/// Trait defining keymap operations.
pub trait ShortcutManagerTrait {
    fn lookup(&self, modifier: Modifier, key: u32) -> Option<Action>;
    fn lookup_mask(&self, mask: u32, key: u32) -> Option<Action>;
    fn register_shortcut(&mut self, keys: &str, action: &str) -> Result<(), ShortcutError>;
    fn has_conflict(&self, modifier: Modifier, key: u32) -> Option<Action>;
    fn bindings(&self) -> &[KeyBinding];
    fn reset_to_defaults(&mut self);
}

/// Ordered keymap table.
#[derive(Debug, Clone)]
pub struct ShortcutManager {
    bindings: Vec<KeyBinding>,
}

impl ShortcutManager {
    pub fn new() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS.to_vec(),
        }
    }

    /// Builds the default table plus user bindings given as `keys -> action`.
    /// Invalid or conflicting user bindings are skipped with a warning.
    pub fn with_user_bindings<'a, I>(user: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut mgr = Self::new();
        for (keys, action) in user {
            if let Err(e) = mgr.register_shortcut(keys, action) {
                warn!(%keys, %action, "ignoring keybinding: {}", e);
            }
        }
        mgr
    }

    /// Index pairs of rows that bind the same (modifier, key).
    pub fn find_duplicates(bindings: &[KeyBinding]) -> Vec<(usize, usize)> {
        let mut dups = Vec::new();
        for (i, a) in bindings.iter().enumerate() {
            for (j, b) in bindings.iter().enumerate().skip(i + 1) {
                if a.matches(b.modifier, b.key) {
                    dups.push((i, j));
                }
            }
        }
        dups
    }
}

impl Default for ShortcutManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutManagerTrait for ShortcutManager {
    fn lookup(&self, modifier: Modifier, key: u32) -> Option<Action> {
        self.bindings
            .iter()
            .find(|b| b.matches(modifier, key))
            .map(|b| b.action)
    }

    fn lookup_mask(&self, mask: u32, key: u32) -> Option<Action> {
        let modifier = Modifier::from_mask(mask)?;
        self.lookup(modifier, key)
    }

    fn register_shortcut(&mut self, keys: &str, action: &str) -> Result<(), ShortcutError> {
        let action: Action = action.parse()?;
        let (modifier, key) = parse_keys(keys)?;

        if let Some(existing) = self.has_conflict(modifier, key) {
            return Err(ShortcutError::Conflict(format!(
                "'{}' is already bound to '{}'",
                keys, existing
            )));
        }

        debug!(%keys, %action, "registered keybinding");
        self.bindings.push(KeyBinding::new(modifier, key, action));
        Ok(())
    }

    fn has_conflict(&self, modifier: Modifier, key: u32) -> Option<Action> {
        self.lookup(modifier, key)
    }

    fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    fn reset_to_defaults(&mut self) {
        self.bindings = DEFAULT_BINDINGS.to_vec();
    }
}
