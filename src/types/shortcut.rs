use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ShortcutError;

/// Raw modifier bits, laid out like GDK's modifier state.
pub const SHIFT_MASK: u32 = 1 << 0;
pub const CONTROL_MASK: u32 = 1 << 2;
pub const ALT_MASK: u32 = 1 << 3;

/// Keysym values for the keys the default table binds by name.
pub mod keysym {
    pub const SPACE: u32 = 0x0020;
    pub const DIGIT_1: u32 = 0x0031;
    pub const DIGIT_9: u32 = 0x0039;
    pub const BACKSPACE: u32 = 0xff08;
    pub const TAB: u32 = 0xff09;
    pub const RETURN: u32 = 0xff0d;
    pub const ESCAPE: u32 = 0xff1b;
    pub const HOME: u32 = 0xff50;
    pub const LEFT: u32 = 0xff51;
    pub const UP: u32 = 0xff52;
    pub const RIGHT: u32 = 0xff53;
    pub const DOWN: u32 = 0xff54;
    pub const END: u32 = 0xff57;
    pub const F1: u32 = 0xffbe;
    pub const F11: u32 = 0xffc8;
    pub const F12: u32 = 0xffc9;
    pub const DELETE: u32 = 0xffff;
}

/// Converts a key name into its keysym.
///
/// Accepts single printable characters (case is kept, so `"K"` and `"k"`
/// differ) and DOM/GDK style names such as `"Escape"` or `"F11"`.
pub fn keysym_from_name(name: &str) -> Option<u32> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return (c.is_ascii_graphic() || c == ' ').then_some(c as u32);
    }

    let lower = name.to_ascii_lowercase();
    let sym = match lower.as_str() {
        "escape" | "esc" => keysym::ESCAPE,
        "space" => keysym::SPACE,
        "tab" => keysym::TAB,
        "enter" | "return" => keysym::RETURN,
        "backspace" => keysym::BACKSPACE,
        "delete" => keysym::DELETE,
        "home" => keysym::HOME,
        "end" => keysym::END,
        "left" | "arrowleft" => keysym::LEFT,
        "right" | "arrowright" => keysym::RIGHT,
        "up" | "arrowup" => keysym::UP,
        "down" | "arrowdown" => keysym::DOWN,
        f if f.starts_with('f') => {
            let n: u32 = f[1..].parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            keysym::F1 + n - 1
        }
        _ => return None,
    };
    Some(sym)
}

/// The closed set of modifier combinations a binding can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    None,
    /// Ctrl.
    Primary,
    /// Ctrl+Shift.
    PrimaryShift,
    Alt,
}

impl Modifier {
    /// Maps a raw modifier state onto the closed set. Bits other than
    /// shift/control/alt are ignored; combinations outside the set yield `None`.
    pub fn from_mask(mask: u32) -> Option<Self> {
        match mask & (SHIFT_MASK | CONTROL_MASK | ALT_MASK) {
            0 => Some(Modifier::None),
            CONTROL_MASK => Some(Modifier::Primary),
            m if m == CONTROL_MASK | SHIFT_MASK => Some(Modifier::PrimaryShift),
            ALT_MASK => Some(Modifier::Alt),
            _ => None,
        }
    }

    pub fn mask(self) -> u32 {
        match self {
            Modifier::None => 0,
            Modifier::Primary => CONTROL_MASK,
            Modifier::PrimaryShift => CONTROL_MASK | SHIFT_MASK,
            Modifier::Alt => ALT_MASK,
        }
    }
}

/// Every action a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    GoBack,
    GoForward,
    Search,
    Find,
    FindNext,
    FindPrev,
    HideBar,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    Inspector,
    Up,
    Down,
    HalfPageUp,
    HalfPageDown,
    GoTop,
    GoBottom,
    Reload,
    ReloadForce,
    Fullscreen,
    TabNext,
    TabPrev,
    TabSel,
}

impl Action {
    pub const ALL: [Action; 23] = [
        Action::GoBack,
        Action::GoForward,
        Action::Search,
        Action::Find,
        Action::FindNext,
        Action::FindPrev,
        Action::HideBar,
        Action::ZoomIn,
        Action::ZoomOut,
        Action::ZoomReset,
        Action::Inspector,
        Action::Up,
        Action::Down,
        Action::HalfPageUp,
        Action::HalfPageDown,
        Action::GoTop,
        Action::GoBottom,
        Action::Reload,
        Action::ReloadForce,
        Action::Fullscreen,
        Action::TabNext,
        Action::TabPrev,
        Action::TabSel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::GoBack => "goback",
            Action::GoForward => "goforward",
            Action::Search => "search",
            Action::Find => "find",
            Action::FindNext => "findnext",
            Action::FindPrev => "findprev",
            Action::HideBar => "hidebar",
            Action::ZoomIn => "zoomin",
            Action::ZoomOut => "zoomout",
            Action::ZoomReset => "zoomreset",
            Action::Inspector => "inspector",
            Action::Up => "up",
            Action::Down => "down",
            Action::HalfPageUp => "halfpageup",
            Action::HalfPageDown => "halfpagedown",
            Action::GoTop => "gotop",
            Action::GoBottom => "gobottom",
            Action::Reload => "reload",
            Action::ReloadForce => "reloadforce",
            Action::Fullscreen => "fullscreen",
            Action::TabNext => "tabnext",
            Action::TabPrev => "tabprev",
            Action::TabSel => "tabsel",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ShortcutError::UnknownAction(s.to_string()))
    }
}

/// One row of the keymap table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub modifier: Modifier,
    pub key: u32,
    pub action: Action,
}

impl KeyBinding {
    pub const fn new(modifier: Modifier, key: u32, action: Action) -> Self {
        Self { modifier, key, action }
    }

    pub fn matches(&self, modifier: Modifier, key: u32) -> bool {
        self.modifier == modifier && self.key == key
    }
}

/// Parses a human-readable binding such as `"Ctrl+Shift+K"` or `"Alt+1"`.
///
/// With Shift held a letter key is stored upper-case, which is what the
/// toolkit reports for shifted letters.
pub fn parse_keys(keys: &str) -> Result<(Modifier, u32), ShortcutError> {
    let tokens: Vec<&str> = keys.split('+').map(str::trim).collect();
    let (key_name, modifier_names) = match tokens.split_last() {
        Some((last, rest)) if !last.is_empty() => (*last, rest),
        _ => return Err(ShortcutError::InvalidKeys(keys.to_string())),
    };

    let mut mask = 0;
    for name in modifier_names {
        mask |= match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "primary" => CONTROL_MASK,
            "shift" => SHIFT_MASK,
            "alt" | "option" => ALT_MASK,
            _ => return Err(ShortcutError::InvalidKeys(keys.to_string())),
        };
    }
    let modifier =
        Modifier::from_mask(mask).ok_or_else(|| ShortcutError::InvalidKeys(keys.to_string()))?;

    let key_name = if mask & SHIFT_MASK != 0 && key_name.len() == 1 {
        key_name.to_ascii_uppercase()
    } else {
        key_name.to_string()
    };
    let key =
        keysym_from_name(&key_name).ok_or_else(|| ShortcutError::InvalidKeys(keys.to_string()))?;

    Ok((modifier, key))
}
