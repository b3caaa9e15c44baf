//! Property-based tests for key resolution.
//!
//! Keys outside the table resolve to nothing and leave the window untouched;
//! bits other than shift, control and alt never change a lookup.

#[path = "../support/mock_engine.rs"]
mod support;

use briar::dispatcher::Dispatcher;
use briar::managers::shortcut_manager::{ShortcutManager, ShortcutManagerTrait, DEFAULT_BINDINGS};
use briar::managers::tab_manager::TabManagerTrait;
use briar::types::shortcut::{parse_keys, Modifier, ALT_MASK, CONTROL_MASK, SHIFT_MASK};
use proptest::prelude::*;
use support::{clear, open_window, test_config};

const MODIFIER_BITS: u32 = SHIFT_MASK | CONTROL_MASK | ALT_MASK;

fn is_bound(mask: u32, key: u32) -> bool {
    Modifier::from_mask(mask)
        .is_some_and(|m| DEFAULT_BINDINGS.iter().any(|b| b.matches(m, key)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unbound_keys_change_nothing(mask in 0u32..16, key in 0u32..0x1_0000) {
        prop_assume!(!is_bound(mask, key));

        let dir = tempfile::tempdir().unwrap();
        let (mut window, log) = open_window(test_config(dir.path()), None);
        clear(&log);
        let dispatcher = Dispatcher::default();

        prop_assert!(!dispatcher.dispatch(&mut window, mask, key));
        prop_assert!(log.borrow().is_empty());
        prop_assert_eq!(window.active_index(), 0);
        prop_assert_eq!(window.tabs().tab_count(), 1);
        prop_assert!(!window.is_chrome_visible());
        prop_assert_eq!(window.active_tab().unwrap().zoom, 1.0);
        prop_assert!(!window.chrome().fullscreen);
    }

    #[test]
    fn prop_extra_mask_bits_are_ignored(row in 0usize..31, extra in 0u32..0x1000) {
        let mgr = ShortcutManager::new();
        let binding = DEFAULT_BINDINGS[row];
        let noise = (extra << 4) & !MODIFIER_BITS;
        prop_assert_eq!(
            mgr.lookup_mask(binding.modifier.mask() | noise, binding.key),
            mgr.lookup(binding.modifier, binding.key)
        );
    }

    #[test]
    fn prop_parsed_letters_resolve_consistently(c in proptest::char::range('a', 'z')) {
        let (modifier, key) = parse_keys(&format!("Ctrl+Shift+{}", c)).unwrap();
        prop_assert_eq!(modifier, Modifier::PrimaryShift);
        prop_assert_eq!(key, c.to_ascii_uppercase() as u32);
    }
}
