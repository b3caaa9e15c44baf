use briar::managers::tab_manager::{TabManager, TabManagerTrait};
use briar::types::errors::TabError;
use briar::types::tab::{step_zoom, Tab, DEFAULT_ZOOM, MIN_ZOOM, TAB_SLOTS};

fn tab(url: &str) -> Tab<()> {
    Tab::new((), url)
}

#[test]
fn test_new_registry_is_empty() {
    let mgr: TabManager<()> = TabManager::new();
    assert_eq!(mgr.tab_count(), 0);
    assert!(mgr.populated_slots().is_empty());
    assert!((0..TAB_SLOTS).all(|slot| !mgr.is_populated(slot)));
}

#[test]
fn test_insert_populates_slot() {
    let mut mgr = TabManager::new();
    mgr.insert_tab(4, tab("https://example.com")).unwrap();
    assert!(mgr.is_populated(4));
    assert_eq!(mgr.tab_count(), 1);
    let t = mgr.get_tab(4).unwrap();
    assert_eq!(t.url, "https://example.com");
    assert_eq!(t.zoom, DEFAULT_ZOOM);
    assert!(!t.find_mode);
}

#[test]
fn test_insert_into_populated_slot_keeps_original() {
    let mut mgr = TabManager::new();
    mgr.insert_tab(0, tab("https://first.example")).unwrap();
    mgr.insert_tab(0, tab("https://second.example")).unwrap();
    assert_eq!(mgr.tab_count(), 1);
    assert_eq!(mgr.get_tab(0).unwrap().url, "https://first.example");
}

#[test]
fn test_empty_slot_error() {
    let mgr: TabManager<()> = TabManager::new();
    assert!(matches!(mgr.get_tab(2), Err(TabError::EmptySlot(2))));
}

#[test]
fn test_out_of_range_index() {
    let mut mgr = TabManager::new();
    assert!(matches!(mgr.get_tab(TAB_SLOTS), Err(TabError::InvalidIndex(9))));
    assert!(matches!(mgr.insert_tab(42, tab("about:blank")), Err(TabError::InvalidIndex(42))));
    assert!(!mgr.is_populated(42));
}

#[test]
fn test_populated_slots_in_order() {
    let mut mgr = TabManager::new();
    for slot in [7, 0, 3] {
        mgr.insert_tab(slot, tab("about:blank")).unwrap();
    }
    assert_eq!(mgr.populated_slots(), vec![0, 3, 7]);
}

#[test]
fn test_get_tab_mut_updates_state() {
    let mut mgr = TabManager::new();
    mgr.insert_tab(1, tab("about:blank")).unwrap();
    mgr.get_tab_mut(1).unwrap().title = "Blank".to_string();
    assert_eq!(mgr.get_tab(1).unwrap().display_title(), "Blank");
}

#[test]
fn test_display_title_falls_back_to_url() {
    let t = tab("https://example.com");
    assert_eq!(t.display_title(), "https://example.com");
}

#[test]
fn test_step_zoom_has_only_a_lower_bound() {
    assert_eq!(step_zoom(MIN_ZOOM, -0.1), MIN_ZOOM);
    assert_eq!(step_zoom(0.15, -0.1), MIN_ZOOM);
    assert!((step_zoom(5.0, 0.1) - 5.1).abs() < 1e-9);
    assert!((step_zoom(step_zoom(4.95, 0.1), -0.1) - 4.95).abs() < 1e-9);
}
