#[path = "../support/mock_engine.rs"]
mod support;

use briar::engine::{BarMode, FindOptions};
use briar::managers::history_manager::HistoryManagerTrait;
use briar::managers::tab_manager::TabManagerTrait;
use briar::types::errors::TabError;
use briar::window::Focus;
use support::{calls_for, clear, open_window, test_config, Call, MockChrome, MockFactory};

#[test]
fn test_new_window_loads_home_page_in_slot_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (window, log) = open_window(test_config(dir.path()), None);

    assert_eq!(window.active_index(), 0);
    assert_eq!(window.tabs().populated_slots(), vec![0]);
    assert_eq!(
        calls_for(&log, 0),
        vec![
            Call::Load("https://duckduckgo.com".to_string()),
            Call::Visible(true),
            Call::Focus,
        ]
    );
    assert_eq!(window.chrome().tabs, vec![0]);
    assert_eq!(window.chrome().selected, Some(0));
    assert!(!window.is_chrome_visible());
    assert_eq!(window.focus(), Focus::Page);
}

#[test]
fn test_initial_search_term_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let (window, log) = open_window(test_config(dir.path()), Some("openai.com"));
    assert_eq!(
        calls_for(&log, 0)[0],
        Call::Load("https://duckduckgo.com/?q=openai.com".to_string())
    );
    assert_eq!(window.active_tab().unwrap().url, "https://duckduckgo.com/?q=openai.com");
}

#[test]
fn test_initial_url_loads_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let (_window, log) = open_window(test_config(dir.path()), Some("https://x.com"));
    assert_eq!(calls_for(&log, 0)[0], Call::Load("https://x.com".to_string()));
}

#[test]
fn test_toggle_chrome_shows_and_hides_bar() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, log) = open_window(test_config(dir.path()), None);
    clear(&log);

    window.toggle_chrome().unwrap();
    assert!(window.is_chrome_visible());
    assert_eq!(window.focus(), Focus::SearchBar);
    assert_eq!(calls_for(&log, 0), vec![Call::ShowBar(BarMode::Search, String::new())]);

    clear(&log);
    window.toggle_chrome().unwrap();
    assert!(!window.is_chrome_visible());
    assert_eq!(window.focus(), Focus::Page);
    assert_eq!(calls_for(&log, 0), vec![Call::HideBar, Call::Focus]);
}

#[test]
fn test_submit_navigates_active_tab() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, log) = open_window(test_config(dir.path()), None);
    window.toggle_chrome().unwrap();
    clear(&log);

    window.submit_input("rust lang").unwrap();
    assert_eq!(
        calls_for(&log, 0),
        vec![Call::Load("https://duckduckgo.com/?q=rust+lang".to_string())]
    );
    assert_eq!(window.input(), "rust lang");
}

#[test]
fn test_find_mode_submit_searches_and_hides_bar() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, log) = open_window(test_config(dir.path()), None);
    window.set_find_mode(true).unwrap();
    window.toggle_chrome().unwrap();
    assert_eq!(
        calls_for(&log, 0).last(),
        Some(&Call::ShowBar(BarMode::Find, String::new()))
    );
    clear(&log);

    window.submit_input("needle").unwrap();
    assert_eq!(
        calls_for(&log, 0),
        vec![
            Call::Search("needle".to_string(), FindOptions::default()),
            Call::HideBar,
            Call::Focus,
        ]
    );
    assert!(!window.is_chrome_visible());
    assert_eq!(window.focus(), Focus::Page);
}

#[test]
fn test_select_tab_creates_slot_lazily() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, log) = open_window(test_config(dir.path()), None);
    clear(&log);

    window.select_tab(3).unwrap();
    assert_eq!(window.active_index(), 3);
    assert_eq!(window.tabs().populated_slots(), vec![0, 3]);
    assert_eq!(calls_for(&log, 0), vec![Call::Visible(false)]);
    assert_eq!(
        calls_for(&log, 3),
        vec![
            Call::Load("https://duckduckgo.com".to_string()),
            Call::Visible(true),
            Call::Focus,
        ]
    );
    assert_eq!(window.chrome().tabs, vec![0, 3]);
    assert_eq!(window.chrome().selected, Some(3));
}

#[test]
fn test_select_existing_tab_does_not_reload() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, log) = open_window(test_config(dir.path()), None);
    window.select_tab(1).unwrap();
    window.select_tab(0).unwrap();
    clear(&log);

    window.select_tab(1).unwrap();
    assert!(!calls_for(&log, 1).iter().any(|c| matches!(c, Call::Load(_))));
    assert_eq!(window.chrome().tabs, vec![0, 1]);
}

#[test]
fn test_select_tab_carries_visible_bar() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, log) = open_window(test_config(dir.path()), None);
    window.toggle_chrome().unwrap();
    clear(&log);

    window.select_tab(1).unwrap();
    assert!(window.is_chrome_visible());
    assert_eq!(calls_for(&log, 0), vec![Call::HideBar, Call::Visible(false)]);
    assert!(calls_for(&log, 1).contains(&Call::ShowBar(BarMode::Search, String::new())));
}

#[test]
fn test_reselecting_active_tab_returns_focus_to_page() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, log) = open_window(test_config(dir.path()), None);
    window.toggle_chrome().unwrap();
    assert_eq!(window.focus(), Focus::SearchBar);
    clear(&log);

    window.select_tab(0).unwrap();
    assert_eq!(window.focus(), Focus::Page);
    assert_eq!(calls_for(&log, 0), vec![Call::Focus]);
    assert_eq!(window.active_index(), 0);
}

#[test]
fn test_select_out_of_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, _log) = open_window(test_config(dir.path()), None);
    assert!(matches!(window.select_tab(9), Err(TabError::InvalidIndex(9))));
    assert_eq!(window.active_index(), 0);
}

#[test]
fn test_view_creation_failure_keeps_active_tab() {
    let dir = tempfile::tempdir().unwrap();
    let factory = MockFactory {
        failing: vec![2],
        ..MockFactory::default()
    };
    let mut window = briar::window::BrowserWindow::new(
        std::sync::Arc::new(test_config(dir.path())),
        factory,
        MockChrome::default(),
        None,
    )
    .unwrap();

    assert!(matches!(window.select_tab(2), Err(TabError::EngineUnavailable(_))));
    assert_eq!(window.active_index(), 0);
    assert!(!window.tabs().is_populated(2));
}

#[test]
fn test_move_tab_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, _log) = open_window(test_config(dir.path()), None);

    window.move_tab(-1).unwrap();
    assert_eq!(window.active_index(), 0);
    assert_eq!(window.tabs().tab_count(), 1);

    window.select_tab(8).unwrap();
    window.move_tab(1).unwrap();
    assert_eq!(window.active_index(), 8);

    window.move_tab(-1).unwrap();
    assert_eq!(window.active_index(), 7);
}

#[test]
fn test_load_finished_updates_active_tab_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, log) = open_window(test_config(dir.path()), None);
    window.toggle_chrome().unwrap();
    clear(&log);

    window.on_load_finished(0, "https://example.com/", "Example Domain");

    assert!(!window.is_chrome_visible());
    assert_eq!(window.focus(), Focus::Page);
    assert_eq!(window.input(), "https://example.com/");
    assert_eq!(window.chrome().title, "Example Domain");
    assert_eq!(window.chrome().tab_titles.get(&0).map(String::as_str), Some("Example Domain"));
    assert_eq!(calls_for(&log, 0), vec![Call::HideBar, Call::Focus]);
    assert_eq!(
        window.history().list_history().unwrap(),
        vec!["https://example.com/".to_string()]
    );
}

#[test]
fn test_load_finished_in_background_tab_leaves_chrome_alone() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, log) = open_window(test_config(dir.path()), None);
    window.select_tab(1).unwrap();
    window.toggle_chrome().unwrap();
    clear(&log);

    window.on_load_finished(0, "https://a.example/", "");

    assert!(window.is_chrome_visible());
    assert_eq!(window.input(), "");
    assert!(log.borrow().is_empty());
    assert_eq!(window.tabs().get_tab(0).unwrap().url, "https://a.example/");
    assert_eq!(window.chrome().tab_titles.get(&0).map(String::as_str), Some("https://a.example/"));
    assert_eq!(window.history().list_history().unwrap().len(), 1);
}

#[test]
fn test_finished_loads_are_appended_to_history_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let history_file = config.history_path();
    let (mut window, _log) = open_window(config, None);

    window.on_load_finished(0, "https://a.test", "A");
    window.on_load_finished(0, "https://b.test", "B");

    assert_eq!(
        std::fs::read_to_string(history_file).unwrap(),
        "https://a.test\nhttps://b.test\n"
    );
}

#[test]
fn test_history_disabled_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.history = false;
    let (mut window, _log) = open_window(config, None);

    window.on_load_finished(0, "https://example.com/", "");
    assert!(!window.history().path().exists());
}

#[test]
fn test_history_failure_disables_recording() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let mut config = test_config(dir.path());
    config.cache_dir = blocker;
    let (mut window, _log) = open_window(config, None);

    assert!(window.history().is_recording_enabled());
    window.on_load_finished(0, "https://example.com/", "");
    assert!(!window.history().is_recording_enabled());

    // Later loads still update the tab.
    window.on_load_finished(0, "https://example.org/", "");
    assert_eq!(window.active_tab().unwrap().url, "https://example.org/");
}

#[test]
fn test_title_change_updates_window_title() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, _log) = open_window(test_config(dir.path()), None);
    window.select_tab(1).unwrap();

    window.on_title_changed(0, "Background");
    assert_ne!(window.chrome().title, "Background");
    assert_eq!(window.chrome().tab_titles.get(&0).map(String::as_str), Some("Background"));

    window.on_title_changed(1, "Foreground");
    assert_eq!(window.chrome().title, "Foreground");
}

#[test]
fn test_download_without_worker_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let (mut window, _log) = open_window(test_config(dir.path()), None);
    window.on_download_requested("https://example.com/file.zip");
    assert!(window.downloads().is_none());
}
