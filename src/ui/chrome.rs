//! `tao` window implementation of [`WindowChrome`].

use std::collections::BTreeMap;
use std::rc::Rc;

use tao::window::{Fullscreen, Window};
use tracing::debug;

use super::engine::ViewRegistry;
use crate::engine::WindowChrome;

/// Main window plus the tab list shown in the optional sidebar.
pub struct WryChrome {
    window: Rc<Window>,
    registry: ViewRegistry,
    titles: BTreeMap<usize, String>,
    active: usize,
    sidebar_width: u32,
}

impl WryChrome {
    pub fn new(window: Rc<Window>, registry: ViewRegistry, sidebar_width: u32) -> Self {
        Self {
            window,
            registry,
            titles: BTreeMap::new(),
            active: 0,
            sidebar_width,
        }
    }

    /// Re-renders the tab sidebar in the active view. A zero width keeps it hidden.
    fn render_sidebar(&self) {
        if self.sidebar_width == 0 {
            return;
        }
        let tabs: Vec<(usize, &str)> = self
            .titles
            .iter()
            .map(|(slot, title)| (*slot, title.as_str()))
            .collect();
        let script = format!(
            "window.__briar && window.__briar.renderTabs({}, {}, {})",
            serde_json::json!(tabs),
            self.active,
            self.sidebar_width
        );
        if let Some(webview) = self.registry.borrow().get(&self.active) {
            if let Err(e) = webview.evaluate_script(&script) {
                debug!("sidebar update failed: {}", e);
            }
        }
    }
}

impl WindowChrome for WryChrome {
    fn is_fullscreen(&self) -> bool {
        self.window.fullscreen().is_some()
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.window
            .set_fullscreen(fullscreen.then_some(Fullscreen::Borderless(None)));
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn add_tab(&mut self, slot: usize) {
        self.titles.entry(slot).or_default();
        self.render_sidebar();
    }

    fn select_tab(&mut self, slot: usize) {
        self.active = slot;
        self.render_sidebar();
    }

    fn set_tab_title(&mut self, slot: usize, title: &str) {
        self.titles.insert(slot, title.to_string());
        self.render_sidebar();
    }
}
