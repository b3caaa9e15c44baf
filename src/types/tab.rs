/// Number of tab slots in a window.
pub const TAB_SLOTS: usize = 9;

/// Zoom step applied by the zoom-in/zoom-out actions.
pub const ZOOM_STEP: f64 = 0.1;
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Smallest factor a tab can be zoomed to; there is no upper bound.
pub const MIN_ZOOM: f64 = 0.1;

/// One browsing context. Owns its engine view exclusively.
#[derive(Debug)]
pub struct Tab<V> {
    pub view: V,
    pub zoom: f64,
    /// `true` while the shared input field searches within the page.
    pub find_mode: bool,
    pub title: String,
    pub url: String,
}

impl<V> Tab<V> {
    pub fn new(view: V, url: &str) -> Self {
        Self {
            view,
            zoom: DEFAULT_ZOOM,
            find_mode: false,
            title: String::new(),
            url: url.to_string(),
        }
    }

    /// Title shown in the tab list; falls back to the url while the page has none.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

/// Applies `delta` to a zoom factor, never going below [`MIN_ZOOM`].
pub fn step_zoom(current: f64, delta: f64) -> f64 {
    (current + delta).max(MIN_ZOOM)
}
