//! `wry` implementation of the engine seam.
//!
//! Each tab is its own webview. Key presses, bar submissions, load
//! completion, title changes and download requests are forwarded to the
//! event loop as [`UserEvent`]s tagged with the tab slot.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::rc::Rc;

use serde::Deserialize;
use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use tracing::{debug, warn};
use wry::{PageLoadEvent, WebContext, WebView, WebViewBuilder};

use crate::engine::{BarMode, EngineFactory, EngineView, FindOptions, ViewSettings};
use crate::types::shortcut::KeyBinding;

const CHROME_JS: &str = include_str!("../../resources/ui/chrome.js");
const CHROME_CSS: &str = include_str!("../../resources/ui/chrome.css");

/// Events delivered to the UI thread.
#[derive(Debug)]
pub enum UserEvent {
    Key { slot: usize, mask: u32, key: u32 },
    Submit { slot: usize, text: String },
    PageLoaded { slot: usize, url: String },
    TitleChanged { slot: usize, title: String },
    DownloadRequested { url: String },
}

/// Messages posted by `chrome.js` through `window.ipc`.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
enum IpcMessage {
    Key { mask: u32, key: u32 },
    Submit { text: String },
}

/// Webviews by slot, shared with the window chrome for sidebar updates.
pub type ViewRegistry = Rc<RefCell<BTreeMap<usize, Rc<WebView>>>>;

/// A tab's webview.
pub struct WryView {
    webview: Rc<WebView>,
    last_query: RefCell<String>,
}

impl WryView {
    fn eval(&self, script: &str) {
        if let Err(e) = self.webview.evaluate_script(script) {
            debug!("script failed: {}", e);
        }
    }

    fn find(&self, backwards: bool) {
        let query = self.last_query.borrow();
        if query.is_empty() {
            return;
        }
        self.eval(&find_script(&query, backwards, FindOptions::default()));
    }
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn find_script(text: &str, backwards: bool, options: FindOptions) -> String {
    format!(
        "window.find({}, {}, {}, {})",
        js_string(text),
        !options.case_insensitive,
        backwards,
        options.wrap_around
    )
}

impl EngineView for WryView {
    fn load_uri(&self, uri: &str) {
        if let Err(e) = self.webview.load_url(uri) {
            debug!(%uri, "load failed: {}", e);
        }
    }

    fn go_back(&self) {
        self.eval("history.back()");
    }

    fn go_forward(&self) {
        self.eval("history.forward()");
    }

    fn reload(&self) {
        self.eval("location.reload()");
    }

    fn reload_bypass_cache(&self) {
        self.eval("location.reload(true)");
    }

    fn set_zoom(&self, factor: f64) {
        if let Err(e) = self.webview.zoom(factor) {
            debug!(factor, "zoom failed: {}", e);
        }
    }

    fn run_script(&self, script: &str) {
        self.eval(script);
    }

    fn search_text(&self, text: &str, options: FindOptions) {
        *self.last_query.borrow_mut() = text.to_string();
        self.eval(&find_script(text, false, options));
    }

    fn search_next(&self) {
        self.find(false);
    }

    fn search_previous(&self) {
        self.find(true);
    }

    fn is_inspector_attached(&self) -> bool {
        self.webview.is_devtools_open()
    }

    fn show_inspector(&self) {
        self.webview.open_devtools();
    }

    fn close_inspector(&self) {
        self.webview.close_devtools();
    }

    fn show_bar(&self, mode: BarMode, text: &str) {
        self.eval(&format!(
            "window.__briar && window.__briar.showBar({}, {})",
            js_string(mode.placeholder()),
            js_string(text)
        ));
    }

    fn hide_bar(&self) {
        self.eval("window.__briar && window.__briar.hideBar()");
    }

    fn set_visible(&self, visible: bool) {
        if let Err(e) = self.webview.set_visible(visible) {
            debug!(visible, "set_visible failed: {}", e);
        }
    }

    fn focus(&self) {
        if let Err(e) = self.webview.focus() {
            debug!("focus failed: {}", e);
        }
    }
}

/// Builds one child webview per tab slot inside the main window.
pub struct WryFactory {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    bindings: Vec<[u32; 2]>,
    context: Option<WebContext>,
    registry: ViewRegistry,
}

impl WryFactory {
    pub fn new(
        window: Rc<Window>,
        proxy: EventLoopProxy<UserEvent>,
        bindings: &[KeyBinding],
        registry: ViewRegistry,
    ) -> Self {
        Self {
            window,
            proxy,
            bindings: bindings.iter().map(|b| [b.modifier.mask(), b.key]).collect(),
            context: None,
            registry,
        }
    }

    fn initialization_script(&self, settings: &ViewSettings) -> String {
        let mut css = match &settings.theme {
            Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
                warn!(path = %path.display(), "theme not readable, using built-in: {}", e);
                CHROME_CSS.to_string()
            }),
            None => CHROME_CSS.to_string(),
        };
        css.push_str(if settings.smooth_scroll {
            "\nhtml{scroll-behavior:smooth}"
        } else {
            "\nhtml{scroll-behavior:auto}"
        });
        if !settings.animations {
            css.push_str("\n*,*::before,*::after{animation:none!important;transition:none!important}");
        }
        if settings.dark_mode {
            css.push_str("\n:root{color-scheme:dark}");
        }

        let user_css = settings
            .user_stylesheet
            .as_ref()
            .and_then(|path| fs::read_to_string(path).ok())
            .unwrap_or_default();

        let config = serde_json::json!({
            "bindings": self.bindings,
            "css": css,
            "userCss": user_css,
        });
        format!("window.__BRIAR = {};\n{}", config, CHROME_JS)
    }

    fn content_bounds(&self) -> wry::Rect {
        let size = self.window.inner_size();
        wry::Rect {
            position: wry::dpi::PhysicalPosition::new(0, 0).into(),
            size: wry::dpi::PhysicalSize::new(size.width, size.height).into(),
        }
    }
}

impl EngineFactory for WryFactory {
    type View = WryView;

    fn create_view(&mut self, slot: usize, settings: &ViewSettings) -> Result<WryView, String> {
        let script = self.initialization_script(settings);
        let bounds = self.content_bounds();
        let window = Rc::clone(&self.window);

        if self.context.is_none() {
            self.context = settings
                .data_dir
                .clone()
                .map(|dir| WebContext::new(Some(dir)));
        }

        let ipc_proxy = self.proxy.clone();
        let load_proxy = self.proxy.clone();
        let title_proxy = self.proxy.clone();
        let download_proxy = self.proxy.clone();

        let builder = match self.context.as_mut() {
            Some(context) => WebViewBuilder::new_with_web_context(context),
            None => WebViewBuilder::new(),
        };
        let builder = builder
            .with_incognito(settings.incognito)
            .with_devtools(true)
            .with_visible(false)
            .with_bounds(bounds)
            .with_initialization_script(&script)
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                let event = match serde_json::from_str::<IpcMessage>(request.body()) {
                    Ok(IpcMessage::Key { mask, key }) => UserEvent::Key { slot, mask, key },
                    Ok(IpcMessage::Submit { text }) => UserEvent::Submit { slot, text },
                    Err(e) => {
                        debug!(slot, "unrecognized ipc message: {}", e);
                        return;
                    }
                };
                let _ = ipc_proxy.send_event(event);
            })
            .with_on_page_load_handler(move |event, url| {
                if let PageLoadEvent::Finished = event {
                    let _ = load_proxy.send_event(UserEvent::PageLoaded { slot, url });
                }
            })
            .with_document_title_changed_handler(move |title| {
                let _ = title_proxy.send_event(UserEvent::TitleChanged { slot, title });
            })
            .with_download_started_handler(move |url, _path| {
                let _ = download_proxy.send_event(UserEvent::DownloadRequested { url });
                false
            });

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = window
                .default_vbox()
                .ok_or_else(|| "window has no GTK container".to_string())?;
            builder.build_gtk(vbox).map_err(|e| e.to_string())?
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder
            .build_as_child(window.as_ref())
            .map_err(|e| e.to_string())?;

        let webview = Rc::new(webview);
        self.registry.borrow_mut().insert(slot, Rc::clone(&webview));
        debug!(slot, "webview created");

        Ok(WryView {
            webview,
            last_query: RefCell::new(String::new()),
        })
    }
}

/// Resizes every tab webview to fill the window.
pub fn resize_views(registry: &ViewRegistry, width: u32, height: u32) {
    for (slot, webview) in registry.borrow().iter() {
        let bounds = wry::Rect {
            position: wry::dpi::PhysicalPosition::new(0, 0).into(),
            size: wry::dpi::PhysicalSize::new(width, height).into(),
        };
        if let Err(e) = webview.set_bounds(bounds) {
            debug!(slot, "resize failed: {}", e);
        }
    }
}
