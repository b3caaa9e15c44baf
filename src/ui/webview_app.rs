//! Browser window event loop using `wry` + `tao`.
//!
//! Architecture:
//! - One `tao` window; each tab slot is a child webview built by `WryFactory`.
//! - `chrome.js` is injected into every page as an initialization script. It
//!   draws the address/find bar and tab sidebar, and forwards key presses and
//!   bar submissions over IPC (`window.ipc.postMessage`).
//! - Engine callbacks reach the loop as `UserEvent`s through an
//!   `EventLoopProxy`; all browser state lives on this thread.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::{Theme, WindowBuilder};
use tracing::{debug, info, warn};

use super::chrome::WryChrome;
use super::engine::{resize_views, UserEvent, ViewRegistry, WryFactory};
use crate::dispatcher::Dispatcher;
use crate::managers::download_manager::DownloadManager;
use crate::managers::shortcut_manager::ShortcutManagerTrait;
use crate::types::settings::BrowserConfig;
use crate::window::BrowserWindow;

/// Opens the browser window and runs the event loop until it is closed.
///
/// Only returns on a setup failure.
pub fn run(
    config: Arc<BrowserConfig>,
    dispatcher: Dispatcher,
    initial: Option<String>,
) -> Result<(), String> {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("Briar")
        .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
        .with_theme(config.dark_mode.then_some(Theme::Dark))
        .build(&event_loop)
        .map_err(|e| format!("Failed to create window: {}", e))?;
    let window = Rc::new(window);

    let registry: ViewRegistry = Rc::new(RefCell::new(BTreeMap::new()));
    let factory = WryFactory::new(
        Rc::clone(&window),
        proxy,
        dispatcher.shortcuts().bindings(),
        Rc::clone(&registry),
    );
    let chrome = WryChrome::new(Rc::clone(&window), Rc::clone(&registry), config.sidebar_width);

    let mut browser = BrowserWindow::new(Arc::clone(&config), factory, chrome, initial.as_deref())
        .map_err(|e| format!("Failed to open first tab: {}", e))?;
    match DownloadManager::new(config.download_dir.clone()) {
        Ok(downloads) => browser = browser.with_downloads(downloads),
        Err(e) => warn!("downloads disabled: {}", e),
    }
    info!("browser window ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => resize_views(&registry, size.width, size.height),

            Event::UserEvent(user_event) => match user_event {
                UserEvent::Key { slot, mask, key } => {
                    if slot != browser.active_index() {
                        debug!(slot, "key from inactive tab ignored");
                        return;
                    }
                    dispatcher.dispatch(&mut browser, mask, key);
                }
                UserEvent::Submit { slot, text } => {
                    if slot != browser.active_index() {
                        return;
                    }
                    if let Err(e) = browser.submit_input(&text) {
                        warn!("input not handled: {}", e);
                    }
                }
                UserEvent::PageLoaded { slot, url } => browser.on_load_finished(slot, &url, ""),
                UserEvent::TitleChanged { slot, title } => browser.on_title_changed(slot, &title),
                UserEvent::DownloadRequested { url } => browser.on_download_requested(&url),
            },

            _ => {}
        }
    })
}
