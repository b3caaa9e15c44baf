//! Briar UI layer.
//!
//! Uses `wry` for the page engine and `tao` for the window:
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//! - Windows: WebView2
//!
//! The address/find bar and tab sidebar are drawn inside each page by an
//! injected script; keys reach the dispatcher over wry IPC.

pub mod chrome;
pub mod engine;
pub mod webview_app;
