//! Briar: a minimal keyboard-driven web browser.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod dispatcher;
pub mod engine;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
pub mod window;

#[cfg(feature = "gui")]
pub mod ui;
