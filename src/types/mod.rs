// Briar shared type definitions
// Each submodule defines types used across the application.

pub mod download;
pub mod errors;
pub mod settings;
pub mod shortcut;
pub mod tab;
