// Briar services
// Stateless helpers and configuration loading.

pub mod navigation;
pub mod settings_engine;
