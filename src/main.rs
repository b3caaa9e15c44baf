//! Briar: a minimal keyboard-driven web browser.
//!
//! Entry point: parses the command line, initializes logging, resolves the
//! configuration and opens the browser window. Built without the `gui`
//! feature, it prints the keymap and the resolved configuration instead.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use briar::dispatcher::Dispatcher;
use briar::managers::shortcut_manager::ShortcutManager;
use briar::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use briar::types::settings::BrowserConfig;

#[derive(Parser, Debug)]
#[command(name = "briar", version, about)]
struct Args {
    /// URL or search terms to open in the first tab.
    url: Option<String>,

    /// Settings file to load instead of the default one.
    #[arg(long)]
    config: Option<String>,

    /// Log filter directive, e.g. `briar=debug`.
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(directive: Option<&str>) {
    let filter = match directive {
        Some(d) => EnvFilter::new(d),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("briar=info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    // GStreamer must never select the software AV1 decoder.
    #[cfg(target_os = "linux")]
    std::env::set_var("GST_PLUGIN_FEATURE_RANK", "avdec_av1:NONE");

    let mut settings = SettingsEngine::new(args.config.clone());
    if let Err(e) = settings.load() {
        warn!(path = settings.get_config_path(), "using default settings: {}", e);
    }
    let config = Arc::new(settings.config());
    let shortcuts = ShortcutManager::with_user_bindings(&settings.get_settings().keys);
    let dispatcher = Dispatcher::new(shortcuts);
    info!(home = %config.home_page, cache = %config.cache_dir.display(), "configuration resolved");

    launch(config, dispatcher, args.url);
}

#[cfg(feature = "gui")]
fn launch(config: Arc<BrowserConfig>, dispatcher: Dispatcher, url: Option<String>) {
    if let Err(e) = briar::ui::webview_app::run(config, dispatcher, url) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn launch(config: Arc<BrowserConfig>, dispatcher: Dispatcher, url: Option<String>) {
    use briar::managers::shortcut_manager::ShortcutManagerTrait;
    use briar::services::navigation::normalize_input;

    println!("Briar v{} (built without the gui feature)", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Keymap:");
    for binding in dispatcher.shortcuts().bindings() {
        let key = char::from_u32(binding.key)
            .filter(|c| c.is_ascii_graphic())
            .map(String::from)
            .unwrap_or_else(|| format!("{:#06x}", binding.key));
        println!("  {:<14} {:<6} {}", format!("{:?}", binding.modifier), key, binding.action);
    }
    println!();
    println!("Configuration:");
    println!("{:#?}", config);
    if let Some(url) = url {
        println!();
        println!("First tab: {}", normalize_input(&url, &config.search_url));
    }
}
