//! One handler per keymap action.
//!
//! Every handler receives the window and the raw keysym that triggered it;
//! only `tabsel` reads the key.

use tracing::debug;

use crate::engine::{EngineFactory, EngineView, WindowChrome};
use crate::types::errors::TabError;
use crate::types::shortcut::{keysym, Action};
use crate::types::tab::{DEFAULT_ZOOM, ZOOM_STEP};
use crate::window::BrowserWindow;

pub type Handler<F, C> = fn(&mut BrowserWindow<F, C>, u32) -> Result<(), TabError>;

pub const SCROLL_UP: &str = "self.scrollBy(0,-200)";
pub const SCROLL_DOWN: &str = "self.scrollBy(0,200)";
pub const HALF_PAGE_UP: &str = "self.scrollBy(0,-innerHeight/2)";
pub const HALF_PAGE_DOWN: &str = "self.scrollBy(0,innerHeight/2)";
pub const SCROLL_TOP: &str = "window.scrollTo(0,0)";
pub const SCROLL_BOTTOM: &str = "window.scrollTo(0,document.body.scrollHeight)";

/// Returns the handler bound to `action`.
pub fn handler_for<F: EngineFactory, C: WindowChrome>(action: Action) -> Handler<F, C> {
    match action {
        Action::GoBack => go_back,
        Action::GoForward => go_forward,
        Action::Search => search,
        Action::Find => find,
        Action::FindNext => find_next,
        Action::FindPrev => find_prev,
        Action::HideBar => hide_bar,
        Action::ZoomIn => zoom_in,
        Action::ZoomOut => zoom_out,
        Action::ZoomReset => zoom_reset,
        Action::Inspector => inspector,
        Action::Up => scroll_up,
        Action::Down => scroll_down,
        Action::HalfPageUp => half_page_up,
        Action::HalfPageDown => half_page_down,
        Action::GoTop => go_top,
        Action::GoBottom => go_bottom,
        Action::Reload => reload,
        Action::ReloadForce => reload_force,
        Action::Fullscreen => fullscreen,
        Action::TabNext => tab_next,
        Action::TabPrev => tab_prev,
        Action::TabSel => tab_sel,
    }
}

fn view<F: EngineFactory, C: WindowChrome>(
    window: &BrowserWindow<F, C>,
) -> Result<&F::View, TabError> {
    window.active_tab().map(|tab| &tab.view)
}

fn go_back<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    view(w)?.go_back();
    Ok(())
}

fn go_forward<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    view(w)?.go_forward();
    Ok(())
}

fn search<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    w.set_find_mode(false)?;
    w.toggle_chrome()
}

fn find<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    w.set_find_mode(true)?;
    w.toggle_chrome()
}

fn find_next<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    view(w)?.search_next();
    Ok(())
}

fn find_prev<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    view(w)?.search_previous();
    Ok(())
}

fn hide_bar<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    w.toggle_chrome()
}

fn zoom_in<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    w.adjust_zoom(ZOOM_STEP)
}

fn zoom_out<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    w.adjust_zoom(-ZOOM_STEP)
}

fn zoom_reset<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    w.set_zoom(DEFAULT_ZOOM)
}

fn inspector<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    let view = view(w)?;
    if view.is_inspector_attached() {
        view.close_inspector();
    } else {
        view.show_inspector();
    }
    Ok(())
}

fn run<F: EngineFactory, C: WindowChrome>(w: &BrowserWindow<F, C>, script: &str) -> Result<(), TabError> {
    view(w)?.run_script(script);
    Ok(())
}

fn scroll_up<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    run(w, SCROLL_UP)
}

fn scroll_down<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    run(w, SCROLL_DOWN)
}

fn half_page_up<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    run(w, HALF_PAGE_UP)
}

fn half_page_down<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    run(w, HALF_PAGE_DOWN)
}

fn go_top<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    run(w, SCROLL_TOP)
}

fn go_bottom<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    run(w, SCROLL_BOTTOM)
}

fn reload<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    view(w)?.reload();
    Ok(())
}

fn reload_force<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    view(w)?.reload_bypass_cache();
    Ok(())
}

fn fullscreen<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    let chrome = w.chrome_mut();
    let target = !chrome.is_fullscreen();
    chrome.set_fullscreen(target);
    debug!(fullscreen = target, "fullscreen toggled");
    Ok(())
}

fn tab_next<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    w.move_tab(1)
}

fn tab_prev<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, _: u32) -> Result<(), TabError> {
    w.move_tab(-1)
}

/// Digit `1` selects slot 0, `9` selects slot 8.
fn tab_sel<F: EngineFactory, C: WindowChrome>(w: &mut BrowserWindow<F, C>, key: u32) -> Result<(), TabError> {
    if !(keysym::DIGIT_1..=keysym::DIGIT_9).contains(&key) {
        return Err(TabError::InvalidIndex(key as usize));
    }
    let slot = (key - keysym::DIGIT_1) as usize;
    w.select_tab(slot)
}
