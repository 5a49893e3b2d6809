use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::Document;

use crate::config::Config;
use crate::dom;

/// Fades `#loadingScreen` out, then removes it from layout. Dropping it
/// cancels whichever step has not fired yet.
pub struct LoadingScreen {
    _fade: Timeout,
    _hide: Rc<RefCell<Option<Timeout>>>,
}

impl LoadingScreen {
    pub fn mount(document: &Document, config: &Config) -> Option<Self> {
        let screen = dom::by_id(document, "loadingScreen")?;
        let hide = Rc::new(RefCell::new(None));

        let fade_ms = config.loading_fade_ms;
        let pending_hide = Rc::clone(&hide);
        let fade = Timeout::new(config.loading_delay_ms, move || {
            dom::set_style(&screen, "opacity", "0");
            let hide_timer = Timeout::new(fade_ms, move || {
                dom::set_style(&screen, "display", "none");
                log::debug!("Loading screen hidden");
            });
            *pending_hide.borrow_mut() = Some(hide_timer);
        });

        Some(Self {
            _fade: fade,
            _hide: hide,
        })
    }
}
