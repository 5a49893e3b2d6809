use gloo_events::EventListener;
use web_sys::Document;

use crate::config::Config;
use crate::dom;
use crate::timing::{BrowserTimers, Debounced, Scheduler};

/// Hides an alert `fade_ms` after its close button was last clicked. Each
/// alert holds at most one pending hide.
fn delayed_hide<S: Scheduler>(
    scheduler: S,
    fade_ms: u32,
    hide: impl FnMut(()) + 'static,
) -> Debounced<(), S> {
    Debounced::with_scheduler(scheduler, fade_ms, hide)
}

/// Flash messages rendered by the server: `.alert-close` fades its parent
/// out and then hides it.
pub struct Alerts {
    _listeners: Vec<EventListener>,
}

impl Alerts {
    pub fn mount(document: &Document, config: &Config) -> Self {
        let listeners = dom::query_all(document, ".alert-close")
            .into_iter()
            .filter_map(|button| {
                let alert = button.parent_element()?;
                let hidden = alert.clone();
                let hide = delayed_hide(BrowserTimers, config.alert_fade_ms, move |()| {
                    dom::set_style(&hidden, "display", "none");
                });
                Some(EventListener::new(&button, "click", move |_| {
                    dom::set_style(&alert, "opacity", "0");
                    hide.call(());
                }))
            })
            .collect();

        Self {
            _listeners: listeners,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::timing::manual::ManualTimers;

    #[test]
    fn repeated_clicks_keep_one_pending_hide() {
        let timers = ManualTimers::default();
        let hidden = Rc::new(Cell::new(0));
        let count = Rc::clone(&hidden);
        let hide = delayed_hide(timers.clone(), 300, move |()| count.set(count.get() + 1));

        for _ in 0..5 {
            hide.call(());
            timers.advance(100);
        }
        assert_eq!(timers.pending(), 1);

        timers.advance(300);
        assert_eq!(hidden.get(), 1);
        assert_eq!(timers.pending(), 0);
    }
}
