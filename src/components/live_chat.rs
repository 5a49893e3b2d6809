use gloo_events::EventListener;
use web_sys::{Document, Window};

use crate::config::Config;
use crate::dom;

/// `#liveChatBtn` opens the support WhatsApp chat in a new tab.
pub struct LiveChat {
    _click: EventListener,
}

impl LiveChat {
    pub fn mount(window: &Window, document: &Document, config: &Config) -> Option<Self> {
        let button = dom::by_id(document, "liveChatBtn")?;
        let window = window.clone();
        let url = config.live_chat_url.clone();
        let click = EventListener::new(&button, "click", move |_| {
            if let Err(err) = window.open_with_url_and_target(&url, "_blank") {
                gloo_console::error!("Could not open live chat:", err);
            }
        });
        Some(Self { _click: click })
    }
}
