use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, Window};

use crate::config::Config;
use crate::dom;

/// Order-status path for a tracking code, or `None` if nothing was typed.
/// The code goes into the path as typed; the tracking page does its own
/// lookup and validation.
pub fn tracking_path(prefix: &str, input: &str) -> Option<String> {
    let code = input.trim();
    (!code.is_empty()).then(|| format!("{}{}", prefix, code))
}

/// The floating "track your order" panel.
pub struct TrackingWidget {
    _toggle: EventListener,
    _submit: Option<EventListener>,
}

impl TrackingWidget {
    pub fn mount(window: &Window, document: &Document, config: &Config) -> Option<Self> {
        let toggle = dom::by_id(document, "trackingToggle")?;
        let widget = dom::by_id(document, "trackingWidget")?;

        let toggle_listener = EventListener::new(&toggle, "click", move |_| {
            dom::toggle_class(&widget, "active");
        });

        let submit = dom::by_id(document, "trackingForm").map(|form| {
            let window = window.clone();
            let document = document.clone();
            let prefix = config.tracking_path_prefix.clone();
            EventListener::new_with_options(
                &form,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let input = dom::by_id(&document, "trackingInput")
                        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
                    let path = input.and_then(|input| tracking_path(&prefix, &input.value()));
                    let Some(path) = path else {
                        return;
                    };
                    log::info!("Redirecting to {}", path);
                    if let Err(err) = window.location().set_href(&path) {
                        gloo_console::error!("Tracking redirect failed:", err);
                    }
                },
            )
        });

        Some(Self {
            _toggle: toggle_listener,
            _submit: submit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_the_code() {
        assert_eq!(tracking_path("/track/", "  NTD-1042 \n"), Some("/track/NTD-1042".to_string()));
    }

    #[test]
    fn blank_input_does_not_navigate() {
        assert_eq!(tracking_path("/track/", ""), None);
        assert_eq!(tracking_path("/track/", "   \t"), None);
    }

    #[test]
    fn code_is_not_encoded() {
        assert_eq!(tracking_path("/track/", "a b/c"), Some("/track/a b/c".to_string()));
    }
}
