use gloo_events::EventListener;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use web_sys::{ErrorEvent, Window};

use crate::config::Config;

/// Payload sent with `javascript_error` events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub error_message: String,
    pub error_filename: String,
    pub error_lineno: u32,
    pub error_colno: u32,
}

impl ErrorReport {
    fn from_event(event: &ErrorEvent) -> Self {
        Self {
            error_message: event.message(),
            error_filename: event.filename(),
            error_lineno: event.lineno(),
            error_colno: event.colno(),
        }
    }
}

/// Best-effort forwarding to the page's `gtag`. Nothing is queued or
/// retried; when `gtag` is missing events are dropped.
#[derive(Clone)]
pub struct Analytics {
    window: Window,
    dev_host: bool,
}

impl Analytics {
    pub fn new(window: &Window, config: &Config) -> Self {
        let hostname = window.location().hostname().unwrap_or_default();
        Self {
            window: window.clone(),
            dev_host: config.is_dev_host(&hostname),
        }
    }

    pub fn is_dev_host(&self) -> bool {
        self.dev_host
    }

    pub fn track(&self, name: &str, properties: &JsValue) {
        if let Some(gtag) = self.gtag() {
            let event = JsValue::from_str("event");
            let name = JsValue::from_str(name);
            if let Err(err) = gtag.call3(&JsValue::NULL, &event, &name, properties) {
                gloo_console::warn!("gtag call failed:", err);
            }
        }

        if self.dev_host {
            gloo_console::log!("Analytics Event:", name, properties.clone());
        }
    }

    pub fn track_serialized<T: Serialize>(&self, name: &str, properties: &T) {
        match properties.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
            Ok(value) => self.track(name, &value),
            Err(err) => log::warn!("Could not serialize {} properties: {}", name, err),
        }
    }

    fn gtag(&self) -> Option<Function> {
        Reflect::get(&self.window, &JsValue::from_str("gtag"))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

/// Window-level `error` listener: always logs, and reports to analytics
/// when not running on a development host.
pub struct ErrorReporter {
    _listener: EventListener,
}

impl ErrorReporter {
    pub fn attach(window: &Window, analytics: Analytics) -> Self {
        let listener = EventListener::new(window, "error", move |event| {
            let Some(event) = event.dyn_ref::<ErrorEvent>() else {
                return;
            };
            gloo_console::error!("JavaScript Error:", event.error());
            if !analytics.is_dev_host() {
                analytics.track_serialized("javascript_error", &ErrorReport::from_event(event));
            }
        });
        Self { _listener: listener }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_uses_analytics_field_names() {
        let report = ErrorReport {
            error_message: "Uncaught TypeError: x is undefined".to_string(),
            error_filename: "https://ntandostore.com/static/storefront.js".to_string(),
            error_lineno: 42,
            error_colno: 7,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error_message": "Uncaught TypeError: x is undefined",
                "error_filename": "https://ntandostore.com/static/storefront.js",
                "error_lineno": 42,
                "error_colno": 7
            })
        );
    }
}
