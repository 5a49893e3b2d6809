use gloo_events::EventListener;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::Reflect;
use web_sys::{Document, Navigator, Window};

use crate::config::Config;

/// Registers the offline worker once the page has loaded. Outcome is only
/// logged.
pub struct ServiceWorker {
    _load: Option<EventListener>,
}

impl ServiceWorker {
    pub fn mount(window: &Window, document: &Document, config: &Config) -> Option<Self> {
        let navigator = window.navigator();
        if !Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false) {
            log::debug!("Service workers not supported");
            return None;
        }

        let path = config.service_worker_path.clone();
        if document.ready_state() == "complete" {
            register(&navigator, &path);
            return Some(Self { _load: None });
        }

        let load = EventListener::once(window, "load", move |_| register(&navigator, &path));
        Some(Self { _load: Some(load) })
    }
}

fn register(navigator: &Navigator, path: &str) {
    let promise = navigator.service_worker().register(path);
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => log::info!("ServiceWorker registration successful"),
            Err(err) => gloo_console::log!("ServiceWorker registration failed:", err),
        }
    });
}
