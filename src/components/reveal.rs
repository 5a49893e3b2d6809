use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, Window};

use crate::dom;
use crate::error::StoreError;
use crate::observer::{self, ObserverOptions, ViewportObserver};

const FADE_IN_UP_TARGETS: &str = ".service-card, .feature-card, .process-step, .stat-card";
const REVEAL_TARGETS: &str = ".service-card, .feature-card, .process-step, .trust-badges .badge";

/// Entrance animations for cards and sections, plus deferred image loading.
pub struct Reveal {
    _fade_in_up: ViewportObserver,
    _visible: ViewportObserver,
    _lazy_images: ViewportObserver,
}

impl Reveal {
    pub fn mount(window: &Window, document: &Document) -> Result<Option<Self>, StoreError> {
        if !observer::supported(window) {
            log::debug!("IntersectionObserver unavailable, skipping reveal animations");
            return Ok(None);
        }

        let fade_in_up = class_on_enter(
            ObserverOptions {
                threshold: Some(0.1),
                root_margin: Some("0px 0px -50px 0px"),
            },
            "animate-fadeInUp",
        )?;
        fade_in_up.observe_all(&dom::query_all(document, FADE_IN_UP_TARGETS));

        let visible = class_on_enter(
            ObserverOptions {
                threshold: Some(0.1),
                root_margin: Some("0px 0px -100px 0px"),
            },
            "visible",
        )?;
        visible.observe_all(&dom::query_all(document, REVEAL_TARGETS));

        let lazy_images = ViewportObserver::new(ObserverOptions::default(), load_image)?;
        let count = lazy_images.observe_all(&dom::query_all(document, "img[loading=\"lazy\"]"));
        log::debug!("Watching {} lazy images", count);

        Ok(Some(Self {
            _fade_in_up: fade_in_up,
            _visible: visible,
            _lazy_images: lazy_images,
        }))
    }
}

fn class_on_enter(
    options: ObserverOptions,
    class: &'static str,
) -> Result<ViewportObserver, StoreError> {
    ViewportObserver::new(options, move |element| dom::add_class(&element, class))
}

fn load_image(element: Element) {
    if let Some(src) = element.get_attribute("data-src") {
        match element.dyn_ref::<HtmlImageElement>() {
            Some(img) => img.set_src(&src),
            None => dom::set_attribute(&element, "src", &src),
        }
    }
    dom::remove_class(&element, "lazy");
}
