//! Everything that reacts to window scrolling: the scroll-to-top button,
//! parallax layers and fade-on-scroll blocks.
//!
//! Scroll events arrive far more often than the page repaints, so each one
//! cancels the pending frame and schedules a fresh one. At most one update
//! runs per rendered frame, always against the latest scroll position.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::Config;
use crate::dom;

const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
const FLOATING_CARD_STEP: f64 = 0.1;
const FADE_ENTRY_FRACTION: f64 = 0.2;

pub fn shows_scroll_top(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn floating_card_speed(index: usize) -> f64 {
    DEFAULT_PARALLAX_SPEED + index as f64 * FLOATING_CARD_STEP
}

/// Speed from a `data-speed` attribute; unparsable values fall back to the
/// default.
pub fn parallax_speed(data_speed: Option<&str>) -> f64 {
    data_speed
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|speed| speed.is_finite())
        .unwrap_or(DEFAULT_PARALLAX_SPEED)
}

pub fn parallax_transform(scroll_y: f64, speed: f64) -> String {
    format!("translateY({}px)", scroll_y * speed)
}

/// True once the element's top has come into view by more than a fifth of
/// its own height.
pub fn reached_fade_point(scroll_y: f64, viewport_height: f64, top: f64, height: f64) -> bool {
    scroll_y + viewport_height > top + height * FADE_ENTRY_FRACTION
}

pub fn scroll_to_top(window: &Window) {
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

struct Targets {
    window: Window,
    scroll_top: Option<Element>,
    threshold: f64,
    floating_cards: Vec<Element>,
    parallax: Vec<(Element, f64)>,
    fade: Vec<HtmlElement>,
}

impl Targets {
    fn update(&self) {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);

        if let Some(button) = &self.scroll_top {
            dom::set_class(button, "show", shows_scroll_top(scroll_y, self.threshold));
        }

        for (index, card) in self.floating_cards.iter().enumerate() {
            let transform = parallax_transform(scroll_y, floating_card_speed(index));
            dom::set_style(card, "transform", &transform);
        }
        for (element, speed) in &self.parallax {
            dom::set_style(element, "transform", &parallax_transform(scroll_y, *speed));
        }

        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        for element in &self.fade {
            let top = f64::from(element.offset_top());
            let height = f64::from(element.offset_height());
            if reached_fade_point(scroll_y, viewport_height, top, height) {
                dom::add_class(element, "visible");
            }
        }
    }
}

pub struct ScrollEffects {
    _scroll: EventListener,
    _to_top: Option<EventListener>,
    pending: Rc<RefCell<Option<AnimationFrame>>>,
}

impl ScrollEffects {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &Config,
        parallax_enabled: bool,
    ) -> Self {
        let scroll_top = dom::by_id(document, "scrollToTop");
        let to_top = scroll_top.as_ref().map(|button| {
            let window = window.clone();
            EventListener::new(button, "click", move |_| scroll_to_top(&window))
        });

        let (floating_cards, parallax) = if parallax_enabled {
            let floating = if dom::query(document, ".hero").is_some() {
                dom::query_all(document, ".floating-card")
            } else {
                Vec::new()
            };
            let layers = dom::query_all(document, ".parallax")
                .into_iter()
                .map(|el| {
                    let speed = parallax_speed(el.get_attribute("data-speed").as_deref());
                    (el, speed)
                })
                .collect();
            (floating, layers)
        } else {
            log::debug!("Parallax disabled");
            (Vec::new(), Vec::new())
        };

        let fade = dom::query_all(document, ".fade-on-scroll")
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();

        let targets = Rc::new(Targets {
            window: window.clone(),
            scroll_top,
            threshold: config.scroll_top_threshold,
            floating_cards,
            parallax,
            fade,
        });
        let pending = Rc::new(RefCell::new(None));

        let scroll = {
            let targets = Rc::clone(&targets);
            let pending = Rc::clone(&pending);
            EventListener::new(window, "scroll", move |_| schedule(&targets, &pending))
        };
        schedule(&targets, &pending);

        Self {
            _scroll: scroll,
            _to_top: to_top,
            pending,
        }
    }
}

impl Drop for ScrollEffects {
    fn drop(&mut self) {
        // The pending frame holds the only other reference to its own slot.
        self.pending.borrow_mut().take();
    }
}

fn schedule(targets: &Rc<Targets>, pending: &Rc<RefCell<Option<AnimationFrame>>>) {
    let frame = {
        let targets = Rc::clone(targets);
        let pending = Rc::clone(pending);
        request_animation_frame(move |_| {
            pending.borrow_mut().take();
            targets.update();
        })
    };
    // Replacing the handle cancels the frame it held.
    *pending.borrow_mut() = Some(frame);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_top_appears_past_threshold() {
        assert!(!shows_scroll_top(0.0, 300.0));
        assert!(!shows_scroll_top(300.0, 300.0));
        assert!(shows_scroll_top(300.5, 300.0));
    }

    #[test]
    fn floating_cards_speed_up_by_index() {
        assert_eq!(floating_card_speed(0), 0.5);
        assert!((floating_card_speed(1) - 0.6).abs() < 1e-9);
        assert!((floating_card_speed(3) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn data_speed_defaults_to_half() {
        assert_eq!(parallax_speed(None), 0.5);
        assert_eq!(parallax_speed(Some("fast")), 0.5);
        assert_eq!(parallax_speed(Some("0.25")), 0.25);
        assert_eq!(parallax_speed(Some(" 1 ")), 1.0);
    }

    #[test]
    fn transform_is_scroll_times_speed() {
        assert_eq!(parallax_transform(400.0, 0.5), "translateY(200px)");
        assert_eq!(parallax_transform(0.0, 0.7), "translateY(0px)");
        assert_eq!(parallax_transform(91.0, 0.5), "translateY(45.5px)");
    }

    #[test]
    fn fade_needs_a_fifth_of_the_element_in_view() {
        // Element at 1000px, 200px tall: fade point is 1040px.
        assert!(!reached_fade_point(0.0, 1000.0, 1000.0, 200.0));
        assert!(!reached_fade_point(40.0, 1000.0, 1000.0, 200.0));
        assert!(reached_fade_point(41.0, 1000.0, 1000.0, 200.0));
    }
}
