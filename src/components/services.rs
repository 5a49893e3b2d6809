use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use web_sys::{Document, Element};

use crate::config::Config;
use crate::dom;

/// Category value that matches every card.
pub const ALL_CATEGORIES: &str = "all";

const FADE_IN: &str = "animate-fadeIn";
const LIFTED: &str = "translateY(-10px) scale(1.02)";
const RESTING: &str = "translateY(0) scale(1)";

pub fn card_visible(selected: &str, card_category: Option<&str>) -> bool {
    selected == ALL_CATEGORIES || card_category == Some(selected)
}

/// Indices of the cards that stay visible for `selected`.
pub fn visible_cards<'a>(
    selected: &str,
    categories: impl IntoIterator<Item = Option<&'a str>>,
) -> Vec<usize> {
    categories
        .into_iter()
        .enumerate()
        .filter(|(_, category)| card_visible(selected, *category))
        .map(|(i, _)| i)
        .collect()
}

/// `.service-card` hover lift and the `.category-btn` filter bar.
pub struct ServiceCards {
    _hover: Vec<EventListener>,
    _filters: Vec<EventListener>,
    _pending_fades: Rc<RefCell<Vec<Timeout>>>,
}

impl ServiceCards {
    pub fn mount(document: &Document, config: &Config) -> Self {
        let cards = dom::query_all(document, ".service-card");
        let buttons = dom::query_all(document, ".category-btn");
        let pending_fades = Rc::new(RefCell::new(Vec::new()));

        let hover = cards.iter().flat_map(hover_listeners).collect();
        let filters = if buttons.is_empty() || cards.is_empty() {
            Vec::new()
        } else {
            filter_listeners(
                Rc::new(buttons),
                Rc::new(cards),
                &pending_fades,
                config.filter_fade_delay_ms,
            )
        };

        Self {
            _hover: hover,
            _filters: filters,
            _pending_fades: pending_fades,
        }
    }
}

fn hover_listeners(card: &Element) -> [EventListener; 2] {
    let lift = card.clone();
    let rest = card.clone();
    [
        EventListener::new(card, "mouseenter", move |_| dom::set_style(&lift, "transform", LIFTED)),
        EventListener::new(card, "mouseleave", move |_| {
            dom::set_style(&rest, "transform", RESTING)
        }),
    ]
}

fn filter_listeners(
    buttons: Rc<Vec<Element>>,
    cards: Rc<Vec<Element>>,
    pending_fades: &Rc<RefCell<Vec<Timeout>>>,
    fade_delay_ms: u32,
) -> Vec<EventListener> {
    buttons
        .iter()
        .map(|button| {
            let clicked = button.clone();
            let buttons = Rc::clone(&buttons);
            let cards = Rc::clone(&cards);
            let pending_fades = Rc::clone(pending_fades);
            EventListener::new(button, "click", move |_| {
                for other in buttons.iter() {
                    dom::remove_class(other, "active");
                }
                dom::add_class(&clicked, "active");

                let selected = clicked.get_attribute("data-category").unwrap_or_default();
                apply_filter(&selected, &cards, &pending_fades, fade_delay_ms);
            })
        })
        .collect()
}

fn apply_filter(
    selected: &str,
    cards: &[Element],
    pending_fades: &RefCell<Vec<Timeout>>,
    fade_delay_ms: u32,
) {
    let categories: Vec<Option<String>> =
        cards.iter().map(|card| card.get_attribute("data-category")).collect();
    let shown = visible_cards(selected, categories.iter().map(Option::as_deref));

    // Fades still queued from an earlier click must not re-show hidden cards.
    let mut fades = pending_fades.borrow_mut();
    fades.clear();

    for (i, card) in cards.iter().enumerate() {
        if shown.contains(&i) {
            dom::set_style(card, "display", "block");
            let card = card.clone();
            fades.push(Timeout::new(fade_delay_ms, move || dom::add_class(&card, FADE_IN)));
        } else {
            dom::set_style(card, "display", "none");
            dom::remove_class(card, FADE_IN);
        }
    }
    log::info!("Showing {} of {} services for {:?}", shown.len(), cards.len(), selected);
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS: [Option<&str>; 5] =
        [Some("hosting"), Some("design"), Some("hosting"), None, Some("seo")];

    #[test]
    fn category_shows_only_matching_cards() {
        assert_eq!(visible_cards("hosting", CARDS), vec![0, 2]);
        assert_eq!(visible_cards("seo", CARDS), vec![4]);
    }

    #[test]
    fn all_shows_every_card() {
        assert_eq!(visible_cards(ALL_CATEGORIES, CARDS), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn unknown_category_hides_everything() {
        assert!(visible_cards("gaming", CARDS).is_empty());
    }

    #[test]
    fn untagged_cards_only_show_for_all() {
        assert!(!card_visible("", None));
        assert!(card_visible("all", None));
    }
}
