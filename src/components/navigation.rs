use gloo_events::{EventListener, EventListenerOptions};
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom;

const ACTIVE: &str = "active";

/// Index of the nav link that should be highlighted for `path`. When
/// several links point at the same path the last one wins.
pub fn active_link_index<'a>(
    hrefs: impl IntoIterator<Item = Option<&'a str>>,
    path: &str,
) -> Option<usize> {
    hrefs
        .into_iter()
        .enumerate()
        .filter(|(_, href)| *href == Some(path))
        .map(|(i, _)| i)
        .last()
}

/// Selector an in-page anchor scrolls to. A bare `#` has no target.
pub fn anchor_selector(href: &str) -> Option<&str> {
    if href.len() > 1 && href.starts_with('#') {
        Some(href)
    } else {
        None
    }
}

pub struct Navigation {
    _menu: Option<EventListener>,
    _anchors: Vec<EventListener>,
}

impl Navigation {
    pub fn mount(document: &Document, current_path: &str) -> Self {
        highlight_active_link(document, current_path);
        Self {
            _menu: mount_mobile_menu(document),
            _anchors: mount_smooth_anchors(document),
        }
    }
}

fn mount_mobile_menu(document: &Document) -> Option<EventListener> {
    let toggle = dom::by_id(document, "mobileMenuToggle")?;
    let menu = dom::query(document, ".nav-menu")?;
    let target = toggle.clone();
    Some(EventListener::new(&target, "click", move |_| {
        dom::toggle_class(&menu, ACTIVE);
        dom::toggle_class(&toggle, ACTIVE);
    }))
}

fn highlight_active_link(document: &Document, current_path: &str) {
    let links = dom::query_all(document, ".nav-link");
    let hrefs: Vec<Option<String>> = links.iter().map(|link| link.get_attribute("href")).collect();
    let Some(index) = active_link_index(hrefs.iter().map(Option::as_deref), current_path) else {
        return;
    };
    for link in &links {
        dom::remove_class(link, ACTIVE);
    }
    dom::add_class(&links[index], ACTIVE);
}

fn mount_smooth_anchors(document: &Document) -> Vec<EventListener> {
    dom::query_all(document, "a[href^=\"#\"]")
        .into_iter()
        .map(|anchor| {
            let document = document.clone();
            let href = anchor.get_attribute("href").unwrap_or_default();
            EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let target = anchor_selector(&href).and_then(|sel| dom::query(&document, sel));
                    if let Some(target) = target {
                        scroll_into_view(&target);
                    }
                },
            )
        })
        .collect()
}

fn scroll_into_view(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}
