use web_sys::{Document, Window};

use crate::dom;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Turns off CSS transitions and resets parallax layers. Callers are
/// responsible for not starting motion of their own.
pub fn apply_reduced_motion(document: &Document) {
    if let Some(root) = document.document_element() {
        dom::set_style(&root, "--transition", "none");
    }
    for layer in dom::query_all(document, ".parallax") {
        dom::set_style(&layer, "transform", "none");
    }
    log::debug!("Reduced motion applied");
}
