//! Thin lookups over `web_sys` so components can treat a missing element
//! as `None` instead of juggling `Result<Option<_>>`.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

use crate::error::StoreError;

pub fn window() -> Result<Window, StoreError> {
    web_sys::window().ok_or(StoreError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, StoreError> {
    window.document().ok_or(StoreError::NoDocument)
}

pub fn body(document: &Document) -> Result<HtmlElement, StoreError> {
    document.body().ok_or(StoreError::NoBody)
}

pub fn by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

/// `querySelector`, with an invalid selector treated like no match.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => elements(&list),
        Err(_) => {
            log::warn!("Invalid selector {:?}", selector);
            Vec::new()
        }
    }
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Sets an inline style property; a no-op for non-HTML elements.
pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        if let Err(err) = html.style().set_property(property, value) {
            log::warn!("Failed to set {}: {:?}", property, err);
        }
    }
}

pub fn add_class(element: &Element, class: &str) {
    if let Err(err) = element.class_list().add_1(class) {
        log::warn!("Failed to add class {}: {:?}", class, err);
    }
}

pub fn remove_class(element: &Element, class: &str) {
    if let Err(err) = element.class_list().remove_1(class) {
        log::warn!("Failed to remove class {}: {:?}", class, err);
    }
}

/// Flips `class` and returns whether it is now present.
pub fn toggle_class(element: &Element, class: &str) -> bool {
    element.class_list().toggle(class).unwrap_or_else(|err| {
        log::warn!("Failed to toggle class {}: {:?}", class, err);
        false
    })
}

/// Adds `class` when `on`, removes it otherwise.
pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        log::warn!("Failed to set class {}: {:?}", class, err);
    }
}

pub fn set_attribute(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        log::warn!("Failed to set {}: {:?}", name, err);
    }
}

/// Element children of `parent`, in document order.
pub fn children(parent: &Element) -> Vec<Element> {
    let children = parent.children();
    (0..children.length()).filter_map(|i| children.item(i)).collect()
}
