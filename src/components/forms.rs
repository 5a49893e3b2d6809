use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::dom;
use crate::validation::{FormErrors, RequiredField};

const ERROR_CLASS: &str = "error-message";
const ERROR_COLOR: &str = "#e74c3c";

/// Owned copy of a form control's current state.
struct FieldValue {
    value: String,
    input_type: String,
    name: String,
}

impl FieldValue {
    fn read(element: &Element) -> Self {
        let (value, input_type) = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            (input.value(), input.type_())
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            (select.value(), select.type_())
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            (area.value(), area.type_())
        } else {
            (element.get_attribute("value").unwrap_or_default(), String::new())
        };
        Self {
            value,
            input_type,
            name: element.get_attribute("name").unwrap_or_default(),
        }
    }

    fn as_required(&self) -> RequiredField<'_> {
        RequiredField {
            value: &self.value,
            input_type: &self.input_type,
            name: &self.name,
        }
    }
}

/// Client-side checks for every `<form>` on the page.
pub struct FormValidation {
    _listeners: Vec<EventListener>,
}

impl FormValidation {
    pub fn mount(document: &Document) -> Self {
        let listeners = dom::query_all(document, "form")
            .iter()
            .flat_map(mount_form)
            .collect();
        Self {
            _listeners: listeners,
        }
    }
}

fn mount_form(form: &Element) -> Vec<EventListener> {
    let required = Rc::new(dom::query_all_in(form, "[required]"));
    let mut listeners = Vec::new();

    {
        let required = Rc::clone(&required);
        listeners.push(EventListener::new_with_options(
            form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let values: Vec<FieldValue> = required.iter().map(FieldValue::read).collect();
                let fields: Vec<RequiredField<'_>> =
                    values.iter().map(FieldValue::as_required).collect();

                let mut errors = FormErrors::default();
                let valid = errors.submit(&fields);
                for (index, field) in required.iter().enumerate() {
                    match errors.error(index) {
                        Some(error) => show_error(field, error.message()),
                        None => clear_error(field),
                    }
                }
                if !valid {
                    event.prevent_default();
                    log::info!("Form submit blocked, {} field(s) need attention", errors.count());
                }
            },
        ));
    }

    for control in dom::query_all_in(form, "input, select, textarea") {
        let field = control.clone();
        listeners.push(EventListener::new(&control, "input", move |_| clear_error(&field)));
    }

    listeners
}

fn show_error(field: &Element, message: &str) {
    clear_error(field);
    let Some(document) = field.owner_document() else {
        return;
    };
    let Ok(error) = document.create_element("div") else {
        return;
    };
    error.set_class_name(ERROR_CLASS);
    error.set_text_content(Some(message));
    dom::set_style(&error, "color", ERROR_COLOR);
    dom::set_style(&error, "font-size", "0.9rem");
    dom::set_style(&error, "margin-top", "0.25rem");

    if let Err(err) = field.after_with_node_1(&error) {
        gloo_console::warn!("Could not show field error:", err);
        return;
    }
    dom::set_style(field, "border-color", ERROR_COLOR);
}

/// A child of the element that holds a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Child {
    ErrorMessage,
    Other,
}

/// Position among `children` of the message owned by the control at
/// `field`. `show_error` inserts a message right after its control, so only
/// a message in that slot is the control's own.
fn owned_message(children: &[Child], field: usize) -> Option<usize> {
    let next = field.checked_add(1)?;
    (children.get(next) == Some(&Child::ErrorMessage)).then_some(next)
}

fn clear_error(field: &Element) {
    if let Some(parent) = field.parent_element() {
        let children = dom::children(&parent);
        let kinds: Vec<Child> = children
            .iter()
            .map(|child| {
                if child.class_list().contains(ERROR_CLASS) {
                    Child::ErrorMessage
                } else {
                    Child::Other
                }
            })
            .collect();
        let own = children
            .iter()
            .position(|child| child == field)
            .and_then(|at| owned_message(&kinds, at));
        if let Some(index) = own {
            children[index].remove();
        }
    }
    dom::set_style(field, "border-color", "");
}
