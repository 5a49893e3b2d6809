use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys::js_sys::{Function, Object, Reflect};
use web_sys::Window;

use crate::analytics::Analytics;
use crate::components::scroll;
use crate::components::theme::ThemeController;
use crate::error::StoreError;
use crate::timing;
use crate::validation;

pub const GLOBAL_NAME: &str = "NtandoStore";

fn set(target: &JsValue, key: &str, value: JsValue) -> Result<(), StoreError> {
    Reflect::set(target, &JsValue::from_str(key), &value)?;
    Ok(())
}

/// Publishes `window.NtandoStore` for inline scripts and tests.
/// JS callers may pass anything; values that are not strings never
/// validate.
fn text_passes(value: Option<String>, check: fn(&str) -> bool) -> bool {
    value.map_or(false, |text| check(&text))
}

pub fn install(
    window: &Window,
    theme: Rc<ThemeController>,
    analytics: Analytics,
) -> Result<(), StoreError> {
    let api: JsValue = Object::new().into();

    set(
        &api,
        "toggleTheme",
        Closure::<dyn Fn()>::new(move || theme.toggle()).into_js_value(),
    )?;

    let scroll_window = window.clone();
    set(
        &api,
        "scrollToTop",
        Closure::<dyn Fn()>::new(move || scroll::scroll_to_top(&scroll_window)).into_js_value(),
    )?;

    set(
        &api,
        "trackEvent",
        Closure::<dyn Fn(String, JsValue)>::new(move |name: String, properties: JsValue| {
            let properties = if properties.is_undefined() {
                Object::new().into()
            } else {
                properties
            };
            analytics.track(&name, &properties);
        })
        .into_js_value(),
    )?;

    set(
        &api,
        "validateEmail",
        Closure::<dyn Fn(JsValue) -> bool>::new(|email: JsValue| {
            text_passes(email.as_string(), validation::validate_email)
        })
        .into_js_value(),
    )?;
    set(
        &api,
        "validatePhone",
        Closure::<dyn Fn(JsValue) -> bool>::new(|phone: JsValue| {
            text_passes(phone.as_string(), validation::validate_phone)
        })
        .into_js_value(),
    )?;

    set(
        &api,
        "debounce",
        Closure::<dyn Fn(Function, u32) -> JsValue>::new(timing::debounce_js).into_js_value(),
    )?;
    set(
        &api,
        "throttle",
        Closure::<dyn Fn(Function, u32) -> JsValue>::new(timing::throttle_js).into_js_value(),
    )?;

    set(window, GLOBAL_NAME, api)?;
    log::debug!("window.{} installed", GLOBAL_NAME);
    Ok(())
}
