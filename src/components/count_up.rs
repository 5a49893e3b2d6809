use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsValue;
use web_sys::js_sys::{Array, Function, Intl, Object};
use web_sys::{Document, Element, Window};

use crate::config::Config;
use crate::dom;
use crate::error::StoreError;
use crate::observer::{self, ObserverOptions, ViewportObserver};

/// Digits of `text` read as one integer, so `"1,200+"` counts to 1200.
/// `None` when there are no digits or the number does not fit.
pub fn parse_target(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// `,` every three digits. Used where `Intl` is unavailable.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Renders a count for display.
pub trait FormatCount {
    fn format_count(&self, value: u64) -> String;
}

/// Fixed `,` grouping, whatever the visitor's locale.
#[derive(Debug, Default, Clone, Copy)]
pub struct Grouped;

impl FormatCount for Grouped {
    fn format_count(&self, value: u64) -> String {
        format_thousands(value)
    }
}

/// Groups digits the way the visitor's default locale does, through
/// `Intl.NumberFormat`.
pub struct LocaleFormat {
    format: Function,
}

impl LocaleFormat {
    pub fn new() -> Self {
        let format = Intl::NumberFormat::new(&Array::new(), &Object::new()).format();
        Self { format }
    }
}

impl FormatCount for LocaleFormat {
    fn format_count(&self, value: u64) -> String {
        self.format
            .call1(&JsValue::NULL, &JsValue::from_f64(value as f64))
            .ok()
            .and_then(|text| text.as_string())
            .unwrap_or_else(|| format_thousands(value))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CountUp {
    end: u64,
    duration_ms: f64,
}

impl CountUp {
    pub fn new(end: u64, duration_ms: f64) -> Self {
        Self { end, duration_ms }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, elapsed_ms: f64) -> u64 {
        (self.end as f64 * self.progress(elapsed_ms)).floor() as u64
    }

    /// Text to show `elapsed_ms` into the animation and whether it is the
    /// last frame. The last frame always shows `end` exactly.
    pub fn frame(&self, elapsed_ms: f64, format: &dyn FormatCount) -> (String, bool) {
        if self.progress(elapsed_ms) >= 1.0 {
            (format.format_count(self.end), true)
        } else {
            (format.format_count(self.value_at(elapsed_ms)), false)
        }
    }
}

struct Run {
    element: Element,
    plan: CountUp,
    format: Rc<dyn FormatCount>,
    started_at: Cell<Option<f64>>,
    frame: RefCell<Option<AnimationFrame>>,
}

fn step(run: &Rc<Run>) {
    let next = Rc::clone(run);
    let frame = request_animation_frame(move |now| {
        next.frame.borrow_mut().take();
        let start = next.started_at.get().unwrap_or(now);
        next.started_at.set(Some(start));

        let (text, done) = next.plan.frame(now - start, next.format.as_ref());
        next.element.set_text_content(Some(&text));
        if !done {
            step(&next);
        }
    });
    *run.frame.borrow_mut() = Some(frame);
}

/// Counts `.stat-number` figures up from zero the first time each one
/// scrolls into view.
pub struct CountUpStats {
    _observer: ViewportObserver,
    runs: Rc<RefCell<Vec<Rc<Run>>>>,
}

impl CountUpStats {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &Config,
    ) -> Result<Option<Self>, StoreError> {
        let stats = dom::query_all(document, ".stat-number");
        if stats.is_empty() || !observer::supported(window) {
            return Ok(None);
        }

        let runs: Rc<RefCell<Vec<Rc<Run>>>> = Rc::new(RefCell::new(Vec::new()));
        let duration_ms = config.count_up_duration_ms;
        let format: Rc<dyn FormatCount> = Rc::new(LocaleFormat::new());
        let observer = {
            let runs = Rc::clone(&runs);
            ViewportObserver::new(ObserverOptions::default(), move |element| {
                let text = element.text_content().unwrap_or_default();
                let Some(end) = parse_target(&text) else {
                    log::debug!("No number in stat {:?}, leaving it as is", text);
                    return;
                };
                let run = Rc::new(Run {
                    element,
                    plan: CountUp::new(end, duration_ms),
                    format: Rc::clone(&format),
                    started_at: Cell::new(None),
                    frame: RefCell::new(None),
                });
                step(&run);
                let mut runs = runs.borrow_mut();
                runs.retain(|run| run.frame.borrow().is_some());
                runs.push(run);
            })?
        };
        observer.observe_all(&stats);

        Ok(Some(Self {
            _observer: observer,
            runs,
        }))
    }
}

impl Drop for CountUpStats {
    fn drop(&mut self) {
        for run in self.runs.borrow().iter() {
            run.frame.borrow_mut().take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Grouping as a `de-DE` visitor would see it.
    struct Dotted;

    impl FormatCount for Dotted {
        fn format_count(&self, value: u64) -> String {
            format_thousands(value).replace(',', ".")
        }
    }

    #[test]
    fn target_ignores_formatting() {
        assert_eq!(parse_target("1,200+"), Some(1200));
        assert_eq!(parse_target("98%"), Some(98));
        assert_eq!(parse_target(" 24/7 "), Some(247));
        assert_eq!(parse_target("Many"), None);
        assert_eq!(parse_target(""), None);
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1200), "1,200");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn halfway_shows_half_the_target() {
        let plan = CountUp::new(1200, 2000.0);
        assert_eq!(plan.progress(1000.0), 0.5);
        assert_eq!(plan.value_at(1000.0), 600);
        assert_eq!(plan.frame(1000.0, &Grouped), ("600".to_string(), false));
    }

    #[test]
    fn values_are_floored() {
        let plan = CountUp::new(7, 2000.0);
        assert_eq!(plan.value_at(1000.0), 3);
    }

    #[test]
    fn finishes_exactly_on_target() {
        let plan = CountUp::new(1200, 2000.0);
        assert_eq!(plan.frame(2000.0, &Grouped), ("1,200".to_string(), true));
        assert_eq!(plan.frame(5000.0, &Grouped), ("1,200".to_string(), true));
    }

    #[test]
    fn progress_is_clamped() {
        let plan = CountUp::new(50, 2000.0);
        assert_eq!(plan.progress(-10.0), 0.0);
        assert_eq!(plan.frame(0.0, &Grouped), ("0".to_string(), false));
        assert_eq!(CountUp::new(50, 0.0).frame(0.0, &Grouped), ("50".to_string(), true));
    }

    #[test]
    fn frames_use_the_given_locale_grouping() {
        let plan = CountUp::new(1200, 2000.0);
        assert_eq!(plan.frame(2000.0, &Dotted), ("1.200".to_string(), true));
        assert_eq!(plan.frame(1000.0, &Dotted), ("600".to_string(), false));
        let big = CountUp::new(2_500_000, 2000.0);
        assert_eq!(big.frame(1000.0, &Dotted), ("1.250.000".to_string(), false));
    }
}
