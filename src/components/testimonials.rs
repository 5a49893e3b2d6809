use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use web_sys::{Document, Element};

use crate::config::Config;
use crate::dom;

/// Index of the one visible slide in a fixed-size carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotator {
    len: usize,
    current: usize,
}

impl Rotator {
    /// `None` for an empty carousel.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, current: 0 })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }
}

fn show_slide(cards: &[Element], index: usize) {
    for (i, card) in cards.iter().enumerate() {
        dom::set_style(card, "display", if i == index { "block" } else { "none" });
    }
}

/// Rotates `.review-card` elements on a fixed interval.
pub struct Testimonials {
    interval: Option<Interval>,
}

impl Testimonials {
    pub fn mount(document: &Document, config: &Config) -> Option<Self> {
        let cards = dom::query_all(document, ".review-card");
        let rotator = Rotator::new(cards.len())?;
        show_slide(&cards, rotator.current());

        let rotator = Rc::new(RefCell::new(rotator));
        let interval = Interval::new(config.testimonial_interval_ms, move || {
            let index = rotator.borrow_mut().advance();
            show_slide(&cards, index);
        });

        Some(Self {
            interval: Some(interval),
        })
    }

    /// Leaves the current slide in place and stops rotating.
    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            log::debug!("Testimonial rotation stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_carousel_has_no_rotator() {
        assert_eq!(Rotator::new(0), None);
    }

    #[test]
    fn starts_on_first_slide() {
        assert_eq!(Rotator::new(4).map(|r| r.current()), Some(0));
    }

    #[test]
    fn wraps_back_to_first_after_a_full_cycle() {
        let mut rotator = Rotator::new(3).unwrap();
        assert_eq!(rotator.advance(), 1);
        assert_eq!(rotator.advance(), 2);
        assert_eq!(rotator.advance(), 0);
    }

    #[test]
    fn index_is_firings_mod_count() {
        let mut rotator = Rotator::new(5).unwrap();
        for n in 1..=23 {
            assert_eq!(rotator.advance(), n % 5);
        }
    }

    #[test]
    fn single_slide_stays_put() {
        let mut rotator = Rotator::new(1).unwrap();
        assert_eq!(rotator.advance(), 0);
        assert_eq!(rotator.advance(), 0);
    }
}
