//! Stat counters that count up once the stats section scrolls into view.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Number;
use web_sys::{Document, Element, Window};

use crate::config::Config;
use crate::{dom, observer};

/// Target declared in `data-count`. Anything that isn't a non-negative integer counts as 0.
pub fn parse_target(attr: Option<&str>) -> u64 {
    attr.and_then(|value| value.trim().parse().ok()).unwrap_or(0)
}

pub fn ease_out_quad(p: f64) -> f64 {
    1.0 - (1.0 - p) * (1.0 - p)
}

pub fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

pub fn displayed(target: u64, p: f64) -> u64 {
    if p >= 1.0 {
        return target;
    }
    ((target as f64) * ease_out_quad(p)).floor() as u64
}

/// Comma-grouped digits, used when the host can't format for a locale.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn format_count(value: u64, locale: &str) -> String {
    let formatted: String = Number::from(value as f64).to_locale_string(locale).into();
    if formatted.is_empty() {
        group_thousands(value)
    } else {
        formatted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub value: u64,
    pub done: bool,
}

/// State of one running counter. The clock starts at the first frame.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    duration: f64,
    start: Option<f64>,
}

impl CounterAnimation {
    pub fn new(target: u64, duration: f64) -> Self {
        Self { target, duration, start: None }
    }

    pub fn frame(&mut self, now: f64) -> Frame {
        let start = *self.start.get_or_insert(now);
        let p = progress(now - start, self.duration);
        Frame {
            value: displayed(self.target, p),
            done: p >= 1.0,
        }
    }
}

fn animate(window: &Window, element: Element, mut animation: CounterAnimation, locale: String) -> Result<(), JsValue> {
    let handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = handle.clone();
    let frame_window = window.clone();

    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let frame = animation.frame(now);
        element.set_text_content(Some(&format_count(frame.value, &locale)));
        if frame.done {
            // Drop our own closure to end the loop.
            let _ = next.borrow_mut().take();
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            let _ = frame_window.request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = handle.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

pub fn wire(window: &Window, document: &Document, config: &Config) -> Result<(), JsValue> {
    let Some(stats) = dom::query(document, &config.stats_selector) else {
        debug!("No stats section found, skipping counters");
        return Ok(());
    };
    let counters = dom::query_all_in(&stats, &config.counter_selector)?;
    if counters.is_empty() {
        return Ok(());
    }

    let observer = observer::for_threshold(window, config.counter_threshold)?;
    let window = window.clone();
    let duration = config.counter_duration_ms;
    let locale = config.locale.clone();
    observer.observe(
        &stats,
        Box::new(move |_: Element| {
            let reduced_motion = dom::prefers_reduced_motion(&window);
            debug!("Stats visible, starting {} counters", counters.len());
            for counter in counters {
                let target = parse_target(counter.get_attribute("data-count").as_deref());
                if reduced_motion {
                    counter.set_text_content(Some(&format_count(target, &locale)));
                    continue;
                }
                let animation = CounterAnimation::new(target, duration);
                if let Err(e) = animate(&window, counter, animation, locale.clone()) {
                    debug!("Counter animation not started: {:?}", e);
                }
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_targets_default_to_zero() {
        assert_eq!(parse_target(None), 0);
        assert_eq!(parse_target(Some("")), 0);
        assert_eq!(parse_target(Some("abc")), 0);
        assert_eq!(parse_target(Some("-5")), 0);
        assert_eq!(parse_target(Some("12.5")), 0);
        assert_eq!(parse_target(Some(" 1234 ")), 1234);
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress(-10.0, 2000.0), 0.0);
        assert_eq!(progress(1000.0, 2000.0), 0.5);
        assert_eq!(progress(5000.0, 2000.0), 1.0);
        assert_eq!(progress(0.0, 0.0), 1.0);
    }

    #[test]
    fn counter_starts_at_zero_and_ends_exactly_on_target() {
        let mut animation = CounterAnimation::new(1234, 2000.0);
        let first = animation.frame(500.0);
        assert_eq!(first, Frame { value: 0, done: false });

        let last = animation.frame(2500.0);
        assert_eq!(last, Frame { value: 1234, done: true });
        assert_eq!(group_thousands(last.value), "1,234");
    }

    #[test]
    fn displayed_values_never_decrease_or_overshoot() {
        let mut animation = CounterAnimation::new(1234, 2000.0);
        let mut previous = 0;
        let mut now = 100.0;
        loop {
            let frame = animation.frame(now);
            assert!(frame.value >= previous);
            assert!(frame.value <= 1234);
            previous = frame.value;
            if frame.done {
                break;
            }
            now += 16.7;
        }
        assert_eq!(previous, 1234);
    }

    #[test]
    fn halfway_follows_the_curve() {
        assert_eq!(displayed(1000, 0.5), 750);
        assert_eq!(displayed(3, 0.5), 2);
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
