//! One-shot visibility observation.
//!
//! Every element handed to a [`OnceObserver`] gets its callback run at most
//! once, the first time it is at least `threshold` visible, and is then
//! dropped from observation for good. Browsers with `IntersectionObserver`
//! use [`IntersectionBackend`]; anything else falls back to [`PollBackend`],
//! which measures bounding rects on scroll and resize.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::dom;

pub type Callback = Box<dyn FnOnce(Element)>;

pub trait OnceObserver {
    fn observe(&self, element: &Element, callback: Callback) -> Result<(), JsValue>;
}

/// Picks the intersection backend when the host has one, polling otherwise.
pub fn for_threshold(window: &Window, threshold: f64) -> Result<Rc<dyn OnceObserver>, JsValue> {
    let supported = Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
    if supported {
        Ok(Rc::new(IntersectionBackend::new(threshold)?))
    } else {
        debug!("IntersectionObserver unavailable, polling visibility");
        Ok(Rc::new(PollBackend::new(window.clone(), threshold)))
    }
}

/// Slots that can each be taken exactly once.
#[derive(Debug)]
pub struct OnceSet<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for OnceSet<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> OnceSet<T> {
    pub fn insert(&mut self, value: T) -> usize {
        self.slots.push(Some(value));
        self.slots.len() - 1
    }

    /// Returns the value the first time `id` is taken and `None` ever after.
    pub fn take(&mut self, id: usize) -> Option<T> {
        self.slots.get_mut(id).and_then(Option::take)
    }

    pub fn position(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().map_or(false, &mut pred))
    }

    pub fn pending(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|value| (id, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Fraction of an element's height inside a viewport of `viewport_height`,
/// given the element's top and bottom relative to the viewport top.
pub fn visible_ratio(top: f64, bottom: f64, viewport_height: f64) -> f64 {
    let height = bottom - top;
    if height <= 0.0 {
        return if top >= 0.0 && top <= viewport_height { 1.0 } else { 0.0 };
    }
    let visible = bottom.min(viewport_height) - top.max(0.0);
    (visible / height).clamp(0.0, 1.0)
}

type Pending = Rc<RefCell<OnceSet<(Element, Callback)>>>;

fn fire(pending: &Pending, id: usize) {
    // Release the borrow before running the callback; it may observe more elements.
    let taken = pending.borrow_mut().take(id);
    if let Some((element, callback)) = taken {
        callback(element);
    }
}

pub struct IntersectionBackend {
    observer: IntersectionObserver,
    pending: Pending,
}

impl IntersectionBackend {
    pub fn new(threshold: f64) -> Result<Self, JsValue> {
        let pending: Pending = Rc::default();
        let on_entries = {
            let pending = pending.clone();
            Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    let id = pending.borrow().position(|(element, _)| *element == target);
                    if let Some(id) = id {
                        fire(&pending, id);
                    }
                }
                if pending.borrow().is_empty() {
                    observer.disconnect();
                }
            }) as Box<dyn FnMut(Array, IntersectionObserver)>)
        };

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer = IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &options)?;
        on_entries.forget();

        Ok(Self { observer, pending })
    }
}

impl OnceObserver for IntersectionBackend {
    fn observe(&self, element: &Element, callback: Callback) -> Result<(), JsValue> {
        self.pending.borrow_mut().insert((element.clone(), callback));
        self.observer.observe(element);
        Ok(())
    }
}

pub struct PollBackend {
    window: Window,
    threshold: f64,
    pending: Pending,
    listening: Cell<bool>,
}

impl PollBackend {
    pub fn new(window: Window, threshold: f64) -> Self {
        Self {
            window,
            threshold,
            pending: Rc::default(),
            listening: Cell::new(false),
        }
    }

    fn listen(&self) -> Result<(), JsValue> {
        if self.listening.replace(true) {
            return Ok(());
        }
        for event in ["scroll", "resize"] {
            let window = self.window.clone();
            let pending = self.pending.clone();
            let threshold = self.threshold;
            dom::on_passive(&self.window, event, move |_| poll(&window, threshold, &pending))?;
        }
        Ok(())
    }
}

fn poll(window: &Window, threshold: f64, pending: &Pending) {
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or(0.0);
    let ready: Vec<usize> = pending
        .borrow()
        .pending()
        .filter(|(_, (element, _))| {
            let rect = element.get_bounding_client_rect();
            let ratio = visible_ratio(rect.top(), rect.bottom(), viewport_height);
            ratio > 0.0 && ratio >= threshold
        })
        .map(|(id, _)| id)
        .collect();
    for id in ready {
        fire(pending, id);
    }
}

impl OnceObserver for PollBackend {
    fn observe(&self, element: &Element, callback: Callback) -> Result<(), JsValue> {
        self.pending.borrow_mut().insert((element.clone(), callback));
        self.listen()?;
        poll(&self.window, self.threshold, &self.pending);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_set_yields_each_value_once() {
        let mut set = OnceSet::default();
        let a = set.insert("a");
        let b = set.insert("b");
        assert_eq!(set.take(a), Some("a"));
        assert_eq!(set.take(a), None);
        assert!(!set.is_empty());
        assert_eq!(set.pending().map(|(id, _)| id).collect::<Vec<_>>(), vec![b]);
        assert_eq!(set.take(b), Some("b"));
        assert!(set.is_empty());
        assert_eq!(set.take(42), None);
    }

    #[test]
    fn position_skips_taken_slots() {
        let mut set = OnceSet::default();
        let first = set.insert(7);
        set.insert(7);
        set.take(first);
        assert_eq!(set.position(|v| *v == 7), Some(1));
    }

    #[test]
    fn visible_ratio_bounds() {
        // Below the fold.
        assert_eq!(visible_ratio(900.0, 1100.0, 800.0), 0.0);
        // Above the viewport.
        assert_eq!(visible_ratio(-300.0, -100.0, 800.0), 0.0);
        // Fully inside.
        assert_eq!(visible_ratio(100.0, 300.0, 800.0), 1.0);
    }

    #[test]
    fn visible_ratio_partial() {
        assert!((visible_ratio(700.0, 900.0, 800.0) - 0.5).abs() < 1e-9);
        assert!((visible_ratio(-150.0, 50.0, 800.0) - 0.25).abs() < 1e-9);
        // Taller than the viewport.
        assert!((visible_ratio(-400.0, 1200.0, 800.0) - 0.5).abs() < 1e-9);
    }
}
