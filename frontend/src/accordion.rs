use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config::Config;
use crate::dom;

/// Open flags for one accordion group; at most one item is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    open: Vec<bool>,
}

impl Accordion {
    pub fn from_open(open: Vec<bool>) -> Self {
        Self { open }
    }

    /// Clicking an open item closes it; clicking any other leaves only that one open.
    pub fn toggle(&mut self, index: usize) {
        let was_open = self.open.get(index).copied().unwrap_or(false);
        self.open.iter_mut().for_each(|open| *open = false);
        if !was_open {
            if let Some(open) = self.open.get_mut(index) {
                *open = true;
            }
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|open| **open).count()
    }
}

pub fn wire(_window: &Window, document: &Document, config: &Config) -> Result<(), JsValue> {
    let items = dom::query_all(document, &config.accordion_item_selector)?;
    if items.is_empty() {
        debug!("No accordion items found");
        return Ok(());
    }

    for (index, item) in items.iter().enumerate() {
        let Some(trigger) = dom::query_all_in(item, &config.accordion_trigger_selector)?.into_iter().next() else {
            continue;
        };
        let items = items.clone();
        let class = config.active_class.clone();
        let trigger_selector = config.accordion_trigger_selector.clone();
        dom::on(&trigger, "click", move |_| {
            let mut accordion = Accordion::from_open(items.iter().map(|item| dom::has_class(item, &class)).collect());
            accordion.toggle(index);
            for (i, item) in items.iter().enumerate() {
                let open = accordion.is_open(i);
                let _ = dom::set_class(item, &class, open);
                if let Ok(Some(trigger)) = item.query_selector(&trigger_selector) {
                    let _ = trigger.set_attribute("aria-expanded", if open { "true" } else { "false" });
                }
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_a_closed_item_closes_the_rest() {
        // A closed, B open.
        let mut accordion = Accordion::from_open(vec![false, true]);
        accordion.toggle(0);
        assert!(accordion.is_open(0));
        assert!(!accordion.is_open(1));

        accordion.toggle(0);
        assert_eq!(accordion.open_count(), 0);
    }

    #[test]
    fn at_most_one_item_open() {
        let mut accordion = Accordion::from_open(vec![false; 4]);
        for index in [2, 0, 3, 3, 1] {
            accordion.toggle(index);
            assert!(accordion.open_count() <= 1);
        }
        assert!(accordion.is_open(1));
    }

    #[test]
    fn out_of_range_closes_all() {
        let mut accordion = Accordion::from_open(vec![true, false]);
        accordion.toggle(5);
        assert_eq!(accordion.open_count(), 0);
    }
}
