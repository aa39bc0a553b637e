use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config::Config;
use crate::dom;

/// Whether the navbar should carry the scrolled marker at `offset`.
pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

pub fn wire(window: &Window, document: &Document, config: &Config) -> Result<(), JsValue> {
    let Some(navbar) = dom::query(document, &config.navbar_selector) else {
        debug!("No navbar found, skipping scroll watcher");
        return Ok(());
    };

    let update = {
        let window = window.clone();
        let class = config.scrolled_class.clone();
        let threshold = config.scroll_threshold;
        move || {
            let offset = window.scroll_y().unwrap_or(0.0);
            let _ = dom::set_class(&navbar, &class, is_scrolled(offset, threshold));
        }
    };

    // Initial check
    update();
    dom::on_passive(window, "scroll", move |_| update())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
        assert!(is_scrolled(4000.0, 50.0));
    }

    #[test]
    fn repeated_offsets_agree() {
        for offset in [0.0, 49.0, 50.0, 51.0, 300.0] {
            assert_eq!(is_scrolled(offset, 50.0), is_scrolled(offset, 50.0));
            assert_eq!(is_scrolled(offset, 50.0), offset > 50.0);
        }
    }
}
