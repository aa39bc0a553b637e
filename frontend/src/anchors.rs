use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, ScrollBehavior, ScrollToOptions, Window};

use crate::config::Config;
use crate::dom;

/// The element id an in-page link points at, or `None` for a bare `#`.
pub fn fragment_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Page offset to scroll to so the target lands just below the fixed header.
pub fn scroll_destination(element_top: f64, scroll_offset: f64, header_offset: f64) -> f64 {
    element_top + scroll_offset - header_offset
}

pub fn wire(window: &Window, document: &Document, config: &Config) -> Result<(), JsValue> {
    let anchors = dom::query_all(document, &config.anchor_selector)?;
    debug!("Intercepting {} in-page anchors", anchors.len());

    for anchor in anchors {
        let window = window.clone();
        let document = document.clone();
        let header_offset = config.header_offset;
        let link = anchor.clone();
        dom::on(&anchor, "click", move |e| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(id) = fragment_target(&href) else {
                return;
            };
            let Some(target) = document.get_element_by_id(id) else {
                return;
            };
            e.prevent_default();

            let top = target.get_bounding_client_rect().top();
            let scroll_offset = window.scroll_y().unwrap_or(0.0);
            let options = ScrollToOptions::new();
            options.set_top(scroll_destination(top, scroll_offset, header_offset));
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_empty_fragments_are_ignored() {
        assert_eq!(fragment_target(""), None);
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("/pricing"), None);
    }

    #[test]
    fn fragment_names_the_target() {
        assert_eq!(fragment_target("#features"), Some("features"));
        assert_eq!(fragment_target("#faq-2"), Some("faq-2"));
    }

    #[test]
    fn destination_clears_the_header() {
        assert_eq!(scroll_destination(400.0, 0.0, 80.0), 320.0);
        assert_eq!(scroll_destination(250.0, 1000.0, 80.0), 1170.0);
        // Target already scrolled past.
        assert_eq!(scroll_destination(-600.0, 1000.0, 80.0), 320.0);
    }
}
