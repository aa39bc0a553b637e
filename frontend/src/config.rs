use log::{warn, Level};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Name of the optional global object a page can set to override defaults.
pub const OVERRIDE_KEY: &str = "landingConfig";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Development builds
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Selectors, marker classes and timing constants for every behavior.
///
/// The defaults match the markup the landing page ships with. A page may
/// override any subset by defining `window.landingConfig` before the wasm
/// bundle loads; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub navbar_selector: String,
    pub scrolled_class: String,
    pub scroll_threshold: f64,

    pub burger_selector: String,
    pub overlay_selector: String,
    pub nav_link_selector: String,
    pub menu_open_class: String,

    pub anchor_selector: String,
    pub header_offset: f64,

    pub stats_selector: String,
    pub counter_selector: String,
    pub counter_duration_ms: f64,
    pub counter_threshold: f64,
    pub locale: String,

    pub tab_button_selector: String,
    pub tab_pane_selector: String,
    pub active_class: String,

    pub accordion_item_selector: String,
    pub accordion_trigger_selector: String,

    pub reveal_selector: String,
    pub reveal_threshold: f64,

    pub chat_selector: String,
    pub chat_class: String,
    pub chat_delay_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            navbar_selector: "#navbar".to_string(),
            scrolled_class: "scrolled".to_string(),
            scroll_threshold: 50.0,

            burger_selector: "#burger".to_string(),
            overlay_selector: "#nav-overlay".to_string(),
            nav_link_selector: "#navbar a".to_string(),
            menu_open_class: "menu-open".to_string(),

            anchor_selector: "a[href^=\"#\"]".to_string(),
            header_offset: 80.0,

            stats_selector: ".stats".to_string(),
            counter_selector: "[data-count]".to_string(),
            counter_duration_ms: 2000.0,
            counter_threshold: 0.2,
            locale: "en-US".to_string(),

            tab_button_selector: ".tab-btn".to_string(),
            tab_pane_selector: ".tab-pane".to_string(),
            active_class: "active".to_string(),

            accordion_item_selector: ".accordion-item".to_string(),
            accordion_trigger_selector: ".accordion-header".to_string(),

            reveal_selector: "[data-aos]".to_string(),
            reveal_threshold: 0.1,

            chat_selector: ".chat-demo".to_string(),
            chat_class: "animate".to_string(),
            chat_delay_ms: 500,
        }
    }
}

impl Config {
    /// Defaults merged with `window.landingConfig`, if the page defines one.
    pub fn load(window: &Window) -> Self {
        let value = match web_sys::js_sys::Reflect::get(window, &JsValue::from_str(OVERRIDE_KEY)) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };
        if value.is_undefined() || value.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value::<Config>(value) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", OVERRIDE_KEY, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_markup() {
        let config = Config::default();
        assert_eq!(config.scroll_threshold, 50.0);
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.counter_duration_ms, 2000.0);
        assert_eq!(config.counter_threshold, 0.2);
        assert_eq!(config.reveal_threshold, 0.1);
        assert_eq!(config.chat_delay_ms, 500);
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "scrollThreshold": 120, "navbarSelector": ".top-nav", "somethingElse": true }"#,
        )
        .unwrap();
        assert_eq!(config.scroll_threshold, 120.0);
        assert_eq!(config.navbar_selector, ".top-nav");
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.menu_open_class, "menu-open");
    }

    #[test]
    fn empty_override_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
