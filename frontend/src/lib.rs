//! Interactivity for the static landing page.
//!
//! The page markup is served as-is; this crate attaches the behaviors once
//! the document is parsed. Each behavior is independent and only touches
//! class lists, inline styles and text content.

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Window};

pub mod accordion;
pub mod anchors;
pub mod chat;
pub mod config;
pub mod counters;
pub mod dom;
pub mod menu;
pub mod navbar;
pub mod observer;
pub mod reveal;
pub mod tabs;

use config::Config;

type Wire = fn(&Window, &Document, &Config) -> Result<(), JsValue>;

const BEHAVIORS: [(&str, Wire); 8] = [
    ("navbar", navbar::wire),
    ("menu", menu::wire),
    ("anchors", anchors::wire),
    ("counters", counters::wire),
    ("tabs", tabs::wire),
    ("accordion", accordion::wire),
    ("reveal", reveal::wire),
    ("chat", chat::wire),
];

/// Wires every behavior against an already parsed document.
///
/// A behavior that fails to wire is logged and skipped; the rest still run.
pub fn init(window: &Window, document: &Document, config: &Config) {
    for (name, wire) in BEHAVIORS {
        match wire(window, document, config) {
            Ok(()) => debug!("Wired {}", name),
            Err(e) => warn!("Failed to wire {}: {:?}", name, e),
        }
    }
}

/// Runs [`init`] now, or on `DOMContentLoaded` if the document is still loading.
pub fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let config = Config::load(&window);

    if document.ready_state() != "loading" {
        info!("Document ready, attaching behaviors");
        init(&window, &document, &config);
        return Ok(());
    }

    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let ready = {
        let window = window.clone();
        let document = document.clone();
        Closure::once(move || {
            info!("DOMContentLoaded, attaching behaviors");
            init(&window, &document, &config);
        })
    };
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        ready.as_ref().unchecked_ref(),
        &options,
    )?;
    ready.forget();
    Ok(())
}
