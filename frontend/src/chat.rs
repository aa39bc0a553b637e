use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config::Config;
use crate::dom;

/// Starts the chat demo's CSS animation once, shortly after load.
pub fn wire(_window: &Window, document: &Document, config: &Config) -> Result<(), JsValue> {
    let document = document.clone();
    let selector = config.chat_selector.clone();
    let class = config.chat_class.clone();
    let timeout = Timeout::new(config.chat_delay_ms, move || {
        match dom::query(&document, &selector) {
            Some(chat) => {
                let _ = dom::set_class(&chat, &class, true);
            }
            None => debug!("No chat demo found"),
        }
    });
    timeout.forget();
    Ok(())
}
