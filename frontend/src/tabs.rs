use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config::Config;
use crate::dom;

/// Buttons keyed by their `data-tab` value and panes by their id.
#[derive(Debug, Clone, Default)]
pub struct TabGroup {
    keys: Vec<Option<String>>,
    pane_ids: Vec<String>,
}

/// Which button and pane end up active. Everything else is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSelection {
    pub button: Option<usize>,
    pub pane: Option<usize>,
}

impl TabGroup {
    pub fn new(keys: Vec<Option<String>>, pane_ids: Vec<String>) -> Self {
        Self { keys, pane_ids }
    }

    pub fn activate(&self, button: usize) -> TabSelection {
        let Some(key) = self.keys.get(button) else {
            return TabSelection { button: None, pane: None };
        };
        let pane = key
            .as_deref()
            .and_then(|key| self.pane_ids.iter().position(|id| id == key));
        TabSelection { button: Some(button), pane }
    }
}

pub fn wire(_window: &Window, document: &Document, config: &Config) -> Result<(), JsValue> {
    let buttons = dom::query_all(document, &config.tab_button_selector)?;
    if buttons.is_empty() {
        debug!("No tabs found");
        return Ok(());
    }
    let panes = dom::query_all(document, &config.tab_pane_selector)?;
    let group = TabGroup::new(
        buttons.iter().map(|button| button.get_attribute("data-tab")).collect(),
        panes.iter().map(|pane| pane.id()).collect(),
    );

    for (index, button) in buttons.iter().enumerate() {
        let buttons = buttons.clone();
        let panes = panes.clone();
        let group = group.clone();
        let active = config.active_class.clone();
        dom::on(button, "click", move |_| {
            let selection = group.activate(index);
            for (i, button) in buttons.iter().enumerate() {
                let on = selection.button == Some(i);
                let _ = dom::set_class(button, &active, on);
                let _ = button.set_attribute("aria-selected", if on { "true" } else { "false" });
            }
            for (i, pane) in panes.iter().enumerate() {
                let _ = dom::set_class(pane, &active, selection.pane == Some(i));
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> TabGroup {
        TabGroup::new(
            vec![Some("features".into()), Some("pricing".into()), Some("faq".into()), None],
            vec!["features".into(), "pricing".into()],
        )
    }

    #[test]
    fn activating_pricing_selects_its_pair() {
        assert_eq!(
            group().activate(1),
            TabSelection { button: Some(1), pane: Some(1) }
        );
    }

    #[test]
    fn missing_pane_still_activates_button() {
        assert_eq!(group().activate(2), TabSelection { button: Some(2), pane: None });
        assert_eq!(group().activate(3), TabSelection { button: Some(3), pane: None });
    }

    #[test]
    fn unknown_button_clears_everything() {
        assert_eq!(group().activate(9), TabSelection { button: None, pane: None });
    }
}
