//! Mobile navigation overlay.
//!
//! The open/closed state lives in the navbar's class list; every event reads
//! it back from there, runs it through [`MenuState::on`] and writes the result.

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, KeyboardEvent, Window};

use crate::config::Config;
use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle,
    OverlayClick,
    LinkClick,
    Escape,
}

impl MenuState {
    pub fn from_open(open: bool) -> Self {
        if open {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }

    pub fn on(self, event: MenuEvent) -> Self {
        match (self, event) {
            (MenuState::Closed, MenuEvent::Toggle) => MenuState::Open,
            (MenuState::Open, MenuEvent::Toggle) => MenuState::Closed,
            (_, MenuEvent::OverlayClick | MenuEvent::LinkClick | MenuEvent::Escape) => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

#[derive(Clone)]
struct Menu {
    document: Document,
    navbar: Element,
    burger: Option<Element>,
    open_class: String,
}

impl Menu {
    fn state(&self) -> MenuState {
        MenuState::from_open(dom::has_class(&self.navbar, &self.open_class))
    }

    fn dispatch(&self, event: MenuEvent) -> Result<(), JsValue> {
        let next = self.state().on(event);
        dom::set_class(&self.navbar, &self.open_class, next.is_open())?;
        if let Some(burger) = &self.burger {
            burger.set_attribute("aria-expanded", if next.is_open() { "true" } else { "false" })?;
        }
        if let Some(body) = self.document.body() {
            let lock = next.is_open().then_some("hidden");
            dom::style_property(&body, "overflow", lock)?;
        }
        Ok(())
    }
}

pub fn wire(_window: &Window, document: &Document, config: &Config) -> Result<(), JsValue> {
    let Some(navbar) = dom::query(document, &config.navbar_selector) else {
        debug!("No navbar found, skipping mobile menu");
        return Ok(());
    };
    let menu = Menu {
        document: document.clone(),
        navbar,
        burger: dom::query(document, &config.burger_selector),
        open_class: config.menu_open_class.clone(),
    };

    if let Some(burger) = &menu.burger {
        let menu = menu.clone();
        dom::on(burger, "click", move |e| {
            e.prevent_default();
            let _ = menu.dispatch(MenuEvent::Toggle);
        })?;
    } else {
        debug!("No burger button found");
    }

    if let Some(overlay) = dom::query(document, &config.overlay_selector) {
        let menu = menu.clone();
        dom::on(&overlay, "click", move |_| {
            let _ = menu.dispatch(MenuEvent::OverlayClick);
        })?;
    }

    for link in dom::query_all(document, &config.nav_link_selector)? {
        let menu = menu.clone();
        dom::on(&link, "click", move |_| {
            let _ = menu.dispatch(MenuEvent::LinkClick);
        })?;
    }

    dom::on(document, "keydown", move |e| {
        let escape = e
            .dyn_ref::<KeyboardEvent>()
            .map_or(false, |key| key.key() == "Escape");
        if escape && menu.state().is_open() {
            let _ = menu.dispatch(MenuEvent::Escape);
        }
    })
}
