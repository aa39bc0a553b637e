//! Entrance animations for anything tagged with `data-aos`.
//!
//! Tagged elements start hidden and offset according to their variant and
//! fade into place the first time they are 10% visible. The rules that drive
//! the transition are injected once into `<head>`.

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

use crate::config::Config;
use crate::{dom, observer};

pub const STYLE_ID: &str = "aos-styles";
pub const INIT_CLASS: &str = "aos-init";
pub const ANIMATE_CLASS: &str = "aos-animate";

pub const STYLES: &str = r#"
.aos-init {
    opacity: 0;
    transition: opacity 0.8s ease, transform 0.8s ease;
}
.aos-init.aos-fade-up { transform: translate3d(0, 40px, 0); }
.aos-init.aos-fade-right { transform: translate3d(-40px, 0, 0); }
.aos-init.aos-fade-left { transform: translate3d(40px, 0, 0); }
.aos-init.aos-animate {
    opacity: 1;
    transform: translate3d(0, 0, 0);
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealVariant {
    FadeUp,
    FadeRight,
    FadeLeft,
}

impl RevealVariant {
    /// Unknown directives fall back to `fade-up`.
    pub fn parse(directive: &str) -> Self {
        match directive.trim() {
            "fade-right" => RevealVariant::FadeRight,
            "fade-left" => RevealVariant::FadeLeft,
            _ => RevealVariant::FadeUp,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            RevealVariant::FadeUp => "aos-fade-up",
            RevealVariant::FadeRight => "aos-fade-right",
            RevealVariant::FadeLeft => "aos-fade-left",
        }
    }
}

/// Extra transition delay from `data-aos-delay`, in milliseconds.
pub fn parse_delay(attr: Option<&str>) -> Option<u32> {
    attr.and_then(|value| value.trim().parse().ok())
}

fn inject_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(STYLES));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => match document.document_element() {
            Some(root) => root.append_child(&style)?,
            None => return Ok(()),
        },
    };
    Ok(())
}

fn prepare(element: &Element) -> Result<(), JsValue> {
    let variant = RevealVariant::parse(&element.get_attribute("data-aos").unwrap_or_default());
    dom::set_class(element, INIT_CLASS, true)?;
    dom::set_class(element, variant.class(), true)?;
    if let Some(delay) = parse_delay(element.get_attribute("data-aos-delay").as_deref()) {
        dom::style_property(element, "transition-delay", Some(&format!("{}ms", delay)))?;
    }
    Ok(())
}

pub fn wire(window: &Window, document: &Document, config: &Config) -> Result<(), JsValue> {
    inject_styles(document)?;

    let elements = dom::query_all(document, &config.reveal_selector)?;
    if elements.is_empty() {
        return Ok(());
    }
    debug!("Preparing {} reveal elements", elements.len());

    for element in &elements {
        prepare(element)?;
    }

    if dom::prefers_reduced_motion(window) {
        for element in &elements {
            dom::set_class(element, ANIMATE_CLASS, true)?;
        }
        return Ok(());
    }

    let observer = observer::for_threshold(window, config.reveal_threshold)?;
    for element in &elements {
        observer.observe(
            element,
            Box::new(|element: Element| {
                let _ = dom::set_class(&element, ANIMATE_CLASS, true);
            }),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_variants() {
        assert_eq!(RevealVariant::parse("fade-up"), RevealVariant::FadeUp);
        assert_eq!(RevealVariant::parse("fade-right"), RevealVariant::FadeRight);
        assert_eq!(RevealVariant::parse("fade-left"), RevealVariant::FadeLeft);
        assert_eq!(RevealVariant::parse("zoom-in"), RevealVariant::FadeUp);
        assert_eq!(RevealVariant::parse(""), RevealVariant::FadeUp);
    }

    #[test]
    fn every_variant_has_an_initial_rule() {
        for variant in [RevealVariant::FadeUp, RevealVariant::FadeRight, RevealVariant::FadeLeft] {
            assert!(STYLES.contains(&format!(".aos-init.{}", variant.class())));
        }
        assert!(STYLES.contains(".aos-init.aos-animate"));
    }

    #[test]
    fn delays() {
        assert_eq!(parse_delay(Some("300")), Some(300));
        assert_eq!(parse_delay(Some("soon")), None);
        assert_eq!(parse_delay(Some("-100")), None);
        assert_eq!(parse_delay(None), None);
    }
}
