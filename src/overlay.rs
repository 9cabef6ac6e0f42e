use odyssey_core::{CreditsState, LoaderStatus};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::*;

#[inline]
fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

#[inline]
fn toggle_body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        let _ = body.class_list().toggle_with_force(class, on);
    }
}

pub fn show_loader(document: &web::Document, status: &LoaderStatus) {
    if let Some(bar) = html_element(document, LOADER_BAR_ID) {
        set_style(&bar, "width", &format!("{}%", status.percent));
    }
    if let Some(label) = html_element(document, LOADER_PERCENT_ID) {
        label.set_text_content(Some(&format!("{}%", status.percent)));
    }
    if let Some(loader) = html_element(document, LOADER_ID) {
        set_style(&loader, "opacity", &format!("{:.3}", status.fade_opacity));
        if status.finished {
            set_style(&loader, "display", "none");
        }
    }
}

pub fn show_credits(document: &web::Document, credits: &CreditsState) {
    let Some(root) = html_element(document, CREDITS_ID) else {
        return;
    };
    if !credits.visible {
        set_style(&root, "display", "none");
        return;
    }
    set_style(&root, "display", "");
    set_style(&root, "opacity", &format!("{:.3}", credits.opacity));
    set_style(&root, "transform", &format!("scale({:.3})", credits.scale));
    if let Some(by) = html_element(document, CREDITS_BY_ID) {
        set_style(&by, "opacity", if credits.by_line { "1" } else { "0" });
    }
    for (i, _) in odyssey_core::constants::CREDITS_NAMES.iter().enumerate() {
        let id = format!("{CREDITS_NAME_ID_PREFIX}{i}");
        if let Some(name) = html_element(document, &id) {
            let shown = i < credits.names_shown;
            set_style(&name, "opacity", if shown { "1" } else { "0" });
        }
    }
}

pub fn set_title_revealed(document: &web::Document, revealed: bool) {
    if let Some(title) = document.get_element_by_id(TITLE_ID) {
        let _ = title.class_list().toggle_with_force(REVEALED_CLASS, revealed);
    }
}

pub fn set_ui_hidden(document: &web::Document, hidden: bool) {
    toggle_body_class(document, HIDE_UI_CLASS, hidden);
}

/// Scrolling is locked until the intro hands over to the scroll path.
pub fn set_scroll_locked(document: &web::Document, locked: bool) {
    toggle_body_class(document, SCROLL_LOCKED_CLASS, locked);
}

pub fn set_ending_visible(document: &web::Document, visible: bool) {
    if let Some(ending) = html_element(document, ENDING_ID) {
        set_style(&ending, "display", if visible { "" } else { "none" });
    }
}

pub fn set_active_planet(document: &web::Document, planet_index: usize) {
    if let Some(body) = document.body() {
        let _ = body.set_attribute(ACTIVE_PLANET_ATTR, &planet_index.to_string());
    }
}

pub fn set_typed_text(document: &web::Document, section_index: usize, text: &str) {
    let selector = format!("[{SECTION_INDEX_ATTR}=\"{section_index}\"] [{TYPEWRITER_ATTR}]");
    if let Ok(Some(el)) = document.query_selector(&selector) {
        el.set_text_content(Some(text));
    }
}
