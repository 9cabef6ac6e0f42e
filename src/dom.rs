use odyssey_core::{ScrollState, SectionBounds};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{DEVICE_PIXEL_RATIO_CAP, SECTION_INDEX_ATTR, SECTION_SELECTOR};

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(DEVICE_PIXEL_RATIO_CAP);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn viewport_height(window: &web::Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Current scroll offset and the furthest the document can scroll.
pub fn scroll_state(window: &web::Window) -> ScrollState {
    let offset = window.scroll_y().unwrap_or(0.0);
    let scroll_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    ScrollState::new(offset, scroll_height - viewport_height(window))
}

/// Bounds for every section, indexed by its `data-section-index`.
/// Elements without a parseable index are ignored.
pub fn measure_sections(document: &web::Document, section_count: usize) -> Vec<Option<SectionBounds>> {
    let mut bounds = vec![None; section_count];
    let Ok(nodes) = document.query_selector_all(SECTION_SELECTOR) else {
        return bounds;
    };
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let index = el
            .get_attribute(SECTION_INDEX_ATTR)
            .and_then(|v| v.trim().parse::<usize>().ok());
        match index {
            Some(index) if index < section_count => {
                let rect = el.get_bounding_client_rect();
                bounds[index] = Some(SectionBounds::new(rect.top(), rect.height()));
            }
            _ => log::debug!("[dom] skipping section element without a usable index"),
        }
    }
    bounds
}

/// Jumps the window to `top`; the camera eases on its own.
pub fn scroll_to(window: &web::Window, top: f64) {
    let opts = web::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web::ScrollBehavior::Instant);
    window.scroll_to_with_scroll_to_options(&opts);
}
