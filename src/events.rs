use odyssey_core::{CameraMode, NarrativeDirector};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::input::{self, NavKey};

/// Owns a DOM listener; dropping it unregisters the callback.
pub struct ListenerHandle {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerHandle {
    fn register(
        target: &web::EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    pub fn passive(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        Self::register(target, event, true, handler)
    }

    /// For handlers that need `prevent_default`.
    pub fn active(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        Self::register(target, event, false, handler)
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Reads scroll metrics and section geometry and hands them to the director.
pub fn push_scroll_state(window: &web::Window, director: &Rc<RefCell<NarrativeDirector>>) {
    let Some(document) = window.document() else {
        return;
    };
    let scroll = dom::scroll_state(window);
    let viewport_h = dom::viewport_height(window);
    let section_count = director.borrow().story().len();
    let bounds = dom::measure_sections(&document, section_count);
    director.borrow_mut().on_scroll(scroll, viewport_h, &bounds);
}

pub fn wire_scroll(
    window: &web::Window,
    director: Rc<RefCell<NarrativeDirector>>,
) -> anyhow::Result<ListenerHandle> {
    let win = window.clone();
    ListenerHandle::passive(window, "scroll", move |_| {
        push_scroll_state(&win, &director);
    })
}

pub fn wire_resize(
    window: &web::Window,
    canvas: web::HtmlCanvasElement,
    director: Rc<RefCell<NarrativeDirector>>,
) -> anyhow::Result<ListenerHandle> {
    let win = window.clone();
    ListenerHandle::passive(window, "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas);
        push_scroll_state(&win, &director);
    })
}

/// Moves the camera to `section_index` and scrolls the page to match.
pub fn navigate(window: &web::Window, director: &Rc<RefCell<NarrativeDirector>>, section_index: usize) {
    let target = director.borrow_mut().navigate_to(section_index);
    if let Some(progress) = target {
        let max = dom::scroll_state(window).max_offset_px;
        dom::scroll_to(window, input::scroll_top_for_progress(progress, max));
    }
}

pub fn handle_keydown(
    ev: &web::KeyboardEvent,
    window: &web::Window,
    director: &Rc<RefCell<NarrativeDirector>>,
) {
    let Some(key) = input::nav_key_for(&ev.key()) else {
        return;
    };
    if key == NavKey::ToggleCamera {
        let mut d = director.borrow_mut();
        let next = match d.mode() {
            CameraMode::CurveFollow => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson => CameraMode::CurveFollow,
        };
        d.set_mode(next);
        return;
    }
    let (current, count) = {
        let d = director.borrow();
        (d.current_section_index(), d.story().len())
    };
    if let Some(target) = input::target_section(current, count, key) {
        navigate(window, director, target);
        ev.prevent_default();
    }
}

pub fn wire_keydown(
    window: &web::Window,
    director: Rc<RefCell<NarrativeDirector>>,
) -> anyhow::Result<ListenerHandle> {
    let win = window.clone();
    ListenerHandle::active(window, "keydown", move |ev: web::Event| {
        if let Ok(kev) = ev.dyn_into::<web::KeyboardEvent>() {
            handle_keydown(&kev, &win, &director);
        }
    })
}
