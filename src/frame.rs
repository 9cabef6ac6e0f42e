use glam::Vec3;
use instant::Instant;
use odyssey_core::{Camera, FrameOutput, NarrativeDirector, Phase};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::*;
use crate::overlay;
use crate::render::{self, InstanceData};

pub struct FrameContext<'a> {
    pub director: Rc<RefCell<NarrativeDirector>>,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    /// Shown while the loader runs; swapped for `galaxy` afterwards.
    pub loader_galaxy: Vec<InstanceData>,
    pub galaxy: Vec<InstanceData>,
    pub planets: Vec<Vec3>,
    pub last_instant: Instant,
    pub last_output: Option<FrameOutput>,
    pub last_typed: Option<(usize, usize)>,
    pub galaxy_uploaded: Option<Phase>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(Duration::from_millis(MAX_FRAME_DT_MS));
        self.last_instant = now;

        let out = self.director.borrow_mut().tick(dt);
        self.sync_overlay(&out);
        self.sync_typewriter();

        if let Some(g) = &mut self.gpu {
            let loading = out.phase == Phase::Loading;
            let wanted = if loading { Phase::Loading } else { Phase::IntroPlaying };
            if self.galaxy_uploaded != Some(wanted) {
                g.set_galaxy(if loading { &self.loader_galaxy } else { &self.galaxy });
                self.galaxy_uploaded = Some(wanted);
            }

            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            g.set_camera(&Camera::from_pose(&out.pose, g.aspect()));
            if out.phase == Phase::Loading {
                g.set_markers(&[]);
            } else {
                g.set_markers(&markers(&self.planets, &out));
            }
            if let Err(e) = g.render() {
                log::error!("render error: {:?}", e);
            }
        }
        self.last_output = Some(out);
    }

    fn sync_overlay(&self, out: &FrameOutput) {
        let prev = self.last_output.as_ref();
        let doc = &self.document;
        if prev.map(|p| p.loader) != Some(out.loader) {
            overlay::show_loader(doc, &out.loader);
        }
        if prev.map(|p| p.credits) != Some(out.credits) {
            overlay::show_credits(doc, &out.credits);
        }
        if prev.map(|p| p.title_revealed) != Some(out.title_revealed) {
            overlay::set_title_revealed(doc, out.title_revealed);
        }
        if prev.map(|p| p.hide_ui) != Some(out.hide_ui) {
            overlay::set_ui_hidden(doc, out.hide_ui);
        }
        if prev.map(|p| p.current_planet_index) != Some(out.current_planet_index) {
            overlay::set_active_planet(doc, out.current_planet_index);
        }
        if prev.map(|p| p.phase) != Some(out.phase) {
            let locked = !matches!(out.phase, Phase::ScrollNavigable | Phase::EndingShown);
            overlay::set_scroll_locked(doc, locked);
            overlay::set_ending_visible(doc, out.phase == Phase::EndingShown);
        }
    }

    fn sync_typewriter(&mut self) {
        let director = self.director.borrow();
        let Some((section, text)) = director.typed_text() else {
            self.last_typed = None;
            return;
        };
        let key = (section, text.len());
        if self.last_typed != Some(key) {
            overlay::set_typed_text(&self.document, section, text);
            self.last_typed = Some(key);
        }
    }
}

fn markers(planets: &[Vec3], out: &FrameOutput) -> Vec<InstanceData> {
    let mut list: Vec<InstanceData> = planets
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let active = i == out.current_planet_index;
            InstanceData {
                position: p.to_array(),
                scale: PLANET_MARKER_SIZE * if active { ACTIVE_PLANET_SCALE } else { 1.0 },
                color: PLANET_COLORS[i % PLANET_COLORS.len()],
            }
        })
        .collect();
    list.push(InstanceData {
        position: out.ship.position.to_array(),
        scale: SHIP_MARKER_SIZE,
        color: SHIP_COLOR,
    });
    list
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Keeps the RAF loop alive; `cancel` stops it for good.
pub struct LoopHandle {
    tick: TickClosure,
    request_id: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        if let (Some(w), Some(id)) = (web::window(), self.request_id.take()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
        log::info!("[frame] loop cancelled");
    }
}

fn request_frame(tick: &TickClosure, request_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        request_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let request_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let request_id_clone = request_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &request_id_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &request_id);
    LoopHandle { tick, request_id }
}
