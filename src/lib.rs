#![cfg(target_arch = "wasm32")]
use instant::Instant;
use odyssey_core::{
    generate, CameraMode, GalaxyParameters, LifecycleEvent, NarrativeDirector, PathCurve, Story,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use constants::{CANVAS_ID, DIRECTOR_SEED};

/// Everything that must be released on teardown.
struct App {
    director: Rc<RefCell<NarrativeDirector>>,
    listeners: Vec<events::ListenerHandle>,
    frame_loop: frame::LoopHandle,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("odyssey-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Keyboard-free navigation hook for page buttons.
#[wasm_bindgen]
pub fn navigate_to_section(section_index: usize) {
    let Some(window) = web::window() else {
        return;
    };
    let director = APP.with(|app| app.borrow().as_ref().map(|a| a.director.clone()));
    if let Some(director) = director {
        events::navigate(&window, &director, section_index);
    }
}

/// Stops the frame loop, removes listeners and cancels pending intro steps.
#[wasm_bindgen]
pub fn teardown() {
    let app = APP.with(|app| app.borrow_mut().take());
    if let Some(app) = app {
        app.frame_loop.cancel();
        app.director.borrow_mut().teardown();
        drop(app.listeners);
        log::info!("odyssey-web torn down");
    }
}

fn generate_galaxies() -> (Vec<render::InstanceData>, Vec<render::InstanceData>) {
    let mut rng = StdRng::from_entropy();
    let mut build = |params: GalaxyParameters, label: &str| match generate(&params, &mut rng) {
        Ok(cloud) => render::galaxy_instances(&cloud, params.size),
        Err(e) => {
            log::error!("[galaxy] {label} generation failed: {e}");
            Vec::new()
        }
    };
    let loader = build(GalaxyParameters::loader(), "loader");
    let main = build(GalaxyParameters::default(), "main");
    (loader, main)
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    dom::sync_canvas_backing_size(&canvas);

    let story = Story::default();
    let curve = PathCurve::default();
    if let Err(e) = curve.check() {
        log::warn!("[camera] {e}; camera will hold the fallback pose");
    }
    let director = Rc::new(RefCell::new(NarrativeDirector::new(
        story,
        curve,
        CameraMode::default(),
        DIRECTOR_SEED,
    )));
    director
        .borrow_mut()
        .events_mut()
        .subscribe(|ev: &LifecycleEvent| log::info!("[intro] {:?}", ev));

    let listeners = vec![
        events::wire_scroll(&window, director.clone())?,
        events::wire_resize(&window, canvas.clone(), director.clone())?,
        events::wire_keydown(&window, director.clone())?,
    ];
    events::push_scroll_state(&window, &director);

    let gpu = frame::init_gpu(&canvas).await;
    let (loader_galaxy, galaxy) = generate_galaxies();
    let planets = director
        .borrow()
        .synthesizer()
        .anchors()
        .iter()
        .map(|a| a.position)
        .collect();

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        director: director.clone(),
        document,
        canvas,
        gpu,
        loader_galaxy,
        galaxy,
        planets,
        last_instant: Instant::now(),
        last_output: None,
        last_typed: None,
        galaxy_uploaded: None,
    }));
    let frame_loop = frame::start_loop(frame_ctx);

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            director,
            listeners,
            frame_loop,
        });
    });
    Ok(())
}
