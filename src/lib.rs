#![cfg(target_arch = "wasm32")]
use crate::core::{Catalog, FieldConfig, Session};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod atlas;
mod camera;
mod constants;
mod controller;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod markup;
mod overlay;
mod query;
mod render;
mod reveal;
mod scene;
mod storage;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn session_seed(window: &web::Window) -> u64 {
    let search = window.location().search().unwrap_or_default();
    match query::seed_from_query(&search) {
        Some(seed) => {
            log::info!("[init] seed {} from query", seed);
            seed
        }
        None => (js_sys::Math::random() * u32::MAX as f64) as u64,
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("keyfield-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let catalog = Catalog::builtin();
    let projects = catalog.projects().to_vec();
    let session = Session::new(
        FieldConfig::default(),
        catalog,
        storage::open_store(),
        session_seed(&window),
    );
    let labels: Vec<String> = session
        .field()
        .entities()
        .iter()
        .map(|e| e.word.clone())
        .collect();
    log::info!(
        "[init] {} keywords, {} unlocked",
        labels.len(),
        session.unlocked().len()
    );
    let ui = controller::DomController::new(document.clone(), projects);
    let app = Rc::new(RefCell::new(app::App::new(session, ui)));
    let pointer = Rc::new(RefCell::new(input::PointerState::default()));

    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        app: app.clone(),
        pointer: pointer.clone(),
    });
    events::wire_keyboard(app.clone());
    events::wire_navigation(&document, app.clone());

    // The field still runs without a renderer; DOM views stay usable
    let gpu = frame::init_gpu(&canvas, &labels).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        canvas,
        pointer,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
