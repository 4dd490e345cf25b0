use crate::app::SharedApp;
use crate::constants::CLICK_EXCLUDED_SELECTORS;
use crate::input::{self, PointerState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: SharedApp,
    pub pointer: Rc<RefCell<PointerState>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointermove(&w);
    wire_click(&w);
}

fn wire_pointermove(w: &PointerWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(ndc) = input::event_ndc(&ev, &w.canvas) else {
            return;
        };
        let aspect = input::aspect_ratio(w.canvas.width(), w.canvas.height());
        let over = w.app.borrow_mut().session.pointer_move(ndc, aspect);
        {
            let mut p = w.pointer.borrow_mut();
            p.ndc = ndc;
            p.uv = input::ndc_to_uv(ndc);
            if p.over_keyword == over {
                return;
            }
            p.over_keyword = over;
        }
        let cursor = if over { "pointer" } else { "default" };
        _ = w.canvas.style().set_property("cursor", cursor);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_click(w: &PointerWiring) {
    let w = w.clone();
    let excluded = input::selector_list(CLICK_EXCLUDED_SELECTORS);

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if input::target_matches(&ev, &excluded) {
            return;
        }
        let Some(ndc) = input::event_ndc(&ev, &w.canvas) else {
            return;
        };
        let aspect = input::aspect_ratio(w.canvas.width(), w.canvas.height());
        w.app
            .borrow_mut()
            .with(|session, ui| session.click(ndc, aspect, ui));
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
