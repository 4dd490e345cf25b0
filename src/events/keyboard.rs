use crate::app::SharedApp;
use crate::{input, overlay};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Escape closes overlays; flight keys go to the session unless the user
/// is typing into a field.
pub fn handle_keydown(ev: &web::KeyboardEvent, app: &SharedApp) {
    let key = ev.key();
    if key == "Escape" {
        let app = app.borrow();
        let document = app.ui.document();
        if overlay::is_search_open(document) {
            overlay::hide_search(document);
        }
        overlay::hide_contact(document);
        overlay::close_menu(document);
        return;
    }
    if input::is_text_entry(ev) || ev.repeat() {
        return;
    }
    if app.borrow_mut().session.key_down(&key) {
        log::debug!("[keys] down {}", key);
    }
}

pub fn wire_keyboard(app: SharedApp) {
    let app_down = app.clone();
    let down = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &app_down);
    }) as Box<dyn FnMut(_)>);

    // Releases are never filtered so a key held while focus moved cannot stick
    let up = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        app.borrow_mut().session.key_up(&ev.key());
    }) as Box<dyn FnMut(_)>);

    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref());
        _ = window.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref());
    }
    down.forget();
    up.forget();
}
