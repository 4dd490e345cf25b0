use crate::app::SharedApp;
use crate::constants::{ALL_PROJECTS_ID, COLLECTED_GRID_ID};
use crate::core::View;
use crate::{dom, overlay};
use wasm_bindgen::JsCast;
use web_sys as web;

const PROJECT_ITEM_SELECTOR: &str = ".gallery-item[data-project]";

/// Nav bar, side menu, overlay close buttons, the detail back button and
/// gallery cards.
pub fn wire_navigation(document: &web::Document, app: SharedApp) {
    let nav_view = |id: &str, view: View| {
        let app = app.clone();
        dom::add_click_listener(document, id, move |ev| {
            ev.prevent_default();
            app.borrow_mut()
                .with(|session, ui| session.switch_view(view, ui));
        });
    };
    nav_view("nav-field", View::Field);
    nav_view("nav-gallery", View::Gallery);
    nav_view("menu-about", View::About);

    // About toggles back to the field when already open
    let app_about = app.clone();
    dom::add_click_listener(document, "nav-about", move |ev| {
        ev.prevent_default();
        app_about.borrow_mut().with(|session, ui| {
            let target = if session.view() == View::About {
                View::Field
            } else {
                View::About
            };
            session.switch_view(target, ui);
        });
    });

    let doc = document.clone();
    dom::add_click_listener(document, "nav-search", move |ev| {
        ev.prevent_default();
        overlay::show_search(&doc);
    });
    let doc = document.clone();
    dom::add_click_listener(document, "search-close", move |_| overlay::hide_search(&doc));

    let doc = document.clone();
    dom::add_click_listener(document, "nav-menu", move |ev| {
        ev.prevent_default();
        ev.stop_propagation();
        overlay::toggle_menu(&doc);
    });
    let doc = document.clone();
    dom::add_click_listener(document, "menu-close", move |ev| {
        ev.prevent_default();
        overlay::close_menu(&doc);
    });
    let doc = document.clone();
    dom::add_click_listener(document, "menu-contact", move |ev| {
        ev.prevent_default();
        overlay::show_contact(&doc);
    });
    let doc = document.clone();
    dom::add_click_listener(document, "contact-close", move |_| overlay::hide_contact(&doc));
    dom::add_click_listener(document, "menu-find", move |ev| {
        ev.prevent_default();
        log::info!("[menu] find yourself");
    });

    let app_home = app.clone();
    dom::add_click_listener(document, "menu-home", move |ev| {
        ev.prevent_default();
        app_home
            .borrow_mut()
            .with(|session, ui| session.go_home(ui));
    });

    let app_reset = app.clone();
    dom::add_click_listener(document, "menu-reset", move |ev| {
        ev.prevent_default();
        let confirmed = web::window()
            .and_then(|w| {
                w.confirm_with_message(
                    "Are you sure you want to reset all collected projects? This action cannot be undone.",
                )
                .ok()
            })
            .unwrap_or(false);
        if confirmed {
            app_reset
                .borrow_mut()
                .with(|session, ui| session.hard_reset(ui));
        }
    });

    let app_back = app.clone();
    dom::add_click_listener(document, "project-detail-back", move |_| {
        app_back
            .borrow_mut()
            .with(|session, ui| session.close_project_detail(ui));
    });

    for grid in [COLLECTED_GRID_ID, ALL_PROJECTS_ID] {
        wire_gallery_grid(document, grid, app.clone());
    }
    wire_menu_dismiss(document);
}

// Cards are re-rendered on every gallery change, so clicks are delegated
// from the container.
fn wire_gallery_grid(document: &web::Document, grid_id: &str, app: SharedApp) {
    dom::add_click_listener(document, grid_id, move |ev| {
        let id = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .and_then(|el| el.closest(PROJECT_ITEM_SELECTOR).ok().flatten())
            .and_then(|item| item.get_attribute("data-project"));
        if let Some(id) = id {
            ev.prevent_default();
            ev.stop_propagation();
            app.borrow_mut()
                .with(|session, ui| session.open_project(&id, ui));
        }
    });
}

fn wire_menu_dismiss(document: &web::Document) {
    let doc = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Node>().ok())
            .map(|node| {
                doc.get_element_by_id(overlay::MENU_ID)
                    .map(|menu| menu.contains(Some(&node)))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !inside {
            overlay::close_menu(&doc);
        }
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
