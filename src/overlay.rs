use crate::constants::{CANVAS_CONTAINER_ID, OVERLAY_BLUR, UI_LAYER_ID};
use crate::dom;
use web_sys as web;

pub const MENU_ID: &str = "side-menu";
pub const SEARCH_ID: &str = "search-overlay";
pub const SEARCH_INPUT_ID: &str = "search-input";
pub const CONTACT_ID: &str = "contact-overlay";

#[inline]
pub fn toggle_menu(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(MENU_ID) {
        _ = el.class_list().toggle("open");
    }
}

#[inline]
pub fn close_menu(document: &web::Document) {
    dom::set_class_by_id(document, MENU_ID, "open", false);
}

pub fn show_search(document: &web::Document) {
    dom::set_class_by_id(document, SEARCH_ID, "hidden", false);
    set_background_blur(document, true);
    if let Some(input) = dom::by_id(document, SEARCH_INPUT_ID) {
        _ = input.focus();
    }
}

pub fn hide_search(document: &web::Document) {
    dom::set_class_by_id(document, SEARCH_ID, "hidden", true);
    set_background_blur(document, false);
}

#[inline]
pub fn is_search_open(document: &web::Document) -> bool {
    document
        .get_element_by_id(SEARCH_ID)
        .map(|el| !el.class_list().contains("hidden"))
        .unwrap_or(false)
}

#[inline]
pub fn show_contact(document: &web::Document) {
    close_menu(document);
    dom::set_class_by_id(document, CONTACT_ID, "hidden", false);
}

#[inline]
pub fn hide_contact(document: &web::Document) {
    dom::set_class_by_id(document, CONTACT_ID, "hidden", true);
}

fn set_background_blur(document: &web::Document, on: bool) {
    let filter = if on { OVERLAY_BLUR } else { "none" };
    dom::set_style(document, CANVAS_CONTAINER_ID, "filter", filter);
    dom::set_style(document, UI_LAYER_ID, "filter", filter);
}
