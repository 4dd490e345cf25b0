use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(web::MouseEvent) + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move |ev: web::MouseEvent| handler(ev)) as Box<dyn FnMut(_)>,
        );
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{}", element_id);
    }
}

pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let list = el.class_list();
    _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

pub fn set_class_by_id(document: &web::Document, id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        set_class(&el, class, on);
    }
}

pub fn set_style(document: &web::Document, id: &str, property: &str, value: &str) {
    if let Some(el) = by_id(document, id) {
        _ = el.style().set_property(property, value);
    }
}

pub fn set_inner_html(document: &web::Document, id: &str, html: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_inner_html(html);
    }
}

/// Set the text of the first descendant of `#parent` matching `selector`.
pub fn set_child_text(document: &web::Document, parent: &str, selector: &str, text: &str) {
    let child = document
        .get_element_by_id(parent)
        .and_then(|p| p.query_selector(selector).ok().flatten());
    if let Some(el) = child {
        el.set_text_content(Some(text));
    }
}

pub fn set_child_html(document: &web::Document, parent: &str, selector: &str, html: &str) {
    let child = document
        .get_element_by_id(parent)
        .and_then(|p| p.query_selector(selector).ok().flatten());
    if let Some(el) = child {
        el.set_inner_html(html);
    }
}

/// Remove the element with `id` if it exists.
pub fn remove_by_id(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.remove();
    }
}

/// Append a `<div id=.. class=..>` to `<body>`, replacing any element with
/// the same id.
pub fn append_div(document: &web::Document, id: &str, class: &str) -> Option<web::HtmlElement> {
    remove_by_id(document, id);
    let el = document
        .create_element("div")
        .ok()?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    el.set_id(id);
    el.set_class_name(class);
    document.body()?.append_child(&el).ok()?;
    Some(el)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
