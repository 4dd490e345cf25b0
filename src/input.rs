use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Last pointer position over the canvas.
#[derive(Clone, Copy, Debug)]
pub struct PointerState {
    pub ndc: Vec2,
    pub uv: [f32; 2],
    pub over_keyword: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            ndc: Vec2::ZERO,
            uv: [0.5, 0.5],
            over_keyword: false,
        }
    }
}

/// Client (CSS pixel) coordinates to normalized device coordinates of a
/// rectangle, y up. None for a collapsed rectangle.
#[inline]
pub fn client_to_ndc(x: f32, y: f32, left: f32, top: f32, width: f32, height: f32) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let u = (x - left) / width;
    let v = (y - top) / height;
    Some(Vec2::new(u * 2.0 - 1.0, 1.0 - v * 2.0))
}

/// NDC back to texture-style uv (origin top-left), clamped to the canvas.
#[inline]
pub fn ndc_to_uv(ndc: Vec2) -> [f32; 2] {
    [
        (ndc.x * 0.5 + 0.5).clamp(0.0, 1.0),
        (0.5 - ndc.y * 0.5).clamp(0.0, 1.0),
    ]
}

#[inline]
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Comma-joined selector list for `Element::closest`.
pub fn selector_list(selectors: &[&str]) -> String {
    selectors.join(", ")
}

// ---------------- DOM event helpers ----------------

#[inline]
pub fn event_ndc(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    client_to_ndc(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Whether the event started inside an element matching `selector`.
pub fn target_matches(ev: &web::Event, selector: &str) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

/// Typing into a text field must not fly the camera.
pub fn is_text_entry(ev: &web::Event) -> bool {
    ev.target()
        .map(|t| t.has_type::<web::HtmlInputElement>())
        .unwrap_or(false)
}
