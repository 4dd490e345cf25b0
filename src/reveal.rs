//! DOM overlays for the unlock reveal. Each cue builds or removes elements
//! and leaves the motion to CSS animations in `index.html`; the core decides
//! when each cue fires.

use crate::constants::{CANVAS_CONTAINER_ID, CONVERGE_PARTICLES, DISSOLVE_PARTICLES};
use crate::core::RevealCue;
use crate::dom;
use crate::markup;
use web_sys as web;

const BLUR_ID: &str = "reveal-blur";
const SENTENCE_ID: &str = "sentence-overlay";
const DISSOLVE_ID: &str = "dissolve-particles";
const TITLE_ID: &str = "project-name-reveal";
const CONVERGE_ID: &str = "title-particles";

pub fn apply(document: &web::Document, cue: RevealCue) {
    match cue {
        RevealCue::Blur(true) => {
            dom::append_div(document, BLUR_ID, "blur-overlay");
            dom::set_style(document, CANVAS_CONTAINER_ID, "pointer-events", "none");
        }
        RevealCue::Blur(false) => {
            dom::remove_by_id(document, BLUR_ID);
            dom::set_style(document, CANVAS_CONTAINER_ID, "pointer-events", "auto");
        }
        RevealCue::Sentence(segments) => {
            if let Some(el) = dom::append_div(document, SENTENCE_ID, "sentence-overlay no-bg") {
                el.set_inner_html(&markup::sentence_html(&segments));
            }
        }
        RevealCue::Dissolve => dissolve(document),
        RevealCue::Title(name) => {
            dom::remove_by_id(document, SENTENCE_ID);
            dom::remove_by_id(document, DISSOLVE_ID);
            if let Some(el) = dom::append_div(document, TITLE_ID, "project-name-reveal") {
                el.set_inner_html(&markup::title_html(&name));
            }
            converge(document);
        }
        RevealCue::TitleToHeader => {
            dom::remove_by_id(document, CONVERGE_ID);
            dom::set_class_by_id(document, TITLE_ID, "to-header", true);
        }
        RevealCue::Clear => clear(document),
    }
}

pub fn clear(document: &web::Document) {
    for id in [BLUR_ID, SENTENCE_ID, DISSOLVE_ID, TITLE_ID, CONVERGE_ID] {
        dom::remove_by_id(document, id);
    }
    dom::set_style(document, CANVAS_CONTAINER_ID, "pointer-events", "auto");
}

// Sparks seeded over the sentence box that drift to the centre and fade.
fn dissolve(document: &web::Document) {
    let rect = document
        .get_element_by_id(SENTENCE_ID)
        .and_then(|s| s.query_selector(".full-sentence").ok().flatten())
        .map(|p| p.get_bounding_client_rect());
    dom::set_class_by_id(document, SENTENCE_ID, "fading", true);
    let Some(container) = dom::append_div(document, DISSOLVE_ID, "particle-container") else {
        return;
    };
    let (left, top, w, h) = rect
        .map(|r| (r.left(), r.top(), r.width(), r.height()))
        .unwrap_or((0.0, 0.0, 0.0, 0.0));
    let (cx, cy) = viewport_center();
    for _ in 0..DISSOLVE_PARTICLES {
        let x = left + js_sys::Math::random() * w;
        let y = top + js_sys::Math::random() * h;
        let dx = cx - x + (js_sys::Math::random() - 0.5) * 100.0;
        let dy = cy - y;
        let delay = js_sys::Math::random() * 0.3;
        spawn_particle(
            document,
            &container,
            "dissolve-particle",
            &format!(
                "left:{x:.1}px;top:{y:.1}px;--dx:{dx:.1}px;--dy:{dy:.1}px;animation-delay:{delay:.2}s"
            ),
        );
    }
}

// Ring of particles converging on the title.
fn converge(document: &web::Document) {
    let Some(container) = dom::append_div(document, CONVERGE_ID, "title-particle-container") else {
        return;
    };
    let (cx, cy) = viewport_center();
    let radius = cx.max(cy) * 1.2;
    for i in 0..CONVERGE_PARTICLES {
        let angle = i as f64 / CONVERGE_PARTICLES as f64 * std::f64::consts::TAU;
        let x = cx + angle.cos() * radius;
        let y = cy + angle.sin() * radius;
        let delay = js_sys::Math::random() * 0.4;
        spawn_particle(
            document,
            &container,
            "converge-particle",
            &format!(
                "left:{x:.1}px;top:{y:.1}px;--dx:{:.1}px;--dy:{:.1}px;animation-delay:{delay:.2}s",
                cx - x,
                cy - y
            ),
        );
    }
}

fn spawn_particle(document: &web::Document, parent: &web::HtmlElement, class: &str, style: &str) {
    if let Ok(p) = document.create_element("div") {
        p.set_class_name(class);
        _ = p.set_attribute("style", style);
        _ = parent.append_child(&p);
    }
}

fn viewport_center() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width * 0.5, height * 0.5)
}
