// Host-side tests for pure input and query helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/input.rs"]
mod input;
#[path = "../src/query.rs"]
mod query;

use glam::Vec2;
use input::*;
use query::*;

#[test]
fn client_to_ndc_maps_corners_and_centre() {
    let ndc = |x, y| client_to_ndc(x, y, 10.0, 20.0, 200.0, 100.0).unwrap();
    assert_eq!(ndc(10.0, 20.0), Vec2::new(-1.0, 1.0));
    assert_eq!(ndc(210.0, 120.0), Vec2::new(1.0, -1.0));
    assert_eq!(ndc(110.0, 70.0), Vec2::new(0.0, 0.0));
}

#[test]
fn client_to_ndc_rejects_collapsed_rect() {
    assert!(client_to_ndc(5.0, 5.0, 0.0, 0.0, 0.0, 100.0).is_none());
    assert!(client_to_ndc(5.0, 5.0, 0.0, 0.0, 100.0, -1.0).is_none());
}

#[test]
fn ndc_to_uv_flips_y_and_clamps() {
    assert_eq!(ndc_to_uv(Vec2::new(-1.0, 1.0)), [0.0, 0.0]);
    assert_eq!(ndc_to_uv(Vec2::new(1.0, -1.0)), [1.0, 1.0]);
    assert_eq!(ndc_to_uv(Vec2::new(0.0, 0.0)), [0.5, 0.5]);
    // Pointer outside the canvas stays on its edge
    assert_eq!(ndc_to_uv(Vec2::new(3.0, -3.0)), [1.0, 1.0]);
}

#[test]
fn aspect_ratio_guards_zero_height() {
    assert_eq!(aspect_ratio(1600, 800), 2.0);
    assert_eq!(aspect_ratio(800, 0), 800.0);
}

#[test]
fn selector_list_joins_for_closest() {
    assert_eq!(selector_list(&[".nav-link", ".menu-item"]), ".nav-link, .menu-item");
    assert_eq!(selector_list(&[]), "");
}

#[test]
fn pointer_state_starts_centred() {
    let p = PointerState::default();
    assert_eq!(p.uv, [0.5, 0.5]);
    assert!(!p.over_keyword);
}

#[test]
fn seed_is_read_from_query() {
    assert_eq!(seed_from_query("?seed=42"), Some(42));
    assert_eq!(seed_from_query("view=field&seed=7"), Some(7));
    assert_eq!(seed_from_query("?seed=abc"), None);
    assert_eq!(seed_from_query(""), None);
    assert_eq!(query_param("?a=1&b=two", "b"), Some("two"));
    assert_eq!(query_param("?a=1", "seedling"), None);
}
