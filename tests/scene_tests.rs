// Host-side tests for GPU data packing. The packers only read the core's
// frame snapshot, so a real session drives them here.

#![allow(dead_code)]
#[path = "../src/atlas.rs"]
mod atlas;
#[path = "../src/camera.rs"]
mod camera;
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/scene.rs"]
mod scene;

use atlas::AtlasLayout;
use camera::CameraUniforms;
use glam::{Vec2, Vec4};
use keyfield_core::{
    Catalog, FieldConfig, FieldPhase, MemoryStore, Project, RevealCue, Session, View,
    ViewController, Visibility,
};
use scene::*;

struct NullView;

impl ViewController for NullView {
    fn switch_view(&mut self, _view: View) {}
    fn show_project_detail(&mut self, _project: &Project, _used: &[String]) {}
    fn hide_project_detail(&mut self) {}
    fn update_visibility(&mut self, _visibility: Visibility) {}
    fn reveal(&mut self, _cue: RevealCue) {}
}

const DT: f32 = 1.0 / 60.0;

fn session() -> Session {
    Session::new(
        FieldConfig::default(),
        Catalog::builtin(),
        Box::new(MemoryStore::new()),
        11,
    )
}

fn run(s: &mut Session, frames: usize) {
    for _ in 0..frames {
        s.tick(DT, &mut NullView);
    }
}

fn active_session() -> Session {
    let mut s = session();
    s.click(Vec2::ZERO, 1.0, &mut NullView);
    run(&mut s, 200);
    assert_eq!(s.phase(), FieldPhase::Active);
    s
}

fn atlas_for(s: &Session) -> AtlasLayout {
    let widths: Vec<u32> = s
        .field()
        .entities()
        .iter()
        .map(|e| e.word.len() as u32 * 40 + 40)
        .collect();
    AtlasLayout::pack(&widths, 104, 2048, 4)
}

#[test]
fn atlas_wraps_rows_and_keeps_order() {
    let layout = AtlasLayout::pack(&[600, 600, 600, 600], 100, 1300, 4);
    assert_eq!(layout.len(), 4);
    assert_eq!(layout.rect(0).unwrap().y, 0);
    assert_eq!(layout.rect(1).unwrap().x, 604);
    assert_eq!(layout.rect(2).unwrap().x, 0);
    assert_eq!(layout.rect(2).unwrap().y, 104);
    assert_eq!(layout.height, 204);
    assert_eq!(layout.width, 1204);
    for i in 0..layout.len() {
        let uv = layout.uv_rect(i);
        assert!(uv.iter().all(|v| (0.0..=1.0).contains(v)), "uv {uv:?}");
        assert!(uv[0] < uv[2] && uv[1] < uv[3]);
    }
    assert_eq!(layout.uv_rect(99), [0.0; 4]);
}

#[test]
fn empty_atlas_is_one_pixel() {
    let layout = AtlasLayout::pack(&[], 100, 1024, 4);
    assert!(layout.is_empty());
    assert_eq!((layout.width, layout.height), (1, 1));
}

#[test]
fn no_words_are_drawn_on_the_landing_screen() {
    let s = session();
    let atlas = atlas_for(&s);
    let mut words = Vec::new();
    pack_words(&s.frame(), &atlas, &mut words);
    assert!(words.is_empty());
}

#[test]
fn visible_words_are_sorted_far_to_near() {
    let s = active_session();
    let atlas = atlas_for(&s);
    let frame = s.frame();
    let mut words = Vec::new();
    pack_words(&frame, &atlas, &mut words);
    assert!(!words.is_empty());
    let eye = frame.camera.position;
    let fwd = frame.camera.forward();
    let depths: Vec<f32> = words
        .iter()
        .map(|w| (glam::Vec3::from(w.center) - eye).dot(fwd))
        .collect();
    assert!(depths.windows(2).all(|d| d[0] >= d[1]), "not sorted: {depths:?}");
    assert!(depths.iter().all(|d| *d > frame.camera.znear));
    assert!(words.iter().all(|w| w.opacity > 0.0 && w.opacity <= 1.0));
}

#[test]
fn selected_word_glows_and_hint_lines_pack_in_pairs() {
    let mut s = active_session();
    assert!(s.select("ECHO", &mut NullView));
    run(&mut s, 30);
    let atlas = atlas_for(&s);
    let frame = s.frame();
    assert!(!frame.hint_lines.is_empty());

    let mut lines = Vec::new();
    pack_hint_lines(&frame, &mut lines);
    assert_eq!(lines.len(), frame.hint_lines.len() * 2);
    assert!(lines.iter().all(|v| v.alpha > 0.0 && v.alpha == frame.hint_opacity));

    let mut words = Vec::new();
    pack_words(&frame, &atlas, &mut words);
    let echo = s.field().id_of("ECHO").unwrap();
    let uv = atlas.uv_rect(echo.0);
    let glowing: Vec<&WordInstance> = words.iter().filter(|w| w.glow > 0.0).collect();
    assert!(glowing.iter().all(|w| w.uv_rect == uv));
}

#[test]
fn burst_particles_only_while_active_in_field() {
    let mut s = session();
    s.click(Vec2::ZERO, 1.0, &mut NullView);
    run(&mut s, 2);
    let mut sparks = Vec::new();
    pack_particles(&s.frame(), &mut sparks);
    assert!(!sparks.is_empty());
    assert!(sparks.iter().all(|p| p.alpha > 0.0 && p.alpha <= 1.0));

    s.switch_view(View::About, &mut NullView);
    pack_particles(&s.frame(), &mut sparks);
    assert!(sparks.is_empty());
}

#[test]
fn camera_uniforms_project_the_view_centre() {
    let s = session();
    let pose = s.camera();
    let u = CameraUniforms::from_pose(pose, 1.5);
    let vp = glam::Mat4::from_cols_array_2d(&u.view_proj);
    let ahead = pose.position + pose.forward() * 10.0;
    let clip = vp * ahead.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    assert_eq!(Vec4::from(u.right).truncate(), pose.right());
    assert_eq!(Vec4::from(u.up).truncate(), pose.up());
}
