// Scenario tests driving a full Session the way the web front end does:
// frame ticks plus pointer/keyboard/navigation calls, with a recording
// ViewController standing in for the DOM.

use glam::Vec2;
use keyfield_core::*;
use std::cell::RefCell;
use std::rc::Rc;

const DT: f32 = 1.0 / 60.0;
const ASPECT: f32 = 16.0 / 9.0;

#[derive(Default)]
struct Recorder {
    views: Vec<View>,
    details: Vec<(String, Vec<String>)>,
    hidden: usize,
    visibility: Visibility,
    cues: Vec<RevealCue>,
    collected: Vec<String>,
    gallery: Vec<String>,
}

impl ViewController for Recorder {
    fn switch_view(&mut self, view: View) {
        self.views.push(view);
    }
    fn show_project_detail(&mut self, project: &Project, used_keywords: &[String]) {
        self.details.push((project.id.clone(), used_keywords.to_vec()));
    }
    fn hide_project_detail(&mut self) {
        self.hidden += 1;
    }
    fn update_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }
    fn reveal(&mut self, cue: RevealCue) {
        self.cues.push(cue);
    }
    fn collected_changed(&mut self, words: &[String]) {
        self.collected = words.to_vec();
    }
    fn gallery_changed(&mut self, records: &[UnlockRecord]) {
        self.gallery = records.iter().map(|r| r.project.id.clone()).collect();
    }
}

/// Store whose contents outlive any one session.
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<MemoryStore>>);

impl PersistenceStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.borrow().get(key)
    }
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.borrow_mut().set(key, value)
    }
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.0.borrow_mut().remove(key)
    }
}

fn run(s: &mut Session, rec: &mut Recorder, secs: f32) {
    let steps = (secs / DT).ceil() as usize;
    for _ in 0..steps {
        s.tick(DT, rec);
    }
}

fn run_until(s: &mut Session, rec: &mut Recorder, limit: f32, done: impl Fn(&Session) -> bool) {
    let mut t = 0.0;
    while !done(s) && t < limit {
        s.tick(DT, rec);
        t += DT;
    }
}

fn enter_field(s: &mut Session, rec: &mut Recorder) {
    assert_eq!(s.phase(), FieldPhase::Landing);
    s.click(Vec2::ZERO, ASPECT, rec);
    assert_eq!(s.phase(), FieldPhase::Shattering);
    run(s, rec, 1.1);
    assert_eq!(s.phase(), FieldPhase::Active);
}

fn active_session_with(store: Box<dyn PersistenceStore>) -> (Session, Recorder) {
    let mut rec = Recorder::default();
    let mut s = Session::new(FieldConfig::default(), Catalog::builtin(), store, 42);
    s.sync(&mut rec);
    enter_field(&mut s, &mut rec);
    (s, rec)
}

fn active_session() -> (Session, Recorder) {
    active_session_with(Box::new(MemoryStore::new()))
}

fn pick_all(s: &mut Session, rec: &mut Recorder, words: &[&str]) {
    for w in words {
        assert!(s.select(w, rec), "select {w}");
    }
}

fn finish_unlock(s: &mut Session, rec: &mut Recorder) {
    run_until(s, rec, 15.0, |s| s.phase() == FieldPhase::ProjectReveal);
    assert_eq!(s.phase(), FieldPhase::ProjectReveal);
}

#[test]
fn landing_click_shatters_then_activates_field() {
    let mut rec = Recorder::default();
    let mut s = Session::new(FieldConfig::default(), Catalog::builtin(), Box::new(MemoryStore::new()), 1);
    s.sync(&mut rec);
    assert!(rec.visibility.landing_title);
    assert!(!rec.visibility.keywords);
    s.click(Vec2::ZERO, ASPECT, &mut rec);
    assert!(s.frame().burst.is_active());
    run(&mut s, &mut rec, 1.1);
    assert_eq!(s.phase(), FieldPhase::Active);
    assert!(rec.visibility.keywords && !rec.visibility.landing_title);
    run(&mut s, &mut rec, 2.5);
    assert!(s.field().entities().iter().any(|e| e.opacity > 0.05));
}

#[test]
fn third_matching_pick_unlocks_echo_chamber() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["ECHO", "RESONANCE"]);
    assert_eq!(s.phase(), FieldPhase::Active);
    assert!(s.select("IDENTITY", &mut rec));
    assert_eq!(s.phase(), FieldPhase::Unlocking);
    assert_eq!(s.reveal_phase(), RevealPhase::Gathering);
    assert_eq!(rec.collected, ["ECHO", "RESONANCE", "IDENTITY"]);

    finish_unlock(&mut s, &mut rec);
    assert_eq!(s.view(), View::ProjectDetail);
    assert_eq!(s.reveal_phase(), RevealPhase::Idle);
    let record = s.unlocked().get("echo-chamber").unwrap();
    assert_eq!(record.used_keywords, ["ECHO", "RESONANCE", "IDENTITY"]);
    assert_eq!(rec.details.last().unwrap().0, "echo-chamber");
    assert_eq!(rec.gallery, ["echo-chamber"]);
}

#[test]
fn reveal_cues_arrive_in_order() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["FLOW", "DATA", "RHYTHM"]);
    finish_unlock(&mut s, &mut rec);
    let kinds: Vec<&str> = rec
        .cues
        .iter()
        .map(|c| match c {
            RevealCue::Blur(true) => "blur-on",
            RevealCue::Sentence(_) => "sentence",
            RevealCue::Dissolve => "dissolve",
            RevealCue::Title(_) => "title",
            RevealCue::TitleToHeader => "header",
            RevealCue::Blur(false) => "blur-off",
            RevealCue::Clear => "clear",
        })
        .collect();
    assert_eq!(kinds, ["blur-on", "sentence", "dissolve", "title", "header", "blur-off", "clear"]);
    let sentence = rec.cues.iter().find_map(|c| match c {
        RevealCue::Sentence(segs) => Some(segs.clone()),
        _ => None,
    });
    let emphasized: Vec<String> = sentence
        .unwrap()
        .into_iter()
        .filter(|s| s.emphasized)
        .map(|s| s.text)
        .collect();
    assert_eq!(emphasized, ["flow", "data", "momentum", "rhythm", "chaos"]);
}

#[test]
fn project_is_committed_on_entering_detail_transition() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["VOID", "FORM", "DESIGN"]);
    run_until(&mut s, &mut rec, 15.0, |s| s.reveal_phase() == RevealPhase::TitleReveal);
    assert!(!s.unlocked().contains("void-interface"));
    run_until(&mut s, &mut rec, 15.0, |s| s.reveal_phase() == RevealPhase::DetailTransition);
    assert!(s.unlocked().contains("void-interface"));
    assert_eq!(s.view(), View::Field);
}

#[test]
fn unrelated_pick_keeps_match_possible() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["SIGNAL", "NOISE", "ART"]);
    assert_eq!(s.phase(), FieldPhase::Active);
    assert!(s.unlocked().is_empty());
    assert!(s.select("WAVE", &mut rec));
    assert_eq!(s.phase(), FieldPhase::Unlocking);
    finish_unlock(&mut s, &mut rec);
    assert_eq!(
        s.unlocked().get("signal-noise").unwrap().used_keywords,
        ["SIGNAL", "NOISE", "ART", "WAVE"]
    );
}

#[test]
fn duplicate_and_unknown_picks_are_no_ops() {
    let (mut s, mut rec) = active_session();
    assert!(s.select("ECHO", &mut rec));
    assert!(!s.select("ECHO", &mut rec));
    assert!(!s.select("NOT-A-WORD", &mut rec));
    assert_eq!(s.selection().words(), ["ECHO"]);
}

#[test]
fn input_is_suspended_while_unlocking() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["ECHO", "RESONANCE", "IDENTITY"]);
    assert!(!s.select("FLOW", &mut rec));
    assert!(!s.pointer_move(Vec2::ZERO, ASPECT));
    s.go_home(&mut rec);
    s.switch_view(View::Gallery, &mut rec);
    assert_eq!(s.phase(), FieldPhase::Unlocking);
    assert_eq!(s.view(), View::Field);
    assert_eq!(s.selection().len(), 3);
}

#[test]
fn unlocked_project_never_fires_again() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["ECHO", "RESONANCE", "IDENTITY"]);
    finish_unlock(&mut s, &mut rec);
    let before = s.unlocked().get("echo-chamber").cloned();

    s.close_project_detail(&mut rec);
    assert_eq!(s.view(), View::Field);
    assert_eq!(s.phase(), FieldPhase::Active);
    assert!(s.selection().is_empty());

    pick_all(&mut s, &mut rec, &["NETWORK", "IDENTITY", "ECHO"]);
    assert_eq!(s.phase(), FieldPhase::Active);
    run(&mut s, &mut rec, 12.0);
    assert_eq!(s.unlocked().len(), 1);
    assert_eq!(s.unlocked().get("echo-chamber").cloned(), before);
}

#[test]
fn hard_reset_clears_unlocks_and_allows_replay() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["ECHO", "RESONANCE", "IDENTITY"]);
    finish_unlock(&mut s, &mut rec);

    s.hard_reset(&mut rec);
    assert!(s.unlocked().is_empty());
    assert!(rec.gallery.is_empty());
    assert_eq!(s.phase(), FieldPhase::Landing);
    assert_eq!(s.view(), View::Field);

    enter_field(&mut s, &mut rec);
    pick_all(&mut s, &mut rec, &["ECHO", "RESONANCE", "IDENTITY"]);
    assert_eq!(s.phase(), FieldPhase::Unlocking);
    finish_unlock(&mut s, &mut rec);
    assert!(s.unlocked().contains("echo-chamber"));
}

#[test]
fn hard_reset_mid_sequence_drops_pending_steps() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["PARTICLE", "MEMORY", "LIGHT"]);
    run(&mut s, &mut rec, 2.0);
    assert_eq!(s.reveal_phase(), RevealPhase::SentenceReveal);
    let shown = rec.details.len();

    s.hard_reset(&mut rec);
    assert_eq!(s.reveal_phase(), RevealPhase::Idle);
    assert_eq!(s.pending_timers(), 0);
    run(&mut s, &mut rec, 12.0);
    assert_eq!(s.phase(), FieldPhase::Landing);
    assert_eq!(rec.details.len(), shown);
    assert!(s.unlocked().is_empty());
    assert!(matches!(rec.cues.last(), Some(RevealCue::Clear)));
}

#[test]
fn go_home_before_field_ready_cancels_activation() {
    let mut rec = Recorder::default();
    let mut s = Session::new(FieldConfig::default(), Catalog::builtin(), Box::new(MemoryStore::new()), 3);
    s.click(Vec2::ZERO, ASPECT, &mut rec);
    run(&mut s, &mut rec, 0.5);
    s.go_home(&mut rec);
    run(&mut s, &mut rec, 2.0);
    assert_eq!(s.phase(), FieldPhase::Landing);
}

#[test]
fn go_home_keeps_unlocked_projects() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["ECHO", "RESONANCE", "IDENTITY"]);
    finish_unlock(&mut s, &mut rec);
    s.go_home(&mut rec);
    assert!(s.selection().is_empty());
    assert!(rec.collected.is_empty());
    assert_eq!(s.phase(), FieldPhase::Landing);
    assert!(s.unlocked().contains("echo-chamber"));
    for e in s.field().entities() {
        assert_eq!(e.position, e.home);
        assert!(!e.selected && !e.fixed && !e.dimmed);
    }
}

#[test]
fn gallery_detail_returns_to_gallery() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["ECHO", "RESONANCE", "IDENTITY"]);
    finish_unlock(&mut s, &mut rec);
    s.switch_view(View::Gallery, &mut rec);
    assert_eq!(s.view(), View::Gallery);
    assert!(s.selection().is_empty());

    s.open_project("flux-state", &mut rec);
    assert_eq!(s.view(), View::Gallery);
    s.open_project("echo-chamber", &mut rec);
    assert_eq!(s.view(), View::ProjectDetail);
    assert_eq!(s.previous_view(), View::Gallery);

    let hidden = rec.hidden;
    s.close_project_detail(&mut rec);
    assert_eq!(rec.hidden, hidden + 1);
    assert_eq!(s.view(), View::Gallery);
    assert_eq!(rec.views.last(), Some(&View::Gallery));
}

#[test]
fn returning_to_field_restores_active_phase() {
    let (mut s, mut rec) = active_session();
    s.switch_view(View::About, &mut rec);
    assert!(!rec.visibility.keywords);
    assert!(!s.select("ECHO", &mut rec));
    s.switch_view(View::Field, &mut rec);
    assert_eq!(s.phase(), FieldPhase::Active);
    assert!(rec.visibility.keywords);
}

#[test]
fn unlocks_survive_a_new_session() {
    let store = SharedStore::default();
    let (mut s, mut rec) = active_session_with(Box::new(store.clone()));
    pick_all(&mut s, &mut rec, &["SIGNAL", "NOISE", "HARMONY"]);
    finish_unlock(&mut s, &mut rec);

    let mut rec2 = Recorder::default();
    let s2 = Session::new(FieldConfig::default(), Catalog::builtin(), Box::new(store), 9);
    s2.sync(&mut rec2);
    assert_eq!(rec2.gallery, ["signal-noise"]);
    assert_eq!(s2.unlocked().records(), s.unlocked().records());
}

#[test]
fn free_keywords_stay_inside_the_wrap_volume() {
    let (mut s, mut rec) = active_session();
    s.key_down("w");
    let ws = FieldConfig::default().world_size;
    for frame in 0..600 {
        if frame == 300 {
            s.key_up("w");
            s.key_down("a");
        }
        s.tick(DT, &mut rec);
        let cam = *s.camera();
        for e in s.field().entities().iter().filter(|e| e.is_free()) {
            let rel = e.position - cam.position;
            for axis in [cam.right(), cam.up(), cam.forward()] {
                assert!(rel.dot(axis).abs() <= ws + 1e-3, "{} at {}", e.word, rel.dot(axis));
            }
        }
    }
    s.key_up("a");
    assert!(s.camera().position.z < 0.0);
}

#[test]
fn opacity_stays_in_bounds() {
    let (mut s, mut rec) = active_session();
    pick_all(&mut s, &mut rec, &["ECHO", "DATA"]);
    s.key_down("s");
    for _ in 0..300 {
        s.tick(DT, &mut rec);
        for e in s.field().entities() {
            assert!((0.0..=1.0).contains(&e.opacity), "{} {}", e.word, e.opacity);
        }
    }
}

#[test]
fn pointer_hover_follows_the_ray() {
    let (mut s, mut rec) = active_session();
    run(&mut s, &mut rec, 3.0);
    // aim straight at the most visible free keyword in front of the camera
    let cam = *s.camera();
    let view_proj = cam.projection_matrix(ASPECT) * cam.view_matrix();
    let target = s
        .field()
        .entities()
        .iter()
        .filter(|e| e.opacity > 0.3 && (e.position - cam.position).dot(cam.forward()) > 2.0)
        .min_by(|a, b| {
            let da = a.position.distance(cam.position);
            let db = b.position.distance(cam.position);
            da.total_cmp(&db)
        })
        .map(|e| e.position);
    let Some(target) = target else {
        return;
    };
    let clip = view_proj * target.extend(1.0);
    let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
    assert!(s.pointer_move(ndc, ASPECT));
    assert!(s.hovered().is_some());
    s.switch_view(View::About, &mut rec);
    assert_eq!(s.hovered(), None);
    assert!(!s.pointer_move(ndc, ASPECT));
}
