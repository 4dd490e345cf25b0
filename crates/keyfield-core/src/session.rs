//! The single mutable session: field, selection, unlock state, camera and
//! view, driven by frame ticks and input events.
//!
//! Every operation that changes what the visitor sees reports it through the
//! [`ViewController`] passed in; the session never holds on to it.

use crate::burst::Burst;
use crate::camera::{CameraPose, CameraRig, FlightKey};
use crate::catalog::{Catalog, Project};
use crate::config::FieldConfig;
use crate::field::{KeywordEntity, KeywordField, KeywordId};
use crate::matcher::check_match;
use crate::persistence::{PersistenceStore, UnlockedProjects};
use crate::pointer::{hit_test, pickable, HoverTracker, Ray};
use crate::scheduler::Scheduler;
use crate::selection::{HintLine, HintLines, SelectionState};
use crate::sequencer::{RevealContext, RevealPhase, StepOutcome, StepToken, UnlockSequencer};
use crate::view::{FieldPhase, RevealCue, View, ViewController, Visibility};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Delayed work. Each variant carries what it needs to tell whether it is
/// still wanted when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    FieldReady { epoch: u64 },
    Reveal(StepToken),
}

/// Read-only view of everything the renderer draws in one frame.
pub struct Frame<'a> {
    pub time: f64,
    pub camera: &'a CameraPose,
    pub entities: &'a [KeywordEntity],
    pub hint_lines: &'a [HintLine],
    pub hint_opacity: f32,
    pub burst: &'a Burst,
    pub visibility: Visibility,
    pub presence: f32,
}

pub struct Session {
    config: FieldConfig,
    catalog: Catalog,
    field: KeywordField,
    selection: SelectionState,
    hints: HintLines,
    hover: HoverTracker,
    unlocked: UnlockedProjects,
    sequencer: UnlockSequencer,
    scheduler: Scheduler<Timer>,
    rig: CameraRig,
    burst: Burst,
    view: View,
    previous_view: View,
    phase: FieldPhase,
    /// Bumped by every reset; landing timers from an older epoch are stale.
    epoch: u64,
    rng: StdRng,
}

impl Session {
    pub fn new(config: FieldConfig, catalog: Catalog, store: Box<dyn PersistenceStore>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = KeywordField::initialize(&catalog.vocabulary(), config.clone(), &mut rng);
        let unlocked = UnlockedProjects::load(store);
        log::info!(
            "[session] {} keywords, {} projects, {} unlocked",
            field.len(),
            catalog.projects().len(),
            unlocked.len()
        );
        Self {
            config,
            catalog,
            field,
            selection: SelectionState::new(),
            hints: HintLines::default(),
            hover: HoverTracker::default(),
            unlocked,
            sequencer: UnlockSequencer::new(),
            scheduler: Scheduler::new(),
            rig: CameraRig::default(),
            burst: Burst::default(),
            view: View::Field,
            previous_view: View::Field,
            phase: FieldPhase::Landing,
            epoch: 0,
            rng,
        }
    }

    /// Push the full presentation state, e.g. right after start-up.
    pub fn sync(&self, vc: &mut dyn ViewController) {
        vc.switch_view(self.view);
        vc.update_visibility(self.visibility());
        vc.collected_changed(self.selection.words());
        vc.gallery_changed(self.unlocked.records());
    }

    // ---------------- accessors ----------------

    pub fn view(&self) -> View {
        self.view
    }
    pub fn previous_view(&self) -> View {
        self.previous_view
    }
    pub fn phase(&self) -> FieldPhase {
        self.phase
    }
    pub fn reveal_phase(&self) -> RevealPhase {
        self.sequencer.phase()
    }
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
    pub fn field(&self) -> &KeywordField {
        &self.field
    }
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
    pub fn hints(&self) -> &HintLines {
        &self.hints
    }
    pub fn unlocked(&self) -> &UnlockedProjects {
        &self.unlocked
    }
    pub fn camera(&self) -> &CameraPose {
        &self.rig.pose
    }
    pub fn hovered(&self) -> Option<KeywordId> {
        self.hover.current()
    }
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }
    pub fn visibility(&self) -> Visibility {
        Visibility::of(self.view, self.phase)
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            time: self.scheduler.now(),
            camera: &self.rig.pose,
            entities: self.field.entities(),
            hint_lines: self.hints.lines(),
            hint_opacity: self.hints.opacity(),
            burst: &self.burst,
            visibility: self.visibility(),
            presence: self.field.presence(),
        }
    }

    // ---------------- frame ----------------

    pub fn tick(&mut self, dt: f32, vc: &mut dyn ViewController) {
        let dt = dt.max(0.0);
        if self.view == View::Field && self.phase.is_interactive() {
            self.rig.step(dt, &self.config.flight);
        }
        for timer in self.scheduler.advance(dt) {
            self.fire(timer, vc);
        }
        self.field.tick(dt, &self.rig.pose);
        self.hints.tick(dt, &self.field);
        self.burst.tick(dt);
    }

    fn fire(&mut self, timer: Timer, vc: &mut dyn ViewController) {
        match timer {
            Timer::FieldReady { epoch } => {
                if epoch != self.epoch || self.phase != FieldPhase::Shattering {
                    log::debug!("[landing] dropping stale field-ready timer");
                    return;
                }
                self.phase = FieldPhase::Active;
                self.field.fade_in();
                log::info!("[landing] field active");
                vc.update_visibility(self.visibility());
            }
            Timer::Reveal(token) => {
                if self.phase != FieldPhase::Unlocking {
                    log::debug!("[unlock] dropping step outside unlocking phase");
                    return;
                }
                let mut ctx = RevealContext {
                    field: &mut self.field,
                    hints: &mut self.hints,
                    camera: &self.rig.pose,
                    unlocked: &mut self.unlocked,
                    view: &mut *vc,
                    rng: &mut self.rng,
                    timings: &self.config.reveal,
                };
                match self.sequencer.step(token, &mut ctx) {
                    StepOutcome::Next { delay, token } => {
                        self.scheduler.enqueue(delay, Timer::Reveal(token));
                    }
                    StepOutcome::Finished { project_id } => {
                        log::info!("[unlock] showing {project_id}");
                        self.phase = FieldPhase::ProjectReveal;
                        self.previous_view = View::Field;
                        self.view = View::ProjectDetail;
                        vc.update_visibility(self.visibility());
                    }
                    StepOutcome::Dropped => {}
                }
            }
        }
    }

    // ---------------- input ----------------

    /// Update hover from a pointer position in NDC. Returns whether a keyword
    /// is under the pointer.
    pub fn pointer_move(&mut self, ndc: Vec2, aspect: f32) -> bool {
        if self.view != View::Field || !self.phase.is_interactive() {
            return false;
        }
        let hit = self.pick(ndc, aspect);
        self.hover.update(hit, &mut self.field);
        self.hover.current().is_some()
    }

    fn pick(&self, ndc: Vec2, aspect: f32) -> Option<KeywordId> {
        let ray = Ray::from_ndc(&self.rig.pose, ndc, aspect);
        hit_test(&ray, &self.rig.pose, &self.field, pickable(&self.field))
    }

    /// A click on the canvas (overlay clicks are filtered by the caller).
    pub fn click(&mut self, ndc: Vec2, aspect: f32, vc: &mut dyn ViewController) {
        if self.view != View::Field {
            return;
        }
        match self.phase {
            FieldPhase::Landing => self.shatter(vc),
            FieldPhase::Active => {
                let Some(id) = self.pick(ndc, aspect) else {
                    return;
                };
                if let Some(word) = self.field.word(id).map(str::to_owned) {
                    self.select(&word, vc);
                }
            }
            _ => {}
        }
    }

    fn shatter(&mut self, vc: &mut dyn ViewController) {
        self.phase = FieldPhase::Shattering;
        self.burst
            .spawn(self.config.burst_particles, Vec3::ZERO, &mut self.rng);
        self.scheduler.enqueue(
            self.config.shatter_delay,
            Timer::FieldReady { epoch: self.epoch },
        );
        log::info!("[landing] shatter");
        vc.update_visibility(self.visibility());
    }

    /// Select `word`, redistribute the field, draw hints and check for an
    /// unlock. Returns false if nothing happened (wrong phase, unknown or
    /// already selected word).
    pub fn select(&mut self, word: &str, vc: &mut dyn ViewController) -> bool {
        if self.view != View::Field || !self.phase.is_interactive() {
            return false;
        }
        let Some(id) = self.field.id_of(word) else {
            return false;
        };
        if !self.selection.select(word) {
            return false;
        }
        if self.hover.current() == Some(id) {
            self.hover.forget();
        }
        self.field.set_selected(word);
        self.field.redistribute_around(id, &mut self.rng);
        let unlocked = &self.unlocked;
        self.hints.rebuild(
            word,
            &self.selection,
            &self.catalog,
            |pid| unlocked.contains(pid),
            &mut self.field,
        );
        log::info!("[select] {} ({} chosen)", word, self.selection.len());
        vc.collected_changed(self.selection.words());

        let found = check_match(
            self.selection.words(),
            &self.catalog,
            self.config.match_threshold,
            |pid| self.unlocked.contains(pid),
        )
        .map(|m| (m.project.clone(), m.matched.into_vec()));
        if let Some((project, matched)) = found {
            self.begin_unlock(project, matched, vc);
        }
        true
    }

    fn begin_unlock(&mut self, project: Project, matched: Vec<String>, vc: &mut dyn ViewController) {
        self.phase = FieldPhase::Unlocking;
        self.hover.clear(&mut self.field);
        vc.update_visibility(self.visibility());
        let used = self.selection.words().to_vec();
        let mut ctx = RevealContext {
            field: &mut self.field,
            hints: &mut self.hints,
            camera: &self.rig.pose,
            unlocked: &mut self.unlocked,
            view: &mut *vc,
            rng: &mut self.rng,
            timings: &self.config.reveal,
        };
        match self.sequencer.begin(project, &matched, used, &mut ctx) {
            Some((delay, token)) => self.scheduler.enqueue(delay, Timer::Reveal(token)),
            None => {
                self.phase = FieldPhase::Active;
                vc.update_visibility(self.visibility());
            }
        }
    }

    /// Returns true if the key is a flight key.
    pub fn key_down(&mut self, key: &str) -> bool {
        match FlightKey::from_key(key) {
            Some(k) => {
                self.rig.keys.set(k, true);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        match FlightKey::from_key(key) {
            Some(k) => {
                self.rig.keys.set(k, false);
                true
            }
            None => false,
        }
    }

    // ---------------- navigation ----------------

    pub fn switch_view(&mut self, view: View, vc: &mut dyn ViewController) {
        if self.phase == FieldPhase::Unlocking {
            log::debug!("[view] ignoring switch to {:?} while unlocking", view);
            return;
        }
        if view == View::ProjectDetail {
            return;
        }
        if self.view == View::ProjectDetail {
            vc.hide_project_detail();
        }
        if view != View::Field {
            self.hover.clear(&mut self.field);
        }
        if self.phase == FieldPhase::ProjectReveal {
            self.reset_selection(vc);
            self.phase = FieldPhase::Active;
        }
        self.view = view;
        if view == View::Field && !matches!(self.phase, FieldPhase::Landing | FieldPhase::Shattering) {
            self.phase = FieldPhase::Active;
        }
        log::info!("[view] {}", view.name());
        vc.switch_view(view);
        vc.update_visibility(self.visibility());
    }

    /// Show the detail of an unlocked project. Unknown or locked ids are
    /// ignored.
    pub fn open_project(&mut self, id: &str, vc: &mut dyn ViewController) {
        if self.phase == FieldPhase::Unlocking {
            return;
        }
        let Some(record) = self.unlocked.get(id) else {
            log::debug!("[view] no unlocked project {id}");
            return;
        };
        if self.view != View::ProjectDetail {
            self.previous_view = self.view;
        }
        self.view = View::ProjectDetail;
        vc.show_project_detail(&record.project, &record.used_keywords);
        vc.update_visibility(self.visibility());
    }

    /// Leave the detail view: back to the gallery if that is where it was
    /// opened from, otherwise back to the field with a fresh selection.
    pub fn close_project_detail(&mut self, vc: &mut dyn ViewController) {
        if self.view != View::ProjectDetail {
            return;
        }
        vc.hide_project_detail();
        if self.previous_view == View::Gallery {
            self.view = View::Gallery;
            vc.switch_view(View::Gallery);
            vc.update_visibility(self.visibility());
            return;
        }
        self.reset_selection(vc);
        self.view = View::Field;
        if !matches!(self.phase, FieldPhase::Landing | FieldPhase::Shattering) {
            self.phase = FieldPhase::Active;
        }
        vc.switch_view(View::Field);
        vc.update_visibility(self.visibility());
    }

    fn reset_selection(&mut self, vc: &mut dyn ViewController) {
        self.selection.clear();
        self.hints.clear(&mut self.field);
        self.hover.forget();
        self.field.release_selection();
        vc.collected_changed(self.selection.words());
    }

    // ---------------- resets ----------------

    /// Soft reset: back to the landing screen with an empty selection.
    /// Unlocked projects are kept. Ignored while an unlock is running.
    pub fn go_home(&mut self, vc: &mut dyn ViewController) {
        if self.phase == FieldPhase::Unlocking {
            log::debug!("[reset] go home ignored while unlocking");
            return;
        }
        self.reset_field(vc);
        log::info!("[reset] home");
    }

    /// Soft reset plus wiping every unlocked project. Always allowed; aborts a
    /// running unlock.
    pub fn hard_reset(&mut self, vc: &mut dyn ViewController) {
        self.sequencer.abort();
        vc.reveal(RevealCue::Clear);
        self.unlocked.clear();
        vc.gallery_changed(self.unlocked.records());
        self.reset_field(vc);
        log::info!("[reset] hard");
    }

    fn reset_field(&mut self, vc: &mut dyn ViewController) {
        self.epoch += 1;
        self.scheduler.clear();
        self.selection.clear();
        self.hints.clear(&mut self.field);
        self.hover.forget();
        self.field.reset_all();
        self.burst.clear();
        self.rig.reset();
        self.phase = FieldPhase::Landing;
        if self.view == View::ProjectDetail {
            vc.hide_project_detail();
        }
        self.view = View::Field;
        self.previous_view = View::Field;
        vc.collected_changed(self.selection.words());
        vc.switch_view(View::Field);
        vc.update_visibility(self.visibility());
    }
}
