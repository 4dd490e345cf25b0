//! Timed unlock reveal.
//!
//! ```text
//! Idle -> Gathering -> SentenceReveal -> Dissolve -> TitleReveal -> DetailTransition -> Idle
//! ```
//!
//! Every transition after `Gathering` is driven by a [`StepToken`] that the
//! caller schedules for the returned delay. A token only advances the machine
//! if its generation is current and it names the expected next phase, so a
//! token that fires after [`UnlockSequencer::abort`] is dropped.
//!
//! The project is committed to [`UnlockedProjects`] on entry to
//! `DetailTransition`; the detail view is handed over when that phase ends.

use crate::camera::CameraPose;
use crate::catalog::Project;
use crate::config::RevealTimings;
use crate::constants::{GATHER_DISTANCE, GATHER_FADE_SEC, GATHER_SPREAD};
use crate::easing::Easing;
use crate::field::{KeywordField, KeywordId};
use crate::persistence::UnlockedProjects;
use crate::selection::HintLines;
use crate::text::emphasize;
use crate::view::{RevealCue, ViewController};
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RevealPhase {
    #[default]
    Idle,
    Gathering,
    SentenceReveal,
    Dissolve,
    TitleReveal,
    DetailTransition,
}

impl RevealPhase {
    fn successor(self) -> Option<Self> {
        match self {
            RevealPhase::Idle => None,
            RevealPhase::Gathering => Some(RevealPhase::SentenceReveal),
            RevealPhase::SentenceReveal => Some(RevealPhase::Dissolve),
            RevealPhase::Dissolve => Some(RevealPhase::TitleReveal),
            RevealPhase::TitleReveal => Some(RevealPhase::DetailTransition),
            RevealPhase::DetailTransition => Some(RevealPhase::Idle),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepToken {
    generation: u64,
    next: RevealPhase,
}

impl StepToken {
    pub fn next_phase(&self) -> RevealPhase {
        self.next
    }
}

#[derive(Debug, PartialEq)]
pub enum StepOutcome {
    /// Schedule `token` after `delay` seconds.
    Next { delay: f32, token: StepToken },
    /// The sequence completed and the detail view was shown.
    Finished { project_id: String },
    /// Stale or out-of-order token; nothing changed.
    Dropped,
}

/// Everything a reveal step may touch, borrowed from the session.
pub struct RevealContext<'a> {
    pub field: &'a mut KeywordField,
    pub hints: &'a mut HintLines,
    pub camera: &'a CameraPose,
    pub unlocked: &'a mut UnlockedProjects,
    pub view: &'a mut dyn ViewController,
    pub rng: &'a mut StdRng,
    pub timings: &'a RevealTimings,
}

#[derive(Debug)]
struct InFlight {
    project: Project,
    matched: Vec<KeywordId>,
    used_keywords: Vec<String>,
}

#[derive(Debug, Default)]
pub struct UnlockSequencer {
    phase: RevealPhase,
    generation: u64,
    active: Option<InFlight>,
}

impl UnlockSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase != RevealPhase::Idle
    }

    pub fn project_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.project.id.as_str())
    }

    /// Start the reveal for `project`. `matched` are the overlapping words,
    /// `used_keywords` the full selection to store. Returns `None` if a
    /// sequence is already running.
    pub fn begin(
        &mut self,
        project: Project,
        matched: &[String],
        used_keywords: Vec<String>,
        ctx: &mut RevealContext<'_>,
    ) -> Option<(f32, StepToken)> {
        if self.is_running() {
            log::warn!("[unlock] ignoring {} while {:?}", project.id, self.phase);
            return None;
        }
        self.generation += 1;
        self.phase = RevealPhase::Gathering;
        log::info!("[unlock] {} via {:?}", project.id, matched);

        let ids: Vec<KeywordId> = matched.iter().filter_map(|w| ctx.field.id_of(w)).collect();
        ctx.view.reveal(RevealCue::Blur(true));
        ctx.field.dim_all_except(&ids);
        ctx.hints.fade_out(ctx.field);

        let cam = ctx.camera;
        let focus = cam.position + cam.forward() * GATHER_DISTANCE;
        let (right, up) = (cam.right(), cam.up());
        for (i, id) in ids.iter().enumerate() {
            let spread = right * (ctx.rng.gen::<f32>() - 0.5) * GATHER_SPREAD[0]
                + up * (ctx.rng.gen::<f32>() - 0.5) * GATHER_SPREAD[1];
            ctx.field.set_fixed(*id, true);
            ctx.field.animate_position(
                *id,
                focus + spread,
                ctx.timings.gather_move,
                i as f32 * ctx.timings.gather_stagger,
                Easing::CubicInOut,
            );
        }

        self.active = Some(InFlight {
            project,
            matched: ids,
            used_keywords,
        });
        Some((ctx.timings.gather, self.token(RevealPhase::SentenceReveal)))
    }

    fn token(&self, next: RevealPhase) -> StepToken {
        StepToken {
            generation: self.generation,
            next,
        }
    }

    pub fn step(&mut self, token: StepToken, ctx: &mut RevealContext<'_>) -> StepOutcome {
        if token.generation != self.generation || self.phase.successor() != Some(token.next) {
            log::debug!("[unlock] dropping stale step {:?}", token.next);
            return StepOutcome::Dropped;
        }
        let Some(active) = self.active.as_ref() else {
            return StepOutcome::Dropped;
        };
        self.phase = token.next;
        let t = ctx.timings;
        let (delay, next) = match token.next {
            RevealPhase::SentenceReveal => {
                let segments = emphasize(&active.project.full_sentence, &active.project.keywords);
                ctx.view.reveal(RevealCue::Sentence(segments));
                for id in &active.matched {
                    ctx.field.animate_opacity(*id, 0.0, GATHER_FADE_SEC, 0.0);
                }
                (t.sentence, RevealPhase::Dissolve)
            }
            RevealPhase::Dissolve => {
                ctx.view.reveal(RevealCue::Dissolve);
                (t.dissolve, RevealPhase::TitleReveal)
            }
            RevealPhase::TitleReveal => {
                ctx.view.reveal(RevealCue::Title(active.project.name.clone()));
                (t.title, RevealPhase::DetailTransition)
            }
            RevealPhase::DetailTransition => {
                if ctx
                    .unlocked
                    .insert(active.project.clone(), active.used_keywords.clone())
                {
                    ctx.view.gallery_changed(ctx.unlocked.records());
                }
                ctx.view.reveal(RevealCue::TitleToHeader);
                (t.detail, RevealPhase::Idle)
            }
            RevealPhase::Idle | RevealPhase::Gathering => {
                let Some(done) = self.active.take() else {
                    return StepOutcome::Dropped;
                };
                ctx.view.reveal(RevealCue::Blur(false));
                ctx.view.reveal(RevealCue::Clear);
                ctx.view
                    .show_project_detail(&done.project, &done.used_keywords);
                self.phase = RevealPhase::Idle;
                log::info!("[unlock] {} revealed", done.project.id);
                return StepOutcome::Finished {
                    project_id: done.project.id,
                };
            }
        };
        StepOutcome::Next {
            delay,
            token: self.token(next),
        }
    }

    /// Abandon any running sequence; outstanding tokens become stale.
    pub fn abort(&mut self) {
        if self.is_running() {
            log::info!("[unlock] aborted during {:?}", self.phase);
        }
        self.generation += 1;
        self.phase = RevealPhase::Idle;
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::FieldConfig;
    use crate::persistence::MemoryStore;
    use crate::view::{View, Visibility};
    use rand::SeedableRng;

    #[derive(Default)]
    struct Cues(Vec<RevealCue>);

    impl ViewController for Cues {
        fn switch_view(&mut self, _: View) {}
        fn show_project_detail(&mut self, _: &Project, _: &[String]) {}
        fn hide_project_detail(&mut self) {}
        fn update_visibility(&mut self, _: Visibility) {}
        fn reveal(&mut self, cue: RevealCue) {
            self.0.push(cue);
        }
    }

    struct Rig {
        catalog: Catalog,
        field: KeywordField,
        hints: HintLines,
        camera: CameraPose,
        unlocked: UnlockedProjects,
        cues: Cues,
        rng: StdRng,
        timings: RevealTimings,
    }

    impl Rig {
        fn new() -> Self {
            let catalog = Catalog::builtin();
            let mut rng = StdRng::seed_from_u64(2);
            let field = KeywordField::initialize(&catalog.vocabulary(), FieldConfig::default(), &mut rng);
            Self {
                catalog,
                field,
                hints: HintLines::default(),
                camera: CameraPose::default(),
                unlocked: UnlockedProjects::load(Box::new(MemoryStore::new())),
                cues: Cues::default(),
                rng,
                timings: RevealTimings::default(),
            }
        }

        fn ctx(&mut self) -> RevealContext<'_> {
            RevealContext {
                field: &mut self.field,
                hints: &mut self.hints,
                camera: &self.camera,
                unlocked: &mut self.unlocked,
                view: &mut self.cues,
                rng: &mut self.rng,
                timings: &self.timings,
            }
        }
    }

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn walks_every_phase_and_commits_once() {
        let mut rig = Rig::new();
        let project = rig.catalog.get("echo-chamber").cloned().unwrap();
        let picked = words(&["ECHO", "RESONANCE", "IDENTITY"]);
        let mut seq = UnlockSequencer::new();
        let (_, mut token) = seq
            .begin(project, &picked, picked.clone(), &mut rig.ctx())
            .unwrap();
        let mut seen = vec![seq.phase()];
        loop {
            match seq.step(token, &mut rig.ctx()) {
                StepOutcome::Next { token: t, .. } => {
                    seen.push(seq.phase());
                    token = t;
                }
                StepOutcome::Finished { project_id } => {
                    assert_eq!(project_id, "echo-chamber");
                    break;
                }
                StepOutcome::Dropped => panic!("unexpected drop"),
            }
        }
        assert_eq!(
            seen,
            [
                RevealPhase::Gathering,
                RevealPhase::SentenceReveal,
                RevealPhase::Dissolve,
                RevealPhase::TitleReveal,
                RevealPhase::DetailTransition,
            ]
        );
        assert_eq!(seq.phase(), RevealPhase::Idle);
        assert_eq!(rig.unlocked.len(), 1);
        assert_eq!(rig.cues.0.first(), Some(&RevealCue::Blur(true)));
    }

    #[test]
    fn second_begin_is_refused_while_running() {
        let mut rig = Rig::new();
        let a = rig.catalog.get("flux-state").cloned().unwrap();
        let b = rig.catalog.get("void-interface").cloned().unwrap();
        let mut seq = UnlockSequencer::new();
        assert!(seq.begin(a, &[], vec![], &mut rig.ctx()).is_some());
        assert!(seq.begin(b, &[], vec![], &mut rig.ctx()).is_none());
        assert_eq!(seq.project_id(), Some("flux-state"));
    }

    #[test]
    fn stale_and_replayed_tokens_are_dropped() {
        let mut rig = Rig::new();
        let project = rig.catalog.get("signal-noise").cloned().unwrap();
        let mut seq = UnlockSequencer::new();
        let (_, first) = seq.begin(project.clone(), &[], vec![], &mut rig.ctx()).unwrap();
        assert!(matches!(seq.step(first, &mut rig.ctx()), StepOutcome::Next { .. }));
        // same token again is out of order
        assert_eq!(seq.step(first, &mut rig.ctx()), StepOutcome::Dropped);

        seq.abort();
        let (_, fresh) = seq.begin(project, &[], vec![], &mut rig.ctx()).unwrap();
        assert_eq!(seq.step(first, &mut rig.ctx()), StepOutcome::Dropped);
        assert!(matches!(seq.step(fresh, &mut rig.ctx()), StepOutcome::Next { .. }));
        assert!(rig.unlocked.is_empty());
    }
}
