//! Ordered keyword selection and the hint lines drawn from the latest pick.

use crate::catalog::Catalog;
use crate::constants::{HINT_LINE_FADE_IN_SEC, HINT_LINE_FADE_OUT_SEC, HINT_LINE_OPACITY};
use crate::field::{KeywordField, KeywordId};
use glam::Vec3;

/// Words chosen this session, in pick order. Holds words, never entities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    words: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `word`. Returns false (and changes nothing) if already present.
    pub fn select(&mut self, word: &str) -> bool {
        if self.contains(word) {
            return false;
        }
        self.words.push(word.to_string());
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HintLine {
    pub from: KeywordId,
    pub to: KeywordId,
    pub start: Vec3,
    pub end: Vec3,
}

/// Connectors from the most recent selection to the still-missing keywords of
/// every project it belongs to. Endpoints follow the entities each frame.
#[derive(Clone, Debug, Default)]
pub struct HintLines {
    lines: Vec<HintLine>,
    opacity: f32,
    target: f32,
}

impl HintLines {
    pub fn lines(&self) -> &[HintLine] {
        &self.lines
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Replace the current hints with those for the newly selected `word`.
    /// Projects for which `is_unlocked` holds are skipped.
    pub fn rebuild(
        &mut self,
        word: &str,
        selection: &SelectionState,
        catalog: &Catalog,
        is_unlocked: impl Fn(&str) -> bool,
        field: &mut KeywordField,
    ) {
        self.clear(field);
        let Some(from) = field.id_of(word) else {
            return;
        };
        for project in catalog.projects_with_keyword(word) {
            if is_unlocked(&project.id) {
                continue;
            }
            for kw in &project.keywords {
                if kw == word || selection.contains(kw) {
                    continue;
                }
                let Some(to) = field.id_of(kw) else {
                    continue;
                };
                if self.lines.iter().any(|l| l.to == to) {
                    continue;
                }
                let (start, end) = match (field.entity(from), field.entity(to)) {
                    (Some(a), Some(b)) => (a.position, b.position),
                    _ => continue,
                };
                self.lines.push(HintLine { from, to, start, end });
                field.set_hinted(to, true);
            }
        }
        self.target = HINT_LINE_OPACITY;
        log::debug!("[hint] {} lines from {}", self.lines.len(), word);
    }

    /// Begin fading the lines out; they are dropped once invisible.
    pub fn fade_out(&mut self, field: &mut KeywordField) {
        self.target = 0.0;
        field.clear_hints();
    }

    pub fn clear(&mut self, field: &mut KeywordField) {
        self.lines.clear();
        self.opacity = 0.0;
        self.target = 0.0;
        field.clear_hints();
    }

    pub fn tick(&mut self, dt: f32, field: &KeywordField) {
        if self.lines.is_empty() {
            return;
        }
        for line in self.lines.iter_mut() {
            if let (Some(a), Some(b)) = (field.entity(line.from), field.entity(line.to)) {
                line.start = a.position;
                line.end = b.position;
            }
        }
        if self.opacity < self.target {
            let rate = HINT_LINE_OPACITY / HINT_LINE_FADE_IN_SEC;
            self.opacity = (self.opacity + rate * dt).min(self.target);
        } else if self.opacity > self.target {
            let rate = HINT_LINE_OPACITY / HINT_LINE_FADE_OUT_SEC;
            self.opacity = (self.opacity - rate * dt).max(self.target);
        }
        if self.target == 0.0 && self.opacity == 0.0 {
            self.lines.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraPose;
    use crate::config::FieldConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn duplicate_select_is_a_no_op() {
        let mut s = SelectionState::new();
        assert!(s.select("ECHO"));
        assert!(s.select("DATA"));
        assert!(!s.select("ECHO"));
        assert_eq!(s.words(), ["ECHO", "DATA"]);
    }

    fn setup() -> (Catalog, KeywordField) {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(11);
        let field = KeywordField::initialize(&catalog.vocabulary(), FieldConfig::default(), &mut rng);
        (catalog, field)
    }

    #[test]
    fn hints_point_at_missing_keywords_of_open_projects() {
        let (catalog, mut field) = setup();
        let mut sel = SelectionState::new();
        sel.select("ECHO");
        sel.select("RESONANCE");
        let mut hints = HintLines::default();
        hints.rebuild("ECHO", &sel, &catalog, |_| false, &mut field);
        // echo-chamber has 7 keywords, two already picked
        assert_eq!(hints.lines().len(), 5);
        let identity = field.id_of("IDENTITY").unwrap();
        assert!(field.entity(identity).unwrap().hinted);
        assert!(!field.entity(field.id_of("RESONANCE").unwrap()).unwrap().hinted);
    }

    #[test]
    fn unlocked_projects_get_no_hints() {
        let (catalog, mut field) = setup();
        let sel = SelectionState::new();
        let mut hints = HintLines::default();
        hints.rebuild("ECHO", &sel, &catalog, |id| id == "echo-chamber", &mut field);
        assert!(hints.is_empty());
    }

    #[test]
    fn lines_fade_in_then_out() {
        let (catalog, mut field) = setup();
        let sel = SelectionState::new();
        let mut hints = HintLines::default();
        hints.rebuild("DATA", &sel, &catalog, |_| false, &mut field);
        let cam = CameraPose::default();
        for _ in 0..120 {
            field.tick(1.0 / 60.0, &cam);
            hints.tick(1.0 / 60.0, &field);
        }
        assert!((hints.opacity() - HINT_LINE_OPACITY).abs() < 1e-4);
        let to = hints.lines()[0].to;
        assert_eq!(hints.lines()[0].end, field.entity(to).unwrap().position);

        hints.fade_out(&mut field);
        for _ in 0..60 {
            hints.tick(1.0 / 60.0, &field);
        }
        assert!(hints.is_empty());
    }
}
