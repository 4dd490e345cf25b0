//! Top-level views, field sub-phases, and the hooks a front end implements to
//! present them.

use crate::catalog::Project;
use crate::persistence::UnlockRecord;
use crate::text::Segment;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Field,
    Gallery,
    About,
    ProjectDetail,
}

impl View {
    /// Navigation name used by menu links (`data-view`).
    pub fn name(self) -> &'static str {
        match self {
            View::Field => "field",
            View::Gallery => "gallery",
            View::About => "about",
            View::ProjectDetail => "projectDetail",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "field" => Some(View::Field),
            "gallery" => Some(View::Gallery),
            "about" => Some(View::About),
            "projectDetail" => Some(View::ProjectDetail),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FieldPhase {
    /// Title screen; the first click shatters it.
    #[default]
    Landing,
    Shattering,
    /// Interactive: hover, select and fly.
    Active,
    /// An unlock sequence owns the field.
    Unlocking,
    /// A freshly unlocked project is on screen.
    ProjectReveal,
}

impl FieldPhase {
    pub fn is_interactive(self) -> bool {
        self == FieldPhase::Active
    }
}

/// What the front end should draw for a given view and phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
    pub landing_title: bool,
    pub keywords: bool,
    pub particles: bool,
    pub collected_bar: bool,
}

impl Visibility {
    pub fn of(view: View, phase: FieldPhase) -> Self {
        let field = view == View::Field;
        let keywords = field && matches!(phase, FieldPhase::Active | FieldPhase::Unlocking);
        Self {
            landing_title: field && phase == FieldPhase::Landing,
            keywords,
            particles: field,
            collected_bar: keywords,
        }
    }
}

/// Overlay steps of the unlock reveal. The front end animates each cue with
/// CSS; timing is owned by the core.
#[derive(Clone, Debug, PartialEq)]
pub enum RevealCue {
    /// Blur layer over the canvas on or off.
    Blur(bool),
    /// Narrative sentence with keyword runs emphasized.
    Sentence(Vec<Segment>),
    /// Scatter the sentence into particles and remove it.
    Dissolve,
    /// Large centered project name with converging particles.
    Title(String),
    /// Move the title up into the detail header position.
    TitleToHeader,
    /// Remove every reveal overlay immediately.
    Clear,
}

/// Presentation hooks. The session owns view and phase state and tells the
/// front end what changed; implementations never call back into the session.
pub trait ViewController {
    fn switch_view(&mut self, view: View);
    fn show_project_detail(&mut self, project: &Project, used_keywords: &[String]);
    fn hide_project_detail(&mut self);
    fn update_visibility(&mut self, visibility: Visibility);
    fn reveal(&mut self, cue: RevealCue);
    /// Ordered selection for the collected-keyword bar.
    fn collected_changed(&mut self, _words: &[String]) {}
    /// Unlocked records in unlock order, for the gallery.
    fn gallery_changed(&mut self, _records: &[UnlockRecord]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_only_in_interactive_field() {
        assert!(Visibility::of(View::Field, FieldPhase::Active).keywords);
        assert!(Visibility::of(View::Field, FieldPhase::Unlocking).keywords);
        assert!(!Visibility::of(View::Field, FieldPhase::Landing).keywords);
        assert!(!Visibility::of(View::Gallery, FieldPhase::Active).keywords);
        let landing = Visibility::of(View::Field, FieldPhase::Landing);
        assert!(landing.landing_title && landing.particles);
        assert!(!Visibility::of(View::About, FieldPhase::Landing).landing_title);
    }

    #[test]
    fn view_names_round_trip() {
        for v in [View::Field, View::Gallery, View::About, View::ProjectDetail] {
            assert_eq!(View::from_name(v.name()), Some(v));
        }
        assert_eq!(View::from_name("contact"), None);
    }
}
