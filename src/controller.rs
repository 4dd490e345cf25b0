use crate::constants::*;
use crate::core::{Project, RevealCue, UnlockRecord, View, ViewController, Visibility};
use crate::{dom, markup, overlay, reveal};
use web_sys as web;

const NAV_LINKS: [(View, &str); 3] = [
    (View::Field, "nav-field"),
    (View::Gallery, "nav-gallery"),
    (View::About, "nav-about"),
];

/// Applies the session's view changes to the page. Holds no state of its
/// own beyond the catalog it lists in the gallery.
pub struct DomController {
    document: web::Document,
    projects: Vec<Project>,
}

impl DomController {
    pub fn new(document: web::Document, projects: Vec<Project>) -> Self {
        Self { document, projects }
    }

    pub fn document(&self) -> &web::Document {
        &self.document
    }

    fn dim_canvas(&self, dimmed: bool) {
        let (opacity, events) = if dimmed {
            (CANVAS_DIMMED_OPACITY, "none")
        } else {
            ("1", "auto")
        };
        dom::set_style(&self.document, CANVAS_CONTAINER_ID, "opacity", opacity);
        dom::set_style(&self.document, CANVAS_CONTAINER_ID, "pointer-events", events);
    }
}

impl ViewController for DomController {
    fn switch_view(&mut self, view: View) {
        let doc = &self.document;
        for (v, id) in NAV_LINKS {
            dom::set_class_by_id(doc, id, "active", v == view);
        }
        for id in [GALLERY_VIEW_ID, ABOUT_VIEW_ID, DETAIL_VIEW_ID] {
            dom::set_class_by_id(doc, id, "hidden", true);
        }
        dom::set_style(doc, CANVAS_CONTAINER_ID, "filter", "none");
        dom::set_class_by_id(doc, COLLECTED_BAR_ID, "hidden-view", view != View::Field);
        match view {
            View::Field => self.dim_canvas(false),
            View::Gallery => {
                self.dim_canvas(true);
                dom::set_class_by_id(doc, GALLERY_VIEW_ID, "hidden", false);
            }
            View::About => {
                self.dim_canvas(true);
                dom::set_class_by_id(doc, ABOUT_VIEW_ID, "hidden", false);
            }
            View::ProjectDetail => self.dim_canvas(true),
        }
        overlay::close_menu(doc);
    }

    fn show_project_detail(&mut self, project: &Project, used_keywords: &[String]) {
        let doc = &self.document;
        dom::set_child_text(doc, DETAIL_VIEW_ID, ".project-detail-title", &project.name);
        dom::set_child_text(doc, DETAIL_VIEW_ID, ".project-detail-year", &project.year);
        dom::set_child_text(doc, DETAIL_VIEW_ID, ".project-detail-description", &project.description);
        dom::set_child_html(
            doc,
            DETAIL_VIEW_ID,
            ".project-detail-keywords",
            &markup::detail_keywords_html(used_keywords),
        );
        if let Some(img) = doc
            .get_element_by_id(DETAIL_VIEW_ID)
            .and_then(|d| d.query_selector(".project-detail-image").ok().flatten())
        {
            _ = img.set_attribute("src", &project.image);
            _ = img.set_attribute("alt", &project.name);
        }
        for id in [GALLERY_VIEW_ID, ABOUT_VIEW_ID] {
            dom::set_class_by_id(doc, id, "hidden", true);
        }
        dom::set_class_by_id(doc, COLLECTED_BAR_ID, "hidden-view", true);
        self.dim_canvas(true);
        dom::set_class_by_id(doc, DETAIL_VIEW_ID, "hidden", false);
        log::info!("[detail] {}", project.id);
    }

    fn hide_project_detail(&mut self) {
        dom::set_class_by_id(&self.document, DETAIL_VIEW_ID, "hidden", true);
    }

    fn update_visibility(&mut self, visibility: Visibility) {
        let doc = &self.document;
        let (opacity, events) = if visibility.landing_title {
            ("1", "auto")
        } else {
            ("0", "none")
        };
        dom::set_style(doc, LANDING_TITLE_ID, "opacity", opacity);
        dom::set_style(doc, LANDING_TITLE_ID, "pointer-events", events);
        dom::set_class_by_id(doc, COLLECTED_BAR_ID, "hidden-view", !visibility.collected_bar);
    }

    fn reveal(&mut self, cue: RevealCue) {
        log::debug!("[reveal] {:?}", cue);
        reveal::apply(&self.document, cue);
    }

    fn collected_changed(&mut self, words: &[String]) {
        let doc = &self.document;
        dom::set_inner_html(doc, COLLECTED_BAR_ID, &markup::collected_bar_html(words));
        dom::set_class_by_id(doc, COLLECTED_BAR_ID, "visible", !words.is_empty());
        if let Some(inner) = doc
            .get_element_by_id(COLLECTED_BAR_ID)
            .and_then(|b| b.query_selector(".collected-words-inner").ok().flatten())
        {
            // Keep the newest word in view
            inner.set_scroll_left(inner.scroll_width());
        }
    }

    fn gallery_changed(&mut self, records: &[UnlockRecord]) {
        let doc = &self.document;
        dom::set_inner_html(
            doc,
            COLLECTED_GRID_ID,
            &markup::gallery_html(records, GALLERY_KEYWORDS_SHOWN),
        );
        dom::set_class_by_id(doc, COLLECTED_SECTION_ID, "has-items", !records.is_empty());
        let unlocked = |id: &str| records.iter().any(|r| r.project.id == id);
        dom::set_inner_html(
            doc,
            ALL_PROJECTS_ID,
            &markup::all_projects_html(&self.projects, unlocked),
        );
    }
}
