#![allow(dead_code)]
#[path = "../src/markup.rs"]
mod markup;

use keyfield_core::{emphasize, Catalog, UnlockRecord};
use markup::*;

fn words(ws: &[&str]) -> Vec<String> {
    ws.iter().map(|w| w.to_string()).collect()
}

#[test]
fn escapes_markup_characters() {
    assert_eq!(
        escape_html("<b>\"Tom\" & 'Jerry'</b>"),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
    assert_eq!(escape_html("plain"), "plain");
}

#[test]
fn sentence_wraps_emphasized_runs() {
    let catalog = Catalog::builtin();
    let p = catalog.get("echo-chamber").unwrap();
    let html = sentence_html(&emphasize(&p.full_sentence, &p.keywords));
    assert!(html.starts_with("<p class=\"full-sentence\">"));
    assert!(html.ends_with("</p>"));
    assert!(html.contains("<span class=\"highlight-word\">"));
    let spans = html.matches("highlight-word").count();
    assert!(spans >= 2, "expected several highlights, got {spans}");
}

#[test]
fn collected_bar_joins_with_connectors() {
    let html = collected_bar_html(&words(&["ECHO", "SPACE", "TIME"]));
    assert_eq!(html.matches("class=\"collected-word\"").count(), 3);
    assert_eq!(html.matches("word-connector").count(), 2);
    assert_eq!(collected_bar_html(&[]), "<div class=\"collected-words-inner\"></div>");
}

#[test]
fn gallery_shows_first_three_used_keywords() {
    let catalog = Catalog::builtin();
    let record = UnlockRecord {
        project: catalog.get("signal-noise").unwrap().clone(),
        used_keywords: words(&["ART", "SIGNAL", "NOISE", "WAVE"]),
    };
    let html = gallery_html(&[record], 3);
    assert!(html.contains("data-project=\"signal-noise\""));
    assert!(html.contains("ART \u{b7} SIGNAL \u{b7} NOISE"));
    assert!(!html.contains("WAVE"));
}

#[test]
fn all_projects_marks_locked_entries() {
    let catalog = Catalog::builtin();
    let html = all_projects_html(catalog.projects(), |id| id == "flux-state");
    assert_eq!(html.matches("gallery-item locked").count(), catalog.projects().len() - 1);
    assert!(html.contains("class=\"gallery-item\" data-project=\"flux-state\""));
}

#[test]
fn detail_keywords_are_escaped() {
    let html = detail_keywords_html(&words(&["A<B"]));
    assert_eq!(html, "<span class=\"detail-keyword\">A&lt;B</span>");
}
