//! HTML fragments for the DOM views. Every piece of catalog or stored text
//! passes through [`escape_html`] before it reaches `innerHTML`.

use keyfield_core::{Project, Segment, UnlockRecord};
use std::fmt::Write;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The reveal sentence with keyword runs wrapped in highlight spans.
pub fn sentence_html(segments: &[Segment]) -> String {
    let mut out = String::from("<p class=\"full-sentence\">");
    for seg in segments {
        if seg.emphasized {
            _ = write!(out, "<span class=\"highlight-word\">{}</span>", escape_html(&seg.text));
        } else {
            out.push_str(&escape_html(&seg.text));
        }
    }
    out.push_str("</p>");
    out
}

pub fn title_html(name: &str) -> String {
    format!("<h1 class=\"project-title-reveal\">{}</h1>", escape_html(name))
}

pub fn detail_keywords_html(words: &[String]) -> String {
    words
        .iter()
        .map(|w| format!("<span class=\"detail-keyword\">{}</span>", escape_html(w)))
        .collect()
}

/// Collected-keyword bar: words joined by connector spans.
pub fn collected_bar_html(words: &[String]) -> String {
    let mut out = String::from("<div class=\"collected-words-inner\">");
    for (i, w) in words.iter().enumerate() {
        if i > 0 {
            out.push_str("<span class=\"word-connector\">\u{2014}</span>");
        }
        _ = write!(out, "<span class=\"collected-word\">{}</span>", escape_html(w));
    }
    out.push_str("</div>");
    out
}

/// One gallery card per unlocked project, showing its first `shown`
/// used keywords.
pub fn gallery_html(records: &[UnlockRecord], shown: usize) -> String {
    let mut out = String::new();
    for r in records {
        let used: Vec<String> = r
            .used_keywords
            .iter()
            .take(shown)
            .map(|w| escape_html(w))
            .collect();
        _ = write!(
            out,
            "<div class=\"gallery-item collected-project-item\" data-project=\"{}\">\
             <span class=\"project-name\">{}</span>\
             <div class=\"used-keywords\">{}</div></div>",
            escape_html(&r.project.id),
            escape_html(&r.project.name),
            used.join(" \u{b7} "),
        );
    }
    out
}

/// The full catalog list; locked entries carry a `locked` class.
pub fn all_projects_html(projects: &[Project], is_unlocked: impl Fn(&str) -> bool) -> String {
    let mut out = String::new();
    for p in projects {
        let class = if is_unlocked(&p.id) { "gallery-item" } else { "gallery-item locked" };
        _ = write!(
            out,
            "<div class=\"{}\" data-project=\"{}\"><span class=\"project-name\">{}</span>\
             <span class=\"project-year\">{}</span></div>",
            class,
            escape_html(&p.id),
            escape_html(&p.name),
            escape_html(&p.year),
        );
    }
    out
}
