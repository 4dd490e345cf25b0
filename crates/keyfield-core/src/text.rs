/// A run of sentence text, flagged when it is one of the project's keywords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `sentence` into segments, emphasizing whole words that match any of
/// `keywords` case-insensitively. Adjacent plain runs are merged.
pub fn emphasize(sentence: &str, keywords: &[String]) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    let mut push = |text: &str, emphasized: bool| match out.last_mut() {
        Some(last) if !last.emphasized && !emphasized => last.text.push_str(text),
        _ => out.push(Segment {
            text: text.to_string(),
            emphasized,
        }),
    };

    let mut rest = sentence;
    while let Some(first) = rest.chars().next() {
        let word_run = is_word_char(first);
        let end = rest
            .char_indices()
            .find(|&(_, c)| is_word_char(c) != word_run)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        let hit = word_run && keywords.iter().any(|k| k.to_lowercase() == run.to_lowercase());
        push(run, hit);
        rest = tail;
    }
    out
}
