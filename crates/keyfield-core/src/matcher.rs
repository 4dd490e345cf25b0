use crate::catalog::{Catalog, Project};
use smallvec::SmallVec;

/// A project whose keyword set overlaps the selection by at least the
/// threshold, with the overlapping words in selection order.
#[derive(Clone, Debug, PartialEq)]
pub struct Match<'a> {
    pub project: &'a Project,
    pub matched: SmallVec<[String; 8]>,
}

/// First project in catalog order, not yet unlocked, sharing at least
/// `threshold` words with `selection`. Pure: same inputs, same answer.
pub fn check_match<'a>(
    selection: &[String],
    catalog: &'a Catalog,
    threshold: usize,
    is_unlocked: impl Fn(&str) -> bool,
) -> Option<Match<'a>> {
    catalog
        .projects()
        .iter()
        .filter(|p| !is_unlocked(&p.id))
        .find_map(|project| {
            let mut matched: SmallVec<[String; 8]> = SmallVec::new();
            for w in selection {
                if project.has_keyword(w) && !matched.contains(w) {
                    matched.push(w.clone());
                }
            }
            (matched.len() >= threshold.max(1)).then_some(Match { project, matched })
        })
}
