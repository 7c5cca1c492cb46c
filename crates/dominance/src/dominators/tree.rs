use dominance_util::IndexMap;

use crate::dominators::indexer::UNDEFINED;

/// Invert an immediate dominator array into a map from each dominator to the vertices it
/// immediately dominates.
///
/// Children are listed in ascending index order. Vertices which do not dominate anything have no
/// entry.
///
/// # Panics
///
/// Panics if any immediate dominator was left unresolved or points outside of the array.
pub(crate) fn build_dominator_tree(idom: &[usize]) -> IndexMap<Vec<usize>> {
    assert!(!idom.is_empty());
    assert_eq!(idom[0], 0, "the entry must be its own immediate dominator");

    let mut tree = IndexMap::new();
    for (w, &d) in idom.iter().enumerate().skip(1) {
        assert!(
            d != UNDEFINED && d < idom.len(),
            "immediate dominator of vertex {w} was never resolved"
        );
        tree.get_or_insert_with(d, Vec::new).push(w);
    }
    tree
}
