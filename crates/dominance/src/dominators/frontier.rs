use crate::{dominators::Dominator, graph::Vertex};

/// The dominance frontier of every vertex of a [`Dominator`].
///
/// The dominance frontier of `n` is every vertex `m` such that `n` dominates a predecessor of `m`
/// but does not strictly dominate `m`. These are the join points where SSA construction needs to
/// place phi nodes for definitions in `n`.
#[derive(Debug)]
pub struct DominanceFrontiers<'a, V> {
    dominator: &'a Dominator<V>,
    frontiers: Vec<Vec<usize>>,
}

impl<'a, V: Vertex> DominanceFrontiers<'a, V> {
    /// Dominance frontier algorithm is sourced from:
    ///
    /// A Simple, Fast Dominance Algorithm, Cooper et al. (2006)
    /// https://www.clear.rice.edu/comp512/Lectures/Papers/TR06-33870-Dom.pdf
    pub fn compute(dominator: &'a Dominator<V>) -> Self {
        let idom = dominator.immediate_dominators();
        let mut frontiers = vec![Vec::new(); dominator.len()];

        for i in 0..dominator.len() {
            if i == 0 {
                // The entry also has an implicit edge from outside the graph, so any edge into it
                // makes it a join point. Nothing strictly dominates the entry, so every dominator
                // of a predecessor (the entry included) has it in its frontier. A runner which
                // already has the entry in its frontier has had its whole dominator chain visited.
                for &p in dominator.predecessors(0) {
                    let mut runner = p;
                    while frontiers[runner].last() != Some(&0) {
                        frontiers[runner].push(0);
                        if runner == 0 {
                            break;
                        }
                        runner = idom[runner];
                    }
                }
            } else if dominator.predecessors(i).len() > 1 {
                for &p in dominator.predecessors(i) {
                    let mut runner = p;
                    while runner != idom[i] {
                        insert(&mut frontiers[runner], i);
                        runner = idom[runner];
                    }
                }
            }
        }

        log::trace!(
            "computed {} dominance frontier entries",
            frontiers.iter().map(Vec::len).sum::<usize>()
        );

        DominanceFrontiers {
            dominator,
            frontiers,
        }
    }

    /// The indexes of the vertices in the dominance frontier of the vertex with index `index`, in
    /// ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn frontier_indices(&self, index: usize) -> &[usize] {
        &self.frontiers[index]
    }

    /// Return the dominance frontier of the given vertex.
    ///
    /// Returns `None` if `v` was not reachable when the `Dominator` was computed.
    pub fn frontier(&self, v: &V) -> Option<impl Iterator<Item = &'a V> + '_> {
        let dominator = self.dominator;
        Some(
            self.frontiers[dominator.index_of(v)?]
                .iter()
                .map(move |&i| &dominator.vertices()[i]),
        )
    }
}

// Frontier lists only ever grow at the end with non-decreasing indexes, so checking the last
// element is enough to avoid duplicates.
fn insert(frontier: &mut Vec<usize>, i: usize) {
    if frontier.last() != Some(&i) {
        frontier.push(i);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn compute(entry: char, edges: &[(char, char)]) -> Dominator<char> {
        let mut successors: HashMap<char, Vec<char>> = HashMap::new();
        for &(from, to) in edges {
            successors.entry(from).or_default().push(to);
            successors.entry(to).or_default();
        }
        let num_vertices = successors.len();
        Dominator::compute(entry, num_vertices, |v: &char| successors[v].clone()).unwrap()
    }

    fn frontier(frontiers: &DominanceFrontiers<'_, char>, v: char) -> Vec<char> {
        let mut frontier = frontiers.frontier(&v).unwrap().copied().collect::<Vec<_>>();
        frontier.sort();
        frontier
    }

    #[test]
    fn test_dominance_frontiers() {
        let dominator = compute(
            'a',
            &[
                ('a', 'b'),
                ('b', 'c'),
                ('b', 'd'),
                ('c', 'e'),
                ('c', 'f'),
                ('d', 'c'),
                ('d', 'f'),
            ],
        );
        let frontiers = dominator.dominance_frontiers();

        assert!(frontier(&frontiers, 'a').is_empty());
        assert!(frontier(&frontiers, 'b').is_empty());
        assert_eq!(frontier(&frontiers, 'c'), ['f']);
        assert_eq!(frontier(&frontiers, 'd'), ['c', 'f']);
        assert!(frontier(&frontiers, 'e').is_empty());
        assert!(frontier(&frontiers, 'f').is_empty());
        assert!(frontiers.frontier(&'z').is_none());
    }

    #[test]
    fn test_loop_frontiers() {
        let dominator = compute('a', &[('a', 'b'), ('b', 'c'), ('c', 'b'), ('b', 'd')]);
        let frontiers = dominator.dominance_frontiers();

        assert!(frontier(&frontiers, 'a').is_empty());
        assert_eq!(frontier(&frontiers, 'b'), ['b']);
        assert_eq!(frontier(&frontiers, 'c'), ['b']);
        assert!(frontier(&frontiers, 'd').is_empty());

        let b = dominator.index_of(&'b').unwrap();
        assert_eq!(frontiers.frontier_indices(b), [b]);
    }

    #[test]
    fn test_edge_into_entry() {
        let dominator = compute('a', &[('a', 'b'), ('b', 'a')]);
        let frontiers = dominator.dominance_frontiers();

        assert_eq!(frontier(&frontiers, 'a'), ['a']);
        assert_eq!(frontier(&frontiers, 'b'), ['a']);
    }
}
