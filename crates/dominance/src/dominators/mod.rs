mod frontier;
mod indexer;
mod lengauer_tarjan;
mod tree;

use std::collections::HashMap;

use dominance_util::IndexMap;

pub use self::frontier::DominanceFrontiers;
use self::{
    indexer::DepthFirstIndex, lengauer_tarjan::immediate_dominators, tree::build_dominator_tree,
};
use crate::{
    error::DominatorError,
    graph::{ForEachSuccessor, Vertex},
};

/// The dominator tree of every vertex reachable from an entry vertex.
///
/// Internally every vertex is referred to by its index in a depth-first pre-order traversal from
/// the entry, so the entry always has index 0. [`Dominator::vertices`] and
/// [`Dominator::vertex_indices`] translate between vertices and indexes.
///
/// A `Dominator` is computed once and never changes afterwards. If the graph changes, compute a
/// new one.
#[derive(Debug, Clone)]
pub struct Dominator<V> {
    vertices: Vec<V>,
    vertex_indices: HashMap<V, usize>,
    predecessors: Vec<Vec<usize>>,
    immediate_dominators: Vec<usize>,
    dominator_tree: IndexMap<Vec<usize>>,
}

impl<V: Vertex> Dominator<V> {
    /// Compute the dominator tree of every vertex reachable from `entry`.
    ///
    /// `num_vertices` must be exactly the number of vertices reachable from `entry` (including
    /// `entry` itself), and `successors` must enumerate the targets of every edge leaving a given
    /// vertex.
    ///
    /// Returns an error if `num_vertices` is zero or does not match the number of vertices the
    /// traversal actually reached.
    pub fn compute(
        entry: V,
        num_vertices: usize,
        successors: impl ForEachSuccessor<V>,
    ) -> Result<Self, DominatorError> {
        let index = DepthFirstIndex::compute(entry, num_vertices, &successors)?;
        log::debug!(
            "computing dominators of {} vertices and {} edges",
            index.vertices.len(),
            index.edge_count(),
        );

        let DepthFirstIndex {
            vertices,
            vertex_indices,
            parent,
            predecessors,
        } = index;

        let immediate_dominators = immediate_dominators(&parent, &predecessors);
        let dominator_tree = build_dominator_tree(&immediate_dominators);

        log::debug!(
            "dominator tree has {} vertices with children",
            dominator_tree.len()
        );

        Ok(Dominator {
            vertices,
            vertex_indices,
            predecessors,
            immediate_dominators,
            dominator_tree,
        })
    }

    /// Every reachable vertex, in DFS pre-order. The position of a vertex is its index.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Maps every reachable vertex to its index.
    pub fn vertex_indices(&self) -> &HashMap<V, usize> {
        &self.vertex_indices
    }

    /// The index of the immediate dominator of every vertex, by index.
    ///
    /// The entry (index 0) is recorded as its own immediate dominator.
    pub fn immediate_dominators(&self) -> &[usize] {
        &self.immediate_dominators
    }

    /// Maps the index of every vertex that immediately dominates at least one other vertex to the
    /// indexes of the vertices it immediately dominates, in ascending order.
    pub fn dominator_tree(&self) -> &IndexMap<Vec<usize>> {
        &self.dominator_tree
    }

    /// The indexes of every vertex with an edge to the vertex with index `index`, in ascending
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn predecessors(&self, index: usize) -> &[usize] {
        &self.predecessors[index]
    }

    /// The vertex the `Dominator` was computed from, always at index 0.
    pub fn entry(&self) -> &V {
        &self.vertices[0]
    }

    /// The number of reachable vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false, a `Dominator` contains at least the entry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The DFS pre-order index of `v`, or `None` if it was not reachable.
    pub fn index_of(&self, v: &V) -> Option<usize> {
        self.vertex_indices.get(v).copied()
    }

    /// Return true if the given vertex was reachable when the `Dominator` was computed.
    pub fn was_reached(&self, v: &V) -> bool {
        self.vertex_indices.contains_key(v)
    }

    /// Return the immediate dominator ("idom") of the given vertex.
    ///
    /// Returns `None` for the entry, and for vertices that were not reachable when the
    /// `Dominator` was computed.
    pub fn immediate_dominator(&self, v: &V) -> Option<&V> {
        match self.index_of(v)? {
            0 => None,
            i => Some(&self.vertices[self.immediate_dominators[i]]),
        }
    }

    /// Queries whether vertex `a` dominates vertex `b`.
    ///
    /// Every vertex dominates itself, and the entry dominates every vertex. Takes time
    /// proportional to the depth of `b` in the dominator tree.
    ///
    /// Returns `None` if either `a` or `b` was not reachable when the `Dominator` was computed.
    pub fn dominates(&self, a: &V, b: &V) -> Option<bool> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        Some(a == b || self.dominator_chain(b).any(|d| d == a))
    }

    /// Queries whether vertex `a` dominates vertex `b` and is not `b`.
    pub fn strictly_dominates(&self, a: &V, b: &V) -> Option<bool> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        Some(self.dominator_chain(b).any(|d| d == a))
    }

    /// Every strict dominator of `v`, ordered from the entry down to the immediate dominator of
    /// `v`.
    ///
    /// `v` itself is never included, so this is empty for the entry.
    pub fn dominators_of(&self, v: &V) -> Option<Vec<V>> {
        let mut dominators = self
            .dominator_chain(self.index_of(v)?)
            .map(|d| self.vertices[d].clone())
            .collect::<Vec<_>>();
        dominators.reverse();
        Some(dominators)
    }

    /// The depth of `v` in the dominator tree, which is also the number of its strict dominators.
    ///
    /// The entry has depth 0.
    pub fn depth(&self, v: &V) -> Option<usize> {
        Some(self.dominator_chain(self.index_of(v)?).count())
    }

    /// Return the immediate children of the given vertex in the dominator tree.
    ///
    /// Every returned vertex has `v` as its immediate dominator.
    pub fn dominance_children(&self, v: &V) -> Option<impl Iterator<Item = &V> + '_> {
        Some(
            self.dominator_tree
                .get(self.index_of(v)?)
                .into_iter()
                .flatten()
                .map(move |&c| &self.vertices[c]),
        )
    }

    /// Compute the dominance frontier of every reachable vertex.
    pub fn dominance_frontiers(&self) -> DominanceFrontiers<'_, V> {
        DominanceFrontiers::compute(self)
    }

    // Walks the strict dominators of the vertex with index `index`, from its immediate dominator
    // up to and including the entry.
    fn dominator_chain(&self, index: usize) -> DominatorChain<'_> {
        DominatorChain {
            immediate_dominators: &self.immediate_dominators,
            current: index,
            steps: 0,
        }
    }
}

struct DominatorChain<'a> {
    immediate_dominators: &'a [usize],
    current: usize,
    steps: usize,
}

impl Iterator for DominatorChain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.current == 0 {
            return None;
        }

        self.steps += 1;
        assert!(
            self.steps < self.immediate_dominators.len(),
            "immediate dominator chain does not reach the entry"
        );
        self.current = self.immediate_dominators[self.current];
        Some(self.current)
    }
}
