pub mod dfs;

use std::hash::Hash;

/// Identity of a vertex in a caller-owned graph.
///
/// Vertices are only ever compared and hashed, their contents are never inspected. Every type
/// which is `Clone + Eq + Hash` is a `Vertex`.
pub trait Vertex: Clone + Eq + Hash {}

impl<V: Clone + Eq + Hash> Vertex for V {}

/// Enumerates the outgoing edges of a vertex.
///
/// `for_each_successor` must call `visit` once for every edge leaving `vertex`, in a consistent
/// order. Duplicate edges are allowed.
///
/// Any `Fn(&V) -> impl IntoIterator<Item = V>` closure implements this trait.
pub trait ForEachSuccessor<V> {
    fn for_each_successor(&self, vertex: &V, visit: impl FnMut(V));

    /// Collect every successor of `vertex` in enumeration order.
    fn successors(&self, vertex: &V) -> Vec<V> {
        let mut successors = Vec::new();
        self.for_each_successor(vertex, |s| successors.push(s));
        successors
    }
}

impl<V, I, F> ForEachSuccessor<V> for F
where
    F: Fn(&V) -> I,
    I: IntoIterator<Item = V>,
{
    fn for_each_successor(&self, vertex: &V, visit: impl FnMut(V)) {
        self(vertex).into_iter().for_each(visit);
    }
}
