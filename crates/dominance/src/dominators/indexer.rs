use std::{collections::HashMap, vec};

use crate::{
    error::DominatorError,
    graph::{ForEachSuccessor, Vertex},
};

/// Marks a missing index, such as the spanning tree parent of the entry.
pub(crate) const UNDEFINED: usize = usize::MAX;

/// A depth-first numbering of every vertex reachable from the entry.
///
/// Index 0 is always the entry, every other vertex is numbered in the order it is first
/// encountered (pre-order).
#[derive(Debug)]
pub(crate) struct DepthFirstIndex<V> {
    pub vertices: Vec<V>,
    pub vertex_indices: HashMap<V, usize>,
    // Parent of each vertex in the DFS spanning tree, `UNDEFINED` for the entry.
    pub parent: Vec<usize>,
    // Every edge of the graph, not just spanning tree edges. Each list is sorted and free of
    // duplicates.
    pub predecessors: Vec<Vec<usize>>,
}

impl<V: Vertex> DepthFirstIndex<V> {
    /// Number every vertex reachable from `entry`, failing if the amount reached differs from
    /// `num_vertices`.
    pub fn compute(
        entry: V,
        num_vertices: usize,
        successors: &impl ForEachSuccessor<V>,
    ) -> Result<Self, DominatorError> {
        if num_vertices == 0 {
            return Err(DominatorError::EmptyGraph);
        }

        let mut index = DepthFirstIndex {
            vertices: Vec::with_capacity(num_vertices),
            vertex_indices: HashMap::with_capacity(num_vertices),
            parent: Vec::with_capacity(num_vertices),
            predecessors: Vec::with_capacity(num_vertices),
        };

        let mut stack: Vec<(usize, vec::IntoIter<V>)> = Vec::new();
        let iter = successors.successors(&entry).into_iter();
        stack.push((index.visit(entry, UNDEFINED), iter));

        while let Some((vi, iter)) = stack.last_mut() {
            let vi = *vi;
            if let Some(w) = iter.next() {
                let wi = match index.vertex_indices.get(&w) {
                    Some(&wi) => wi,
                    None => {
                        let iter = successors.successors(&w).into_iter();
                        let wi = index.visit(w, vi);
                        stack.push((wi, iter));
                        wi
                    }
                };
                index.predecessors[wi].push(vi);
            } else {
                stack.pop();
            }
        }

        for preds in &mut index.predecessors {
            preds.sort_unstable();
            preds.dedup();
        }

        let reached = index.vertices.len();
        log::trace!("depth-first traversal reached {reached} vertices");
        if reached != num_vertices {
            return Err(DominatorError::VertexCountMismatch {
                declared: num_vertices,
                reached,
            });
        }

        Ok(index)
    }

    pub fn edge_count(&self) -> usize {
        self.predecessors.iter().map(Vec::len).sum()
    }

    fn visit(&mut self, vertex: V, parent: usize) -> usize {
        let vi = self.vertices.len();
        self.vertices.push(vertex.clone());
        self.vertex_indices.insert(vertex, vi);
        self.parent.push(parent);
        self.predecessors.push(Vec::new());
        vi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(char, char)]) -> impl Fn(&char) -> Vec<char> + '_ {
        move |v: &char| {
            edges
                .iter()
                .filter(|(from, _)| from == v)
                .map(|&(_, to)| to)
                .collect()
        }
    }

    #[test]
    fn test_pre_order_numbering() {
        let edges = [
            ('a', 'b'),
            ('a', 'e'),
            ('b', 'c'),
            ('b', 'd'),
            ('c', 'a'),
            ('d', 'c'),
            ('e', 'd'),
        ];
        let index = DepthFirstIndex::compute('a', 5, &graph(&edges)).unwrap();

        assert_eq!(index.vertices, ['a', 'b', 'c', 'd', 'e']);
        for (i, v) in index.vertices.iter().enumerate() {
            assert_eq!(index.vertex_indices[v], i);
        }
        assert_eq!(index.parent, [UNDEFINED, 0, 1, 1, 0]);

        assert_eq!(
            index.predecessors,
            [vec![2], vec![0], vec![1, 3], vec![1, 4], vec![0]]
        );
        assert_eq!(index.edge_count(), edges.len());
    }

    #[test]
    fn test_duplicate_edges_recorded_once() {
        let edges = [('a', 'b'), ('a', 'b'), ('b', 'b')];
        let index = DepthFirstIndex::compute('a', 2, &graph(&edges)).unwrap();

        assert_eq!(index.predecessors[1], [0, 1]);
        assert_eq!(index.edge_count(), 2);
    }

    #[test]
    fn test_count_mismatch() {
        let edges = [('a', 'b'), ('b', 'c')];

        assert_eq!(
            DepthFirstIndex::compute('a', 0, &graph(&edges)).unwrap_err(),
            DominatorError::EmptyGraph
        );
        assert_eq!(
            DepthFirstIndex::compute('a', 4, &graph(&edges)).unwrap_err(),
            DominatorError::VertexCountMismatch {
                declared: 4,
                reached: 3
            }
        );
        assert_eq!(
            DepthFirstIndex::compute('a', 2, &graph(&edges)).unwrap_err(),
            DominatorError::VertexCountMismatch {
                declared: 2,
                reached: 3
            }
        );
    }
}
