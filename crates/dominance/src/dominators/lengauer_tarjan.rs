use std::mem;

use crate::dominators::indexer::UNDEFINED;

/// Compute the immediate dominator of every vertex of a depth-first numbered graph.
///
/// `parent` is the DFS spanning tree and `predecessors` holds every edge of the graph, both in
/// terms of DFS pre-order indexes. Index 0 is the entry and is its own immediate dominator in the
/// returned array.
///
/// Buckets are drained at the start of processing their own vertex rather than at the end of
/// processing its spanning tree child, so every bucket is drained exactly once. See "Finding
/// Dominators in Practice", Georgiadis, Tarjan and Werneck (2006).
pub(crate) fn immediate_dominators(parent: &[usize], predecessors: &[Vec<usize>]) -> Vec<usize> {
    let len = parent.len();
    assert_eq!(predecessors.len(), len);

    // The DFS index of the semidominator of each vertex.
    let mut semi: Vec<usize> = (0..len).collect();
    let mut idom = vec![UNDEFINED; len];
    // Vertices whose semidominator is the bucket's index.
    let mut bucket: Vec<Vec<usize>> = vec![Vec::new(); len];
    let mut forest = LinkEvalForest::new(len);

    for w in (0..len).rev() {
        for v in mem::take(&mut bucket[w]) {
            let u = forest.eval(v, &semi);
            idom[v] = if semi[u] < semi[v] { u } else { w };
        }

        // The entry has no semidominator and no spanning tree parent.
        if w == 0 {
            break;
        }

        for &v in &predecessors[w] {
            let u = forest.eval(v, &semi);
            if semi[u] < semi[w] {
                semi[w] = semi[u];
            }
        }

        bucket[semi[w]].push(w);
        forest.link(parent[w], w);
    }

    // Vertices whose semidominator is not their immediate dominator share the immediate
    // dominator of the vertex recorded for them above, which has a lower index and so is already
    // final.
    idom[0] = 0;
    for w in 1..len {
        if idom[w] != semi[w] {
            idom[w] = idom[idom[w]];
        }
    }

    idom
}

/// The virtual forest used to evaluate minimum semidominators along ancestor paths.
struct LinkEvalForest {
    ancestor: Vec<usize>,
    // The vertex with the minimum semidominator on the (compressed) path to the ancestor.
    label: Vec<usize>,
    stack: Vec<usize>,
}

impl LinkEvalForest {
    fn new(len: usize) -> Self {
        LinkEvalForest {
            ancestor: vec![UNDEFINED; len],
            label: (0..len).collect(),
            stack: Vec::new(),
        }
    }

    fn link(&mut self, parent: usize, w: usize) {
        self.ancestor[w] = parent;
    }

    /// Returns the vertex with the minimum semidominator on the path from `v` to the root of its
    /// tree in the forest, excluding the root itself.
    fn eval(&mut self, v: usize, semi: &[usize]) -> usize {
        if self.ancestor[v] == UNDEFINED {
            v
        } else {
            self.compress(v, semi);
            self.label[v]
        }
    }

    // Point every vertex on the path from `v` directly at the root's child, carrying the minimum
    // label down the path.
    fn compress(&mut self, v: usize, semi: &[usize]) {
        debug_assert!(self.ancestor[v] != UNDEFINED);
        debug_assert!(self.stack.is_empty());

        let mut x = v;
        while self.ancestor[self.ancestor[x]] != UNDEFINED {
            self.stack.push(x);
            x = self.ancestor[x];
        }

        while let Some(x) = self.stack.pop() {
            let a = self.ancestor[x];
            if semi[self.label[a]] < semi[self.label[x]] {
                self.label[x] = self.label[a];
            }
            self.ancestor[x] = self.ancestor[a];
        }
    }
}
