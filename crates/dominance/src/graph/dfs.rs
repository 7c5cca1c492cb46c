use std::collections::HashSet;

use crate::graph::{ForEachSuccessor, Vertex};

/// Search a directed graph in a depth-first manner and call the `pre` and `post` callbacks for
/// each vertex.
///
/// The `pre` callback is called in "pre-order", as soon as a vertex is first encountered. The
/// `post` callback is called in "post-order", after every vertex reachable through that vertex's
/// successors has been visited.
///
/// Successors are visited in the order that `successors` enumerates them. If the graph contains
/// cycles, a vertex is still only visited a single time.
pub fn depth_first_search<V: Vertex>(
    start: V,
    successors: impl ForEachSuccessor<V>,
    mut pre: impl FnMut(&V),
    mut post: impl FnMut(&V),
) {
    depth_first_search_with(&mut (), start, successors, |_, v| pre(v), |_, v| post(v));
}

/// Search a directed graph in a depth-first manner and call the `pre` and `post` callbacks for
/// each vertex.
///
/// This is a version of `depth_first_search` that accepts a mutable state parameter and passes it
/// to each callback.
pub fn depth_first_search_with<S, V: Vertex>(
    state: &mut S,
    start: V,
    successors: impl ForEachSuccessor<V>,
    mut pre: impl FnMut(&mut S, &V),
    mut post: impl FnMut(&mut S, &V),
) {
    let mut visited = HashSet::new();
    visited.insert(start.clone());
    pre(state, &start);
    let iter = successors.successors(&start).into_iter();
    let mut stack = vec![(start, iter)];

    while let Some((vertex, iter)) = stack.last_mut() {
        if let Some(next) = iter.next() {
            if visited.insert(next.clone()) {
                pre(state, &next);
                let iter = successors.successors(&next).into_iter();
                stack.push((next, iter));
            }
        } else {
            post(state, vertex);
            stack.pop();
        }
    }
}

/// Accumulate vertices in DFS pre-order.
pub fn dfs_pre_order<V: Vertex>(start: V, successors: impl ForEachSuccessor<V>) -> Vec<V> {
    let mut pre_order = Vec::new();
    depth_first_search(start, successors, |v| pre_order.push(v.clone()), |_| {});
    pre_order
}

/// Accumulate vertices in DFS post-order.
pub fn dfs_post_order<V: Vertex>(start: V, successors: impl ForEachSuccessor<V>) -> Vec<V> {
    let mut post_order = Vec::new();
    depth_first_search(start, successors, |_| {}, |v| post_order.push(v.clone()));
    post_order
}
