//! Dominator analysis for control-flow graphs.
//!
//! The graph itself is never owned here. Callers hand over an entry vertex, the number of
//! vertices reachable from it, and a way to enumerate the successors of any vertex, and get back
//! an immutable [`Dominator`] which answers dominance queries.
//!
//! Immediate dominators are computed with the Lengauer-Tarjan algorithm (simple linking with path
//! compression), as described in appendix B of "A Fast Algorithm for Finding Dominators in a
//! Flowgraph", Lengauer and Tarjan (1979).

pub mod dominators;
pub mod error;
pub mod graph;

pub use self::{
    dominators::{DominanceFrontiers, Dominator},
    error::DominatorError,
    graph::{ForEachSuccessor, Vertex},
};
