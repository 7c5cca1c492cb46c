use thiserror::Error;

/// A violated precondition of [`Dominator::compute`](crate::Dominator::compute).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum DominatorError {
    #[error("cannot compute dominators of an empty graph")]
    EmptyGraph,
    #[error("declared {declared} vertices, but {reached} were reachable from the entry")]
    VertexCountMismatch { declared: usize, reached: usize },
}
