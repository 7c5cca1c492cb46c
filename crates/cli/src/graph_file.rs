use std::{collections::HashMap, fs, io, path::Path};

use dominance::{Dominator, DominatorError, graph::dfs::dfs_pre_order};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("could not read graph file")]
    Io(#[from] io::Error),
    #[error("malformed graph file")]
    Json(#[from] serde_json::Error),
    #[error("entry vertex {0:?} does not appear in the graph")]
    UnknownEntry(String),
    #[error(transparent)]
    Dominance(#[from] DominatorError),
}

/// The on-disk description of a control flow graph.
///
/// ```json
/// {
///     "entry": "start",
///     "vertices": ["start", "loop", "exit"],
///     "edges": [["start", "loop"], ["loop", "loop"], ["loop", "exit"]]
/// }
/// ```
///
/// `vertices` is optional, every vertex mentioned by an edge is part of the graph. Listing
/// vertices explicitly allows isolated vertices and fixes the order in which they are reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    pub entry: String,
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

/// A graph loaded from a [`GraphFile`] with successor lists kept in edge order.
#[derive(Debug)]
pub struct Graph {
    entry: String,
    vertices: Vec<String>,
    successors: HashMap<String, Vec<String>>,
}

impl Graph {
    pub fn load(path: &Path) -> Result<Self, GraphFileError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, GraphFileError> {
        Self::new(serde_json::from_str(contents)?)
    }

    pub fn new(file: GraphFile) -> Result<Self, GraphFileError> {
        let mut graph = Graph {
            entry: file.entry,
            vertices: Vec::new(),
            successors: HashMap::new(),
        };

        for v in &file.vertices {
            graph.add_vertex(v);
        }
        for (from, to) in file.edges {
            graph.add_vertex(&from);
            graph.add_vertex(&to);
            graph.successors.entry(from).or_default().push(to);
        }

        if !graph.successors.contains_key(&graph.entry) {
            return Err(GraphFileError::UnknownEntry(graph.entry));
        }

        log::debug!(
            "loaded graph with {} vertices, entry {:?}",
            graph.vertices.len(),
            graph.entry
        );

        Ok(graph)
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Every vertex of the graph, reachable or not, in order of first appearance.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().map(String::as_str)
    }

    pub fn contains(&self, v: &str) -> bool {
        self.successors.contains_key(v)
    }

    /// # Panics
    ///
    /// Panics if `v` is not a vertex of the graph.
    pub fn successors<'a>(&'a self, v: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.successors[v].iter().map(String::as_str)
    }

    /// Every vertex reachable from `entry`, in DFS pre-order.
    pub fn reachable_from<'a>(&'a self, entry: &'a str) -> Vec<&'a str> {
        dfs_pre_order(entry, |v: &&'a str| self.successors(v))
    }

    /// Compute the dominators of the graph starting at `entry`.
    ///
    /// Every vertex in the graph must be reachable from `entry`, unless `prune_unreachable` is
    /// set, in which case unreachable vertices are left out.
    pub fn dominator<'a>(
        &'a self,
        entry: &'a str,
        prune_unreachable: bool,
    ) -> Result<Dominator<&'a str>, GraphFileError> {
        if !self.contains(entry) {
            return Err(GraphFileError::UnknownEntry(entry.to_owned()));
        }

        let num_vertices = if prune_unreachable {
            let reachable = self.reachable_from(entry).len();
            if reachable < self.vertices.len() {
                log::info!(
                    "ignoring {} vertices unreachable from {entry:?}",
                    self.vertices.len() - reachable
                );
            }
            reachable
        } else {
            self.vertices.len()
        };

        Ok(Dominator::compute(entry, num_vertices, |v: &&'a str| {
            self.successors(v)
        })?)
    }

    fn add_vertex(&mut self, v: &str) {
        if !self.successors.contains_key(v) {
            self.successors.insert(v.to_owned(), Vec::new());
            self.vertices.push(v.to_owned());
        }
    }
}
