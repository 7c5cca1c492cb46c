use std::{collections::BTreeMap, io, str::FromStr};

use dominance::{Dominator, graph::dfs::depth_first_search_with};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("expected a query of the form `A:B`, found {0:?}")]
pub struct QueryParseError(String);

/// A "does `dominator` dominate `dominated`?" question, written as `dominator:dominated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub dominator: String,
    pub dominated: String,
}

impl FromStr for Query {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((a, b)) if !a.is_empty() && !b.is_empty() => Ok(Query {
                dominator: a.to_owned(),
                dominated: b.to_owned(),
            }),
            _ => Err(QueryParseError(s.to_owned())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryAnswer<'a> {
    pub dominator: &'a str,
    pub dominated: &'a str,
    /// `None` if either vertex is not reachable from the entry.
    pub dominates: Option<bool>,
}

/// Everything computed about a graph, ready to be printed as text or serialized as JSON.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub entry: &'a str,
    /// Reachable vertices in DFS pre-order.
    pub vertices: Vec<&'a str>,
    pub immediate_dominators: BTreeMap<&'a str, &'a str>,
    pub dominator_tree: BTreeMap<&'a str, Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominance_frontiers: Option<BTreeMap<&'a str, Vec<&'a str>>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<QueryAnswer<'a>>,
    // Pre-order walk of the dominator tree with the depth of each vertex.
    #[serde(skip)]
    tree_walk: Vec<(usize, &'a str)>,
}

impl<'a> Report<'a> {
    pub fn new(
        dominator: &Dominator<&'a str>,
        with_frontiers: bool,
        queries: &'a [Query],
    ) -> Self {
        let vertices = dominator.vertices();

        let immediate_dominators: BTreeMap<_, _> = vertices
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &v)| (v, vertices[dominator.immediate_dominators()[i]]))
            .collect();

        let dominator_tree: BTreeMap<_, Vec<_>> = dominator
            .dominator_tree()
            .iter()
            .map(|(p, children)| (vertices[p], children.iter().map(|&c| vertices[c]).collect()))
            .collect();

        let dominance_frontiers = with_frontiers.then(|| {
            let frontiers = dominator.dominance_frontiers();
            vertices
                .iter()
                .map(|v| {
                    let frontier = frontiers.frontier(v).into_iter().flatten().copied();
                    (*v, frontier.collect::<Vec<_>>())
                })
                .collect::<BTreeMap<_, _>>()
        });

        let queries: Vec<_> = queries
            .iter()
            .map(|q| QueryAnswer {
                dominator: &q.dominator,
                dominated: &q.dominated,
                dominates: dominator.dominates(&q.dominator.as_str(), &q.dominated.as_str()),
            })
            .collect();

        let mut tree_walk = Vec::new();
        depth_first_search_with(
            &mut 0,
            0,
            |&i: &usize| dominator.dominator_tree().get(i).cloned().unwrap_or_default(),
            |depth, &i| {
                tree_walk.push((*depth, vertices[i]));
                *depth += 1;
            },
            |depth, _| *depth -= 1,
        );

        Report {
            entry: vertices[0],
            vertices: vertices.to_vec(),
            immediate_dominators,
            dominator_tree,
            dominance_frontiers,
            queries,
            tree_walk,
        }
    }

    pub fn write_text(&self, mut out: impl io::Write) -> io::Result<()> {
        writeln!(out, "entry: {}", self.entry)?;

        writeln!(out, "immediate dominators:")?;
        for v in self.vertices.iter().skip(1) {
            writeln!(out, "  {v} <- {}", self.immediate_dominators[v])?;
        }

        writeln!(out, "dominator tree:")?;
        for &(depth, v) in &self.tree_walk {
            writeln!(out, "  {:indent$}{v}", "", indent = depth * 2)?;
        }

        if let Some(frontiers) = &self.dominance_frontiers {
            writeln!(out, "dominance frontiers:")?;
            for v in &self.vertices {
                writeln!(out, "  {v}: {}", frontiers[v].join(", "))?;
            }
        }

        if !self.queries.is_empty() {
            writeln!(out, "queries:")?;
            for q in &self.queries {
                let answer = match q.dominates {
                    Some(true) => "true",
                    Some(false) => "false",
                    None => "unreachable",
                };
                writeln!(out, "  {} dom {}: {answer}", q.dominator, q.dominated)?;
            }
        }

        Ok(())
    }

    pub fn write_json(&self, out: impl io::Write) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(out, self)
    }
}
