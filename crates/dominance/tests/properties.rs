use std::collections::{BTreeSet, HashMap};

use dominance::Dominator;
use rand::{Rng, SeedableRng, rngs::SmallRng};

struct RandomGraph {
    successors: HashMap<u32, Vec<u32>>,
    predecessors: HashMap<u32, Vec<u32>>,
}

impl RandomGraph {
    // Every vertex is reachable from vertex 0 through a random spanning tree, with extra random
    // edges (including self loops and back edges) added on top.
    fn generate(rng: &mut impl Rng, num_vertices: u32, extra_edges: usize) -> Self {
        let mut graph = RandomGraph {
            successors: HashMap::new(),
            predecessors: HashMap::new(),
        };
        for v in 0..num_vertices {
            graph.successors.insert(v, Vec::new());
            graph.predecessors.insert(v, Vec::new());
        }

        for v in 1..num_vertices {
            let parent = rng.random_range(0..v);
            graph.add_edge(parent, v);
        }
        for _ in 0..extra_edges {
            let from = rng.random_range(0..num_vertices);
            let to = rng.random_range(0..num_vertices);
            graph.add_edge(from, to);
        }

        // Visit successors in an arbitrary order so that DFS numbering differs from vertex ids.
        for succs in graph.successors.values_mut() {
            for i in (1..succs.len()).rev() {
                succs.swap(i, rng.random_range(0..=i));
            }
        }

        graph
    }

    fn add_edge(&mut self, from: u32, to: u32) {
        self.successors.get_mut(&from).unwrap().push(to);
        self.predecessors.get_mut(&to).unwrap().push(from);
    }

    fn vertices(&self) -> impl Iterator<Item = u32> {
        0..self.successors.len() as u32
    }

    fn dominator(&self) -> Dominator<u32> {
        Dominator::compute(0, self.successors.len(), |v: &u32| {
            self.successors[v].iter().copied()
        })
        .unwrap()
    }

    // The textbook iterative data-flow formulation: the dominators of `v` are `v` itself plus the
    // intersection of the dominators of all its predecessors.
    fn reference_dominators(&self) -> HashMap<u32, BTreeSet<u32>> {
        let all = self.vertices().collect::<BTreeSet<_>>();
        let mut doms = HashMap::new();
        for v in self.vertices() {
            doms.insert(v, if v == 0 { BTreeSet::from([0]) } else { all.clone() });
        }

        let mut changed = true;
        while changed {
            changed = false;
            for v in self.vertices().skip(1) {
                let mut new = self.predecessors[&v]
                    .iter()
                    .map(|p| doms[p].clone())
                    .reduce(|a, b| &a & &b)
                    .unwrap_or_default();
                new.insert(v);
                if new != doms[&v] {
                    doms.insert(v, new);
                    changed = true;
                }
            }
        }

        doms
    }
}

fn check_graph(graph: &RandomGraph) {
    let dominator = graph.dominator();
    let reference = graph.reference_dominators();
    let vertices = graph.vertices().collect::<Vec<_>>();

    assert_eq!(dominator.len(), vertices.len());
    assert_eq!(dominator.vertices()[0], 0);

    for &a in &vertices {
        for &b in &vertices {
            let dominates = dominator.dominates(&a, &b).unwrap();
            assert_eq!(dominates, reference[&b].contains(&a), "{a} dom {b}");

            if dominates && a != b {
                assert!(!dominator.dominates(&b, &a).unwrap());
            }
        }
    }

    for &a in &vertices {
        for &b in &vertices {
            if !dominator.dominates(&a, &b).unwrap() {
                continue;
            }
            for &c in &vertices {
                if dominator.dominates(&b, &c).unwrap() {
                    assert!(dominator.dominates(&a, &c).unwrap());
                }
            }
        }
    }

    for &v in &vertices {
        assert!(dominator.dominates(&v, &v).unwrap());
        assert!(dominator.dominates(&0, &v).unwrap());

        let dominators_of = dominator.dominators_of(&v).unwrap();
        assert_eq!(dominators_of.len(), dominator.depth(&v).unwrap());
        assert_eq!(dominators_of.len(), reference[&v].len() - 1);
        assert!(!dominators_of.contains(&v));
        if v != 0 {
            assert_eq!(dominators_of.first(), Some(&0));
            assert_eq!(
                dominators_of.last(),
                Some(dominator.immediate_dominator(&v).unwrap())
            );
        }
    }

    let idom = dominator.immediate_dominators();
    let tree = dominator.dominator_tree();
    for (p, children) in tree.iter() {
        assert!(children.windows(2).all(|w| w[0] < w[1]));
        for &c in children {
            assert_ne!(c, 0);
            assert_eq!(idom[c], p);
        }
    }
    for c in 1..idom.len() {
        assert!(tree[idom[c]].contains(&c));
    }
    assert_eq!(tree.values().map(Vec::len).sum::<usize>(), vertices.len() - 1);

    let frontiers = dominator.dominance_frontiers();
    for &n in &vertices {
        let expected = vertices
            .iter()
            .copied()
            .filter(|m| {
                let strictly_dominates = n != *m && reference[m].contains(&n);
                !strictly_dominates
                    && graph.predecessors[m]
                        .iter()
                        .any(|p| reference[p].contains(&n))
            })
            .collect::<BTreeSet<_>>();
        let observed = frontiers
            .frontier(&n)
            .unwrap()
            .copied()
            .collect::<BTreeSet<_>>();
        assert_eq!(observed, expected, "dominance frontier of {n}");
    }
}

#[test]
fn test_random_graphs() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let num_vertices = rng.random_range(1..=24);
        let extra_edges = rng.random_range(0..=2 * num_vertices as usize);
        check_graph(&RandomGraph::generate(&mut rng, num_vertices, extra_edges));
    }
}

#[test]
fn test_random_dense_graphs() {
    let mut rng = SmallRng::seed_from_u64(0xd0e5);

    for _ in 0..20 {
        let num_vertices = rng.random_range(16..=32);
        let extra_edges = num_vertices as usize * num_vertices as usize / 2;
        check_graph(&RandomGraph::generate(&mut rng, num_vertices, extra_edges));
    }
}
