//!
//! Cross-checks for two-colourings. [AdjacencyGraph] is a plain hash-map adjacency structure
//! that shares no code with the incidence table, and [reference_two_coloring] colours it with
//! a textbook breadth-first search. Results of the incidence-table engine can be compared
//! against both.

use std::collections::VecDeque;

use fxhash::FxHashMap;

use crate::algorithms::GraphAlgorithms;
use crate::coloring::{Color, Coloring};
use crate::graph::*;

/// Simple undirected graph stored as adjacency sets. Parallel edges collapse into one
/// and a loop adds its vertex to its own neighbourhood once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdjacencyGraph {
    adj: FxHashMap<Label, VertexSet>,
    m: usize
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I>(edges:I) -> Self where I: IntoIterator<Item=Edge> {
        let mut res = AdjacencyGraph::new();
        for (u,v) in edges {
            res.add_edge(&u, &v);
        }
        res
    }

    pub fn add_vertex(&mut self, u:&Label) -> bool {
        if self.adj.contains_key(u) {
            return false;
        }
        self.adj.insert(*u, VertexSet::default());
        true
    }

    pub fn add_edge(&mut self, u:&Label, v:&Label) -> bool {
        self.add_vertex(u);
        self.add_vertex(v);
        if self.adjacent(u, v) {
            return false;
        }
        self.adj.entry(*u).or_default().insert(*v);
        self.adj.entry(*v).or_default().insert(*u);
        self.m += 1;
        true
    }
}

impl Graph for AdjacencyGraph {
    fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    fn num_edges(&self) -> usize {
        self.m
    }

    fn contains(&self, u:&Label) -> bool {
        self.adj.contains_key(u)
    }

    fn adjacent(&self, u:&Label, v:&Label) -> bool {
        match self.adj.get(u) {
            Some(N) => N.contains(v),
            None => false
        }
    }

    fn degree(&self, u:&Label) -> u32 {
        self.adj.get(u).map_or(0, |N| N.len() as u32)
    }

    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=&Label> + 'a> {
        Box::new(self.adj.keys())
    }

    fn neighbours<'a>(&'a self, u:&Label) -> Box<dyn Iterator<Item=&Label> + 'a> {
        match self.adj.get(u) {
            Some(N) => Box::new(N.iter()),
            None => Box::new(std::iter::empty::<&Label>())
        }
    }

    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item=Edge> + 'a> {
        // Tie-breaking so we only return every edge once
        Box::new(self.adj.iter().flat_map(|(u, N)| {
            N.iter().filter(move |v| u <= *v).map(move |v| (*u, *v))
        }))
    }
}

/// Validity checks of a colouring against the edges of a graph.
pub trait ColoringCheck {
    /// Returns all edges whose endpoints are both coloured with the same colour.
    fn coloring_conflicts(&self, coloring:&Coloring) -> Vec<Edge>;

    fn is_proper_coloring(&self, coloring:&Coloring) -> bool {
        self.coloring_conflicts(coloring).is_empty()
    }

    /// Whether every vertex of the graph received a colour.
    fn is_covered_by(&self, coloring:&Coloring) -> bool;
}

impl<G> ColoringCheck for G where G: Graph {
    fn coloring_conflicts(&self, coloring:&Coloring) -> Vec<Edge> {
        self.edges().filter(|(u,v)| {
            match (coloring.color_of(u), coloring.color_of(v)) {
                (Some(cu), Some(cv)) => cu == cv,
                _ => false
            }
        }).collect()
    }

    fn is_covered_by(&self, coloring:&Coloring) -> bool {
        self.vertices().all(|u| coloring.contains(u))
    }
}

/// Two-colours every component of `graph` by breadth-first search from its smallest
/// vertex. Returns `None` if the graph is not bipartite.
pub fn reference_two_coloring<G: Graph>(graph:&G) -> Option<VertexMap<Color>> {
    let mut colors:VertexMap<Color> = VertexMap::default();

    for comp in graph.components() {
        let root = comp[0];
        colors.insert(root, Color::Blue);
        let mut queue = VecDeque::from(vec![root]);

        while let Some(u) = queue.pop_front() {
            let cu = colors[&u];
            for v in graph.neighbours(&u) {
                match colors.get(v) {
                    None => {
                        colors.insert(*v, cu.opposite());
                        queue.push_back(*v);
                    }
                    Some(cv) if *cv == cu => return None,
                    Some(_) => {}
                }
            }
        }
    }

    Some(colors)
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####

#[cfg(test)]
mod test {
    use super::*;
    use crate::coloring::Traversal;
    use crate::incidence::IncidenceGraph;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_edges(rng:&mut ChaCha8Rng, n:u32, m:usize) -> Vec<Edge> {
        (0..m).map(|_| (rng.gen_range(0..n), rng.gen_range(0..n))).collect()
    }

    /// Random forest plus a few extra edges between vertices of different parity,
    /// which keeps the graph bipartite.
    fn random_bipartite(rng:&mut ChaCha8Rng, n:u32) -> Vec<Edge> {
        let mut edges = Vec::new();
        for v in (2..n).step_by(2) {
            edges.push((rng.gen_range(0..v/2)*2+1, v));
        }
        for _ in 0..n {
            let u = rng.gen_range(0..n/2)*2;
            let v = rng.gen_range(0..n/2)*2+1;
            edges.push((u, v));
        }
        edges
    }

    #[test]
    fn adjacency_graph() {
        let G = AdjacencyGraph::from_edges(vec![(0,1),(1,0),(1,2),(2,2)]);
        assert_eq!(G.num_vertices(), 3);
        assert_eq!(G.num_edges(), 3);
        assert_eq!(G.degree(&1), 2);
        assert!(G.adjacent(&2, &2));
        assert_eq!(G.edges().sorted().collect_vec(), vec![(0,1),(1,2),(2,2)]);
    }

    #[test]
    fn structure_matches() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..10 {
            // Simple graphs only, so that both structures agree on degrees
            let edges:Vec<Edge> = random_edges(&mut rng, 30, 80).into_iter()
                .filter(|(u,v)| u != v)
                .map(|(u,v)| (u.min(v), u.max(v)))
                .unique()
                .collect();

            let G = IncidenceGraph::from_edges(edges.clone()).unwrap();
            let H = AdjacencyGraph::from_edges(edges);

            assert_eq!(G.num_vertices(), H.num_vertices());
            assert_eq!(G.num_edges(), H.num_edges());
            for u in H.vertices() {
                assert_eq!(G.degree(u), H.degree(u));
                assert_eq!(G.neighbours(u).cloned().sorted().collect_vec(),
                           H.neighbours(u).cloned().sorted().collect_vec());
            }
            assert_eq!(G.components(), H.components());
        }
    }

    #[test]
    fn conflicts() {
        let G = IncidenceGraph::from_edges(vec![(1,2),(2,3),(3,1)]).unwrap();
        let H = IncidenceGraph::from_edges(vec![(1,2)]).unwrap();
        let coloring = H.two_coloring(Traversal::DepthFirst).coloring().unwrap().clone();

        assert!(H.is_proper_coloring(&coloring));
        assert!(H.is_covered_by(&coloring));
        assert!(G.is_proper_coloring(&coloring));
        assert!(!G.is_covered_by(&coloring));

        let swapped = coloring.swapped();
        assert!(H.is_proper_coloring(&swapped));
    }

    #[test]
    fn cross_check_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        for round in 0..60 {
            let edges = if round % 2 == 0 {
                let n = rng.gen_range(2..60);
                random_bipartite(&mut rng, n)
            } else {
                let n = rng.gen_range(1..50);
                let m = rng.gen_range(0..40);
                random_edges(&mut rng, n, m)
            };

            let G = IncidenceGraph::from_edges(edges.clone()).unwrap();
            let H = AdjacencyGraph::from_edges(edges);
            let expected = reference_two_coloring(&H);

            for traversal in [Traversal::DepthFirst, Traversal::BreadthFirst] {
                let outcome = G.two_coloring(traversal);
                assert_eq!(outcome.is_bipartite(), expected.is_some(), "round {round}");

                if let Some(coloring) = outcome.coloring() {
                    assert!(G.is_proper_coloring(coloring));
                    assert!(H.is_proper_coloring(coloring));
                    assert!(G.is_covered_by(coloring));
                }
            }

            if round % 2 == 0 {
                assert!(expected.is_some());
            }
        }
    }
}
