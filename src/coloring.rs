//!
//! Two-colouring of an [IncidenceGraph]. A graph is bipartite if and only if its vertices can be
//! coloured with two colours such that no edge joins two vertices of the same colour, which in
//! turn holds if and only if the graph contains no odd cycle.
//!
//! The colouring is computed by a traversal that gives the start vertex the colour [Color::Blue]
//! and every newly discovered vertex the colour opposite to the vertex it was discovered from.
//! The traversal stops at the first edge whose endpoints received the same colour.
//!
//! ```rust
//! use incigraph::incidence::IncidenceGraph;
//! use incigraph::coloring::*;
//!
//! let square = IncidenceGraph::from_edges(vec![(1,2),(2,3),(3,4),(4,1)]).unwrap();
//! let coloring = square.two_coloring(Traversal::DepthFirst);
//! assert!(coloring.is_bipartite());
//!
//! let triangle = IncidenceGraph::from_edges(vec![(1,2),(2,3),(3,1)]).unwrap();
//! assert!(!triangle.is_bipartite());
//! ```

use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;

use crate::error::GraphResult;
use crate::graph::*;
use crate::incidence::IncidenceGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Red,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// Single-letter name used in reports.
    pub fn symbol(self) -> &'static str {
        match self {
            Color::Blue => "b",
            Color::Red => "r",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Traversal strategy of the colouring engine. Both find an odd cycle if one exists,
/// they differ in the order in which vertices are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Explicit stack of edge cursors, one per vertex on the current path.
    #[default]
    DepthFirst,
    /// First-in-first-out worklist, discovers vertices in order of their distance to the start.
    BreadthFirst,
}

/// A proper two-colouring of (part of) a graph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Coloring {
    colors: VertexMap<Color>,
    order: Vec<Label>,
}

impl Coloring {
    pub fn color_of(&self, u:&Label) -> Option<Color> {
        self.colors.get(u).copied()
    }

    pub fn contains(&self, u:&Label) -> bool {
        self.colors.contains_key(u)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns all coloured vertices in ascending order of their labels.
    pub fn iter(&self) -> impl Iterator<Item=(Label, Color)> + '_ {
        self.colors.iter().map(|(u, c)| (*u, *c)).sorted_by_key(|(u, _)| *u)
    }

    /// The vertices in the order the traversal coloured them.
    pub fn discovery_order(&self) -> &[Label] {
        &self.order
    }

    /// All vertices with colour `color`.
    pub fn class(&self, color:Color) -> VertexSet {
        self.colors.iter().filter(|(_, c)| **c == color).map(|(u, _)| *u).collect()
    }

    /// The same partition with both colours exchanged.
    pub fn swapped(&self) -> Coloring {
        Coloring {
            colors: self.colors.iter().map(|(u, c)| (*u, c.opposite())).collect(),
            order: self.order.clone(),
        }
    }
}

/// Result of a bipartiteness query. A failed colouring is a regular outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColoringOutcome {
    Bipartite(Coloring),
    /// The traversal found an edge whose endpoints must share a colour.
    NotBipartite { conflict: Edge },
}

impl ColoringOutcome {
    pub fn is_bipartite(&self) -> bool {
        matches!(self, ColoringOutcome::Bipartite(_))
    }

    pub fn coloring(&self) -> Option<&Coloring> {
        match self {
            ColoringOutcome::Bipartite(coloring) => Some(coloring),
            ColoringOutcome::NotBipartite { .. } => None,
        }
    }
}

/// Per-query colour state, indexed by vertex position. `None` means unvisited.
struct ColorState {
    colors: Vec<Option<Color>>,
    order: Vec<Position>,
}

impl ColorState {
    fn new(n:usize) -> Self {
        ColorState { colors: vec![None; n], order: Vec::new() }
    }

    fn get(&self, v:Position) -> Option<Color> {
        self.colors[v]
    }

    fn assign(&mut self, v:Position, color:Color) {
        self.colors[v] = Some(color);
        self.order.push(v);
    }

    fn into_coloring<V, E>(self, graph:&IncidenceGraph<V, E>) -> Coloring {
        let mut colors = VertexMap::default();
        let mut order = Vec::with_capacity(self.order.len());
        for v in self.order {
            if let (Some(u), Some(c)) = (graph.label(v), self.colors[v]) {
                colors.insert(u, c);
                order.push(u);
            }
        }
        Coloring { colors, order }
    }
}

/// A pair of adjacent vertex positions with the same colour.
type Conflict = (Position, Position);

fn depth_first<V, E>(graph:&IncidenceGraph<V, E>, start:Position, state:&mut ColorState) -> Option<Conflict> {
    state.assign(start, Color::Blue);
    let mut stack = vec![(start, Color::Blue, graph.begin(start))];

    while let Some((u, color_u, cursor)) = stack.last_mut() {
        let (u, color_u) = (*u, *color_u);
        let stub = match cursor.current() {
            Some(stub) => stub,
            None => {
                stack.pop();
                continue;
            }
        };
        cursor.move_next();

        let v = stub.end();
        match state.get(v) {
            None => {
                state.assign(v, color_u.opposite());
                stack.push((v, color_u.opposite(), graph.begin(v)));
            }
            Some(color_v) if color_v == color_u => return Some((u, v)),
            Some(_) => {}
        }
    }

    None
}

fn breadth_first<V, E>(graph:&IncidenceGraph<V, E>, start:Position, state:&mut ColorState) -> Option<Conflict> {
    state.assign(start, Color::Blue);
    let mut queue = VecDeque::new();
    queue.push_back((start, Color::Blue));

    while let Some((u, color_u)) = queue.pop_front() {
        for stub in graph.incident_stubs(u) {
            let v = stub.end();
            match state.get(v) {
                None => {
                    state.assign(v, color_u.opposite());
                    queue.push_back((v, color_u.opposite()));
                }
                Some(color_v) if color_v == color_u => return Some((u, v)),
                Some(_) => {}
            }
        }
    }

    None
}

impl<V, E> IncidenceGraph<V, E> {
    fn run_engine(&self, start:Position, traversal:Traversal, state:&mut ColorState) -> Option<Conflict> {
        log::trace!("Colouring component of position {} ({:?})", start, traversal);
        match traversal {
            Traversal::DepthFirst => depth_first(self, start, state),
            Traversal::BreadthFirst => breadth_first(self, start, state),
        }
    }

    fn conflict_outcome(&self, (u, v):Conflict) -> ColoringOutcome {
        // Positions in a conflict always come from the table
        let conflict = (self.label(u).unwrap_or_default(), self.label(v).unwrap_or_default());
        log::debug!("Graph is not bipartite, edge {:?} joins equal colours", conflict);
        ColoringOutcome::NotBipartite { conflict }
    }

    /// Two-colours the connected component of `start`. Vertices outside of that component
    /// are not part of the resulting [Coloring].
    pub fn color_component(&self, start:&Label, traversal:Traversal) -> GraphResult<ColoringOutcome> {
        let start = self.position_of(start)?;
        let mut state = ColorState::new(self.num_vertices());

        Ok(match self.run_engine(start, traversal, &mut state) {
            Some(conflict) => self.conflict_outcome(conflict),
            None => ColoringOutcome::Bipartite(state.into_coloring(self)),
        })
    }

    /// Two-colours the whole graph by running the engine once per connected component.
    /// Components are started at their vertex with the smallest position, each with
    /// [Color::Blue].
    pub fn two_coloring(&self, traversal:Traversal) -> ColoringOutcome {
        let mut state = ColorState::new(self.num_vertices());
        let mut components = 0;

        for start in 0..self.num_vertices() {
            if state.get(start).is_some() {
                continue;
            }
            components += 1;
            if let Some(conflict) = self.run_engine(start, traversal, &mut state) {
                return self.conflict_outcome(conflict);
            }
        }

        log::debug!("Coloured {} vertices in {} components", self.num_vertices(), components);
        ColoringOutcome::Bipartite(state.into_coloring(self))
    }

    pub fn is_bipartite(&self) -> bool {
        self.two_coloring(Traversal::DepthFirst).is_bipartite()
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
