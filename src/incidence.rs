//!
//! A static graph stored as a single incidence table. Vertices and edge *stubs* share one
//! slot space: slots $[0, n)$ hold the vertices, slots $[n, n+2m)$ hold two stubs per edge,
//! one for each direction of traversal. Four parallel rows run over the slot space:
//!
//! ```text
//!   slots   | v0 | v1 | v2 | s3 | s4 | s5 | s6 |    vertex records and stubs
//!   origin  |  0 |  1 |  2 |  0 |  1 |  1 |  2 |    start vertex of each slot
//!   next    |  3 |  4 |  6 |  0 |  5 |  1 |  2 |    forward link in the incidence chain
//!   prev    |  3 |  5 |  6 |  0 |  1 |  4 |  2 |    backward link in the incidence chain
//! ```
//!
//! Every vertex slot heads a circular list of the stubs starting at that vertex, so incident
//! edges are enumerated by following `next` until the walk returns to the vertex. The table
//! is built once and cannot be edited afterwards.
//!
//! ```rust
//! use incigraph::graph::*;
//! use incigraph::incidence::IncidenceGraph;
//!
//! let graph = IncidenceGraph::from_edges(vec![(1,2),(2,3),(3,1)]).unwrap();
//! assert_eq!(graph.num_vertices(), 3);
//! assert_eq!(graph.width(), 3 + 2*3);
//! assert_eq!(graph.degree(&2), 2);
//! ```

use fxhash::FxHashMap;

use crate::error::{GraphError, GraphResult};
use crate::graph::*;
use crate::iterators::*;

/// Order in which the builder inserts edges into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeOrder {
    /// Edges are inserted as given.
    Input,
    /// Every edge is normalised to `(min, max)` and the edge list is sorted before
    /// insertion. The resulting table does not depend on the order of the input.
    #[default]
    Canonical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRecord<V> {
    position: Position,
    label: Label,
    data: V,
}

impl<V> VertexRecord<V> {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn data(&self) -> &V {
        &self.data
    }
}

/// One directed half of an undirected edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stub<E> {
    id: SlotId,
    start: Position,
    end: Position,
    data: E,
}

impl<E> Stub<E> {
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Position of the vertex whose incidence chain contains this stub.
    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn data(&self) -> &E {
        &self.data
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<V, E> {
    Vertex(VertexRecord<V>),
    Stub(Stub<E>),
}

/// Immutable graph backed by an incidence table, see the [module documentation](crate::incidence).
///
/// `V` and `E` are the payload types of vertices and edges. Both stubs of an edge carry
/// the same edge payload.
#[derive(Debug, Clone)]
pub struct IncidenceGraph<V=(), E=()> {
    positions: FxHashMap<Label, Position>,
    pub(crate) slots: Vec<Slot<V, E>>,
    pub(crate) origin: Vec<Position>,
    pub(crate) next: Vec<SlotId>,
    pub(crate) prev: Vec<SlotId>,
    n: usize,
    m: usize,
}

/// Collects edges, payloads and options for an [IncidenceGraph].
pub struct IncidenceGraphBuilder<V, E> {
    edges: Vec<Edge>,
    payloads: Option<Vec<E>>,
    vertices: Vec<(Label, V)>,
    order: EdgeOrder,
}

impl<V, E> Default for IncidenceGraphBuilder<V, E> {
    fn default() -> Self {
        IncidenceGraphBuilder { edges: Vec::new(), payloads: None, vertices: Vec::new(), order: EdgeOrder::default() }
    }
}

impl<V, E> IncidenceGraphBuilder<V, E> where V: Default, E: Clone + Default {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, u:Label, v:Label) -> &mut Self {
        self.edges.push((u, v));
        self
    }

    pub fn add_edges<I>(&mut self, edges:I) -> &mut Self where I: IntoIterator<Item=Edge> {
        self.edges.extend(edges);
        self
    }

    /// Sets one payload per edge, in the order the edges were added.
    pub fn payloads(&mut self, payloads:Vec<E>) -> &mut Self {
        self.payloads = Some(payloads);
        self
    }

    /// Declares a vertex with associated data. A label that is not an endpoint of any
    /// edge becomes an isolated vertex.
    pub fn vertex(&mut self, u:Label, data:V) -> &mut Self {
        self.vertices.push((u, data));
        self
    }

    pub fn order(&mut self, order:EdgeOrder) -> &mut Self {
        self.order = order;
        self
    }

    pub fn build(self) -> GraphResult<IncidenceGraph<V, E>> {
        let IncidenceGraphBuilder { edges, payloads, vertices, order } = self;

        let payloads = match payloads {
            Some(payloads) if payloads.len() != edges.len() => {
                return Err(GraphError::PayloadMismatch { edges: edges.len(), payloads: payloads.len() });
            }
            Some(payloads) => payloads,
            None => vec![E::default(); edges.len()],
        };

        let mut records:Vec<(Edge, E)> = edges.into_iter().zip(payloads).collect();
        if order == EdgeOrder::Canonical {
            for ((u, v), _) in records.iter_mut() {
                if u > v {
                    std::mem::swap(u, v);
                }
            }
            // Stable, so parallel edges keep their payloads in input order
            records.sort_by_key(|(edge, _)| *edge);
        }

        // Positions in first-seen order, declared isolated vertices last
        let mut positions:FxHashMap<Label, Position> = FxHashMap::default();
        let mut labels:Vec<Label> = Vec::new();
        for ((u, v), _) in &records {
            for x in [u, v] {
                if !positions.contains_key(x) {
                    positions.insert(*x, labels.len());
                    labels.push(*x);
                }
            }
        }

        let mut vertex_data:VertexMap<V> = VertexMap::default();
        for (u, data) in vertices {
            if !positions.contains_key(&u) {
                positions.insert(u, labels.len());
                labels.push(u);
            }
            vertex_data.insert(u, data);
        }

        IncidenceGraph::assemble(positions, labels, vertex_data, records)
    }
}

impl<E> IncidenceGraph<(), E> where E: Clone + Default {
    /// Builds a graph with edge payloads from two parallel sequences.
    pub fn with_payloads<I>(edges:I, payloads:Vec<E>) -> GraphResult<Self> where I: IntoIterator<Item=Edge> {
        let mut builder = IncidenceGraphBuilder::new();
        builder.add_edges(edges).payloads(payloads);
        builder.build()
    }
}

impl IncidenceGraph {
    /// Builds a graph without payloads using the canonical edge order.
    pub fn from_edges<I>(edges:I) -> GraphResult<Self> where I: IntoIterator<Item=Edge> {
        let mut builder = IncidenceGraphBuilder::new();
        builder.add_edges(edges);
        builder.build()
    }
}

impl<V, E> IncidenceGraph<V, E> where E: Clone {
    fn assemble(positions:FxHashMap<Label, Position>, labels:Vec<Label>,
                mut vertex_data:VertexMap<V>, records:Vec<(Edge, E)>) -> GraphResult<Self>
        where V: Default
    {
        let n = labels.len();
        let m = records.len();
        let width = n + 2*m;

        let mut slots = Vec::with_capacity(width);
        for (position, label) in labels.into_iter().enumerate() {
            let data = vertex_data.remove(&label).unwrap_or_default();
            slots.push(Slot::Vertex(VertexRecord { position, label, data }));
        }

        // Empty chains: every vertex links to itself
        let mut origin:Vec<Position> = Vec::with_capacity(width);
        let mut next:Vec<SlotId> = Vec::with_capacity(width);
        origin.extend(0..n);
        next.extend(0..n);

        for ((u, v), data) in records {
            let (pu, pv) = (positions[&u], positions[&v]);
            let s = slots.len();
            debug_assert_eq!((s - n) % 2, 0);

            slots.push(Slot::Stub(Stub { id: s, start: pu, end: pv, data: data.clone() }));
            slots.push(Slot::Stub(Stub { id: s+1, start: pv, end: pu, data }));
            origin.push(pu);
            origin.push(pv);

            // New stubs close their chain right away, then get hooked in after the tail
            next.push(pu);
            next.push(pv);
            append_to_chain(&mut next, pu, s)?;
            append_to_chain(&mut next, pv, s+1)?;
        }

        let prev = backward_links(&next, n)?;
        log::debug!("Built incidence table with {} vertices, {} edges and width {}", n, m, width);

        Ok(IncidenceGraph { positions, slots, origin, next, prev, n, m })
    }
}

/// Hooks `stub` into the chain of `vertex` after its current tail.
///
/// Finding the tail walks the whole chain, so building a graph takes
/// $O(m \cdot \Delta)$ time where $\Delta$ is the maximum degree.
fn append_to_chain(next:&mut [SlotId], vertex:Position, stub:SlotId) -> GraphResult<()> {
    let tail = chain_tail(next, vertex)?;
    next[tail] = stub;
    next[stub] = vertex;
    Ok(())
}

fn chain_tail(next:&[SlotId], vertex:Position) -> GraphResult<SlotId> {
    let mut curr = vertex;
    let mut steps = 0;
    while next[curr] != vertex {
        curr = next[curr];
        steps += 1;
        if steps > next.len() {
            return Err(GraphError::CorruptChain { slot: curr });
        }
    }
    Ok(curr)
}

/// Derives the backward row from the forward row. This can only happen once all
/// edges are inserted since insertion order decides the predecessors.
fn backward_links(next:&[SlotId], n:usize) -> GraphResult<Vec<SlotId>> {
    let mut prev = vec![0; next.len()];
    for vertex in 0..n {
        let mut curr = vertex;
        let mut steps = 0;
        loop {
            let succ = next[curr];
            prev[succ] = curr;
            curr = succ;
            if curr == vertex {
                break;
            }
            steps += 1;
            if steps > next.len() {
                return Err(GraphError::CorruptChain { slot: curr });
            }
        }
    }
    Ok(prev)
}

impl<V, E> IncidenceGraph<V, E> {
    /// Number of slots, which is always `num_vertices() + 2*num_edges()`.
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    pub fn position(&self, u:&Label) -> Option<Position> {
        self.positions.get(u).copied()
    }

    pub(crate) fn position_of(&self, u:&Label) -> GraphResult<Position> {
        self.position(u).ok_or(GraphError::UnknownVertex(*u))
    }

    pub fn vertex(&self, position:Position) -> Option<&VertexRecord<V>> {
        match self.slots.get(position) {
            Some(Slot::Vertex(record)) => Some(record),
            _ => None,
        }
    }

    pub fn label(&self, position:Position) -> Option<Label> {
        self.vertex(position).map(VertexRecord::label)
    }

    pub(crate) fn label_ref(&self, position:Position) -> Option<&Label> {
        self.vertex(position).map(|record| &record.label)
    }

    pub fn slot(&self, id:SlotId) -> Option<&Slot<V, E>> {
        self.slots.get(id)
    }

    pub fn stub(&self, id:SlotId) -> Option<&Stub<E>> {
        match self.slots.get(id) {
            Some(Slot::Stub(stub)) => Some(stub),
            _ => None,
        }
    }

    /// Returns the other stub of the edge `id` belongs to.
    pub fn twin(&self, id:SlotId) -> Option<SlotId> {
        if id < self.n || id >= self.width() {
            return None;
        }
        Some(self.n + ((id - self.n) ^ 1))
    }

    pub fn next_slot(&self, id:SlotId) -> Option<SlotId> {
        self.next.get(id).copied()
    }

    pub fn prev_slot(&self, id:SlotId) -> Option<SlotId> {
        self.prev.get(id).copied()
    }

    /// Returns the position of the vertex whose chain contains `id`.
    pub fn origin_of(&self, id:SlotId) -> Option<Position> {
        self.origin.get(id).copied()
    }

    pub fn vertex_data(&self, u:&Label) -> Option<&V> {
        self.position(u).and_then(|p| self.vertex(p)).map(VertexRecord::data)
    }

    pub fn edge_data(&self, id:SlotId) -> Option<&E> {
        self.stub(id).map(Stub::data)
    }

    /// Cursor on the first stub of the vertex at `position`, or on its sentinel if
    /// the vertex has no edges.
    ///
    /// Panics if `position` is not a vertex position.
    pub fn begin(&self, position:Position) -> EdgeCursor<'_, V, E> {
        assert!(position < self.n, "{position} is not a vertex position");
        EdgeCursor::new(self, position, self.next[position])
    }

    /// Cursor on the sentinel slot of the vertex at `position`.
    ///
    /// Panics if `position` is not a vertex position.
    pub fn end(&self, position:Position) -> EdgeCursor<'_, V, E> {
        assert!(position < self.n, "{position} is not a vertex position");
        EdgeCursor::new(self, position, position)
    }

    /// Cursor on the first stub incident to the vertex `u`.
    pub fn cursor(&self, u:&Label) -> GraphResult<EdgeCursor<'_, V, E>> {
        let position = self.position_of(u)?;
        Ok(self.begin(position))
    }

    /// Stubs of the vertex at `position` in chain order.
    ///
    /// Panics like [begin](Self::begin) if `position` is not a vertex position.
    pub fn incident_stubs(&self, position:Position) -> IncidentStubs<'_, V, E> {
        IncidentStubs::new(self, position)
    }

    /// Verifies the structural invariants of the table: its width, chain membership
    /// of every stub, that each chain closes, that `prev` inverts `next` and that the
    /// two stubs of an edge mirror each other.
    pub fn check_invariants(&self) -> GraphResult<()> {
        let width = self.width();
        if width != self.n + 2*self.m || self.next.len() != width
            || self.prev.len() != width || self.origin.len() != width {
            return Err(GraphError::CorruptChain { slot: width });
        }

        let mut seen = 0;
        for vertex in 0..self.n {
            if self.vertex(vertex).is_none() || self.origin[vertex] != vertex {
                return Err(GraphError::CorruptChain { slot: vertex });
            }

            let mut curr = self.next[vertex];
            let mut last = vertex;
            while curr != vertex {
                let consistent = match self.stub(curr) {
                    Some(stub) => stub.start == vertex && self.origin[curr] == vertex,
                    None => false,
                };
                if !consistent || self.prev[curr] != last {
                    return Err(GraphError::CorruptChain { slot: curr });
                }
                seen += 1;
                if seen > 2*self.m {
                    return Err(GraphError::CorruptChain { slot: curr });
                }
                last = curr;
                curr = self.next[curr];
            }
            if self.prev[vertex] != last {
                return Err(GraphError::CorruptChain { slot: vertex });
            }
        }

        if seen != 2*self.m {
            return Err(GraphError::CorruptChain { slot: self.n });
        }

        for id in self.n..width {
            let mirrored = match (self.stub(id), self.twin(id).and_then(|t| self.stub(t))) {
                (Some(a), Some(b)) => a.start == b.end && a.end == b.start,
                _ => false,
            };
            if !mirrored {
                return Err(GraphError::CorruptChain { slot: id });
            }
        }

        Ok(())
    }
}

impl<V, E> Graph for IncidenceGraph<V, E> {
    fn num_vertices(&self) -> usize {
        self.n
    }

    fn num_edges(&self) -> usize {
        self.m
    }

    fn contains(&self, u:&Label) -> bool {
        self.positions.contains_key(u)
    }

    fn adjacent(&self, u:&Label, v:&Label) -> bool {
        match (self.position(u), self.position(v)) {
            (Some(pu), Some(pv)) => self.incident_stubs(pu).any(|stub| stub.end == pv),
            _ => false
        }
    }

    /// Length of the incidence chain of `u`. A loop counts twice.
    fn degree(&self, u:&Label) -> u32 {
        match self.position(u) {
            Some(pu) => self.incident_stubs(pu).len() as u32,
            None => 0
        }
    }

    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=&Label> + 'a> {
        Box::new(self.slots[..self.n].iter().filter_map(|slot| match slot {
            Slot::Vertex(record) => Some(&record.label),
            Slot::Stub(_) => None,
        }))
    }

    fn neighbours<'a>(&'a self, u:&Label) -> Box<dyn Iterator<Item=&Label> + 'a> {
        match self.position(u) {
            Some(pu) => Box::new(NeighbourIterator::new(self, pu)),
            None => Box::new(std::iter::empty::<&Label>())
        }
    }

    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item=Edge> + 'a> {
        Box::new(EdgeIterator::new(self))
    }
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
    use fxhash::FxHashMap;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn chain(G:&IncidenceGraph, position:Position) -> Vec<SlotId> {
        let mut res = Vec::new();
        let mut curr = G.next[position];
        while curr != position {
            res.push(curr);
            curr = G.next[curr];
        }
        res
    }

    #[test]
    fn layout() {
        let G = IncidenceGraph::from_edges(vec![(1,2),(2,3)]).unwrap();

        assert_eq!(G.num_vertices(), 3);
        assert_eq!(G.num_edges(), 2);
        assert_eq!(G.width(), 7);

        // Matches the table in the module documentation
        assert_eq!(G.origin, vec![0,1,2,0,1,1,2]);
        assert_eq!(G.next, vec![3,4,6,0,5,1,2]);
        assert_eq!(G.prev, vec![3,5,6,0,1,4,2]);

        assert_eq!(G.label(0), Some(1));
        assert_eq!(G.label(2), Some(3));
        assert_eq!(G.label(3), None);
        assert_eq!(G.twin(3), Some(4));
        assert_eq!(G.twin(4), Some(3));
        assert_eq!(G.twin(6), Some(5));
        assert_eq!(G.twin(2), None);
        assert_eq!(G.twin(7), None);

        G.check_invariants().unwrap();
    }

    #[test]
    fn stubs_mirror_each_other() {
        let G = IncidenceGraph::from_edges(vec![(4,9)]).unwrap();
        let a = G.stub(2).unwrap();
        let b = G.stub(3).unwrap();

        assert_eq!((a.start(), a.end()), (0, 1));
        assert_eq!((b.start(), b.end()), (1, 0));
        assert_eq!(a.id(), 2);
        assert_eq!(b.id(), 3);
    }

    #[test]
    fn empty_graph() {
        let G = IncidenceGraph::from_edges(vec![]).unwrap();
        assert_eq!(G.num_vertices(), 0);
        assert_eq!(G.width(), 0);
        assert!(G.is_empty());
        assert_eq!(G.edges().count(), 0);
        G.check_invariants().unwrap();
    }

    #[test]
    fn chains_keep_insertion_order() {
        let mut builder = IncidenceGraphBuilder::<(), ()>::new();
        builder.add_edges(vec![(0,3),(0,1),(0,2)]).order(EdgeOrder::Input);
        let G = builder.build().unwrap();

        // Stubs of 0 are at 4, 6 and 8 in the order the edges were given
        assert_eq!(chain(&G, 0), vec![4,6,8]);
        assert_eq!(G.neighbours(&0).cloned().collect_vec(), vec![3,1,2]);

        let G = IncidenceGraph::from_edges(vec![(0,3),(0,1),(0,2)]).unwrap();
        assert_eq!(G.neighbours(&0).cloned().collect_vec(), vec![1,2,3]);
    }

    #[test]
    fn canonical_order() {
        let G = IncidenceGraph::from_edges(vec![(3,1),(2,1),(4,3)]).unwrap();
        let H = IncidenceGraph::from_edges(vec![(3,4),(1,3),(1,2)]).unwrap();

        // Same table regardless of input order and orientation
        assert_eq!(G.origin, H.origin);
        assert_eq!(G.next, H.next);
        assert_eq!(G.edges().collect_vec(), vec![(1,2),(1,3),(3,4)]);
        assert_eq!(G.vertices().cloned().collect_vec(), vec![1,2,3,4]);
    }

    #[test]
    fn loops_and_parallel_edges() {
        let G = IncidenceGraph::from_edges(vec![(1,1),(1,2),(1,2)]).unwrap();
        G.check_invariants().unwrap();

        assert_eq!(G.num_edges(), 3);
        assert_eq!(G.degree(&1), 4);
        assert_eq!(G.degree(&2), 2);
        assert!(G.adjacent(&1, &1));
        assert!(G.adjacent(&2, &1));
    }

    #[test]
    fn payloads() {
        let mut builder = IncidenceGraphBuilder::<&str, i64>::new();
        builder.add_edges(vec![(2,1),(1,3)])
               .payloads(vec![10, 20])
               .vertex(1, "root")
               .vertex(7, "alone");
        let G = builder.build().unwrap();
        G.check_invariants().unwrap();

        assert_eq!(G.vertex_data(&1), Some(&"root"));
        assert_eq!(G.vertex_data(&2), Some(&""));
        assert_eq!(G.vertex_data(&7), Some(&"alone"));
        assert_eq!(G.vertex_data(&8), None);

        // Isolated vertex comes after all edge endpoints
        assert_eq!(G.position(&7), Some(3));
        assert_eq!(G.degree(&7), 0);

        for stub in G.slots.iter().filter_map(|s| match s { Slot::Stub(s) => Some(s), _ => None }) {
            let twin = G.twin(stub.id()).unwrap();
            assert_eq!(G.edge_data(twin), Some(stub.data()));
        }
        let edge_12 = G.incident_stubs(G.position(&2).unwrap()).next().unwrap();
        assert_eq!(*edge_12.data(), 10);
    }

    #[test]
    fn payload_mismatch() {
        let res = IncidenceGraph::with_payloads(vec![(1,2),(2,3)], vec![0i64]);
        assert!(matches!(res, Err(GraphError::PayloadMismatch { edges: 2, payloads: 1 })));
    }

    #[test]
    fn detects_corruption() {
        let mut G = IncidenceGraph::from_edges(vec![(1,2),(2,3),(3,1)]).unwrap();
        G.check_invariants().unwrap();

        let slot = G.next[0];
        G.prev[slot] = 2;
        assert!(matches!(G.check_invariants(), Err(GraphError::CorruptChain { .. })));
    }

    #[test]
    fn random_structure() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..20 {
            let n = rng.gen_range(1..40u32);
            let m = rng.gen_range(0..120usize);
            let edges:Vec<Edge> = (0..m).map(|_| (rng.gen_range(0..n), rng.gen_range(0..n))).collect();

            let G = IncidenceGraph::from_edges(edges.clone()).unwrap();
            G.check_invariants().unwrap();
            assert_eq!(G.width(), G.num_vertices() + 2*edges.len());

            let mut degrees:FxHashMap<Label, u32> = FxHashMap::default();
            for (u,v) in &edges {
                *degrees.entry(*u).or_default() += 1;
                *degrees.entry(*v).or_default() += 1;
            }
            assert_eq!(degrees.len(), G.num_vertices());

            for (u, d) in degrees {
                let pu = G.position(&u).unwrap();
                assert_eq!(chain(&G, pu).len() as u32, d);
                assert_eq!(G.degree(&u), d);

                // prev undoes next along the whole chain
                for s in chain(&G, pu) {
                    assert_eq!(G.prev[G.next[s]], s);
                    assert_eq!(G.next[G.prev[s]], s);
                }
            }
        }
    }
}
