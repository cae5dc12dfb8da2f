use std::fmt;

use crate::graph::*;
use crate::incidence::{IncidenceGraph, Stub};

/// Position inside the incidence chain of one vertex.
///
/// The chain is circular with the vertex slot acting as a sentinel: a cursor on the
/// sentinel is the *end* cursor of that vertex. Moving forward from the last stub
/// reaches the end, moving forward from the end wraps around to the first stub.
/// Moving backward mirrors this using the backward links.
///
/// ```rust
/// use incigraph::incidence::IncidenceGraph;
///
/// let graph = IncidenceGraph::from_edges(vec![(0,1),(0,2)]).unwrap();
/// let mut cursor = graph.begin(0);
/// let mut ends = Vec::new();
/// while cursor != graph.end(0) {
///     ends.push(cursor.current().unwrap().end());
///     cursor.move_next();
/// }
/// assert_eq!(ends, vec![1,2]);
/// ```
pub struct EdgeCursor<'a, V, E> {
    graph: &'a IncidenceGraph<V, E>,
    vertex: Position,
    slot: SlotId,
}

impl<'a, V, E> EdgeCursor<'a, V, E> {
    pub(crate) fn new(graph:&'a IncidenceGraph<V, E>, vertex:Position, slot:SlotId) -> Self {
        EdgeCursor { graph, vertex, slot }
    }

    /// Position of the vertex whose chain this cursor walks.
    pub fn vertex(&self) -> Position {
        self.vertex
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn is_end(&self) -> bool {
        self.slot == self.vertex
    }

    /// The stub under the cursor, `None` on the sentinel.
    pub fn current(&self) -> Option<&'a Stub<E>> {
        if self.is_end() {
            None
        } else {
            self.graph.stub(self.slot)
        }
    }

    pub fn move_next(&mut self) {
        self.slot = self.graph.next[self.slot];
    }

    pub fn move_prev(&mut self) {
        self.slot = self.graph.prev[self.slot];
    }
}

impl<'a, V, E> Clone for EdgeCursor<'a, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V, E> Copy for EdgeCursor<'a, V, E> {}

impl<'a, V, E> PartialEq for EdgeCursor<'a, V, E> {
    fn eq(&self, other:&Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.vertex == other.vertex && self.slot == other.slot
    }
}

impl<'a, V, E> Eq for EdgeCursor<'a, V, E> {}

impl<'a, V, E> fmt::Debug for EdgeCursor<'a, V, E> {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeCursor")
            .field("vertex", &self.vertex)
            .field("slot", &self.slot)
            .finish()
    }
}

/*
    Stubs incident to one vertex, in chain order. Iterating from the back
    follows the backward links.
*/
pub struct IncidentStubs<'a, V, E> {
    front: EdgeCursor<'a, V, E>,
    back: EdgeCursor<'a, V, E>,
    remaining: usize,
}

impl<'a, V, E> IncidentStubs<'a, V, E> {
    pub fn new(graph:&'a IncidenceGraph<V, E>, vertex:Position) -> Self {
        let front = graph.begin(vertex);
        let mut back = graph.end(vertex);
        back.move_prev();

        let mut remaining = 0;
        let mut cursor = front;
        while !cursor.is_end() {
            remaining += 1;
            cursor.move_next();
        }
        IncidentStubs { front, back, remaining }
    }
}

impl<'a, V, E> Iterator for IncidentStubs<'a, V, E> {
    type Item = &'a Stub<E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let stub = self.front.current();
        self.front.move_next();
        stub
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V, E> DoubleEndedIterator for IncidentStubs<'a, V, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let stub = self.back.current();
        self.back.move_prev();
        stub
    }
}

impl<'a, V, E> ExactSizeIterator for IncidentStubs<'a, V, E> {}

/*
    Neighbourhood iterator, returns the label at the far end of
    every incident stub. Loops and parallel edges repeat labels.
*/
pub struct NeighbourIterator<'a, V, E> {
    graph: &'a IncidenceGraph<V, E>,
    stubs: IncidentStubs<'a, V, E>,
}

impl<'a, V, E> NeighbourIterator<'a, V, E> {
    pub fn new(graph:&'a IncidenceGraph<V, E>, vertex:Position) -> Self {
        NeighbourIterator { graph, stubs: graph.incident_stubs(vertex) }
    }
}

impl<'a, V, E> Iterator for NeighbourIterator<'a, V, E> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        let stub = self.stubs.next()?;
        self.graph.label_ref(stub.end())
    }
}

/*
    Edge iterator, visits the first stub of every pair so each
    undirected edge is returned once.
*/
pub struct EdgeIterator<'a, V, E> {
    graph: &'a IncidenceGraph<V, E>,
    slot: SlotId,
}

impl<'a, V, E> EdgeIterator<'a, V, E> {
    pub fn new(graph:&'a IncidenceGraph<V, E>) -> Self {
        EdgeIterator { graph, slot: graph.num_vertices() }
    }
}

impl<'a, V, E> Iterator for EdgeIterator<'a, V, E> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let stub = self.graph.stub(self.slot)?;
        self.slot += 2;

        let u = self.graph.label(stub.start())?;
        let v = self.graph.label(stub.end())?;
        Some((u, v))
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
    use itertools::Itertools;

    fn star() -> IncidenceGraph {
        IncidenceGraph::from_edges(vec![(0,1),(0,2),(0,3)]).unwrap()
    }

    #[test]
    fn cursor_forward() {
        let G = star();
        let mut cursor = G.begin(0);
        let end = G.end(0);

        let mut ends = Vec::new();
        while cursor != end {
            ends.push(cursor.current().unwrap().end());
            cursor.move_next();
        }
        assert_eq!(ends, vec![1,2,3]);
        assert!(cursor.is_end());
        assert!(cursor.current().is_none());

        // Wraps around
        cursor.move_next();
        assert_eq!(cursor, G.begin(0));
    }

    #[test]
    fn cursor_backward() {
        let G = star();
        let mut cursor = G.end(0);
        cursor.move_prev();

        let mut ends = Vec::new();
        while !cursor.is_end() {
            ends.push(cursor.current().unwrap().end());
            cursor.move_prev();
        }
        assert_eq!(ends, vec![3,2,1]);
        assert_eq!(cursor, G.end(0));
    }

    #[test]
    fn cursor_step_inverse() {
        let G = IncidenceGraph::from_edges(vec![(0,1),(1,2),(2,0),(2,3),(3,1)]).unwrap();
        for v in 0..G.num_vertices() {
            let mut cursor = G.begin(v);
            while !cursor.is_end() {
                let mut other = cursor;
                other.move_next();
                other.move_prev();
                assert_eq!(other, cursor);
                cursor.move_next();
            }
        }
    }

    #[test]
    fn isolated_vertex() {
        let mut builder = crate::incidence::IncidenceGraphBuilder::<(), ()>::new();
        builder.vertex(5, ());
        let G = builder.build().unwrap();

        assert_eq!(G.begin(0), G.end(0));
        assert_eq!(G.incident_stubs(0).count(), 0);
        assert_eq!(G.incident_stubs(0).rev().count(), 0);
        assert_eq!(G.neighbours(&5).count(), 0);
    }

    #[test]
    fn cursors_are_per_vertex() {
        let G = IncidenceGraph::from_edges(vec![(0,1)]).unwrap();
        // Each vertex has its own end marker
        assert_ne!(G.end(0), G.end(1));
        assert_eq!(G.cursor(&0).unwrap(), G.begin(0));
        assert!(G.cursor(&7).is_err());
    }

    #[test]
    #[should_panic]
    fn stub_slot_is_not_a_vertex() {
        let G = star();
        // Slot 4 holds a stub, vertices occupy [0,4)
        G.incident_stubs(4);
    }

    #[test]
    #[should_panic]
    fn end_outside_vertex_range() {
        let G = star();
        G.end(G.width());
    }

    #[test]
    fn double_ended() {
        let G = star();
        let ids:Vec<_> = G.incident_stubs(0).map(|s| s.id()).collect();
        let mut rev:Vec<_> = G.incident_stubs(0).rev().map(|s| s.id()).collect();
        rev.reverse();
        assert_eq!(ids, rev);

        // Meet in the middle
        let mut it = G.incident_stubs(0);
        assert_eq!(it.len(), 3);
        assert_eq!(it.next().map(|s| s.end()), Some(1));
        assert_eq!(it.len(), 2);
        assert_eq!(it.next_back().map(|s| s.end()), Some(3));
        assert_eq!(it.next().map(|s| s.end()), Some(2));
        assert!(it.next_back().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn neighbours_and_edges() {
        let G = IncidenceGraph::from_edges(vec![(5,6),(6,7),(7,5)]).unwrap();

        assert_eq!(G.neighbours(&6).cloned().sorted().collect_vec(), vec![5,7]);
        assert_eq!(G.neighbours(&9).count(), 0);
        assert_eq!(G.edges().collect_vec(), vec![(5,6),(5,7),(6,7)]);
    }
}
