use std::fmt;

use itertools::Itertools;

use crate::coloring::ColoringOutcome;
use crate::incidence::{IncidenceGraph, Slot};

/// Report for a graph without a two-colouring.
pub const NOT_BIPARTITE:&str = "Isn't bipartite";

/// Formats `outcome` as `label colour` pairs in ascending label order, for example
/// `1 b 2 r 3 b`, or as [NOT_BIPARTITE].
pub fn format_report(outcome:&ColoringOutcome) -> String {
    match outcome {
        ColoringOutcome::Bipartite(coloring) => {
            coloring.iter().map(|(u, c)| format!("{u} {c}")).join(" ")
        }
        ColoringOutcome::NotBipartite { .. } => NOT_BIPARTITE.to_string(),
    }
}

impl fmt::Display for ColoringOutcome {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_report(self))
    }
}

/// Renders the four rows of an incidence table for debugging. Every slot shows its own
/// id, vertex slots therefore show their position rather than their label. All cells
/// are left-aligned to the digit count of the table width plus one.
pub struct TableDump<'a, V, E> {
    graph: &'a IncidenceGraph<V, E>,
}

impl<V, E> IncidenceGraph<V, E> {
    pub fn dump(&self) -> TableDump<'_, V, E> {
        TableDump { graph: self }
    }
}

impl<'a, V, E> fmt::Display for TableDump<'a, V, E> {
    fn fmt(&self, f:&mut fmt::Formatter<'_>) -> fmt::Result {
        let G = self.graph;
        let contents:Vec<usize> = G.slots.iter().map(|slot| match slot {
            Slot::Vertex(record) => record.position(),
            Slot::Stub(stub) => stub.id(),
        }).collect();

        let cell = G.width().to_string().len() + 1;

        for row in [&contents, &G.origin, &G.next, &G.prev] {
            for value in row.iter() {
                write!(f, "{value:<cell$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
