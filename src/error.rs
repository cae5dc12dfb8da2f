//! Errors raised while building or reading an [IncidenceGraph](crate::incidence::IncidenceGraph).
//!
//! Note that an odd cycle is *not* an error: a failed two-colouring is reported as
//! [ColoringOutcome::NotBipartite](crate::coloring::ColoringOutcome::NotBipartite).

use std::io;

use thiserror::Error;

use crate::graph::{Label, SlotId};

/// Result type alias used throughout the crate.
pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    /// An edge record could not be parsed. Line numbers start at 1.
    #[error("cannot parse edge at input line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    /// The payload sequence does not have one entry per edge.
    #[error("got {payloads} edge payloads for {edges} edges")]
    PayloadMismatch { edges: usize, payloads: usize },

    #[error("vertex {0} is not contained in the graph")]
    UnknownVertex(Label),

    /// The forward/backward rows disagree or a chain does not close.
    #[error("incidence chain through slot {slot} is corrupt")]
    CorruptChain { slot: SlotId },
}
