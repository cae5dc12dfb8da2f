//!
//! Undirected multigraphs stored as an incidence table, together with a two-colouring engine
//! that decides bipartiteness by walking the table.
//!
//! Every vertex owns a circular chain of edge stubs and every edge contributes two stubs, one
//! per endpoint, which refer to each other. See [incidence] for the layout, [iterators] for
//! cursors over a chain and [coloring] for the engine.

#![allow(non_snake_case)]

pub mod algorithms;
pub mod coloring;
pub mod compare;
pub mod error;
pub mod graph;
pub mod incidence;
pub mod io;
pub mod iterators;
pub mod report;
