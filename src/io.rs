//!
//! Reading and writing edge lists. Every line of an edge-list file describes one undirected
//! edge and its integer payload:
//!
//! ```text
//! 1 -- 2, 0
//! 1 -- 3, 5
//! 2-3,1
//! ```
//!
//! Whitespace around the numbers is ignored, the endpoints may be separated by `-` or `--` and
//! blank lines are skipped. Files ending in `.gz` are read and written gzip-compressed.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::coloring::ColoringOutcome;
use crate::error::{GraphError, GraphResult};
use crate::graph::*;
use crate::incidence::{IncidenceGraph, IncidenceGraphBuilder};

/// Payload type of edges read from a file.
pub type Payload = i64;

/// Edges together with their payloads, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeList {
    pub edges: Vec<Edge>,
    pub payloads: Vec<Payload>,
}

impl EdgeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edge:Edge, payload:Payload) {
        self.edges.push(edge);
        self.payloads.push(payload);
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

pub trait WriteToFile {
    fn write_txt(&self, filename:&str) -> GraphResult<()> {
        let file = File::create(filename)?;
        let buf = BufWriter::new(file);
        self.write_buf(Box::new(buf))
    }

    fn write_gzipped(&self, filename:&str) -> GraphResult<()> {
        let file = File::create(filename)?;
        let gz = GzEncoder::new(file, Compression::default());
        let buf = BufWriter::new(gz);
        self.write_buf(Box::new(buf))
    }

    fn write_buf(&self, buf:Box<dyn Write>) -> GraphResult<()>;
}

pub trait LoadFromFile {
    fn from_txt(filename:&str) -> GraphResult<Self> where Self: Sized {
        let buf = open_reader_txt(filename)?;
        Self::from_buf(buf)
    }

    fn from_gzipped(filename:&str) -> GraphResult<Self> where Self: Sized {
        let buf = open_reader_gzip(filename)?;
        Self::from_buf(buf)
    }

    /// Picks plain or gzipped reading by the file extension.
    fn from_file(filename:&str) -> GraphResult<Self> where Self: Sized {
        let buf = open_reader(filename)?;
        Self::from_buf(buf)
    }

    fn from_buf(buf:Box<dyn BufRead>) -> GraphResult<Self> where Self: Sized;
}

impl LoadFromFile for EdgeList {
    fn from_buf(buf:Box<dyn BufRead>) -> GraphResult<Self> {
        let mut res = EdgeList::new();
        for (i, line) in buf.lines().enumerate() {
            let l = line?;
            if l.trim().is_empty() {
                continue;
            }
            let (edge, payload) = parse_edge(&l, i+1)?;
            res.push(edge, payload);
        }

        log::debug!("Read {} edges", res.len());
        Ok(res)
    }
}

impl WriteToFile for EdgeList {
    fn write_buf(&self, mut buf:Box<dyn Write>) -> GraphResult<()> {
        for ((u,v), p) in self.edges.iter().zip(self.payloads.iter()) {
            buf.write_all(format!("{u} -- {v}, {p}\n").as_bytes())?;
        }
        buf.flush()?;

        Ok(())
    }
}

impl WriteToFile for ColoringOutcome {
    fn write_buf(&self, mut buf:Box<dyn Write>) -> GraphResult<()> {
        buf.write_all(format!("{self}\n").as_bytes())?;
        buf.flush()?;

        Ok(())
    }
}

impl IncidenceGraph<(), Payload> {
    /// Builds a graph whose edges carry the payloads of `list`.
    pub fn from_edge_list(list:&EdgeList) -> GraphResult<Self> {
        let mut builder = IncidenceGraphBuilder::new();
        builder.add_edges(list.edges.iter().cloned())
               .payloads(list.payloads.clone());
        builder.build()
    }
}

impl LoadFromFile for IncidenceGraph<(), Payload> {
    fn from_buf(buf:Box<dyn BufRead>) -> GraphResult<Self> {
        let list = EdgeList::from_buf(buf)?;
        Self::from_edge_list(&list)
    }
}

fn open_reader(filename:&str) -> GraphResult<Box<dyn BufRead>> {
    let path = Path::new(&filename);
    let extension = path.extension().and_then(OsStr::to_str);
    match extension {
        Some("gz") => open_reader_gzip(filename),
        _ => open_reader_txt(filename),
    }
}

fn open_reader_txt(filename:&str) -> GraphResult<Box<dyn BufRead>> {
    let file = File::open(Path::new(&filename))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_reader_gzip(filename:&str) -> GraphResult<Box<dyn BufRead>> {
    let file = File::open(Path::new(&filename))?;
    let gz = GzDecoder::new(file);
    Ok(Box::new(BufReader::new(gz)))
}

/// Parses one edge record `start-end,payload`. `lineno` is only used for error messages.
pub fn parse_edge(s:&str, lineno:usize) -> GraphResult<(Edge, Payload)> {
    let error = |reason:String| GraphError::Parse { line: lineno, reason };

    let (endpoints, payload) = s.split_once(',')
        .ok_or_else(|| error(format!("missing ',' in `{s}`")))?;

    // Exactly one separator, written `-` or `--`
    let (left, right) = endpoints.split_once('-')
        .ok_or_else(|| error(format!("expected two endpoints in `{}`", endpoints.trim())))?;
    let right = right.strip_prefix('-').unwrap_or(right);
    let (left, right) = (left.trim(), right.trim());

    let u = parse_label(left).ok_or_else(|| error(format!("cannot parse vertex id `{left}`")))?;
    let v = parse_label(right).ok_or_else(|| error(format!("cannot parse vertex id `{right}`")))?;
    let payload = payload.trim();
    let p = payload.parse::<Payload>()
        .map_err(|_| error(format!("cannot parse payload {payload}")))?;

    Ok(((u, v), p))
}

fn parse_label(s:&str) -> Option<Label> {
    s.parse::<Label>().ok()
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
