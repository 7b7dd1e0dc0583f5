use std::{fmt, io::Write};

use crate::Graph;

/// Ordered vertex sequence with a running total of the edge weights between
/// consecutive vertices.
///
/// Pushes and pops nest like a stack: popping undoes exactly what the
/// matching push added to the weight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    vertices: Vec<usize>,
    weight: u64,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            weight: 0,
        }
    }

    pub fn push_vertex(&mut self, v: usize, graph: &Graph) {
        if let Some(&last) = self.vertices.last() {
            self.weight += u64::from(graph.edge_weight(last, v));
        }
        self.vertices.push(v);
    }

    /// # Panics
    ///
    /// Panics when the path is empty.
    pub fn pop_vertex(&mut self, graph: &Graph) -> usize {
        let Some(v) = self.vertices.pop() else {
            panic!("pop_vertex called on an empty path");
        };
        if let Some(&last) = self.vertices.last() {
            self.weight -= u64::from(graph.edge_weight(last, v));
        }
        v
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.weight
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn last(&self) -> Option<usize> {
        self.vertices.last().copied()
    }

    /// Overwrites `self` with an independent copy of `src`, reusing the
    /// existing allocation.
    pub fn copy_from(&mut self, src: &Path) {
        self.vertices.clone_from(&src.vertices);
        self.weight = src.weight;
    }

    /// Writes the total weight and the vertex names in path order.
    pub fn print<W: Write + ?Sized>(&self, out: &mut W, names: &[String]) -> std::io::Result<()> {
        writeln!(out, "Path length: {}", self.weight)?;
        let route = self
            .vertices
            .iter()
            .map(|&v| names.get(v).map_or("?", String::as_str))
            .collect::<Vec<_>>()
            .join(" -> ");
        writeln!(out, "Path: {route}")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self
            .vertices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("->");
        write!(f, "[{route}] weight={}", self.weight)
    }
}
