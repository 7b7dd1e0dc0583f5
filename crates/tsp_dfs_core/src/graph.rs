use std::fmt;

use crate::{Error, Result, constants::NO_EDGE};

/// Dense adjacency-weight matrix plus the per-vertex visited flags used by
/// the depth-first search.
///
/// A weight of [`NO_EDGE`] (zero) means the edge is absent, so a real
/// zero-cost edge cannot be stored.
///
/// Vertex ids passed to the query and flag methods must be `< vertices()`;
/// anything else panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    undirected: bool,
    weights: Vec<u32>,
    visited: Vec<bool>,
}

impl Graph {
    /// Creates an edgeless graph with `n` vertices, failing when `n` is zero
    /// or exceeds `max_vertices`.
    pub fn new(n: usize, undirected: bool, max_vertices: usize) -> Result<Self> {
        if n < 1 || n > max_vertices {
            return Err(Error::invalid_graph(format!(
                "vertex count {n} out of range (expected 1..={max_vertices})"
            )));
        }

        let cells = n.checked_mul(n).ok_or_else(|| {
            Error::invalid_graph(format!("vertex count {n} too large for a weight matrix"))
        })?;

        Ok(Self {
            n,
            undirected,
            weights: vec![NO_EDGE; cells],
            visited: vec![false; n],
        })
    }

    /// Sets the weight of `(u, v)`, and of `(v, u)` too when undirected.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: u32) -> Result<()> {
        if u >= self.n || v >= self.n {
            return Err(Error::invalid_graph(format!(
                "edge ({u}, {v}) references a vertex outside 0..{}",
                self.n
            )));
        }

        let (uv, vu) = (self.idx(u, v), self.idx(v, u));
        self.weights[uv] = weight;
        if self.undirected {
            self.weights[vu] = weight;
        }
        Ok(())
    }

    pub fn edge_weight(&self, u: usize, v: usize) -> u32 {
        self.weights[self.idx(u, v)]
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.edge_weight(u, v) != NO_EDGE
    }

    pub fn vertices(&self) -> usize {
        self.n
    }

    pub fn is_undirected(&self) -> bool {
        self.undirected
    }

    pub fn edge_count(&self) -> usize {
        let directed = self.weights.iter().filter(|w| **w != NO_EDGE).count();
        if !self.undirected {
            return directed;
        }
        let loops = (0..self.n).filter(|&v| self.has_edge(v, v)).count();
        (directed - loops) / 2 + loops
    }

    pub fn mark_visited(&mut self, v: usize) {
        self.visited[v] = true;
    }

    pub fn mark_unvisited(&mut self, v: usize) {
        self.visited[v] = false;
    }

    pub fn is_visited(&self, v: usize) -> bool {
        self.visited[v]
    }

    /// Clears every visited flag so a new search can start.
    pub fn reset_visited(&mut self) {
        self.visited.fill(false);
    }

    fn idx(&self, u: usize, v: usize) -> usize {
        assert!(
            u < self.n && v < self.n,
            "vertex pair ({u}, {v}) outside graph of {} vertices",
            self.n
        );
        u * self.n + v
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={} edges={} undirected={}",
            self.n,
            self.edge_count(),
            self.undirected
        )
    }
}
