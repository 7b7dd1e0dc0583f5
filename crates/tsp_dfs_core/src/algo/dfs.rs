//! Exhaustive depth-first backtracking search for the minimum-weight
//! Hamiltonian circuit through a fixed origin.
//!
//! The only pruning rule is never revisiting a vertex already on the current
//! path. Neighbours are explored in ascending id order, so the best circuit
//! (first found on ties) and the call count are reproducible.

use crate::{Error, Graph, Path, Result};

/// Result of one search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    shortest: Path,
    calls: u64,
}

impl SearchOutcome {
    /// The best circuit, closed with the origin as its last vertex, or
    /// `None` when the graph has no Hamiltonian circuit through the origin.
    pub fn shortest(&self) -> Option<&Path> {
        (!self.shortest.is_empty()).then_some(&self.shortest)
    }

    pub fn found(&self) -> bool {
        !self.shortest.is_empty()
    }

    /// Number of `visit` invocations, the root call included.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn into_shortest(self) -> Option<Path> {
        self.found().then_some(self.shortest)
    }
}

/// Runs the search from `origin`.
pub fn search(graph: &mut Graph, origin: usize) -> Result<SearchOutcome> {
    DepthFirstSearch::new(graph, origin, None)?.run()
}

/// Runs the search from `origin`, handing every completed circuit to
/// `trace` in discovery order, not just the improving ones.
pub fn search_with_trace(
    graph: &mut Graph,
    origin: usize,
    trace: &mut dyn FnMut(&Path),
) -> Result<SearchOutcome> {
    DepthFirstSearch::new(graph, origin, Some(trace))?.run()
}

struct DepthFirstSearch<'g, 't> {
    graph: &'g mut Graph,
    origin: usize,
    current: Path,
    shortest: Path,
    calls: u64,
    circuits: u64,
    trace: Option<&'t mut dyn FnMut(&Path)>,
}

impl<'g, 't> DepthFirstSearch<'g, 't> {
    fn new(
        graph: &'g mut Graph,
        origin: usize,
        trace: Option<&'t mut dyn FnMut(&Path)>,
    ) -> Result<Self> {
        let n = graph.vertices();
        if origin >= n {
            return Err(Error::invalid_graph(format!(
                "origin {origin} outside graph of {n} vertices"
            )));
        }

        Ok(Self {
            graph,
            origin,
            current: Path::with_capacity(n + 1),
            shortest: Path::with_capacity(n + 1),
            calls: 0,
            circuits: 0,
            trace,
        })
    }

    fn run(mut self) -> Result<SearchOutcome> {
        log::debug!(
            "dfs: start graph=({}) origin={}",
            self.graph,
            self.origin
        );

        self.graph.reset_visited();
        self.visit(self.origin);

        // The root frame has no caller to undo its push and mark.
        self.graph.mark_unvisited(self.origin);
        self.current.pop_vertex(self.graph);
        debug_assert!(self.current.is_empty());

        if self.shortest.is_empty() {
            log::info!(
                "dfs: n={} origin={} calls={} circuits=0 no tour",
                self.graph.vertices(),
                self.origin,
                self.calls
            );
        } else {
            log::info!(
                "dfs: n={} origin={} calls={} circuits={} weight={}",
                self.graph.vertices(),
                self.origin,
                self.calls,
                self.circuits,
                self.shortest.total_weight()
            );
        }

        Ok(SearchOutcome {
            shortest: self.shortest,
            calls: self.calls,
        })
    }

    fn visit(&mut self, v: usize) {
        self.calls += 1;
        self.current.push_vertex(v, self.graph);

        if self.current.len() == self.graph.vertices() && self.graph.has_edge(v, self.origin) {
            self.complete_circuit();
        }

        self.graph.mark_visited(v);
        for w in 0..self.graph.vertices() {
            if !self.graph.has_edge(v, w) || self.graph.is_visited(w) {
                continue;
            }
            self.visit(w);
            self.graph.mark_unvisited(w);
            self.current.pop_vertex(self.graph);
        }
    }

    /// `current` holds every vertex and its last vertex has an edge home.
    fn complete_circuit(&mut self) {
        // A lone origin is a trivial tour; its self-loop only proves it closes.
        let close = self.current.len() > 1;
        if close {
            self.current.push_vertex(self.origin, self.graph);
        }

        self.circuits += 1;
        log::trace!("dfs: circuit {}", self.current);
        if let Some(trace) = self.trace.as_mut() {
            trace(&self.current);
        }

        if self.shortest.is_empty()
            || self.current.total_weight() < self.shortest.total_weight()
        {
            log::debug!(
                "dfs: improved weight={} after calls={}",
                self.current.total_weight(),
                self.calls
            );
            self.shortest.copy_from(&self.current);
        }

        if close {
            self.current.pop_vertex(self.graph);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    use super::{search, search_with_trace};
    use crate::{Graph, Path};

    fn graph(n: usize, undirected: bool, edges: &[(usize, usize, u32)]) -> Graph {
        let mut graph = Graph::new(n, undirected, n).expect("graph");
        for &(u, v, w) in edges {
            graph.add_edge(u, v, w).expect("edge");
        }
        graph
    }

    fn classic() -> Graph {
        graph(
            4,
            true,
            &[
                (0, 1, 10),
                (0, 2, 15),
                (0, 3, 20),
                (1, 2, 35),
                (1, 3, 25),
                (2, 3, 30),
            ],
        )
    }

    /// Cheapest closed tour over all permutations of the non-origin vertices.
    fn brute_force(graph: &Graph) -> Option<u64> {
        fn permute(
            graph: &Graph,
            order: &mut Vec<usize>,
            rest: &mut Vec<usize>,
            best: &mut Option<u64>,
        ) {
            if rest.is_empty() {
                let mut total = 0;
                let closed = order.iter().chain(std::iter::once(&0));
                let hops: Vec<_> = order.iter().zip(closed.skip(1)).collect();
                for (&a, &b) in hops {
                    if !graph.has_edge(a, b) {
                        return;
                    }
                    total += u64::from(graph.edge_weight(a, b));
                }
                if best.is_none_or(|b| total < b) {
                    *best = Some(total);
                }
                return;
            }
            for i in 0..rest.len() {
                let v = rest.remove(i);
                order.push(v);
                permute(graph, order, rest, best);
                order.pop();
                rest.insert(i, v);
            }
        }

        let mut best = None;
        let mut rest: Vec<usize> = (1..graph.vertices()).collect();
        permute(graph, &mut vec![0], &mut rest, &mut best);
        best
    }

    fn random_graph(rng: &mut SmallRng, n: usize, undirected: bool) -> Graph {
        let mut g = Graph::new(n, undirected, n).expect("graph");
        for u in 0..n {
            for v in 0..n {
                if u != v && rng.random_bool(0.7) {
                    g.add_edge(u, v, rng.random_range(1..=50)).expect("edge");
                }
            }
        }
        g
    }

    #[test]
    fn classic_four_city_instance_finds_weight_80() {
        let mut g = classic();
        let outcome = search(&mut g, 0).expect("search");
        let best = outcome.shortest().expect("tour");

        assert_eq!(best.vertices(), &[0, 1, 3, 2, 0]);
        assert_eq!(best.total_weight(), 80);
        assert!(outcome.found());
    }

    #[test]
    fn complete_four_vertex_graph_makes_sixteen_calls() {
        // 1 root + 3 + 3*2 + 3*2*1 visits.
        let mut g = classic();
        assert_eq!(search(&mut g, 0).expect("search").calls(), 16);
    }

    #[test]
    fn ties_keep_the_first_circuit_found() {
        let mut g = graph(3, true, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let best = search(&mut g, 0).expect("search").into_shortest().expect("tour");
        assert_eq!(best.vertices(), &[0, 1, 2, 0]);
        assert_eq!(best.total_weight(), 3);
    }

    #[test]
    fn directed_graph_respects_edge_direction() {
        // Only 0->2->1->0 is closable.
        let mut g = graph(
            3,
            false,
            &[(0, 1, 1), (0, 2, 5), (2, 1, 5), (1, 0, 5), (1, 2, 1)],
        );
        let best = search(&mut g, 0).expect("search").into_shortest().expect("tour");
        assert_eq!(best.vertices(), &[0, 2, 1, 0]);
        assert_eq!(best.total_weight(), 15);
    }

    #[test]
    fn disconnected_vertex_means_no_tour() {
        let mut g = graph(4, true, &[(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
        let outcome = search(&mut g, 0).expect("search");
        assert!(outcome.shortest().is_none());
        assert!(!outcome.found());
        assert!(outcome.calls() > 0);
    }

    #[test]
    fn origin_self_loop_alone_cannot_cover_every_vertex() {
        let mut g = graph(3, false, &[(0, 0, 4)]);
        let outcome = search(&mut g, 0).expect("search");
        assert!(outcome.shortest().is_none());
        assert_eq!(outcome.calls(), 1);
    }

    #[test]
    fn single_vertex_with_self_loop_is_trivial_tour() {
        let mut g = graph(1, false, &[(0, 0, 9)]);
        let best = search(&mut g, 0).expect("search").into_shortest().expect("tour");
        assert_eq!(best.vertices(), &[0]);
        assert_eq!(best.total_weight(), 0);
    }

    #[test]
    fn single_vertex_without_self_loop_has_no_tour() {
        let mut g = graph(1, false, &[]);
        let outcome = search(&mut g, 0).expect("search");
        assert!(outcome.shortest().is_none());
        assert_eq!(outcome.calls(), 1);
    }

    #[test]
    fn origin_outside_graph_is_rejected() {
        let mut g = classic();
        let err = search(&mut g, 4).expect_err("bad origin");
        assert!(err.to_string().contains("origin 4 outside graph of 4 vertices"));
    }

    #[test]
    fn non_zero_origin_starts_and_ends_there() {
        let mut g = classic();
        let best = search(&mut g, 2).expect("search").into_shortest().expect("tour");
        assert_eq!(best.vertices().first(), Some(&2));
        assert_eq!(best.last(), Some(2));
        assert_eq!(best.total_weight(), 80);
    }

    #[test]
    fn search_leaves_graph_unvisited_and_is_repeatable() {
        let mut g = classic();
        g.mark_visited(3);

        let first = search(&mut g, 0).expect("search");
        assert!((0..4).all(|v| !g.is_visited(v)));

        let second = search(&mut g, 0).expect("search");
        assert_eq!(first, second);
    }

    #[test]
    fn trace_sees_every_circuit_and_best_is_minimal() {
        let mut g = classic();
        let mut seen: Vec<Path> = Vec::new();
        let outcome =
            search_with_trace(&mut g, 0, &mut |c: &Path| seen.push(c.clone())).expect("search");

        // 3! orderings of the other vertices, all closable in a complete graph.
        assert_eq!(seen.len(), 6);
        let best = outcome.shortest().expect("tour");
        assert!(seen.iter().all(|c| best.total_weight() <= c.total_weight()));
        assert!(seen.iter().all(|c| c.len() == 5 && c.last() == Some(0)));
        assert_eq!(&seen[0], &{
            let mut p = Path::new();
            for v in [0, 1, 2, 3, 0] {
                p.push_vertex(v, &g);
            }
            p
        });
    }

    #[test]
    fn matches_brute_force_on_random_graphs() {
        let mut rng = SmallRng::seed_from_u64(7);
        for round in 0..40 {
            let n = 1 + round % 7;
            let undirected = round % 2 == 0;
            let mut g = random_graph(&mut rng, n, undirected);
            if n == 1 {
                continue;
            }

            let outcome = search(&mut g, 0).expect("search");
            assert_eq!(
                outcome.shortest().map(Path::total_weight),
                brute_force(&g),
                "round={round} graph={g}"
            );
        }
    }

    #[test]
    fn random_searches_are_deterministic() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..10 {
            let mut g = random_graph(&mut rng, 6, false);
            let a = search(&mut g, 0).expect("search");
            let b = search(&mut g, 0).expect("search");
            assert_eq!(a.shortest(), b.shortest());
            assert_eq!(a.calls(), b.calls());
        }
    }
}
