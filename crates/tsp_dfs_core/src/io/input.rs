use std::{fs, io::Read};

use tsp_dfs_derive::KvDisplay;

use crate::{Error, Graph, Result, TspOptions};

/// One `from to weight` line of the graph file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u32,
}

/// Parsed graph file: a vertex count, one city name per vertex, then edges.
#[derive(Clone, Debug, PartialEq, Eq, KvDisplay)]
pub struct GraphInput {
    pub vertex_count: usize,
    #[kv(fmt = "len")]
    pub names: Vec<String>,
    #[kv(fmt = "len")]
    pub edges: Vec<Edge>,
}

impl GraphInput {
    /// Reads from `--input` when set, otherwise stdin.
    pub fn read(options: &TspOptions) -> Result<Self> {
        let text = match options.input_path() {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::invalid_input(format!("error opening file {}: {e}", path.display()))
            })?,
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
        };
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));

        let (count_line, raw_count) = lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .ok_or_else(|| Error::invalid_input("empty graph input"))?;
        let vertex_count: usize = raw_count.trim().parse().map_err(|_| {
            Error::invalid_input(format!(
                "line {count_line}: invalid vertex count: {}",
                raw_count.trim()
            ))
        })?;

        let names = lines
            .by_ref()
            .take(vertex_count)
            .map(|(_, line)| line.trim_end_matches(['\r', '\n']).to_string())
            .collect::<Vec<_>>();
        if names.len() < vertex_count {
            return Err(Error::invalid_input(format!(
                "expected {vertex_count} city names but found {}",
                names.len()
            )));
        }

        let edges = lines
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_no, line)| parse_edge(line_no, line))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            vertex_count,
            names,
            edges,
        })
    }

    /// Builds the graph, enforcing the vertex bound and edge endpoints.
    pub fn to_graph(&self, undirected: bool, max_vertices: usize) -> Result<Graph> {
        let mut graph = Graph::new(self.vertex_count, undirected, max_vertices)?;
        for edge in &self.edges {
            graph.add_edge(edge.from, edge.to, edge.weight)?;
        }
        log::debug!("input: built graph {graph}");
        Ok(graph)
    }
}

fn parse_edge(line_no: usize, line: &str) -> Result<Edge> {
    let fields = line
        .split_whitespace()
        .map(str::parse::<u32>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::invalid_input(format!("line {line_no}: invalid edge: {line} ({e})")))?;

    let [from, to, weight] = fields[..] else {
        return Err(Error::invalid_input(format!(
            "line {line_no}: expected 'from to weight' but got {} fields: {line}",
            fields.len()
        )));
    };

    Ok(Edge {
        from: from as usize,
        to: to as usize,
        weight,
    })
}

#[cfg(test)]
mod tests {
    use super::{Edge, GraphInput};

    const BASIC: &str = "4\nHome\nThe Beach\nThe Mall\r\nSchool\n0 1 10\n0 2 15\n\n0 3 20\n1 2 35\n1 3 25\n2 3 30\n";

    #[test]
    fn parse_reads_count_names_and_edges() {
        let input = GraphInput::parse(BASIC).expect("parse");

        assert_eq!(input.vertex_count, 4);
        assert_eq!(input.names, vec!["Home", "The Beach", "The Mall", "School"]);
        assert_eq!(input.edges.len(), 6);
        assert_eq!(
            input.edges[5],
            Edge {
                from: 2,
                to: 3,
                weight: 30
            }
        );
    }

    #[test]
    fn parse_allows_no_edges() {
        let input = GraphInput::parse("2\nA\nB\n").expect("parse");
        assert!(input.edges.is_empty());
    }

    #[test]
    fn parse_rejects_empty_input() {
        let err = GraphInput::parse(" \n\n").expect_err("empty input");
        assert!(err.to_string().contains("empty graph input"));
    }

    #[test]
    fn parse_rejects_non_numeric_vertex_count() {
        let err = GraphInput::parse("four\nA\n").expect_err("bad count");
        assert!(err.to_string().contains("line 1: invalid vertex count: four"));
    }

    #[test]
    fn parse_rejects_missing_names() {
        let err = GraphInput::parse("3\nA\nB").expect_err("missing name");
        assert!(err.to_string().contains("expected 3 city names but found 2"));
    }

    #[test]
    fn parse_rejects_malformed_edges() {
        let err = GraphInput::parse("2\nA\nB\n0 1\n").expect_err("short edge");
        assert!(err.to_string().contains("line 4: expected 'from to weight'"));

        let err = GraphInput::parse("2\nA\nB\n0 1 -3\n").expect_err("negative weight");
        assert!(err.to_string().contains("line 4: invalid edge"));
    }

    #[test]
    fn to_graph_enforces_bounds() {
        let input = GraphInput::parse("2\nA\nB\n0 5 1\n").expect("parse");
        let err = input.to_graph(false, 26).expect_err("edge out of range");
        assert!(err.to_string().contains("edge (0, 5)"));

        let input = GraphInput::parse("3\nA\nB\nC\n").expect("parse");
        assert!(input.to_graph(false, 2).is_err());

        let input = GraphInput::parse("0\n").expect("parse");
        assert!(input.to_graph(false, 26).is_err());
    }

    #[test]
    fn to_graph_applies_direction() {
        let input = GraphInput::parse("2\nA\nB\n0 1 3\n").expect("parse");

        let directed = input.to_graph(false, 26).expect("graph");
        assert_eq!(directed.edge_weight(1, 0), 0);

        let undirected = input.to_graph(true, 26).expect("graph");
        assert_eq!(undirected.edge_weight(1, 0), 3);
    }

    #[test]
    fn display_summarises_counts() {
        let input = GraphInput::parse(BASIC).expect("parse");
        let rendered = input.to_string();
        assert!(rendered.contains("vertex_count = 4"));
        assert!(rendered.contains("edges        = 6"));
    }
}
