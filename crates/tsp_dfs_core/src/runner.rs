use std::io::{self, Write};

use crate::{
    GraphInput, Path, Result, SearchOutcome, TspOptions, constants::START_VERTEX, output, search,
    search_with_trace,
};

/// Builds the graph from `input`, searches from [`START_VERTEX`] and writes
/// the report to `out`. With `verbose`, every completed circuit is written
/// ahead of the report.
pub fn solve(
    input: &GraphInput,
    options: &TspOptions,
    out: &mut dyn Write,
) -> Result<SearchOutcome> {
    let mut graph = input.to_graph(options.undirected, options.max_vertices)?;
    log::info!("graph: {graph}");

    let outcome = if options.verbose {
        let mut trace_err: Option<io::Error> = None;
        let outcome = search_with_trace(&mut graph, START_VERTEX, &mut |circuit: &Path| {
            if trace_err.is_none()
                && let Err(e) = circuit.print(&mut *out, &input.names)
            {
                trace_err = Some(e);
            }
        })?;
        if let Some(e) = trace_err {
            return Err(e.into());
        }
        outcome
    } else {
        search(&mut graph, START_VERTEX)?
    };

    output::write_report(&mut *out, &outcome, &input.names)?;
    out.flush()?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::solve;
    use crate::{GraphInput, TspOptions};

    const BASIC: &str = "4\nHome\nA\nB\nC\n0 1 10\n0 2 15\n0 3 20\n1 2 35\n1 3 25\n2 3 30\n";

    fn run(text: &str, options: &TspOptions) -> (String, u64) {
        let input = GraphInput::parse(text).expect("parse");
        let mut out: Vec<u8> = Vec::new();
        let outcome = solve(&input, options, &mut out).expect("solve");
        (String::from_utf8(out).expect("utf8"), outcome.calls())
    }

    #[test]
    fn solve_writes_optimal_tour() {
        let options = TspOptions {
            undirected: true,
            ..TspOptions::default()
        };
        let (rendered, calls) = run(BASIC, &options);

        assert_eq!(calls, 16);
        assert_eq!(
            rendered,
            "Path length: 80\nPath: Home -> A -> C -> B -> Home\nTotal recursive calls: 16\n"
        );
    }

    #[test]
    fn verbose_prints_every_circuit_before_report() {
        let options = TspOptions {
            undirected: true,
            verbose: true,
            ..TspOptions::default()
        };
        let (rendered, _) = run(BASIC, &options);

        // Six circuits plus the final report.
        assert_eq!(rendered.matches("Path length:").count(), 7);
        assert!(rendered.starts_with("Path length: 95\nPath: Home -> A -> B -> C -> Home\n"));
        assert!(rendered.ends_with(
            "Path length: 80\nPath: Home -> A -> C -> B -> Home\nTotal recursive calls: 16\n"
        ));
    }

    #[test]
    fn directed_input_without_return_edges_has_no_tour() {
        let (rendered, _) = run(BASIC, &TspOptions::default());
        assert_eq!(rendered, "No tour found.\nTotal recursive calls: 8\n");
    }

    #[test]
    fn vertex_bound_is_enforced() {
        let input = GraphInput::parse(BASIC).expect("parse");
        let options = TspOptions {
            max_vertices: 3,
            ..TspOptions::default()
        };
        let err = solve(&input, &options, &mut Vec::<u8>::new()).expect_err("too many vertices");
        assert!(err.to_string().contains("vertex count 4 out of range"));
    }
}
