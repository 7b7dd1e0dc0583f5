//! Exact travelling salesman tours over small weighted graphs.
//! Exhaustive depth-first backtracking from a fixed origin, plus the graph
//! file reader and tour printer around it.

mod algo;
mod constants;
mod error;
mod graph;
mod io;
pub mod logging;
mod path;
pub mod runner;

pub(crate) use io::{options, output};

pub use algo::dfs::{SearchOutcome, search, search_with_trace};
pub use constants::{DEFAULT_MAX_VERTICES, NO_EDGE, START_VERTEX};
pub use error::{Error, Result};
pub use graph::Graph;
pub use io::input::{Edge, GraphInput};
pub use io::options::{LogFormat, LogLevel, TspOptions};
pub use io::output::{NO_TOUR_MESSAGE, open_output, write_report};
pub use path::Path;
