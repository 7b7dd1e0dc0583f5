/// Vertex every tour starts and ends at.
pub const START_VERTEX: usize = 0;

/// Default upper bound on the number of vertices a graph may be created with.
pub const DEFAULT_MAX_VERTICES: usize = 26;

/// Matrix entry meaning "no edge". Zero-cost edges cannot be represented.
pub const NO_EDGE: u32 = 0;
