pub(crate) mod dfs;
