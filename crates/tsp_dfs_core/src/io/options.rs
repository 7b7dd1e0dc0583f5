use std::{env, path::Path};

use log::LevelFilter;
use tsp_dfs_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, Result, constants::DEFAULT_MAX_VERTICES};

const BOOL_FLAGS: [&str; 3] = ["undirected", "verbose", "log-timestamp"];

/// Runtime options for one solver run.
#[derive(Clone, Debug, PartialEq, CliOptions, KvDisplay)]
pub struct TspOptions {
    /// Mirror every edge so `(i, j)` and `(j, i)` share a weight.
    pub undirected: bool,
    /// Print every completed circuit, not only the shortest one.
    pub verbose: bool,
    /// Largest vertex count a graph may declare.
    #[cli(long = "max-vertices")]
    pub max_vertices: usize,
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
    /// Optional input file path for the graph. Empty means stdin.
    #[cli(long = "input")]
    pub input: String,
    /// Optional output file path for the computed tour. Empty means stdout.
    #[cli(long = "output")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for TspOptions {
    fn default() -> Self {
        Self {
            undirected: false,
            verbose: false,
            max_vertices: DEFAULT_MAX_VERTICES,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl TspOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::Usage(Self::usage()));
            }

            let (name, value) = if let Some(raw_name) = arg.strip_prefix("--") {
                if raw_name.is_empty() {
                    return Err(Error::invalid_input(format!(
                        "Invalid option name: {arg}\n\n{}",
                        Self::usage()
                    )));
                }
                split_arg(raw_name, &mut args)
            } else if let Some(long) = short_alias(&arg) {
                let value = if BOOL_FLAGS.contains(&long) {
                    None
                } else {
                    args.next()
                };
                (long.to_string(), value)
            } else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if options.apply_cli_option(&name, value.clone())? {
                continue;
            }

            let flag = name.strip_prefix("no-").unwrap_or(&name);
            let Some(slot) = options.flag_mut(flag) else {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            };

            *slot = if flag != name {
                if value.is_some() {
                    return Err(Error::invalid_input(format!(
                        "Flag --{name} does not take a value"
                    )));
                }
                false
            } else {
                match value {
                    Some(v) => parse_bool(&name, &v)?,
                    None => true,
                }
            };
        }

        Ok(options)
    }

    fn flag_mut(&mut self, name: &str) -> Option<&mut bool> {
        match name {
            "undirected" => Some(&mut self.undirected),
            "verbose" => Some(&mut self.verbose),
            "log-timestamp" => Some(&mut self.log_timestamp),
            _ => None,
        }
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tsp-dfs [options] [--input graph.txt]\n",
            "  tsp-dfs [options] < graph.txt\n\n",
            "Finds the shortest Hamiltonian circuit starting at the first city\n",
            "by exhaustive depth-first search.\n\n",
            "Options:\n",
            "  -u, --undirected[=<bool>]   Use an undirected graph\n",
            "  -v, --verbose[=<bool>]      Print every circuit found\n",
            "  -i, --input <path>          Graph input (default: stdin)\n",
            "  -o, --output <path>         Computed path output (default: stdout)\n",
            "  --max-vertices <usize>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  -h, --help\n",
            "\n",
            "Examples:\n",
            "  tsp-dfs -u -i maps/basic.graph\n",
            "  tsp-dfs --undirected --verbose --output tours.txt < maps/basic.graph\n",
            "  tsp-dfs --log-level=info --log-output run.log -i maps/basic.graph\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        optional_path(&self.log_output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        optional_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        optional_path(&self.output)
    }
}

/// Splits `name=value`, or takes the next argument as the value unless the
/// option is a boolean flag or the next argument is itself an option. A lone
/// `-` is a value (stdin/stdout).
fn split_arg(
    raw_name: &str,
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let flag = raw_name.strip_prefix("no-").unwrap_or(raw_name);
    if BOOL_FLAGS.contains(&flag) {
        return (raw_name.to_string(), None);
    }

    let value = match args.peek() {
        Some(next) if next == "-" || !next.starts_with('-') => args.next(),
        _ => None,
    };
    (raw_name.to_string(), value)
}

fn short_alias(arg: &str) -> Option<&'static str> {
    match arg {
        "-u" => Some("undirected"),
        "-v" => Some("verbose"),
        "-i" => Some("input"),
        "-o" => Some("output"),
        _ => None,
    }
}

fn optional_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}
