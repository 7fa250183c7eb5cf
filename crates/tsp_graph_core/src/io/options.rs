use std::{
    env,
    path::Path,
    str::FromStr,
};

use log::LevelFilter;

use crate::{Error, Result};

/// Runtime options for dataset selection, solving, and logging.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Edge-list CSV (toy) or directory holding `nodes.csv` and `edges.csv` (real).
    pub dataset: String,
    /// How `dataset` is interpreted.
    pub kind: DatasetKind,
    /// Which tour algorithm(s) to run.
    pub algorithm: Algorithm,
    /// Number of points generated for `--kind random`.
    pub random_points: usize,
    /// Seed for `--kind random`.
    pub seed: u64,
    /// The exact solver is refused above this vertex count.
    pub max_exact_vertices: usize,
    /// Upper bound on 2-opt passes. Zero runs until convergence.
    pub two_opt_max_passes: usize,
    /// Tours with more vertices than this are summarised, not printed.
    pub print_path_limit: usize,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DatasetKind {
    Toy,
    Real,
    Random,
}

impl DatasetKind {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "toy" | "edges" => Ok(Self::Toy),
            "real" | "real-world" => Ok(Self::Real),
            "random" => Ok(Self::Random),
            _ => Err(invalid_choice("kind", raw, "toy|real|random")),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Algorithm {
    Exact,
    Approximate,
    Refined,
    All,
}

impl Algorithm {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "exact" | "backtracking" => Ok(Self::Exact),
            "approximate" | "triangular" => Ok(Self::Approximate),
            "refined" | "2opt" | "two-opt" => Ok(Self::Refined),
            "all" => Ok(Self::All),
            _ => Err(invalid_choice(
                "algorithm",
                raw,
                "exact|approximate|refined|all",
            )),
        }
    }

    pub fn runs_exact(self) -> bool {
        matches!(self, Self::Exact | Self::All)
    }

    pub fn runs_approximate(self) -> bool {
        matches!(self, Self::Approximate | Self::All)
    }

    pub fn runs_refined(self) -> bool {
        matches!(self, Self::Refined | Self::All)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(invalid_choice(
                "log-level",
                raw,
                "error|warn|info|debug|trace|off",
            )),
        }
    }

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

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(invalid_choice("log-format", raw, "compact|pretty")),
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            dataset: String::new(),
            kind: DatasetKind::Toy,
            algorithm: Algorithm::Refined,
            random_points: 100,
            seed: 12_345,
            max_exact_vertices: 16,
            two_opt_max_passes: 0,
            print_path_limit: 100,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: String::new(),
        }
    }
}

impl SolverOptions {
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
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);

            match name.as_str() {
                "dataset" => options.dataset = required(&name, value)?,
                "kind" => options.kind = DatasetKind::parse(&required(&name, value)?)?,
                "algorithm" => options.algorithm = Algorithm::parse(&required(&name, value)?)?,
                "random-points" => options.random_points = parse_value(&name, value)?,
                "seed" => options.seed = parse_value(&name, value)?,
                "max-exact-vertices" => options.max_exact_vertices = parse_value(&name, value)?,
                "two-opt-max-passes" => options.two_opt_max_passes = parse_value(&name, value)?,
                "print-path-limit" => options.print_path_limit = parse_value(&name, value)?,
                "log-level" => options.log_level = LogLevel::parse(&required(&name, value)?)?,
                "log-format" => options.log_format = LogFormat::parse(&required(&name, value)?)?,
                "log-output" => options.log_output = required(&name, value)?,
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    if value.is_some() {
                        return Err(Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    options.log_timestamp = false;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        if self.kind != DatasetKind::Random && self.dataset_path().is_none() {
            return Err(Error::invalid_input(format!(
                "--dataset is required unless --kind random\n\n{}",
                Self::usage()
            )));
        }
        if self.kind == DatasetKind::Random && self.random_points == 0 {
            return Err(Error::invalid_input("--random-points must be > 0"));
        }
        Ok(())
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tsp-graph --dataset <path> [options]\n",
            "  tsp-graph --kind random --random-points <n> [options]\n\n",
            "Options:\n",
            "  --dataset <path>            edge CSV (toy) or directory with nodes.csv/edges.csv (real)\n",
            "  --kind <toy|real|random>\n",
            "  --algorithm <exact|approximate|refined|all>\n",
            "  --random-points <usize>\n",
            "  --seed <u64>\n",
            "  --max-exact-vertices <usize>\n",
            "  --two-opt-max-passes <usize>  0 runs until convergence\n",
            "  --print-path-limit <usize>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  tsp-graph --dataset datasets/toy-graphs/shipping.csv --algorithm exact\n",
            "  tsp-graph --kind real --dataset datasets/real-world-graphs/graph1 --log-level=info\n",
            "  tsp-graph --kind random --random-points 500 --seed 7 --algorithm all\n",
        )
    }

    pub fn dataset_path(&self) -> Option<&Path> {
        let dataset = self.dataset.trim();
        if dataset.is_empty() {
            None
        } else {
            Some(Path::new(dataset))
        }
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        let log_output = self.log_output.trim();
        if log_output.is_empty() || log_output == "-" {
            None
        } else {
            Some(Path::new(log_output))
        }
    }

    pub fn max_two_opt_passes(&self) -> Option<usize> {
        (self.two_opt_max_passes > 0).then_some(self.two_opt_max_passes)
    }
}

fn split_arg(
    raw_name: &str,
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") => args.next(),
        _ => None,
    };

    (raw_name.to_string(), value)
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}

fn parse_value<T>(name: &str, value: Option<String>) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = required(name, value)?;
    raw.parse::<T>()
        .map_err(|e| Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})")))
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

fn invalid_choice(name: &str, raw: &str, expected: &str) -> Error {
    Error::invalid_input(format!(
        "Invalid value for --{name}: {raw} (expected {expected})"
    ))
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::{Algorithm, DatasetKind, LogFormat, LogLevel, SolverOptions, parse_bool};

    #[test]
    fn parse_bool_accepts_common_values() {
        assert!(parse_bool("x", "true").expect("parse"));
        assert!(parse_bool("x", "ON").expect("parse"));
        assert!(!parse_bool("x", "0").expect("parse"));
        assert!(!parse_bool("x", "no").expect("parse"));
    }

    #[test]
    fn parse_bool_rejects_unknown_values() {
        let err = parse_bool("log-timestamp", "maybe").expect_err("invalid bool should fail");
        assert!(
            err.to_string()
                .contains("Invalid boolean for --log-timestamp: maybe")
        );
    }

    #[test]
    fn log_level_maps_to_expected_filter() {
        assert_eq!(LogLevel::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warn.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Off.to_filter(), LevelFilter::Off);
    }

    #[test]
    fn parse_from_iter_applies_known_cli_options() {
        let options = SolverOptions::parse_from_iter([
            "--dataset=graphs/shipping.csv",
            "--kind=toy",
            "--algorithm=all",
            "--max-exact-vertices=12",
            "--two-opt-max-passes=3",
            "--print-path-limit=20",
            "--log-level=debug",
            "--log-format=pretty",
            "--log-timestamp=true",
            "--log-output=run.log",
        ])
        .expect("parse options");

        assert_eq!(options.dataset, "graphs/shipping.csv");
        assert_eq!(options.kind, DatasetKind::Toy);
        assert_eq!(options.algorithm, Algorithm::All);
        assert_eq!(options.max_exact_vertices, 12);
        assert_eq!(options.max_two_opt_passes(), Some(3));
        assert_eq!(options.print_path_limit, 20);
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(options.log_timestamp);
        assert_eq!(options.log_output, "run.log");
    }

    #[test]
    fn parse_from_iter_accepts_space_separated_values() {
        let options = SolverOptions::parse_from_iter([
            "--kind",
            "random",
            "--random-points",
            "40",
            "--seed",
            "9",
        ])
        .expect("parse options");
        assert_eq!(options.kind, DatasetKind::Random);
        assert_eq!(options.random_points, 40);
        assert_eq!(options.seed, 9);
        assert!(options.dataset_path().is_none());
    }

    #[test]
    fn parse_from_iter_requires_dataset_for_files() {
        let err = SolverOptions::parse_from_iter(["--kind=real"])
            .expect_err("dataset missing");
        assert!(err.to_string().contains("--dataset is required"));
    }

    #[test]
    fn parse_from_iter_rejects_zero_random_points() {
        let err = SolverOptions::parse_from_iter(["--kind=random", "--random-points=0"])
            .expect_err("zero points");
        assert!(err.to_string().contains("--random-points must be > 0"));
    }

    #[test]
    fn parse_from_iter_rejects_unknown_choices() {
        let err = SolverOptions::parse_from_iter(["--dataset=a.csv", "--algorithm=greedy"])
            .expect_err("unknown algorithm");
        assert!(err.to_string().contains("Invalid value for --algorithm: greedy"));
    }

    #[test]
    fn parse_from_iter_rejects_unknown_option() {
        let err = SolverOptions::parse_from_iter(["--unknown-opt=1"])
            .expect_err("expected unknown option error");
        assert!(err.to_string().contains("Unknown option: --unknown-opt"));
    }

    #[test]
    fn parse_from_iter_rejects_unexpected_positional_argument() {
        let err = SolverOptions::parse_from_iter(["graph.csv"]).expect_err("positional");
        assert!(err.to_string().contains("Unexpected argument: graph.csv"));
    }

    #[test]
    fn parse_from_iter_rejects_no_log_timestamp_with_value() {
        let err = SolverOptions::parse_from_iter(["--no-log-timestamp=true"])
            .expect_err("expected flag value rejection");
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn parse_from_iter_reports_missing_value() {
        let err = SolverOptions::parse_from_iter(["--seed"]).expect_err("missing value");
        assert!(err.to_string().contains("Missing value for --seed"));
    }

    #[test]
    fn parse_from_iter_help_returns_usage_error() {
        let err =
            SolverOptions::parse_from_iter(["--help"]).expect_err("help should short-circuit");
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn algorithm_selection_flags() {
        assert!(Algorithm::All.runs_exact());
        assert!(Algorithm::All.runs_refined());
        assert!(!Algorithm::Refined.runs_approximate());
        assert!(Algorithm::parse("2opt").expect("alias").runs_refined());
    }

    #[test]
    fn zero_two_opt_passes_means_unbounded() {
        assert_eq!(SolverOptions::default().max_two_opt_passes(), None);
    }

    #[test]
    fn log_output_path_treats_empty_and_dash_as_stderr() {
        let options = SolverOptions::default();
        assert!(options.log_output_path().is_none());

        let options = SolverOptions {
            log_output: "-".to_string(),
            ..SolverOptions::default()
        };
        assert!(options.log_output_path().is_none());
    }
}
