use std::{env, path::Path};

use geo_center_derive::{CliOptions, CliValue, KvDisplay, New};
use log::LevelFilter;

use crate::{Error, Result};

/// Knobs for center finding and path construction.
#[derive(Clone, Copy, Debug, PartialEq, New, KvDisplay)]
pub struct CenterOptions {
    /// Scan all eight compass directions instead of the four cardinal ones.
    pub subsearch: bool,
    /// Search stops once the step size is no larger than this.
    pub epsilon: f64,
    /// Initial step as a multiple of the mean point-to-center distance.
    pub bounds: f64,
    /// Index of the first point on the path.
    pub start_index: usize,
    /// Degree of the Minkowski norm used for path leg costs.
    pub degree: u32,
    /// Maximum 2-opt passes after nearest-neighbor construction. `0` disables.
    pub refine_passes: usize,
}

impl Default for CenterOptions {
    fn default() -> Self {
        Self {
            subsearch: false,
            epsilon: 1e-3,
            bounds: 10.0,
            start_index: 0,
            degree: 2,
            refine_passes: 0,
        }
    }
}

impl CenterOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::invalid_input(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        if !self.bounds.is_finite() || self.bounds < 0.0 {
            return Err(Error::invalid_input(format!(
                "bounds must be a non-negative finite number, got {}",
                self.bounds
            )));
        }
        if self.degree == 0 {
            return Err(Error::invalid_input("degree must be at least 1"));
        }
        Ok(())
    }
}

/// Command-line options for the `geo-center` binary.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct RunOptions {
    /// Scan all eight compass directions.
    #[cli(long = "subsearch", flag)]
    pub subsearch: bool,
    #[cli(long = "epsilon")]
    pub epsilon: f64,
    #[cli(long = "bounds")]
    pub bounds: f64,
    #[cli(long = "start-index")]
    pub start_index: usize,
    #[cli(long = "degree")]
    pub degree: u32,
    #[cli(long = "refine-passes")]
    pub refine_passes: usize,
    /// Polynomial degree for the best-fit line. `0` guesses from the data.
    #[cli(long = "fit-degree")]
    pub fit_degree: usize,
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
    /// Optional input file path for points. Empty means stdin.
    #[cli(long = "input")]
    pub input: String,
    /// Optional output file path for the report. Empty means stdout.
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

impl Default for RunOptions {
    fn default() -> Self {
        let center = CenterOptions::default();
        Self {
            subsearch: center.subsearch,
            epsilon: center.epsilon,
            bounds: center.bounds,
            start_index: center.start_index,
            degree: center.degree,
            refine_passes: center.refine_passes,
            fit_degree: 0,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl RunOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
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

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.center_options().validate()?;
        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  geo-center [options] [--input points.txt]\n",
            "  geo-center [options] < points.txt\n\n",
            "Points are whitespace-separated 'x,y' tokens.\n\n",
            "Options:\n",
            "  --subsearch[=<bool>]\n",
            "  --no-subsearch\n",
            "  --epsilon <f64>\n",
            "  --bounds <f64>\n",
            "  --start-index <usize>\n",
            "  --degree <u32>\n",
            "  --refine-passes <usize>\n",
            "  --fit-degree <usize>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  geo-center --subsearch < points.txt\n",
            "  geo-center --input points.txt --output report.txt\n",
            "  geo-center --degree=1 --start-index=3 --refine-passes=10 < points.txt\n",
            "  geo-center --log-level=debug --log-format=pretty --no-log-timestamp < points.txt\n",
        )
    }

    pub fn center_options(&self) -> CenterOptions {
        CenterOptions {
            subsearch: self.subsearch,
            epsilon: self.epsilon,
            bounds: self.bounds,
            start_index: self.start_index,
            degree: self.degree,
            refine_passes: self.refine_passes,
        }
    }

    pub fn fit_degree(&self) -> Option<usize> {
        (self.fit_degree > 0).then_some(self.fit_degree)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }
}

/// Empty and `-` mean the standard stream.
fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}
