//! Process-wide logger setup for the `geo-center` binary.
//!
//! Records are single lines: an optional millisecond timestamp, the padded
//! level, and in pretty mode the emitting module relative to this crate.

use std::{fs::File, io, io::Write};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::Record;

use crate::{
    Error, Result,
    options::{LogFormat, RunOptions},
};

const CRATE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

#[derive(Clone, Copy, Debug)]
struct LineStyle {
    format: LogFormat,
    timestamp: bool,
}

impl LineStyle {
    fn from_options(options: &RunOptions) -> Self {
        Self {
            format: options.log_format,
            timestamp: options.log_timestamp,
        }
    }

    fn write(self, buf: &mut Formatter, record: &Record) -> io::Result<()> {
        if self.timestamp {
            write!(buf, "{} ", buf.timestamp_millis())?;
        }
        write!(buf, "{:<5} ", record.level())?;
        if self.format == LogFormat::Pretty {
            write!(buf, "[{}] ", short_target(record.target()))?;
        }
        writeln!(buf, "{}", record.args())
    }
}

/// Installs the global logger. Fails if one is already installed.
pub fn init_logger(options: &RunOptions) -> Result<()> {
    let style = LineStyle::from_options(options);
    Builder::new()
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .target(log_target(options)?)
        .format(move |buf, record| style.write(buf, record))
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn log_target(options: &RunOptions) -> Result<Target> {
    let Some(path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };
    let file = File::create(path).map_err(|e| {
        Error::other(format!(
            "failed to create log output file {}: {e}",
            path.display()
        ))
    })?;
    Ok(Target::Pipe(Box::new(file)))
}

/// `geo_center_core::algo::center` becomes `algo::center`; foreign targets
/// are kept whole.
fn short_target(target: &str) -> &str {
    target.strip_prefix(CRATE_PREFIX).unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use env_logger::Target;

    use super::{log_target, short_target};
    use crate::{Error, options::RunOptions};

    #[test]
    fn short_target_drops_own_crate_prefix() {
        assert_eq!(short_target("geo_center_core::algo::center"), "algo::center");
        assert_eq!(short_target("geo_center"), "geo_center");
        assert_eq!(short_target("rayon_core::registry"), "rayon_core::registry");
    }

    #[test]
    fn log_target_defaults_to_stderr() {
        let options = RunOptions::default();
        assert!(matches!(log_target(&options), Ok(Target::Stderr)));

        let dash = RunOptions {
            log_output: "-".to_string(),
            ..RunOptions::default()
        };
        assert!(matches!(log_target(&dash), Ok(Target::Stderr)));
    }

    #[test]
    fn log_target_writes_to_requested_file() {
        let path = std::env::temp_dir().join(format!("geo-center-log-{}.log", std::process::id()));
        let options = RunOptions {
            log_output: path.display().to_string(),
            ..RunOptions::default()
        };
        assert!(matches!(log_target(&options), Ok(Target::Pipe(_))));
        assert!(path.exists());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn log_target_reports_unwritable_path() {
        let options = RunOptions {
            log_output: "/nonexistent-geo-center-dir/run.log".to_string(),
            ..RunOptions::default()
        };
        let Err(err) = log_target(&options) else {
            panic!("missing directory should fail");
        };
        assert!(matches!(err, Error::Other(_)));
        assert!(err.to_string().contains("failed to create log output file"));
    }
}
