//! Stderr logging for analysis runs.
//!
//! Library code only talks to the `log` facade. Per-rule decisions are
//! logged under [`RULES_TARGET`] and get their own level, so a run can be
//! explained rule by rule without turning on debug output everywhere else.

use std::io::Write;
use std::sync::OnceLock;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Log target for per-rule decisions (evaluated, skipped, disabled).
pub const RULES_TARGET: &str = "ergo_desk::rules";

/// Verbosity for general records and for rule decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogLevels {
    pub general: LevelFilter,
    pub rules: LevelFilter,
}

impl LogLevels {
    /// Same level for everything.
    pub fn uniform(level: LevelFilter) -> Self {
        Self {
            general: level,
            rules: level,
        }
    }

    /// General records at `general`, rule decisions down to `Debug`.
    pub fn explain(general: LevelFilter) -> Self {
        Self {
            general,
            rules: LevelFilter::Debug,
        }
    }

    fn for_target(&self, target: &str) -> LevelFilter {
        if target == RULES_TARGET {
            self.rules
        } else {
            self.general
        }
    }

    fn max(&self) -> LevelFilter {
        self.general.max(self.rules)
    }
}

impl Default for LogLevels {
    fn default() -> Self {
        Self::uniform(LevelFilter::Warn)
    }
}

struct DeskLogger {
    levels: LogLevels,
}

impl DeskLogger {
    fn line(record: &Record) -> String {
        if record.target() == RULES_TARGET {
            format!("  rule | {}", record.args())
        } else {
            let tag = match record.level() {
                Level::Error => "error",
                Level::Warn => "warning",
                Level::Info => "info",
                Level::Debug | Level::Trace => "debug",
            };
            format!("{tag}: {}", record.args())
        }
    }
}

impl Log for DeskLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.levels.for_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(std::io::stderr().lock(), "{}", Self::line(record));
        }
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<DeskLogger> = OnceLock::new();

/// Install the stderr logger. Only the first call takes effect.
pub fn init_logging(levels: LogLevels) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| DeskLogger { levels });
    log::set_logger(logger)?;
    log::set_max_level(levels.max());
    Ok(())
}

/// Install a `tracing` subscriber; `RUST_LOG` overrides `levels`.
///
/// `log` records, including rule decisions, are bridged into the
/// subscriber. JSON output also reports span timings for each run.
#[cfg(feature = "tracing")]
pub fn init_tracing(levels: LogLevels, json: bool) {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let directives = format!("{},{}={}", levels.general, RULES_TARGET, levels.rules)
        .to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let _ = if json {
        builder
            .json()
            .flatten_event(true)
            .with_span_events(FmtSpan::CLOSE)
            .finish()
            .try_init()
    } else {
        builder.without_time().compact().finish().try_init()
    };
}
