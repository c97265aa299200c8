use ctor::ctor;
use std::env::var;
use tracing_subscriber::{
    fmt::format,
    EnvFilter,
};

mod capture;

pub use capture::{
    capture_logs,
    CapturedLogs,
    MockWriter,
};

/// Environment variable that turns test tracing on.
pub const TRACE_ENV: &str = "PC_E2E_TRACE";

/// Directory of the `log-file` mode, defaulting to `<crate>/logs`.
pub const TRACE_PATH_ENV: &str = "PC_E2E_TRACE_PATH";

/// How test tracing is set up, chosen by the value of [`TRACE_ENV`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceMode {
    /// `1`, `true` or `on`: full format to the test writer.
    Full,
    Compact,
    Pretty,
    /// Compact lines to a daily rolling file only.
    LogFile,
    /// The test writer and the rolling file together.
    LogShow,
}

impl TraceMode {
    /// Parses a [`TRACE_ENV`] value, ignoring case. Unknown values disable
    /// tracing.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "1" | "true" | "on" => Some(TraceMode::Full),
            "compact" => Some(TraceMode::Compact),
            "pretty" => Some(TraceMode::Pretty),
            "log-file" => Some(TraceMode::LogFile),
            "log-show" => Some(TraceMode::LogShow),
            _ => None,
        }
    }

    pub fn from_env() -> Option<Self> {
        var(TRACE_ENV).ok().as_deref().and_then(Self::parse)
    }

    /// Installs the global subscriber. A subscriber installed earlier wins.
    pub fn init(self) {
        let builder = tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env());
        match self {
            TraceMode::Full => {
                let _ = builder.with_test_writer().try_init();
            }
            TraceMode::Compact => {
                let _ = builder
                    .with_test_writer()
                    .event_format(format().compact())
                    .try_init();
            }
            TraceMode::Pretty => {
                let _ = builder
                    .with_test_writer()
                    .event_format(format().pretty())
                    .try_init();
            }
            TraceMode::LogFile => {
                let _ = builder
                    .event_format(format().compact())
                    // no ansi colors in files
                    .with_ansi(false)
                    .with_writer(rolling_log_file())
                    .try_init();
            }
            TraceMode::LogShow => {
                use tracing_subscriber::prelude::*;
                let file = tracing_subscriber::fmt::Layer::new()
                    .compact()
                    .with_ansi(false)
                    .with_writer(rolling_log_file());
                let _ = tracing_subscriber::registry()
                    .with(EnvFilter::from_default_env())
                    .with(tracing_subscriber::fmt::Layer::new().with_test_writer())
                    .with(file)
                    .try_init();
            }
        }
    }
}

/// Directory of the file modes: [`TRACE_PATH_ENV`] or `<crate>/logs`.
pub fn log_dir() -> String {
    var(TRACE_PATH_ENV)
        .unwrap_or_else(|_| concat!(env!("CARGO_MANIFEST_DIR"), "/logs").to_string())
}

fn rolling_log_file() -> tracing_appender::rolling::RollingFileAppender {
    tracing_appender::rolling::daily(log_dir(), "logfile")
}

#[ctor]
pub static TRACE: () = {
    if let Some(mode) = TraceMode::from_env() {
        mode.init();
    }
};

/// Pulls the tracing initialiser into a test binary that does not otherwise
/// reference this crate.
#[macro_export]
macro_rules! enable_tracing {
    () => {
        static _TRACE: &$crate::TRACE<()> = &$crate::TRACE;
    };
}
