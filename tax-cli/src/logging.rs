use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Filter used when neither `--log-level`, the config file nor `RUST_LOG`
/// sets one. Results go to stdout, so the default keeps stderr quiet.
pub const DEFAULT_FILTER: &str = "warn";

// --- Formatter ---

/// `2025-04-15T09:30:00.000000-04:00  WARN tax_core::pricing:84 quoted service`
///
/// Events are located by target and line; the target defaults to the
/// module path, e.g. `tax_data::loader`.
struct LocalFmt;

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = *meta.level();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.6f%:z");
        let location = match meta.line() {
            Some(line) => format!("{}:{line}", meta.target()),
            None => meta.target().to_string(),
        };

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "{DIM}{timestamp}{RESET} {}{level:>5}{RESET} {CYAN}{location}{RESET} ",
                level_color(level)
            )?;
        } else {
            write!(writer, "{timestamp} {level:>5} {location} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Public API ---

/// Builds the global filter.
///
/// An explicit `level` wins over `RUST_LOG`. Accepts a bare level
/// ("error", "warn", "info", "debug", "trace") or any full `EnvFilter`
/// directive.
pub fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Opens `path` for appending, creating it if needed. The directory must
/// already exist.
pub fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped.
/// - File: plain text appended to `log_file` when given.
/// - Level: `level`, else `RUST_LOG`, else [`DEFAULT_FILTER`].
pub fn init_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = log_file
        .map(open_log_file)
        .transpose()?
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .event_format(LocalFmt)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(emit: impl FnOnce()) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(LocalFmt)
            .with_writer(captured.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, emit);

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn events_are_located_by_target_and_line() {
        let output = capture(|| tracing::warn!(service = "bookkeeping", "quoted service"));

        assert!(output.contains(" WARN tax_cli::logging::tests:"), "got: {output}");
        assert!(output.contains("quoted service"), "got: {output}");
        assert!(output.ends_with('\n'), "got: {output}");
    }

    #[test]
    fn explicit_target_replaces_module_path() {
        let output = capture(|| tracing::info!(target: "tax_rules_check", "loaded"));

        assert!(output.contains(" INFO tax_rules_check:"), "got: {output}");
        assert!(!output.contains("\x1b["), "got: {output}");
    }

    #[test]
    fn bare_levels_are_accepted() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(make_filter(Some(level)).is_ok(), "{level}");
        }
    }

    #[test]
    fn directives_are_accepted() {
        assert!(make_filter(Some("warn,tax_core=debug")).is_ok());
    }

    #[test]
    fn invalid_level_is_rejected() {
        let err = make_filter(Some("tax_core=loud")).unwrap_err();

        assert!(err.to_string().contains("tax_core=loud"), "got: {err}");
    }

    #[test]
    fn log_file_is_created_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tax-engine.log");
        std::fs::write(&path, "earlier\n").unwrap();

        open_log_file(&path).unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier\n");
    }

    #[test]
    fn log_file_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();

        let result = open_log_file(&dir.path().join("nope").join("tax.log"));

        assert!(result.is_err());
    }
}
