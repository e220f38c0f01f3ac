use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Crate target prefix, for per-crate level directives.
pub const TARGET_PREFIX: &str = "ai_llm_service";

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Compact single-line formatting layer for the whole process.
///
/// - RFC3339 UTC timestamps
/// - target (module path), `file:line`
/// - span close events, so `#[instrument]`ed calls report their duration
/// - ANSI colors only when stdout is a terminal
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    // `event_format` replaces the whole formatter, so every option goes on it.
    let format = fmt::format()
        .compact()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_source_location(true);

    fmt::layer()
        .event_format(format)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
}

/// Level directive for **this** library only, e.g. `ai_llm_service=debug`.
pub fn level_directive(level: Level) -> Option<Directive> {
    let s = format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase());
    Directive::from_str(&s).ok()
}

/// `RUST_LOG` if set and valid, used as is. Otherwise `default` plus `level`
/// for this library.
///
/// Example: `default = "info"`, `level = Level::DEBUG` shows INFO globally
/// and DEBUG for provider calls when `RUST_LOG` is unset.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref(), default, level)
}

fn filter_from(rust_log: Option<&str>, default: &str, level: Level) -> EnvFilter {
    let operator = rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok());
    if let Some(filter) = operator {
        return filter;
    }

    let base = EnvFilter::new(default);
    match level_directive(level) {
        Some(directive) => base.add_directive(directive),
        None => base,
    }
}
