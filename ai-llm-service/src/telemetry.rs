use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, filter, fmt};

/// Log target of this crate.
pub const TARGET_PREFIX: &str = "ai_llm_service";

/// Targets of the Q&A pipeline crates rendered by [`layer`].
pub const PIPELINE_TARGETS: &[&str] = &[TARGET_PREFIX, "doc_loader", "rag_store", "contextor", "api"];

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

/// True for events emitted by one of the [`PIPELINE_TARGETS`] crates.
pub fn is_pipeline_target(target: &str) -> bool {
    PIPELINE_TARGETS.iter().any(|p| {
        target == *p || target.strip_prefix(p).is_some_and(|rest| rest.starts_with("::"))
    })
}

/// Build a formatting layer that renders ONLY events emitted by the pipeline crates.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line` and target
/// - Span close events (duration at the end of spans)
/// - ANSI colors only when stdout is a terminal
///
/// Uses a per-layer filter so logs from HTTP/DB dependencies are left to
/// the binary's own fmt layer.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    let only_pipeline = filter::filter_fn(|meta| is_pipeline_target(meta.target()));

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_crate_roots_and_modules_only() {
        assert!(is_pipeline_target("contextor"));
        assert!(is_pipeline_target("rag_store::backend::qdrant"));
        assert!(!is_pipeline_target("apis"));
        assert!(!is_pipeline_target("hyper::proto"));
    }
}
