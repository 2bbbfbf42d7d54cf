//! Span timing for the search, enabled with `--features instrumentation`.
//!
//! Every `#[instrument]`ed function is timed on entry and exit. Totals are
//! kept per thread so rayon workers do not contend, and are merged when the
//! report is printed.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;
use thread_local::ThreadLocal;
use tracing::span;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Clone, Copy, Default)]
struct SpanTiming {
    calls: u64,
    nanos: u64,
}

static SPAN_TIMINGS: Lazy<ThreadLocal<Mutex<HashMap<&'static str, SpanTiming>>>> =
    Lazy::new(ThreadLocal::new);

struct SpanTimingLayer;

impl<S> Layer<S> for SpanTimingLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_enter(&self, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(Instant::now());
        }
    }

    fn on_exit(&self, id: &span::Id, ctx: Context<'_, S>) {
        let span = match ctx.span(id) {
            Some(span) => span,
            None => return,
        };
        let started = match span.extensions_mut().remove::<Instant>() {
            Some(started) => started,
            None => return,
        };

        // Only this thread ever locks its own map while timing.
        let timings = SPAN_TIMINGS.get_or(|| Mutex::new(HashMap::new()));
        if let Ok(mut timings) = timings.lock() {
            let timing = timings.entry(span.name()).or_default();
            timing.calls += 1;
            timing.nanos += started.elapsed().as_nanos() as u64;
        }
    }
}

/// Installs the timing layer. With `RUST_LOG` unset or `off` spans are only
/// timed; otherwise span events are printed as well.
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_default();
    let registry = tracing_subscriber::registry().with(SpanTimingLayer);

    let result = if filter.is_empty() || filter == "off" {
        tracing::subscriber::set_global_default(registry.with(EnvFilter::new("trace")))
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact();
        tracing::subscriber::set_global_default(
            registry.with(EnvFilter::from_default_env()).with(fmt_layer),
        )
    };

    if let Err(err) = result {
        eprintln!("Failed to install tracing subscriber: {}", err);
    }
}

/// Prints per-span call counts and timings, slowest total first.
pub fn print_timing_statistics() {
    let mut merged: HashMap<&'static str, SpanTiming> = HashMap::new();
    for timings in SPAN_TIMINGS.iter() {
        let timings = match timings.lock() {
            Ok(timings) => timings,
            Err(_) => continue,
        };
        for (name, timing) in timings.iter() {
            let total = merged.entry(*name).or_default();
            total.calls += timing.calls;
            total.nanos += timing.nanos;
        }
    }

    if merged.is_empty() {
        eprintln!("\nNo timing data collected.");
        return;
    }

    let mut rows: Vec<_> = merged.into_iter().collect();
    rows.sort_by_key(|(_, timing)| std::cmp::Reverse(timing.nanos));

    eprintln!("\n{:<32} {:>12} {:>12} {:>12}", "Span", "Calls", "Total (ms)", "Avg (µs)");
    eprintln!("{:-<72}", "");
    for (name, timing) in rows {
        let total_ms = timing.nanos as f64 / 1_000_000.0;
        let avg_us = timing.nanos as f64 / timing.calls.max(1) as f64 / 1_000.0;
        eprintln!(
            "{:<32} {:>12} {:>12.2} {:>12.2}",
            name, timing.calls, total_ms, avg_us
        );
    }
}
