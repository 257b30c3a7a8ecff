/*!
 * Structured Tracing
 * Subscriber setup and per-syscall spans using the tracing crate
 *
 * The MLFQ core (tick accounting, boosts, dispatch) never logs. Events come
 * from the kernel facade on lifecycle transitions and from syscall spans.
 */

use crate::core::types::Pid;
use std::time::Instant;
use tracing::{debug, info, span, warn, Level, Span};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Environment variable switching the subscriber to JSON output
pub const TRACE_JSON_ENV: &str = "KERNEL_TRACE_JSON";

/// Syscalls slower than this are reported at warn level
const SLOW_SYSCALL_MICROS: u128 = 10_000;

/// Initialize the global subscriber
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - KERNEL_TRACE_JSON: Enable JSON output (default: false)
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = use_json, "structured tracing initialized");
    }
}

/// Generate a unique trace ID for syscall correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one syscall, closed when dropped
pub struct SyscallSpan {
    span: Span,
    start: Instant,
    syscall: &'static str,
    trace_id: String,
}

impl SyscallSpan {
    pub fn new(syscall: &'static str, pid: Pid) -> Self {
        let trace_id = generate_trace_id();
        let span = span!(
            Level::DEBUG,
            "syscall",
            trace_id = %trace_id,
            syscall = syscall,
            pid = pid,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
            return_value = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            syscall,
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn record_success(&self) {
        self.span.record("result", "success");
    }

    pub fn record_error(&self, error: &dyn std::fmt::Display) {
        self.span.record("error", tracing::field::display(error));
        self.span.record("result", "error");
    }

    pub fn record_return(&self, value: i64) {
        self.span.record("return_value", value);
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for SyscallSpan {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_micros();
        let _entered = self.span.enter();

        if elapsed > SLOW_SYSCALL_MICROS {
            warn!(
                trace_id = %self.trace_id,
                syscall = self.syscall,
                duration_us = elapsed as u64,
                "slow syscall detected"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                syscall = self.syscall,
                duration_us = elapsed as u64,
                "syscall completed"
            );
        }
    }
}

/// Convenience constructor mirroring `tracing::span!`
#[inline]
pub fn span_syscall(syscall: &'static str, pid: Pid) -> SyscallSpan {
    SyscallSpan::new(syscall, pid)
}
