use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "info";

pub fn init() {
    init_with(DEFAULT_DIRECTIVES);
}

/// Install the global subscriber using `RUST_LOG` when set, `directives`
/// otherwise. At debug level each stage span reports its timing on close.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_with(directives: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives));

    let filter = env_filter.to_string();
    let span_events = if filter.contains("debug") || filter.contains("trace") {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
