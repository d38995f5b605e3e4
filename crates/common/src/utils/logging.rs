use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
/// Request spans from `tower_http` follow the same level as the app.
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "debug,tower_http=debug,axum=debug"
    } else {
        "info,tower_http=info,axum=info"
    }
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info` (or debug when `debug` is set)
/// - Writes to stdout to improve visibility in environments that hide stderr
/// - A second call is a no-op: `try_init` keeps the first subscriber
pub fn init_logging_default(debug: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set
/// - Emits one JSON object per event for log shippers
/// - Writes to stdout for consistent container logging behavior
pub fn init_logging_json(debug: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));
    // Override with e.g. RUST_LOG=info,service=debug to see store writes
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_raises_default_level() {
        assert!(default_directives(true).starts_with("debug"));
        assert!(default_directives(false).starts_with("info"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging_default(false);
        init_logging_json(false);
    }
}
