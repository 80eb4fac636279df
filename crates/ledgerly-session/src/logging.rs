//! Log subscriber setup for hosts embedding the session layer.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
///
/// Core totals are logged at debug on every recompute, so they stay at info.
pub const DEFAULT_FILTER: &str = "info,ledgerly_session=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ledgerly_core=trace` - Include tax descriptors that fell back to 0%
/// - Default: [`DEFAULT_FILTER`]
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_tracing();
        assert!(!init_tracing());
    }
}
