//! Tracing subscriber setup for the binary.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Installs a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(default_directive: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // Whichever call installs first, the other one must be refused.
        let first = init(DEFAULT_DIRECTIVE);
        let second = init("debug");
        assert!(first.is_err() || second.is_err());
    }
}
