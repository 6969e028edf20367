//! Telemetry helpers for applications embedding `barchart-rs`.
//!
//! Tracing setup stays explicit and opt-in. Hosts either call one of the
//! helpers below or install their own `tracing` subscriber; the engine only
//! emits events through `tracing` macros and never installs anything itself.

/// Directive used when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "info";

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_TRACING_DIRECTIVE`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_directive(DEFAULT_TRACING_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback directive,
/// e.g. `"barchart_rs=debug"` to see per-row loader diagnostics.
#[must_use]
pub fn init_tracing_with_directive(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
