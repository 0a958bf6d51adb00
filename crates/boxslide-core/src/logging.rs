#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported here
//! so downstream crates and internal code share one import path. The
//! `tracing-json` feature adds [`init_json_logging`] for hosts that want
//! structured JSON lines on stderr.
//!
//! Targets used across the workspace:
//!
//! | Target | Emitted by |
//! |--------|------------|
//! | `boxslide.options` | option sanitisation |
//! | `boxslide.slide` | slide start, supersession, completion |
//! | `boxslide.tick` | per-frame progress |
//! | `boxslide.web` | browser host |

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, trace_span, warn};

/// Install a global JSON subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` when the variable is unset or invalid.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(default_filter: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
