//! Diagnostic logging for the event-sheet binary.
//!
//! Library code only emits `tracing` events. Output goes to stderr so stdout
//! stays clean for JSON results.

use tracing_subscriber::EnvFilter;

/// Level applied to the HTTP stack when `RUST_LOG` is unset.
const DEPENDENCY_LEVEL: &str = "warn";

/// Directives used when `RUST_LOG` is unset: this crate at `level`, its
/// dependencies at warn.
fn default_directives(level: &str) -> String {
    format!("{DEPENDENCY_LEVEL},{}={level}", env!("CARGO_CRATE_NAME"))
}

/// Installs the stderr logger for event-sheet commands.
///
/// `RUST_LOG` replaces the default directives entirely. Repeated calls keep
/// the first logger.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
