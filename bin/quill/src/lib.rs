//! quill server library
//!
//! Process control and the HTTP surface for the quill blog server. The
//! binary entry point lives in `main.rs`.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (start, stop, restart)
//! - [`server`] - Router and streaming handlers
//! - [`pidfile`] - PID file bookkeeping

pub mod cmd;
pub mod pidfile;
pub mod server;

#[cfg(test)]
mod test_support;

/// Initialize tracing with the specified verbosity level.
///
/// * `verbose` - Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE)
///
/// `RUST_LOG` directives are honoured on top of the level.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
