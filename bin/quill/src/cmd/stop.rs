//! Stop command: signal the process recorded in the PID file.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use quill_core::Config;
use tracing::info;

use crate::pidfile::{self, PidFile};

/// Stop the server started from `root`.
pub fn run(root: &Path, config_path: &Path) -> Result<()> {
    let config_path = root.join(config_path);
    let config = Config::load_with_env(&config_path)
        .wrap_err_with(|| format!("Failed to load {}", config_path.display()))?;

    let pid_file = PidFile::new(root.join(&config.server.pid_file));
    let pid = pid_file.read()?;

    info!(pid, "stopping server");
    pidfile::terminate(pid)?;
    pid_file.remove()?;

    info!(pid, "server stopped");
    Ok(())
}
