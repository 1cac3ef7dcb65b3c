//! Restart command: stop, pause, start.

use std::{path::Path, time::Duration};

use color_eyre::eyre::Result;
use tracing::warn;

use super::{start, stop};

/// Pause between stopping the old process and binding again.
const RESTART_DELAY: Duration = Duration::from_secs(1);

pub async fn run(root: &Path, config_path: &Path) -> Result<()> {
    // Nothing running is fine; start fresh.
    if let Err(e) = stop::run(root, config_path) {
        warn!(error = %e, "stop failed, starting anyway");
    }

    tokio::time::sleep(RESTART_DELAY).await;
    start::run(root, config_path).await
}
