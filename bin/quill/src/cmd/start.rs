//! Start command: boot the site and serve it until signalled.

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use quill_core::{Config, DirSource};
use quill_render::Site;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::{pidfile::PidFile, server::create_router};

/// Boot the site under `root` and serve it.
///
/// Any boot failure aborts before the listener is bound.
pub async fn run(root: &Path, config_path: &Path) -> Result<()> {
    let config_path = root.join(config_path);
    let config = Config::load_with_env(&config_path)
        .wrap_err_with(|| format!("Failed to load {}", config_path.display()))?;

    let address = config.server.address.clone();
    let pid_file = PidFile::new(root.join(&config.server.pid_file));

    info!(title = %config.site.title, root = %root.display(), "booting site");
    let site = Site::boot(config, &DirSource::new(root)).wrap_err("Failed to boot site")?;
    info!(
        pages = site.catalog().pages().len(),
        posts = site.catalog().posts().len(),
        tags = site.catalog().tags().len(),
        "site booted"
    );

    let app = create_router(Arc::new(site), root);
    let listener = TcpListener::bind(&address)
        .await
        .wrap_err_with(|| format!("Failed to bind to {address}"))?;

    let pid = std::process::id();
    pid_file.write(pid)?;
    info!(pid, %address, "listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // A restart may already have recorded its successor here.
    if !pid_file.remove_if_owned(pid)? {
        debug!(path = %pid_file.path().display(), "PID file no longer ours, left in place");
    }
    served.wrap_err("Server error")?;

    info!("stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
