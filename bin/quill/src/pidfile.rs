//! PID file handling for `start`/`stop`.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use color_eyre::eyre::{Result, WrapErr, eyre};

/// Location of the running server's process id.
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `pid`, creating parent directories as needed.
    pub fn write(&self, pid: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, pid.to_string())
            .wrap_err_with(|| format!("Failed to write PID file {}", self.path.display()))
    }

    pub fn read(&self) -> Result<u32> {
        let text = fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("Failed to read PID file {}", self.path.display()))?;
        text.trim()
            .parse()
            .wrap_err_with(|| format!("Malformed PID file {}", self.path.display()))
    }

    /// Remove the file. A file that is already gone is not an error.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e)
                .wrap_err_with(|| format!("Failed to remove PID file {}", self.path.display())),
            _ => Ok(()),
        }
    }

    /// Remove the file only while it still records `pid`.
    ///
    /// Returns whether the file was removed. A missing or unreadable file,
    /// or one naming another process, is left alone.
    pub fn remove_if_owned(&self, pid: u32) -> Result<bool> {
        match self.read() {
            Ok(recorded) if recorded == pid => {
                self.remove()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Ask process `pid` to terminate.
pub fn terminate(pid: u32) -> Result<()> {
    #[cfg(unix)]
    let status = Command::new("kill").arg(pid.to_string()).status();
    #[cfg(not(unix))]
    let status = Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/F"])
        .status();

    let status = status.wrap_err("Failed to run the kill command")?;
    if status.success() {
        Ok(())
    } else {
        Err(eyre!("Signalling process {pid} failed ({status})"))
    }
}
