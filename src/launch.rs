//! Handing URIs to the operating system.
//!
//! A single seam for everything that leaves the process through the OS
//! launch mechanism: the consent-probe page and every dispatch channel go
//! through [`UriLauncher`], so tests can substitute a recording fake.

use crate::error::{TransportError, TransportResult};
use std::process::Command;

/// Opens a URI with whatever the host OS considers the right handler.
pub trait UriLauncher: Send + Sync {
    /// Hand off via the desktop's registered handler (browser, app scheme).
    fn open_native(&self, uri: &str) -> TransportResult<()>;

    /// Hand off via an explicit shell-level command.
    fn open_shell(&self, uri: &str) -> TransportResult<()>;
}

/// Production launcher backed by the `open` crate and the platform shell.
#[derive(Debug, Clone, Default)]
pub struct SystemUriLauncher;

impl UriLauncher for SystemUriLauncher {
    fn open_native(&self, uri: &str) -> TransportResult<()> {
        open::that_detached(uri).map_err(|e| TransportError::LaunchFailed(e.to_string()))
    }

    fn open_shell(&self, uri: &str) -> TransportResult<()> {
        let mut command = shell_open_command(uri)?;
        command
            .spawn()
            .map(|_| ())
            .map_err(|e| TransportError::LaunchFailed(e.to_string()))
    }
}

/// Build the platform's shell-level open command.
fn shell_open_command(uri: &str) -> TransportResult<Command> {
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/c", "start", "", uri]);
        Ok(cmd)
    }
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(uri);
        Ok(cmd)
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(uri);
        Ok(cmd)
    }
    #[cfg(not(any(unix, target_os = "windows")))]
    {
        let _ = uri;
        Err(TransportError::Unsupported(
            "no shell open command for this platform".to_string(),
        ))
    }
}
