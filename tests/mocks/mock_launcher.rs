use sos_beacon::error::{TransportError, TransportResult};
use sos_beacon::UriLauncher;
use std::sync::{Arc, Mutex};

/// Fake URI launcher that records every URI it is asked to open.
///
/// Each launch path can be configured to succeed or fail, so tests can
/// drive the channel fallback chain deterministically.
pub struct FakeLauncher {
    native_succeeds: bool,
    shell_succeeds: bool,
    opened: Arc<Mutex<Vec<String>>>,
}

impl FakeLauncher {
    /// A launcher where every path succeeds.
    pub fn new() -> Self {
        Self {
            native_succeeds: true,
            shell_succeeds: true,
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A launcher where every path fails.
    pub fn failing() -> Self {
        Self {
            native_succeeds: false,
            shell_succeeds: false,
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_native(mut self, succeeds: bool) -> Self {
        self.native_succeeds = succeeds;
        self
    }

    pub fn with_shell(mut self, succeeds: bool) -> Self {
        self.shell_succeeds = succeeds;
        self
    }

    /// URIs opened so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    /// Shared handle to the opened list (to keep after moving the launcher
    /// into an `Arc<dyn UriLauncher>`).
    pub fn opened_handle(&self) -> Arc<Mutex<Vec<String>>> {
        self.opened.clone()
    }
}

impl Default for FakeLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl UriLauncher for FakeLauncher {
    fn open_native(&self, uri: &str) -> TransportResult<()> {
        if self.native_succeeds {
            self.opened.lock().unwrap().push(uri.to_string());
            Ok(())
        } else {
            Err(TransportError::LaunchFailed("native launch refused".into()))
        }
    }

    fn open_shell(&self, uri: &str) -> TransportResult<()> {
        if self.shell_succeeds {
            self.opened.lock().unwrap().push(uri.to_string());
            Ok(())
        } else {
            Err(TransportError::LaunchFailed("shell launch refused".into()))
        }
    }
}
