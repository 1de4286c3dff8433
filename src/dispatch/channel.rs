//! Message channels: the concrete ways a prepared message reaches the
//! messaging application.
//!
//! Each channel is one strategy behind a uniform trait; the engine walks
//! them in priority order until one succeeds.

use crate::domain::NormalizedPhone;
use crate::error::TransportResult;
use crate::launch::UriLauncher;
use std::fmt;
use std::sync::Arc;

/// Identifies which channel carried a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Native app-scheme URI handed to an installed messaging client
    AppScheme,

    /// Shell-level open of the app-scheme URI
    ShellOpen,

    /// Web client URI, assumed always reachable
    Web,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppScheme => write!(f, "app scheme"),
            Self::ShellOpen => write!(f, "shell open"),
            Self::Web => write!(f, "web"),
        }
    }
}

/// One concrete mechanism for handing an emergency message to a messaging
/// application.
pub trait MessageChannel: Send + Sync {
    /// Which kind of channel this is.
    fn kind(&self) -> ChannelKind;

    /// Attempt to open the channel for one contact.
    ///
    /// `encoded_message` is already percent-encoded for embedding in a URI.
    fn open(&self, phone: &NormalizedPhone, encoded_message: &str) -> TransportResult<()>;
}

/// The app-scheme URI understood by the installed desktop client.
fn app_scheme_uri(phone: &NormalizedPhone, encoded_message: &str) -> String {
    format!(
        "whatsapp://send?phone={}&text={}",
        phone.as_str(),
        encoded_message
    )
}

/// The web-client URI.
fn web_uri(phone: &NormalizedPhone, encoded_message: &str) -> String {
    format!(
        "https://web.whatsapp.com/send?phone={}&text={}",
        phone.as_str(),
        encoded_message
    )
}

/// Channel (a): native app-scheme handoff.
pub struct AppSchemeChannel {
    launcher: Arc<dyn UriLauncher>,
}

impl AppSchemeChannel {
    pub fn new(launcher: Arc<dyn UriLauncher>) -> Self {
        Self { launcher }
    }
}

impl MessageChannel for AppSchemeChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::AppScheme
    }

    fn open(&self, phone: &NormalizedPhone, encoded_message: &str) -> TransportResult<()> {
        self.launcher
            .open_native(&app_scheme_uri(phone, encoded_message))
    }
}

/// Channel (b): the same URI through the OS shell, for hosts without a
/// direct handoff API.
pub struct ShellOpenChannel {
    launcher: Arc<dyn UriLauncher>,
}

impl ShellOpenChannel {
    pub fn new(launcher: Arc<dyn UriLauncher>) -> Self {
        Self { launcher }
    }
}

impl MessageChannel for ShellOpenChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::ShellOpen
    }

    fn open(&self, phone: &NormalizedPhone, encoded_message: &str) -> TransportResult<()> {
        self.launcher
            .open_shell(&app_scheme_uri(phone, encoded_message))
    }
}

/// Channel (c): web fallback.
pub struct WebChannel {
    launcher: Arc<dyn UriLauncher>,
}

impl WebChannel {
    pub fn new(launcher: Arc<dyn UriLauncher>) -> Self {
        Self { launcher }
    }
}

impl MessageChannel for WebChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Web
    }

    fn open(&self, phone: &NormalizedPhone, encoded_message: &str) -> TransportResult<()> {
        self.launcher.open_native(&web_uri(phone, encoded_message))
    }
}

/// The production channel chain in strict priority order.
pub fn default_channels(launcher: Arc<dyn UriLauncher>) -> Vec<Box<dyn MessageChannel>> {
    vec![
        Box::new(AppSchemeChannel::new(launcher.clone())),
        Box::new(ShellOpenChannel::new(launcher.clone())),
        Box::new(WebChannel::new(launcher)),
    ]
}
