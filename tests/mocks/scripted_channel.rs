use sos_beacon::domain::NormalizedPhone;
use sos_beacon::error::{TransportError, TransportResult};
use sos_beacon::{ChannelKind, MessageChannel};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Channel double that fails for a configured set of phone numbers and
/// records every successful open.
pub struct ScriptedChannel {
    kind: ChannelKind,
    fail_for: HashSet<String>,
    opened: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedChannel {
    pub fn new(kind: ChannelKind) -> Self {
        Self {
            kind,
            fail_for: HashSet::new(),
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make the channel fail for this canonical phone number.
    pub fn failing_for(mut self, phone: &str) -> Self {
        self.fail_for.insert(phone.to_string());
        self
    }

    /// Make the channel fail for every number.
    pub fn failing_always(mut self) -> Self {
        self.fail_for.insert("*".to_string());
        self
    }

    /// Successful opens as `(phone, encoded_message)` pairs, in order.
    pub fn opened_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        self.opened.clone()
    }
}

impl MessageChannel for ScriptedChannel {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    fn open(&self, phone: &NormalizedPhone, encoded_message: &str) -> TransportResult<()> {
        if self.fail_for.contains("*") || self.fail_for.contains(phone.as_str()) {
            return Err(TransportError::LaunchFailed(format!(
                "scripted failure for {}",
                phone
            )));
        }
        self.opened
            .lock()
            .unwrap()
            .push((phone.as_str().to_string(), encoded_message.to_string()));
        Ok(())
    }
}
