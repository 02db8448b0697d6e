use serde::{Deserialize, Serialize};

// A client currently attached to the hotspot, as reported by the adapter.
// Snapshot only: the poller replaces the whole list each scan and never
// merges entries, so the tuple itself is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectedDevice {
    pub ip_address: String,
    pub mac_address: String,
    pub status: String,
}

impl ConnectedDevice {
    pub fn new(
        ip_address: impl Into<String>,
        mac_address: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            ip_address: ip_address.into(),
            mac_address: mac_address.into(),
            status: status.into(),
        }
    }
}

// How a device shows up in logs and single-line listings
impl std::fmt::Display for ConnectedDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "IP:{} MAC:{} ({})",
            if self.ip_address.is_empty() { "N/A" } else { &self.ip_address },
            if self.mac_address.is_empty() { "N/A" } else { &self.mac_address },
            if self.status.is_empty() { "unknown" } else { &self.status }
        )
    }
}
