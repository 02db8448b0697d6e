use serde::{Deserialize, Serialize};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_HOTSPOT_INTERFACE: &str = "wlan0";

// Configuration data saved to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigData {
    // Interface the platform client inspects for hotspot state
    #[serde(default = "default_interface")]
    pub hotspot_interface: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    // Whether an empty scan result clears the device list or keeps the last
    // non-empty snapshot on screen. Off keeps the snapshot.
    #[serde(default)]
    pub clear_on_empty_scan: bool,
    // Shows the manual "Get your hotspot IP" control
    #[serde(default = "default_true")]
    pub show_manual_ip_refresh: bool,
}

fn default_interface() -> String {
    DEFAULT_HOTSPOT_INTERFACE.to_string()
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_true() -> bool {
    true
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            hotspot_interface: default_interface(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            clear_on_empty_scan: false,
            show_manual_ip_refresh: true,
        }
    }
}
