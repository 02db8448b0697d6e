use crate::device::ConnectedDevice;

use chrono::{DateTime, Local};

// Represents the current high-level state of the application UI
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum State {
    Initialising, // App is starting, loading config, requesting permission
    Running,      // Main operational state, showing hotspot info and devices
    About,        // Showing the about screen
}

/// Everything the display surface renders. One record behind a mutex:
/// written by the poller worker, read by the UI each frame.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub devices: Vec<ConnectedDevice>,
    pub my_ip: String,
    pub loading: bool,
    pub last_scan: Option<DateTime<Local>>,
}
