use crate::device::ConnectedDevice;

/// Adapter-reported failure. The message is user-facing text and is shown
/// in a toast, unlike [`AdapterError::Unexpected`] which is only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetheringError {
    pub message: String,
}

impl TetheringError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for TetheringError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TetheringError {}

// The two failure kinds every call site distinguishes: the recognized
// adapter error gets surfaced to the user, everything else is logged only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    Tethering(TetheringError),
    Unexpected(String),
}

impl AdapterError {
    pub fn tethering(message: impl Into<String>) -> Self {
        AdapterError::Tethering(TetheringError::new(message))
    }
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AdapterError::Tethering(e) => write!(f, "{}", e),
            AdapterError::Unexpected(detail) => write!(f, "unexpected failure: {}", detail),
        }
    }
}

impl std::error::Error for AdapterError {}

impl From<TetheringError> for AdapterError {
    fn from(e: TetheringError) -> Self {
        AdapterError::Tethering(e)
    }
}

/// Boundary to the platform's hotspot/tethering capability. The poller and
/// the UI only ever see this trait, so tests substitute a scripted fake.
pub trait TetheringClient: Send + Sync {
    /// Whether the hotspot is currently up.
    fn is_hotspot_enabled(&self) -> Result<bool, AdapterError>;

    /// The device's own address on the hotspot interface.
    fn my_device_ip(&self) -> Result<String, AdapterError>;

    /// Clients currently attached to the hotspot. An empty list means the
    /// hotspot is up with nobody attached; that is not an error.
    fn connected_devices(&self) -> Result<Vec<ConnectedDevice>, AdapterError>;
}

/// Picks the client for the platform we were built for.
pub fn platform_client(interface: &str) -> Box<dyn TetheringClient> {
    #[cfg(target_os = "linux")]
    {
        Box::new(ArpTetheringClient::new(interface))
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = interface;
        Box::new(UnsupportedTethering)
    }
}

/// Fallback for platforms without a hotspot query path. Every call fails
/// with a `TetheringError` so the failure is surfaced, not swallowed.
pub struct UnsupportedTethering;

impl TetheringClient for UnsupportedTethering {
    fn is_hotspot_enabled(&self) -> Result<bool, AdapterError> {
        Err(AdapterError::tethering("Hotspot queries are not supported on this platform"))
    }

    fn my_device_ip(&self) -> Result<String, AdapterError> {
        Err(AdapterError::tethering("Hotspot queries are not supported on this platform"))
    }

    fn connected_devices(&self) -> Result<Vec<ConnectedDevice>, AdapterError> {
        Err(AdapterError::tethering("Hotspot queries are not supported on this platform"))
    }
}

/// Linux client backed by the kernel's neighbour table. Attached clients are
/// the ARP entries on the hotspot interface; the device's own IP is the local
/// end of a connected (never written to) UDP socket toward one of them.
#[cfg(target_os = "linux")]
pub struct ArpTetheringClient {
    interface: String,
}

#[cfg(target_os = "linux")]
impl ArpTetheringClient {
    pub fn new(interface: impl Into<String>) -> Self {
        Self { interface: interface.into() }
    }

    fn read_arp_table(&self) -> Result<Vec<ConnectedDevice>, AdapterError> {
        let contents = std::fs::read_to_string("/proc/net/arp")
            .map_err(|e| AdapterError::Unexpected(format!("reading /proc/net/arp: {}", e)))?;
        Ok(parse_arp_table(&contents, &self.interface))
    }
}

#[cfg(target_os = "linux")]
impl TetheringClient for ArpTetheringClient {
    fn is_hotspot_enabled(&self) -> Result<bool, AdapterError> {
        let path = format!("/sys/class/net/{}/operstate", self.interface);
        match std::fs::read_to_string(&path) {
            Ok(state) => {
                log::debug!("Interface {} operstate: {}", self.interface, state.trim());
                Ok(state.trim() == "up")
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Err(AdapterError::tethering(format!(
                    "Unable to read hotspot state for {}",
                    self.interface
                )))
            }
        }
    }

    fn my_device_ip(&self) -> Result<String, AdapterError> {
        // Route toward an attached client to learn our address on the
        // hotspot subnet. connect() on UDP sends nothing.
        let peer = self
            .read_arp_table()?
            .into_iter()
            .next()
            .ok_or_else(|| AdapterError::tethering("No active hotspot interface"))?;

        let socket = std::net::UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| AdapterError::Unexpected(format!("binding probe socket: {}", e)))?;
        socket
            .connect((peer.ip_address.as_str(), 1))
            .map_err(|_| AdapterError::tethering("No active hotspot interface"))?;
        let local = socket
            .local_addr()
            .map_err(|e| AdapterError::Unexpected(format!("reading local addr: {}", e)))?;
        Ok(local.ip().to_string())
    }

    fn connected_devices(&self) -> Result<Vec<ConnectedDevice>, AdapterError> {
        self.read_arp_table()
    }
}

/// Parses `/proc/net/arp` rows into devices on `interface`. Incomplete
/// entries (flags 0x0) and the all-zero MAC are dropped.
pub fn parse_arp_table(contents: &str, interface: &str) -> Vec<ConnectedDevice> {
    let mut devices = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if idx == 0 {
            continue; // header row
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 6 {
            continue;
        }
        let (ip, flags, mac, iface) = (parts[0], parts[2], parts[3], parts[5]);
        if iface != interface {
            continue;
        }
        let mac = mac.to_lowercase();
        if flags == "0x0" || mac == "00:00:00:00:00:00" {
            continue;
        }
        let status = if flags == "0x2" { "connected" } else { "stale" };
        devices.push(ConnectedDevice::new(ip, mac, status));
    }
    devices
}
