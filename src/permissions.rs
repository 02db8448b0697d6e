use crate::tethering::TetheringError;

use log::{info, warn};

/// Outcome of the coarse-location permission request. Retained and consulted
/// before every scan rather than logged and thrown away, so a denial
/// short-circuits scans instead of surfacing later as adapter failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Unknown,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn allows_scan(self) -> bool {
        // Unknown is allowed through: the adapter call itself reports the
        // failure if the platform actually blocks it.
        self != PermissionState::Denied
    }
}

pub const SCAN_PERMISSION_RATIONALE: &str =
    "Location permission is required to scan for hotspot clients";

/// Host-side permission capability. Injected so tests (and platforms with no
/// runtime permission model) can substitute their own.
pub trait PermissionGate: Send + Sync {
    fn request_scan_permission(&self, rationale: &str) -> Result<PermissionState, TetheringError>;
}

/// Default gate: desktop platforms have no runtime permission prompt for
/// reading interface state, so the request always grants.
pub struct HostPermissions;

impl PermissionGate for HostPermissions {
    fn request_scan_permission(&self, _rationale: &str) -> Result<PermissionState, TetheringError> {
        Ok(PermissionState::Granted)
    }
}

/// Runs the one-shot permission request at app init. Never fails the app:
/// any gate error degrades to `Unknown` and scanning proceeds on its own
/// merits.
pub fn ensure_scan_permission(gate: &dyn PermissionGate) -> PermissionState {
    match gate.request_scan_permission(SCAN_PERMISSION_RATIONALE) {
        Ok(state) => {
            info!("Scan permission request settled: {:?}", state);
            state
        }
        Err(e) => {
            warn!("Scan permission request failed: {}", e);
            PermissionState::Unknown
        }
    }
}
