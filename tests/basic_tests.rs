use hotspot_monitor::config::{ConfigData, DEFAULT_HOTSPOT_INTERFACE, DEFAULT_POLL_INTERVAL_MS};
use hotspot_monitor::device::ConnectedDevice;
use hotspot_monitor::notify::{Toast, ToastDuration};
use hotspot_monitor::permissions::{
    ensure_scan_permission, PermissionGate, PermissionState, SCAN_PERMISSION_RATIONALE,
};
use hotspot_monitor::state::State;
use hotspot_monitor::tethering::{parse_arp_table, AdapterError, TetheringError};
use hotspot_monitor::util::shorten_for_toast;

#[test]
fn test_config_data_default() {
    // Test that the default ConfigData is created correctly
    let config = ConfigData::default();

    assert_eq!(config.hotspot_interface, DEFAULT_HOTSPOT_INTERFACE);
    assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    assert_eq!(config.poll_interval_ms, 5000);

    // An empty scan keeps the last snapshot unless explicitly configured
    assert!(!config.clear_on_empty_scan);
    // The manual IP refresh control is visible by default
    assert!(config.show_manual_ip_refresh);
}

#[test]
fn test_connected_device_display() {
    let device = ConnectedDevice::new("192.168.43.2", "aa:bb:cc:dd:ee:ff", "connected");
    assert_eq!(
        format!("{}", device),
        "IP:192.168.43.2 MAC:aa:bb:cc:dd:ee:ff (connected)"
    );

    // Missing fields fall back to placeholders instead of empty text
    let device = ConnectedDevice::new("", "", "");
    assert_eq!(format!("{}", device), "IP:N/A MAC:N/A (unknown)");
}

#[test]
fn test_state_enum() {
    // Test that the State enum has the expected variants
    let initialising = State::Initialising;
    let about = State::About;
    let running = State::Running;

    assert_ne!(initialising, about);
    assert_ne!(initialising, running);
    assert_ne!(about, running);

    assert_eq!(initialising, State::Initialising);
    assert_eq!(about, State::About);
    assert_eq!(running, State::Running);
}

#[test]
fn test_error_display() {
    let err = TetheringError::new("Hotspot is not enabled");
    assert_eq!(format!("{}", err), "Hotspot is not enabled");

    let err = AdapterError::tethering("Unable to read hotspot state");
    assert_eq!(format!("{}", err), "Unable to read hotspot state");

    let err = AdapterError::Unexpected("mutex poisoned".to_string());
    assert_eq!(format!("{}", err), "unexpected failure: mutex poisoned");
}

#[test]
fn test_adapter_error_from_tethering_error() {
    let err: AdapterError = TetheringError::new("No active hotspot interface").into();
    match err {
        AdapterError::Tethering(e) => assert_eq!(e.message, "No active hotspot interface"),
        other => panic!("expected Tethering variant, got {:?}", other),
    }
}

#[test]
fn test_toast_durations() {
    // Long toasts outlive short ones, and both map to fixed lifetimes
    assert!(ToastDuration::Long.visible_for() > ToastDuration::Short.visible_for());

    let toast = Toast::new("Your device IP: 192.168.43.1", ToastDuration::Short);
    assert!(!toast.expired());
    assert_eq!(toast.message, "Your device IP: 192.168.43.1");
}

#[test]
fn test_parse_arp_table() {
    let contents = "\
IP address       HW type     Flags       HW address            Mask     Device
192.168.43.12    0x1         0x2         AA:BB:CC:DD:EE:FF     *        wlan0
192.168.43.13    0x1         0x0         00:00:00:00:00:00     *        wlan0
192.168.1.5      0x1         0x2         11:22:33:44:55:66     *        eth0
192.168.43.14    0x1         0x6         ab:cd:ef:01:02:03     *        wlan0
";

    let devices = parse_arp_table(contents, "wlan0");
    assert_eq!(devices.len(), 2);

    // MACs are normalised to lowercase, flags map onto a status string
    assert_eq!(devices[0].ip_address, "192.168.43.12");
    assert_eq!(devices[0].mac_address, "aa:bb:cc:dd:ee:ff");
    assert_eq!(devices[0].status, "connected");

    assert_eq!(devices[1].ip_address, "192.168.43.14");
    assert_eq!(devices[1].status, "stale");

    // Other interfaces yield nothing
    assert!(parse_arp_table(contents, "eth1").is_empty());
}

#[test]
fn test_parse_arp_table_handles_garbage() {
    assert!(parse_arp_table("", "wlan0").is_empty());
    assert!(parse_arp_table("only a header line\nshort row\n", "wlan0").is_empty());
}

#[test]
fn test_shorten_for_toast() {
    assert_eq!(shorten_for_toast("short", 10), "short");
    assert_eq!(shorten_for_toast("exactly-10", 10), "exactly-10");
    assert_eq!(shorten_for_toast("a much longer message", 10), "a much ...");
}

#[test]
fn test_permission_state_allows_scan() {
    // Unknown is allowed through so the adapter itself reports the failure
    assert!(PermissionState::Granted.allows_scan());
    assert!(PermissionState::Unknown.allows_scan());
    assert!(!PermissionState::Denied.allows_scan());
}

struct ScriptedGate(Result<PermissionState, TetheringError>);

impl PermissionGate for ScriptedGate {
    fn request_scan_permission(
        &self,
        rationale: &str,
    ) -> Result<PermissionState, TetheringError> {
        assert_eq!(rationale, SCAN_PERMISSION_RATIONALE);
        self.0.clone()
    }
}

#[test]
fn test_ensure_scan_permission() {
    let granted = ScriptedGate(Ok(PermissionState::Granted));
    assert_eq!(ensure_scan_permission(&granted), PermissionState::Granted);

    let denied = ScriptedGate(Ok(PermissionState::Denied));
    assert_eq!(ensure_scan_permission(&denied), PermissionState::Denied);

    // A failing gate degrades to Unknown instead of failing the app
    let broken = ScriptedGate(Err(TetheringError::new("permission service unavailable")));
    assert_eq!(ensure_scan_permission(&broken), PermissionState::Unknown);
}
