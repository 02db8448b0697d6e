pub fn about() -> Vec<String> {
    vec![
        "Hotspot Monitor shows the state of this device's Wi-Fi hotspot and \
        the clients currently attached to it, refreshed every few seconds."
            .to_string(),
        "\n".to_string(),
        "All hotspot queries go through the platform tethering client; \
        when the platform cannot answer, the last known values stay on \
        screen and the failure is shown as a transient notification."
            .to_string(),
    ]
}
