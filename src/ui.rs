use crate::about;
use crate::notify;
use crate::poller;
use crate::state::{State, ViewState};
use crate::tethering::AdapterError;
use crate::util::{format_last_scan, shorten_for_toast};
use crate::{HotspotMonitor, INITIAL_WIDTH, PROGRAM_TITLE};

use eframe::egui::{self, Align2, Color32, Context, ScrollArea, Ui};

const SCANNING_CAPTION: &str = "Scanning for new connected devices...";
const TOAST_TEXT_MAX: usize = 120;

// Keep UI action handlers associated with HotspotMonitor
impl HotspotMonitor {
    // --- Button/Action Handlers (called from draw_running_state) ---

    fn handle_check_enabled(&mut self) {
        match self.client.is_hotspot_enabled() {
            Ok(enabled) => {
                let message = format!(
                    "Hotspot is {}",
                    if enabled { "Enabled" } else { "Disabled" }
                );
                notify::push_short(&self.toasts, message);
            }
            Err(AdapterError::Tethering(e)) => {
                log::error!("Hotspot state check failed: {}", e);
                notify::push_long(&self.toasts, shorten_for_toast(&e.message, TOAST_TEXT_MAX));
            }
            Err(AdapterError::Unexpected(detail)) => {
                log::error!("Hotspot state check failed unexpectedly: {}", detail);
            }
        }
    }

    fn handle_scan_devices(&mut self) {
        log::debug!("Manual device scan requested.");
        poller::request_scan(&self.signal);
    }

    fn handle_ip_refresh(&mut self) {
        log::debug!("Manual IP refresh requested.");
        poller::request_ip_refresh(&self.signal);
    }
}

// --- UI Drawing Functions ---

pub fn draw_about_screen(app: &mut HotspotMonitor, ui: &mut Ui) {
    ui.set_width(INITIAL_WIDTH);
    ui.vertical_centered(|ui| {
        ui.heading(format!("About {}", PROGRAM_TITLE));
        ui.separator();
        for line in about::about() {
            ui.label(line);
        }
        ui.separator();
        if ui.button("OK").clicked() {
            app.state = State::Running;
        }
    });
}

pub fn draw_running_state(app: &mut HotspotMonitor, ui: &mut Ui, ctx: &Context) {
    // Snapshot the shared state once per frame; the poller keeps writing
    // behind this lock while we render.
    let view: ViewState = match app.view.lock() {
        Ok(guard) => guard.clone(),
        Err(_) => {
            log::error!("View state mutex poisoned in UI!");
            ViewState::default()
        }
    };

    ui.horizontal(|ui| {
        ui.heading(PROGRAM_TITLE);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("About").clicked() {
                app.state = State::About;
            }
        });
    });
    ui.separator();

    ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        draw_hotspot_section(app, ui);
        ui.separator();
        draw_devices_section(app, ui, &view);
        ui.add_space(10.0);
    });

    draw_toasts(app, ctx);
}

fn draw_hotspot_section(app: &mut HotspotMonitor, ui: &mut Ui) {
    ui.heading("Hotspot Information");
    if ui.button("Check Hotspot Enabled").clicked() {
        app.handle_check_enabled();
    }
    // One surface for both screen variants: the extra control is a flag,
    // not a fork.
    if app.config.data.show_manual_ip_refresh && ui.button("Get your hotspot IP").clicked() {
        app.handle_ip_refresh();
    }
}

fn draw_devices_section(app: &mut HotspotMonitor, ui: &mut Ui, view: &ViewState) {
    ui.heading("Connected Devices");
    if ui.button("Find Connected Devices").clicked() {
        app.handle_scan_devices();
    }
    ui.add_space(6.0);

    ui.label("Your IP Address:");
    ui.strong(if view.my_ip.is_empty() { "N/A" } else { view.my_ip.as_str() });
    ui.add_space(6.0);

    if view.loading {
        ui.vertical_centered(|ui| {
            ui.spinner();
            ui.label(SCANNING_CAPTION);
        });
        return; // device list is elided while a scan is in flight
    }

    for device in &view.devices {
        ui.group(|ui| {
            ui.label(format!("IP Address: {}", device.ip_address));
            ui.label(format!("MAC Address: {}", device.mac_address));
            ui.label(format!("Status: {}", device.status));
        });
    }
    if let Some(ts) = &view.last_scan {
        ui.weak(format!("Last scan: {}", format_last_scan(ts)));
    }
}

fn draw_toasts(app: &HotspotMonitor, ctx: &Context) {
    let toasts = notify::drain_expired(&app.toasts);
    if toasts.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toast_overlay"))
        .anchor(Align2::CENTER_BOTTOM, [0.0, -12.0])
        .show(ctx, |ui| {
            for toast in &toasts {
                egui::Frame::popup(ui.style())
                    .fill(Color32::from_black_alpha(200))
                    .show(ui, |ui| {
                        ui.colored_label(Color32::WHITE, &toast.message);
                    });
            }
        });
}
