// Export modules for testing
pub mod about;
pub mod config;
pub mod device;
pub mod notify;
pub mod permissions;
pub mod poller;
pub mod state;
pub mod tethering;
pub mod ui;
pub mod util;

// Re-export main struct and types for testing
pub use crate::config::ConfigData;
pub use crate::device::ConnectedDevice;
pub use crate::state::{State, ViewState};
pub use crate::tethering::{AdapterError, TetheringClient, TetheringError};

// Constants
pub const PROGRAM_TITLE: &str = "Hotspot Monitor";
pub const INITIAL_WIDTH: f32 = 420.0;
pub const INITIAL_HEIGHT: f32 = 620.0;

pub use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::notify::ToastQueue;
use crate::permissions::{HostPermissions, PermissionGate, PermissionState};
use crate::poller::{PollerOptions, SharedSignal, SharedViewState};

// Args struct for command line parsing
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Poll interval override in milliseconds (not persisted)
    #[arg(short, long)]
    pub interval_ms: Option<u64>,
}

pub use fast_config::Config;

// The main application struct
pub struct HotspotMonitor {
    // State
    pub state: State,
    pub view: SharedViewState,       // Rendered by the UI, written by the poller
    pub signal: SharedSignal,        // Run/trigger flags shared with the poller
    pub toasts: ToastQueue,
    pub permission: PermissionState,

    // Injected capabilities
    pub client: Arc<dyn TetheringClient>,
    pub gate: Arc<dyn PermissionGate>,

    // Worker lifecycle
    pub worker: Option<JoinHandle<()>>,

    // Configuration
    pub config: Config<ConfigData>,
    pub interval_override_ms: Option<u64>,
}

impl HotspotMonitor {
    pub fn new(args: &Args) -> Self {
        // Determine config path safely
        let config_dir = dirs::config_dir()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string()); // Fallback to current dir
        let config_path = format!("{}/hotspot_monitor.json", config_dir);

        let config = match Config::new(&config_path, ConfigData::default()) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error creating config file at {}: {}", config_path, e);
                std::process::exit(1)
            }
        };

        let client: Arc<dyn TetheringClient> =
            Arc::from(tethering::platform_client(&config.data.hotspot_interface));

        Self::with_parts(config, client, Arc::new(HostPermissions), args.interval_ms)
    }

    /// Builds the app around injected capabilities. Tests use this to swap
    /// the tethering client and the permission gate for fakes.
    pub fn with_parts(
        config: Config<ConfigData>,
        client: Arc<dyn TetheringClient>,
        gate: Arc<dyn PermissionGate>,
        interval_override_ms: Option<u64>,
    ) -> Self {
        Self {
            state: State::Initialising,
            view: poller::new_view_state(),
            signal: poller::new_signal(),
            toasts: notify::new_queue(),
            permission: PermissionState::Unknown,
            client,
            gate,
            worker: None,
            config,
            interval_override_ms,
        }
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.interval_override_ms
                .unwrap_or(self.config.data.poll_interval_ms),
        )
    }

    // Initialization logic called once at the start
    pub fn init(&mut self) {
        // One-shot permission request; the outcome is kept and consulted
        // by every scan, it does not block startup.
        self.permission = permissions::ensure_scan_permission(self.gate.as_ref());

        let opts = PollerOptions {
            interval: self.poll_interval(),
            clear_on_empty_scan: self.config.data.clear_on_empty_scan,
            permission: self.permission,
        };
        self.worker = Some(poller::spawn_poller(
            self.client.clone(),
            self.view.clone(),
            self.toasts.clone(),
            self.signal.clone(),
            opts,
        ));

        self.state = State::Running;
        log::info!("Initialization complete. State set to Running.");
    }

    // Graceful shutdown logic
    pub fn shutdown_app(&mut self) {
        log::info!("Shutdown requested.");
        if let Some(handle) = self.worker.take() {
            poller::stop_poller(&self.signal, handle);
        }

        if let Err(e) = self.config.save() {
            log::error!("Failed to save configuration on exit: {}", e);
        } else {
            log::info!("Configuration saved.");
        }
        log::info!("Shutdown complete.");
    }
}

// Main eframe application loop
impl eframe::App for HotspotMonitor {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        // Keep repainting so poller updates and toast expiry show up
        // without user input
        ctx.request_repaint_after(Duration::from_millis(100));

        eframe::egui::CentralPanel::default().show(ctx, |ui| match self.state {
            State::Initialising => {
                ui.centered_and_justified(|ui| {
                    ui.label("Initialising...");
                });
                // Actual init logic runs once after this frame
                self.init();
            }
            State::About => {
                ui::draw_about_screen(self, ui);
            }
            State::Running => {
                ui::draw_running_state(self, ui, ctx);
            }
        });
    }

    // Called when the application is about to close
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.shutdown_app();
    }
}
