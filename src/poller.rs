use crate::notify::{self, ToastQueue};
use crate::permissions::PermissionState;
use crate::state::ViewState;
use crate::tethering::{AdapterError, TetheringClient};
use crate::util::shorten_for_toast;

use chrono::Local;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const TOAST_MESSAGE_MAX: usize = 120;
pub const NO_DEVICES_MESSAGE: &str = "No devices connected";
pub const PERMISSION_DENIED_MESSAGE: &str =
    "Location permission denied; cannot scan for hotspot clients";

/// Shared flags driving the worker. The single worker thread is the mutual
/// exclusion guard for scans: a trigger that lands mid-scan sets
/// `scan_requested` and coalesces into one follow-up scan, so adapter calls
/// never overlap and `loading`/`devices` have one writer ordering.
#[derive(Debug, Default)]
pub struct PollerSignal {
    pub running: bool,
    pub scan_requested: bool,
    pub ip_requested: bool,
}

pub type SharedSignal = Arc<(Mutex<PollerSignal>, Condvar)>;
pub type SharedViewState = Arc<Mutex<ViewState>>;

pub fn new_signal() -> SharedSignal {
    Arc::new((Mutex::new(PollerSignal::default()), Condvar::new()))
}

pub fn new_view_state() -> SharedViewState {
    Arc::new(Mutex::new(ViewState::default()))
}

#[derive(Debug, Clone)]
pub struct PollerOptions {
    pub interval: Duration,
    pub clear_on_empty_scan: bool,
    pub permission: PermissionState,
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(crate::config::DEFAULT_POLL_INTERVAL_MS),
            clear_on_empty_scan: false,
            permission: PermissionState::Unknown,
        }
    }
}

/// Asks the worker for a scan outside the regular tick.
pub fn request_scan(signal: &SharedSignal) {
    let (lock, cvar) = &**signal;
    match lock.lock() {
        Ok(mut guard) => {
            guard.scan_requested = true;
            cvar.notify_all();
        }
        Err(_) => log::error!("Poller signal mutex poisoned, scan request dropped"),
    }
}

/// Asks the worker to re-run the one-shot IP fetch.
pub fn request_ip_refresh(signal: &SharedSignal) {
    let (lock, cvar) = &**signal;
    match lock.lock() {
        Ok(mut guard) => {
            guard.ip_requested = true;
            cvar.notify_all();
        }
        Err(_) => log::error!("Poller signal mutex poisoned, IP refresh dropped"),
    }
}

/// Starts the worker: one immediate IP fetch, then a scan every
/// `opts.interval` until [`stop_poller`] is called.
pub fn spawn_poller(
    client: Arc<dyn TetheringClient>,
    view: SharedViewState,
    toasts: ToastQueue,
    signal: SharedSignal,
    opts: PollerOptions,
) -> JoinHandle<()> {
    {
        let (lock, _) = &*signal;
        if let Ok(mut guard) = lock.lock() {
            guard.running = true;
            guard.scan_requested = false;
            guard.ip_requested = false;
        }
    }
    log::info!(
        "Spawning poller worker (interval {:?}, permission {:?})",
        opts.interval,
        opts.permission
    );
    thread::spawn(move || run_poller_loop(client.as_ref(), &view, &toasts, &signal, &opts))
}

/// Signals the worker to stop and waits for it. After this returns no tick
/// or in-flight scan mutates the view state again.
pub fn stop_poller(signal: &SharedSignal, handle: JoinHandle<()>) {
    let (lock, cvar) = &**signal;
    match lock.lock() {
        Ok(mut guard) => {
            guard.running = false;
            cvar.notify_all();
        }
        Err(_) => log::error!("Poller signal mutex poisoned during stop"),
    }
    if handle.join().is_err() {
        log::error!("Poller worker panicked before shutdown");
    } else {
        log::info!("Poller worker stopped.");
    }
}

enum Wake {
    TimerScan,
    ManualScan,
    IpRefresh,
    Stop,
}

fn run_poller_loop(
    client: &dyn TetheringClient,
    view: &SharedViewState,
    toasts: &ToastQueue,
    signal: &SharedSignal,
    opts: &PollerOptions,
) {
    log::info!("Poller loop starting.");

    // One-shot IP fetch, independent of the tick
    fetch_self_ip_once(client, view, toasts, signal, opts);

    let (lock, cvar) = &**signal;
    let mut next_tick = Instant::now() + opts.interval;

    loop {
        let wake = {
            let mut guard = match lock.lock() {
                Ok(guard) => guard,
                Err(_) => {
                    log::error!("Poller signal mutex poisoned in worker loop!");
                    return;
                }
            };
            loop {
                if !guard.running {
                    break Wake::Stop;
                }
                if guard.scan_requested {
                    guard.scan_requested = false;
                    break Wake::ManualScan;
                }
                if guard.ip_requested {
                    guard.ip_requested = false;
                    break Wake::IpRefresh;
                }
                let now = Instant::now();
                if now >= next_tick {
                    next_tick = now + opts.interval;
                    break Wake::TimerScan;
                }
                guard = match cvar.wait_timeout(guard, next_tick - now) {
                    Ok((guard, _)) => guard,
                    Err(_) => {
                        log::error!("Poller signal mutex poisoned while waiting!");
                        return;
                    }
                };
            }
        };

        match wake {
            Wake::Stop => {
                log::info!("Stop signal received, exiting poller loop.");
                break;
            }
            Wake::ManualScan => scan_once(client, view, toasts, signal, opts),
            Wake::TimerScan => {
                // Background ticks stay quiet under a denied permission;
                // manual triggers still get the denial toast from scan_once.
                if opts.permission.allows_scan() {
                    scan_once(client, view, toasts, signal, opts);
                } else {
                    log::debug!("Skipping timer scan: permission denied");
                }
            }
            Wake::IpRefresh => fetch_self_ip_once(client, view, toasts, signal, opts),
        }
    }
}

/// One scan cycle: `loading` is raised on entry and dropped on every exit
/// path; the result is committed only while the worker is still running.
pub fn scan_once(
    client: &dyn TetheringClient,
    view: &SharedViewState,
    toasts: &ToastQueue,
    signal: &SharedSignal,
    opts: &PollerOptions,
) {
    if !opts.permission.allows_scan() {
        log::warn!("Scan refused: {}", PERMISSION_DENIED_MESSAGE);
        notify::push_long(toasts, PERMISSION_DENIED_MESSAGE);
        return;
    }

    set_loading(view, true);
    let result = client.connected_devices();

    if still_running(signal) {
        match result {
            Ok(devices) if !devices.is_empty() => {
                log::info!("Scan found {} connected device(s).", devices.len());
                if let Ok(mut state) = view.lock() {
                    state.devices = devices;
                    state.last_scan = Some(Local::now());
                }
            }
            Ok(_) => {
                // Empty read: the last non-empty snapshot stays on screen
                // unless the config opts into clearing.
                log::info!("Scan found no connected devices.");
                if let Ok(mut state) = view.lock() {
                    if opts.clear_on_empty_scan {
                        state.devices.clear();
                    }
                    state.last_scan = Some(Local::now());
                }
                notify::push_short(toasts, NO_DEVICES_MESSAGE);
            }
            Err(AdapterError::Tethering(e)) => {
                log::error!("Device scan failed: {}", e);
                notify::push_long(toasts, shorten_for_toast(&e.message, TOAST_MESSAGE_MAX));
            }
            Err(AdapterError::Unexpected(detail)) => {
                log::error!("Device scan failed unexpectedly: {}", detail);
            }
        }
    } else {
        log::debug!("Discarding scan result: worker no longer running");
    }

    set_loading(view, false);
}

/// The one-shot IP fetch. Failure keeps the previous `my_ip`.
pub fn fetch_self_ip_once(
    client: &dyn TetheringClient,
    view: &SharedViewState,
    toasts: &ToastQueue,
    signal: &SharedSignal,
    opts: &PollerOptions,
) {
    if !opts.permission.allows_scan() {
        log::warn!("IP fetch refused: {}", PERMISSION_DENIED_MESSAGE);
        notify::push_long(toasts, PERMISSION_DENIED_MESSAGE);
        return;
    }

    let result = client.my_device_ip();

    if !still_running(signal) {
        log::debug!("Discarding IP fetch result: worker no longer running");
        return;
    }

    match result {
        Ok(ip) => {
            log::info!("Device IP resolved: {}", ip);
            if let Ok(mut state) = view.lock() {
                state.my_ip = ip.clone();
            }
            notify::push_short(toasts, format!("Your device IP: {}", ip));
        }
        Err(AdapterError::Tethering(e)) => {
            log::error!("IP fetch failed: {}", e);
            notify::push_long(toasts, shorten_for_toast(&e.message, TOAST_MESSAGE_MAX));
        }
        Err(AdapterError::Unexpected(detail)) => {
            log::error!("IP fetch failed unexpectedly: {}", detail);
        }
    }
}

fn set_loading(view: &SharedViewState, loading: bool) {
    match view.lock() {
        Ok(mut state) => state.loading = loading,
        Err(_) => log::error!("View state mutex poisoned setting loading={}", loading),
    }
}

fn still_running(signal: &SharedSignal) -> bool {
    let (lock, _) = &**signal;
    match lock.lock() {
        Ok(guard) => guard.running,
        Err(_) => false,
    }
}
