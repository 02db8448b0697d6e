use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// Lifetimes match the short/long toast distinction the UI relies on.
const SHORT_VISIBLE: Duration = Duration::from_millis(2000);
const LONG_VISIBLE: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastDuration {
    Short,
    Long,
}

impl ToastDuration {
    pub fn visible_for(self) -> Duration {
        match self {
            ToastDuration::Short => SHORT_VISIBLE,
            ToastDuration::Long => LONG_VISIBLE,
        }
    }
}

// A transient, non-blocking message. Expiry is measured from creation.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub duration: ToastDuration,
    created: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: ToastDuration) -> Self {
        Self {
            message: message.into(),
            duration,
            created: Instant::now(),
        }
    }

    pub fn expired(&self) -> bool {
        self.created.elapsed() >= self.duration.visible_for()
    }
}

pub type ToastQueue = Arc<Mutex<Vec<Toast>>>;

pub fn new_queue() -> ToastQueue {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn push_short(queue: &ToastQueue, message: impl Into<String>) {
    push(queue, Toast::new(message, ToastDuration::Short));
}

pub fn push_long(queue: &ToastQueue, message: impl Into<String>) {
    push(queue, Toast::new(message, ToastDuration::Long));
}

fn push(queue: &ToastQueue, toast: Toast) {
    match queue.lock() {
        Ok(mut toasts) => {
            log::debug!("Toast: {}", toast.message);
            toasts.push(toast);
        }
        Err(_) => log::error!("Toast queue mutex poisoned, dropping: {}", toast.message),
    }
}

/// Drops expired toasts and returns the messages still visible, oldest first.
pub fn drain_expired(queue: &ToastQueue) -> Vec<Toast> {
    match queue.lock() {
        Ok(mut toasts) => {
            toasts.retain(|t| !t.expired());
            toasts.clone()
        }
        Err(_) => Vec::new(),
    }
}
