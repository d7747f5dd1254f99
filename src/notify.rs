//! Transient user-facing notifications.
//!
//! A [`ToastQueue`] is an ordered, removal-capable collection of toasts with
//! an instance-owned monotonic id counter. Every toast schedules its own
//! removal after its duration elapses; dismissal of an id that is already
//! gone is a no-op, so explicit dismissal racing auto-expiry is safe.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default display duration for a toast
pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

/// Message type, driving icon and styling in a presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
    Warning,
    Info,
}

impl ToastKind {
    /// Title used by the convenience entry points
    pub fn default_title(self) -> &'static str {
        match self {
            ToastKind::Error => "Error",
            ToastKind::Success => "Success",
            ToastKind::Warning => "Warning",
            ToastKind::Info => "Info",
        }
    }
}

/// A single transient notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub duration: Duration,
}

#[derive(Debug, Default)]
struct ToastState {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Cloneable handle to a toast collection.
///
/// Ids are unique and increasing for the lifetime of the queue; insertion
/// order is display order. No cap is imposed on concurrent toasts.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Arc<Mutex<ToastState>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a toast and schedule its removal after `duration` (the default
    /// when `None`). Returns the allocated id synchronously.
    ///
    /// Must be called from within a tokio runtime; the expiry timer runs as
    /// a detached task.
    pub fn show(
        &self,
        kind: ToastKind,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> u64 {
        let duration = duration.unwrap_or(DEFAULT_DURATION);
        let id = {
            let mut state = self.inner.lock().expect("toast queue poisoned");
            state.next_id += 1;
            let id = state.next_id;
            state.toasts.push(Toast {
                id,
                kind,
                title: title.into(),
                message: message.into(),
                duration,
            });
            id
        };

        let queue = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            queue.dismiss(id);
        });

        id
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(ToastKind::Error, ToastKind::Error.default_title(), message, None)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(ToastKind::Success, ToastKind::Success.default_title(), message, None)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.show(ToastKind::Warning, ToastKind::Warning.default_title(), message, None)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(ToastKind::Info, ToastKind::Info.default_title(), message, None)
    }

    /// Remove a toast by id. Unknown ids are ignored.
    pub fn dismiss(&self, id: u64) {
        let mut state = self.inner.lock().expect("toast queue poisoned");
        state.toasts.retain(|toast| toast.id != id);
    }

    /// Snapshot of the queue in insertion order
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.lock().expect("toast queue poisoned").toasts.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("toast queue poisoned").toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
