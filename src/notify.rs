//! User-facing notifications.
//!
//! The API client reports failures through a [`Notifier`] so the binary can
//! surface them on the terminal while tests capture them in memory.

use std::sync::Mutex;

/// Severity of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Info,
}

/// A single user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Sink for user-facing messages.
pub trait Notifier: Send + Sync {
    fn toast_error(&self, message: &str);
    fn toast_info(&self, message: &str);
}

/// Emits toasts as `tracing` events. Error toasts log at `warn` since the
/// originating error is also returned to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn toast_error(&self, message: &str) {
        tracing::warn!(toast = "error", "{message}");
    }

    fn toast_info(&self, message: &str) {
        tracing::info!(toast = "info", "{message}");
    }
}

/// Keeps every toast in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the toasts received so far.
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().clone()
    }

    /// Messages of error toasts only.
    pub fn errors(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|t| t.kind == ToastKind::Error)
            .map(|t| t.message.clone())
            .collect()
    }

    fn push(&self, kind: ToastKind, message: &str) {
        self.lock().push(Toast { kind, message: message.to_owned() });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Notifier for MemoryNotifier {
    fn toast_error(&self, message: &str) {
        self.push(ToastKind::Error, message);
    }

    fn toast_info(&self, message: &str) {
        self.push(ToastKind::Info, message);
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
