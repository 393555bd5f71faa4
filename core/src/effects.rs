//! User-facing side effects and the primitives that perform them.
//!
//! # Design
//! The gateway decides *which* effects a failure owes (see
//! [`crate::GatewayError::effects`]) and hands them to these traits.
//! Implementations must return promptly: the gateway does not wait for a
//! toast or a screen transition before returning the error.

/// Icon shown next to a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastIcon {
    None,
    Success,
    Error,
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ClearSession,
    NavigateTo(String),
    Toast { icon: ToastIcon, title: String },
}

/// Short-lived, non-blocking notification.
pub trait Notifier: Send + Sync {
    fn show_toast(&self, icon: ToastIcon, title: &str);
}

/// App-level screen transition.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, url: &str);
}

/// Headless stand-in that records effects in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingUi;

impl Notifier for TracingUi {
    fn show_toast(&self, icon: ToastIcon, title: &str) {
        tracing::info!(?icon, title, "toast");
    }
}

impl Navigator for TracingUi {
    fn navigate_to(&self, url: &str) {
        tracing::info!(url, "navigate");
    }
}
