//! User-facing notification sink
//!
//! The remote-call sites never let an error escape to the caller raw; they
//! convert every failure into a notification plus a safe fallback state.
//! A front end plugs in its own toast implementation; the default logs
//! through `tracing`.

use std::sync::Arc;

/// Sink for user-facing notifications
pub trait Notify: Send + Sync {
    fn success(&self, message: &str);
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink that logs notifications through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotify;

impl Notify for TracingNotify {
    fn success(&self, message: &str) {
        tracing::info!(kind = "success", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(kind = "info", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(kind = "warning", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(kind = "error", "{message}");
    }
}

/// Shared notification handle
pub type NotifyHandle = Arc<dyn Notify>;
