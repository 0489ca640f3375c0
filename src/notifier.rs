/*!
 * Notification sinks.
 *
 * A document reports status changes and failures to every registered
 * notifier. What a notifier does with the message (status bar, alert box,
 * log line) is up to the implementor.
 */

use std::sync::Arc;

use log::{error, info};

/// Receiver for document status messages
pub trait Notifier: Send + Sync {
    /// Routine status update, e.g. "Subtitles loaded successfully"
    fn notify(&self, message: &str);

    /// Failure that stopped the operation in progress
    fn notify_severe(&self, message: &str);
}

/// Notifier that writes every message to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!("{}", message);
    }

    fn notify_severe(&self, message: &str) {
        error!("{}", message);
    }
}

/// Registered notifiers of a document, deduplicated by identity
#[derive(Default, Clone)]
pub struct Notifiers {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl Notifiers {
    /// Register a sink; registering the same `Arc` twice has no effect
    pub fn add(&mut self, notifier: Arc<dyn Notifier>) {
        if !self.sinks.iter().any(|n| Arc::ptr_eq(n, &notifier)) {
            self.sinks.push(notifier);
        }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn notify(&self, message: &str) {
        for sink in &self.sinks {
            sink.notify(message);
        }
    }

    pub fn notify_severe(&self, message: &str) {
        for sink in &self.sinks {
            sink.notify_severe(message);
        }
    }
}

impl std::fmt::Debug for Notifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifiers")
            .field("count", &self.sinks.len())
            .finish()
    }
}
