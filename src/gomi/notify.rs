//! # Notifications
//!
//! The notification UI is an external collaborator behind [`Notifier`]. It is used for two
//! things: the startup alert listing pending stops, and the yes/no gate in front of a
//! reset.
//!
//! [`StartupAlert`] fires at most once per process. It waits a short delay first so the
//! map has been drawn when the (blocking) alert appears. The delay is a plain sleep on the
//! calling thread; the alert never touches the collection state.

use crate::error::Result;
use crate::model::Stop;
use std::time::Duration;
use tracing::debug;

/// Delay before the startup alert unless configured otherwise.
pub const DEFAULT_ALERT_DELAY: Duration = Duration::from_millis(500);

pub trait Notifier {
    /// Shows a message and blocks until it is dismissed.
    fn alert(&mut self, message: &str) -> Result<()>;

    /// Asks a yes/no question and blocks for the answer.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Text of the startup alert, or `None` when nothing is pending.
pub fn pending_message(pending: &[Stop]) -> Option<String> {
    if pending.is_empty() {
        return None;
    }
    let lines: Vec<String> = pending.iter().map(|s| format!("・{}", s.name)).collect();
    Some(format!(
        "There are {} uncollected stops:\n{}",
        pending.len(),
        lines.join("\n")
    ))
}

pub struct StartupAlert {
    delay: Duration,
    fired: bool,
}

impl Default for StartupAlert {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_DELAY)
    }
}

impl StartupAlert {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Alerts about `pending` stops the first time it is called; later calls do nothing.
    /// Returns whether an alert was shown.
    pub fn notify<N: Notifier>(&mut self, notifier: &mut N, pending: &[Stop]) -> Result<bool> {
        if self.fired {
            return Ok(false);
        }
        self.fired = true;

        let Some(message) = pending_message(pending) else {
            debug!("no pending stops, skipping startup alert");
            return Ok(false);
        };
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        notifier.alert(&message)?;
        Ok(true)
    }
}
