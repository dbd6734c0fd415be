//! # Command Layer
//!
//! The business logic of gomi. Each command lives in its own submodule and works on the
//! state store and the catalog, returning plain Rust values.
//!
//! Commands never print, never prompt and never exit. Anything that needs the user (the
//! reset confirmation, the startup alert) is handled by the API or the client.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], which carries:
//! - `dashboard`: the refreshed view after a state change
//! - `listed_stops`: stops with their status (for `stops`)
//! - `history`: a history view with an explicit limit (for `history`)
//! - `completion`: the completion record, if this call completed the cycle
//! - `config`: configuration data (for `config`)
//! - `messages`: structured messages with levels (info, success, warning, error)
//!
//! ## Command Modules
//!
//! - [`collect`]: Mark stops collected
//! - [`reset`]: Wipe the collection state
//! - [`complete`]: Completion detection
//! - [`config`]: Show and change configuration

use crate::config::GomiConfig;
use crate::model::CompletionRecord;
use crate::view::{Dashboard, HistoryView, StopStatus};
use serde::Serialize;

pub mod collect;
pub mod complete;
pub mod config;
pub mod reset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub dashboard: Option<Dashboard>,
    pub listed_stops: Vec<StopStatus>,
    pub history: Option<HistoryView>,
    pub completion: Option<CompletionRecord>,
    pub config: Option<GomiConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_dashboard(mut self, dashboard: Dashboard) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    pub fn with_listed_stops(mut self, stops: Vec<StopStatus>) -> Self {
        self.listed_stops = stops;
        self
    }

    pub fn with_history(mut self, history: HistoryView) -> Self {
        self.history = Some(history);
        self
    }
}
