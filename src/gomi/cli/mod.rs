//! # CLI Behavior
//!
//! This is **one possible UI client** for gomi, not the application itself.
//! For the overall architecture, see the crate-level documentation of the `gomi` library.
//!
//! ### Naked Execution (`gomi`)
//!
//! Running `gomi` with no arguments is `gomi status`: the dashboard is printed, the map
//! file is rewritten, and if stops are still pending a one-off alert lists them after a
//! short delay. `--no-alert` skips the alert; when stdin is not a terminal the alert is
//! printed without waiting for Enter.
//!
//! ### Collecting
//!
//! `gomi collect a b` (or `gomi c a b`) marks stops and prints the refreshed dashboard.
//! Unknown ids fail the whole command before anything is saved.
//!
//! ### Reset
//!
//! `gomi reset` asks before wiping everything; `-y` skips the question.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch and per-command handlers
//! - `render`: Output formatting (dashboard, stop list, history, config)
//! - `setup`: Argument parsing via clap
//! - `notify`: Terminal alerts and confirmations

mod commands;
mod notify;
mod render;
pub mod setup;

pub use commands::run;
