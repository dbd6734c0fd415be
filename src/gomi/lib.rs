//! # Gomi Architecture
//!
//! Gomi tracks a garbage-collection round over a fixed set of stops: which stops were
//! collected today, when the last full round was completed, and a short history of
//! completed rounds. It is a **library with a CLI client**, not a CLI with some helpers.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints the dashboard, asks questions   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Mutation, persistence, completion check, refresh         │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) and views (view.rs, map/)    │
//! │  - Business logic and pure projections of the state         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Store (state.rs) over a KeyValueStore (store/)       │
//! │  - FileKvStore (production), InMemoryKvStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## External Collaborators
//!
//! Everything outside the process sits behind a trait so the core can be driven in tests:
//!
//! - [`store::KeyValueStore`]: where the state document lives
//! - [`map::MapSurface`]: where markers and the route are drawn
//! - [`notify::Notifier`]: blocking alerts and yes/no questions
//! - [`clock::Clock`]: the date stamped on completion records
//!
//! ## Persisted Format
//!
//! One JSON document under a single key:
//!
//! ```json
//! {"done": ["a", "b"], "history": {"date": "2024-01-01", "count": 4}, "historyList": [...]}
//! ```
//!
//! `history` holds the last completion (or `null`) and `historyList` the full list of
//! completions. Documents without `historyList` are migrated on load.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Collect, reset, completion detection and config
//! - [`state`]: Loading, migrating and saving the collection state
//! - [`store`]: Key-value storage abstraction and implementations
//! - [`catalog`]: The built-in stops
//! - [`model`]: Core data types (`Stop`, `CompletionRecord`, `CollectionState`)
//! - [`view`]: Dashboard projections (progress, pending list, banner, history)
//! - [`map`]: Map scene and surfaces
//! - [`notify`]: Startup alert and the notifier trait
//! - [`config`]: Configuration management
//! - [`init`]: Wiring of the production collaborators
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal output for the binary (not part of the lib API)

pub mod api;
pub mod catalog;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod map;
pub mod model;
pub mod notify;
pub mod state;
pub mod store;
pub mod view;

#[cfg(test)]
pub mod test_utils;
