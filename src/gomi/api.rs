//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point for
//! every gomi operation, whatever the UI.
//!
//! ## Control Flow
//!
//! Every state-changing call runs the same sequence before returning:
//!
//! ```text
//! user action ─► state store mutation ─► persist ─► completion check ─► refresh
//! ```
//!
//! "Refresh" rebuilds the [`Dashboard`](crate::view::Dashboard) and redraws the whole map.
//! Calls are synchronous and never interleave; the facade is the single writer of the
//! state it owns.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Printing**: Results are data; clients decide how they look
//!
//! The one interaction it does mediate is the reset confirmation, through the
//! [`Notifier`] passed in by the client.
//!
//! ## Generic Over Collaborators
//!
//! `GomiApi<K: KeyValueStore, M: MapSurface>`:
//! - Production: `GomiApi<FileKvStore, GeoJsonMap>`
//! - Testing: `GomiApi<InMemoryKvStore, InMemoryMap>`

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::commands;
use crate::error::Result;
use crate::map::{self, MapLayer, MapSurface};
use crate::model::{CollectionState, Stop};
use crate::notify::Notifier;
use crate::state::CollectionStore;
use crate::store::KeyValueStore;
use crate::view::{self, DEFAULT_HISTORY_LIMIT};
use std::path::PathBuf;
use tracing::warn;

pub struct GomiApi<K: KeyValueStore, M: MapSurface> {
    store: CollectionStore<K>,
    catalog: Catalog,
    map: MapLayer<M>,
    clock: Box<dyn Clock>,
    history_limit: usize,
    data_dir: PathBuf,
}

impl<K: KeyValueStore, M: MapSurface> GomiApi<K, M> {
    pub fn new(
        store: CollectionStore<K>,
        catalog: Catalog,
        map: MapLayer<M>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            catalog,
            map,
            clock: Box::new(SystemClock),
            history_limit: DEFAULT_HISTORY_LIMIT,
            data_dir: data_dir.into(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Runs the completion check and redraws everything.
    pub fn refresh(&mut self) -> Result<CmdResult> {
        self.refreshed(CmdResult::default())
    }

    pub fn collect<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        let result = commands::collect::run(&mut self.store, &self.catalog, ids)?;
        self.refreshed(result)
    }

    /// Asks `notifier` for confirmation unless `skip_confirm` is set. A "no" leaves the
    /// state untouched and is not an error.
    pub fn reset<N: Notifier>(&mut self, notifier: &mut N, skip_confirm: bool) -> Result<CmdResult> {
        if !skip_confirm && !notifier.confirm(commands::reset::CONFIRM_QUESTION)? {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info("Reset cancelled."));
            return Ok(result);
        }
        let result = commands::reset::run(&mut self.store)?;
        self.refreshed(result)
    }

    pub fn stops(&self) -> CmdResult {
        CmdResult::default().with_listed_stops(view::stop_statuses(&self.catalog, self.state()))
    }

    pub fn history(&self, limit: Option<usize>) -> CmdResult {
        let limit = limit.unwrap_or(self.history_limit);
        CmdResult::default().with_history(view::recent_history(self.state(), limit))
    }

    pub fn pending_stops(&self) -> Vec<Stop> {
        view::pending_stops(&self.catalog, self.state())
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.data_dir, action)
    }

    /// Redraws the map from the current state. Unlike a refresh, a failed write is an error.
    pub fn redraw_map(&mut self) -> Result<()> {
        self.map.redraw(&map::scene(&self.catalog, self.store.state()))
    }

    pub fn state(&self) -> &CollectionState {
        self.store.state()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn map(&self) -> &MapLayer<M> {
        &self.map
    }

    fn refreshed(&mut self, mut result: CmdResult) -> Result<CmdResult> {
        let today = self.clock.today();
        if let Some(record) = commands::complete::run(&mut self.store, &self.catalog, today)? {
            result.add_message(CmdMessage::success(format!(
                "All {} stops collected. Completion recorded for {}.",
                record.count, record.date
            )));
            result.completion = Some(record);
        }

        // The state is already saved at this point; a stale map is only worth a warning.
        if let Err(e) = self.redraw_map() {
            warn!(error = %e, "map redraw failed");
            result.add_message(CmdMessage::warning(format!("Map not updated: {}", e)));
        }
        Ok(result.with_dashboard(view::dashboard(
            &self.catalog,
            self.store.state(),
            self.history_limit,
        )))
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
