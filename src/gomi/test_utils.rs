use crate::api::GomiApi;
use crate::catalog::{Catalog, DEFAULT_CENTER};
use crate::clock::FixedClock;
use crate::error::Result;
use crate::map::memory::InMemoryMap;
use crate::map::{MapLayer, DEFAULT_ZOOM};
use crate::notify::Notifier;
use crate::state::CollectionStore;
use crate::store::memory::InMemoryKvStore;
use chrono::NaiveDate;
use tempfile::TempDir;

/// The four built-in stops `a` to `d`.
pub fn abcd_catalog() -> Catalog {
    Catalog::builtin()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Records every alert and question; answers all questions the same way.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub alerts: Vec<String>,
    pub questions: Vec<String>,
    answer: bool,
}

impl RecordingNotifier {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Default::default()
        }
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) -> Result<()> {
        self.alerts.push(message.to_string());
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.questions.push(question.to_string());
        Ok(self.answer)
    }
}

pub struct TestEnv {
    // Keeps the config directory alive for the duration of the test
    pub _temp_dir: TempDir,
    pub api: GomiApi<InMemoryKvStore, InMemoryMap>,
    pub today: NaiveDate,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_kv(InMemoryKvStore::new())
    }

    pub fn with_kv(kv: InMemoryKvStore) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let today = date(2024, 6, 1);
        let store = CollectionStore::load(kv).expect("load state");
        let map = MapLayer::init(InMemoryMap::new(), DEFAULT_CENTER, DEFAULT_ZOOM)
            .expect("init map");
        let api = GomiApi::new(store, abcd_catalog(), map, temp_dir.path())
            .with_clock(FixedClock(today));
        Self {
            _temp_dir: temp_dir,
            api,
            today,
        }
    }
}
