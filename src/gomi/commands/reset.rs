use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::state::CollectionStore;
use crate::store::KeyValueStore;

/// Question asked before a reset.
pub const CONFIRM_QUESTION: &str = "Reset? All progress and history will be cleared.";

/// Wipes the done set, the last completion and the history.
///
/// **Important**: This function does NOT ask for confirmation. Callers gate it behind a
/// yes/no answer (see [`crate::api::GomiApi::reset`]).
pub fn run<K: KeyValueStore>(store: &mut CollectionStore<K>) -> Result<CmdResult> {
    let cleared = store.state().done.len();
    let entries = store.state().history.len();
    store.reset()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Reset: cleared {} collected stops and {} history entries",
        cleared, entries
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CollectionState, CompletionRecord};
    use crate::store::memory::InMemoryKvStore;
    use crate::test_utils::date;

    #[test]
    fn clears_everything_and_persists() {
        let mut store = CollectionStore::load(InMemoryKvStore::new()).unwrap();
        store.mark_collected("a").unwrap();
        store.mark_collected("b").unwrap();
        store
            .record_completion(CompletionRecord::new(date(2024, 6, 1), 2))
            .unwrap();
        let writes = store.kv().writes();

        let result = run(&mut store).unwrap();

        assert_eq!(store.state(), &CollectionState::default());
        assert_eq!(store.kv().writes(), writes + 1);
        assert_eq!(
            result.messages[0].content,
            "Reset: cleared 2 collected stops and 1 history entries"
        );
    }
}
