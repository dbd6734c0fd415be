use crate::catalog::Catalog;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GomiError, Result};
use crate::state::CollectionStore;
use crate::store::KeyValueStore;

/// Marks every stop in `ids` collected.
///
/// All ids are checked against the catalog before anything is written, so a typo never
/// leaves a half-applied batch behind.
pub fn run<K: KeyValueStore, I: AsRef<str>>(
    store: &mut CollectionStore<K>,
    catalog: &Catalog,
    ids: &[I],
) -> Result<CmdResult> {
    let stops = ids
        .iter()
        .map(|id| {
            catalog
                .get(id.as_ref())
                .ok_or_else(|| GomiError::UnknownStop(id.as_ref().to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    for stop in stops {
        if store.mark_collected(&stop.id)? {
            result.add_message(CmdMessage::success(format!(
                "Collected ({}): {}",
                stop.id, stop.name
            )));
        } else {
            result.add_message(CmdMessage::info(format!(
                "Already collected ({}): {}",
                stop.id, stop.name
            )));
        }
    }
    Ok(result)
}
