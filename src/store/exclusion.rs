//! Client-side row exclusion.
//!
//! Excluded ids hide rows from view without touching the backend query.
//! They survive re-fetches; ids missing from a new result set are inert.

use std::collections::BTreeSet;

use crate::models::RowId;

/// Add `id` to the set. Returns false if it was already excluded.
pub fn exclude(excluded: &mut BTreeSet<RowId>, id: RowId) -> bool {
    excluded.insert(id)
}

/// Clear the set, returning how many rows came back into view.
pub fn restore_all(excluded: &mut BTreeSet<RowId>) -> usize {
    let restored = excluded.len();
    excluded.clear();
    restored
}

/// Whether a row is hidden.
pub fn is_excluded(excluded: &BTreeSet<RowId>, id: RowId) -> bool {
    excluded.contains(&id)
}

/// Excluded ids that match nothing in `present`.
pub fn stale_ids(
    excluded: &BTreeSet<RowId>,
    present: impl IntoIterator<Item = RowId>,
) -> Vec<RowId> {
    let present: BTreeSet<RowId> = present.into_iter().collect();
    excluded.difference(&present).copied().collect()
}
